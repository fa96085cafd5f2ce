use thiserror::Error;

/// Errors raised while configuring panels.
///
/// Layout passes themselves never fail; they report degraded output through
/// [`crate::LayoutReport`] instead.
#[derive(Debug, Error)]
pub enum LayoutError {
    /// Column widths must be finite and strictly positive.
    #[error("invalid column width: {0}")]
    InvalidColumnWidth(f32),

    #[error("failed to parse panel configuration: {0}")]
    Config(#[from] toml::de::Error),

    #[error("failed to read panel configuration: {0}")]
    Io(#[from] std::io::Error),
}
