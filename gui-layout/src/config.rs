use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

use crate::error::LayoutError;
use crate::occupancy::FlowDirection;

/// Column width used when none is configured.
pub const DEFAULT_COLUMN_WIDTH: f32 = 250.0;

/// Settings of a [`crate::UniformGrid`]. Zero rows or columns means "infer".
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UniformGridConfig {
    pub rows: usize,
    pub columns: usize,
    /// Column of the first auto-placed item in the first row.
    pub first_column: Option<usize>,
    pub flow_direction: FlowDirection,
}

/// Settings of a [`crate::StaggeredPanel`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StaggeredConfig {
    pub desired_column_width: f32,
}

impl Default for StaggeredConfig {
    fn default() -> Self {
        Self {
            desired_column_width: DEFAULT_COLUMN_WIDTH,
        }
    }
}

impl StaggeredConfig {
    pub fn validate(&self) -> Result<(), LayoutError> {
        validate_column_width(self.desired_column_width)
    }
}

pub(crate) fn validate_column_width(width: f32) -> Result<(), LayoutError> {
    if width.is_finite() && width > 0.0 {
        Ok(())
    } else {
        Err(LayoutError::InvalidColumnWidth(width))
    }
}

/// Either panel, tagged by `kind` in TOML:
///
/// ```toml
/// kind = "staggered"
/// desired_column_width = 180.0
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PanelConfig {
    UniformGrid(UniformGridConfig),
    Staggered(StaggeredConfig),
}

impl PanelConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self, LayoutError> {
        let config: PanelConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load_from_path(path: &Path) -> Result<Self, LayoutError> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn validate(&self) -> Result<(), LayoutError> {
        match self {
            PanelConfig::UniformGrid(_) => Ok(()),
            PanelConfig::Staggered(config) => config.validate(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_uniform_grid() {
        let config = PanelConfig::from_toml_str(
            r#"
            kind = "uniform_grid"
            columns = 7
            first_column = 3
            flow_direction = "right_to_left"
            "#,
        )
        .unwrap();

        assert_eq!(
            config,
            PanelConfig::UniformGrid(UniformGridConfig {
                rows: 0,
                columns: 7,
                first_column: Some(3),
                flow_direction: FlowDirection::RightToLeft,
            })
        );
    }

    #[test]
    fn test_staggered_defaults() {
        let config = PanelConfig::from_toml_str(r#"kind = "staggered""#).unwrap();
        assert_eq!(config, PanelConfig::Staggered(StaggeredConfig::default()));
    }

    #[test]
    fn test_rejects_bad_column_width() {
        let err = PanelConfig::from_toml_str(
            r#"
            kind = "staggered"
            desired_column_width = -4.0
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, LayoutError::InvalidColumnWidth(width) if width == -4.0));
    }

    #[test]
    fn test_rejects_unknown_kind() {
        let err = PanelConfig::from_toml_str(r#"kind = "wrap_panel""#).unwrap_err();
        assert!(matches!(err, LayoutError::Config(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = PanelConfig::load_from_path(Path::new("does/not/exist.toml")).unwrap_err();
        assert!(matches!(err, LayoutError::Io(_)));
    }
}
