use crate::config::{StaggeredConfig, UniformGridConfig};
use crate::error::LayoutError;
use crate::occupancy::FlowDirection;
use crate::staggered::StaggeredPanel;
use crate::uniform_grid::UniformGrid;

/// Days in a calendar row.
pub const DAYS_PER_WEEK: usize = 7;

/// Ready-made panel setups for common screens.
pub struct LayoutPatterns;

impl LayoutPatterns {
    /// Seven columns with the first day of the month shifted to
    /// `first_weekday` (0 = first column). Rows grow with the day count.
    pub fn calendar_month(first_weekday: usize) -> UniformGrid {
        UniformGrid::from_config(&Self::calendar_month_config(first_weekday, FlowDirection::LeftToRight))
    }

    /// Calendar for right-to-left locales: day one sits `first_weekday`
    /// columns in from the right edge.
    pub fn calendar_month_rtl(first_weekday: usize) -> UniformGrid {
        UniformGrid::from_config(&Self::calendar_month_config(first_weekday, FlowDirection::RightToLeft))
    }

    pub fn calendar_month_config(first_weekday: usize, flow_direction: FlowDirection) -> UniformGridConfig {
        UniformGridConfig {
            rows: 0,
            columns: DAYS_PER_WEEK,
            // Reversed scans already count this from the right edge.
            first_column: Some(first_weekday % DAYS_PER_WEEK),
            flow_direction,
        }
    }

    /// Masonry wall of pictures, each column `column_width` wide.
    pub fn photo_wall(column_width: f32) -> Result<StaggeredPanel, LayoutError> {
        StaggeredPanel::from_config(&StaggeredConfig {
            desired_column_width: column_width,
        })
    }

    /// Grid that stays as close to square as the item count allows.
    pub fn square_tiles() -> UniformGrid {
        UniformGrid::from_config(&UniformGridConfig::default())
    }
}
