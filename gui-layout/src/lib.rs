pub mod config;
pub mod dimensions;
pub mod error;
pub mod geometry;
pub mod invalidation;
pub mod item;
pub mod layout_cache;
pub mod layout_host;
pub mod layout_patterns;
pub mod occupancy;
pub mod panel;
pub mod staggered;
pub mod tracks;
pub mod uniform_grid;

pub use config::{PanelConfig, StaggeredConfig, UniformGridConfig, DEFAULT_COLUMN_WIDTH};
pub use dimensions::GridDimensions;
pub use error::LayoutError;
pub use geometry::Bounds;
pub use invalidation::{InvalidationType, LayoutInvalidation};
pub use item::{AutoLayout, GridAttachment, LayoutItem, Sizing, StaticItem};
pub use layout_cache::{merge_regions, ArrangeCache, CacheStats};
pub use layout_host::{LayoutHost, LayoutPass};
pub use layout_patterns::LayoutPatterns;
pub use occupancy::{Cell, FlowDirection, Footprint, FreeSlots, OccupancyGrid};
pub use panel::{Arrangement, Degradation, LayoutReport, Panel};
pub use staggered::{column_count, stack_items, ColumnHeights, StaggeredAllocation, StaggeredPanel};
pub use tracks::{TrackDefinition, TrackDefinitions, TrackOrigin};
pub use uniform_grid::{allocate_cells, CellPlacement, GridAllocation, UniformGrid};

// Re-export common types from taffy
pub use taffy::{AvailableSpace, Point, Size};
