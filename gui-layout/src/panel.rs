use taffy::{AvailableSpace, Size};

use crate::geometry::Bounds;
use crate::invalidation::LayoutInvalidation;
use crate::item::LayoutItem;

/// A container that places its items in two passes.
///
/// Hosts call [`Panel::measure`] and then [`Panel::arrange`] with the same
/// item slice. Both passes recompute placement from scratch.
pub trait Panel {
    /// Measure every item and return the size the panel would like.
    fn measure<I: LayoutItem>(&mut self, items: &mut [I], available: Size<AvailableSpace>) -> Size<f32>;

    /// Position every placeable item inside `final_size`.
    fn arrange<I: LayoutItem>(&mut self, items: &mut [I], final_size: Size<f32>) -> Arrangement;

    fn invalidation(&self) -> &LayoutInvalidation;

    /// Outcome of the most recent pass.
    fn report(&self) -> &LayoutReport;
}

/// Result of an arrange pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Arrangement {
    pub size: Size<f32>,
    /// One entry per input item; `None` when the item was not positioned.
    pub bounds: Vec<Option<Bounds>>,
}

impl Default for Arrangement {
    fn default() -> Self {
        Self { size: Size::ZERO, bounds: Vec::new() }
    }
}

impl Arrangement {
    pub fn placed(&self) -> impl Iterator<Item = (usize, Bounds)> + '_ {
        self.bounds
            .iter()
            .enumerate()
            .filter_map(|(index, bounds)| bounds.map(|bounds| (index, bounds)))
    }

    pub fn placed_count(&self) -> usize {
        self.bounds.iter().filter(|bounds| bounds.is_some()).count()
    }
}

/// Non-fatal conditions that leave some items without a position.
#[derive(Debug, Clone, PartialEq)]
pub enum Degradation {
    /// More auto-placed items than free cells.
    SlotsExhausted { requested: usize, free: usize },
    /// The container is narrower than one column.
    NoColumns { column_width: f32, available_width: f32 },
}

impl std::fmt::Display for Degradation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Degradation::SlotsExhausted { requested, free } => {
                write!(f, "{} auto-placed items but only {} free cells", requested, free)
            }
            Degradation::NoColumns { column_width, available_width } => {
                write!(f, "width {} cannot fit a column of width {}", available_width, column_width)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct LayoutReport {
    pub placed: usize,
    /// Indices (into the item slice) of visible items left unplaced.
    pub unplaced: Vec<usize>,
    pub degradation: Option<Degradation>,
}

impl LayoutReport {
    pub fn is_degraded(&self) -> bool {
        self.degradation.is_some()
    }
}
