//! Staggered (masonry) layout: fixed-width columns, each item dropped into
//! whichever column is currently shortest.

use gui_reactive::{Effect, Signal};
use taffy::{AvailableSpace, Size};
use tracing::{debug, warn};

use crate::config::{validate_column_width, StaggeredConfig};
use crate::error::LayoutError;
use crate::geometry::{definite, Bounds};
use crate::invalidation::{InvalidationType, LayoutInvalidation};
use crate::item::LayoutItem;
use crate::panel::{Arrangement, Degradation, LayoutReport, Panel};

/// Running height of every column during one pass.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ColumnHeights {
    heights: Vec<f32>,
}

impl ColumnHeights {
    pub fn new(columns: usize) -> Self {
        Self {
            heights: vec![0.0; columns],
        }
    }

    pub fn len(&self) -> usize {
        self.heights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heights.is_empty()
    }

    /// Index of the shortest column; the leftmost wins a tie.
    pub fn shortest(&self) -> Option<usize> {
        let (&first, rest) = self.heights.split_first()?;
        let mut index = 0;
        let mut height = first;
        for (offset, &candidate) in rest.iter().enumerate() {
            if candidate < height {
                index = offset + 1;
                height = candidate;
            }
        }
        Some(index)
    }

    pub fn height(&self, column: usize) -> f32 {
        self.heights.get(column).copied().unwrap_or(0.0)
    }

    /// Grow `column` by `amount`. Negative amounts are ignored.
    pub fn push(&mut self, column: usize, amount: f32) {
        if let Some(height) = self.heights.get_mut(column) {
            *height += amount.max(0.0);
        }
    }

    pub fn max(&self) -> f32 {
        self.heights.iter().copied().fold(0.0, f32::max)
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.heights
    }
}

/// Number of columns of width `column_width` that fit in `container_width`,
/// never more than there are items to fill them. Unbounded widths give every
/// item its own column.
pub fn column_count(column_width: f32, container_width: f32, item_count: usize) -> usize {
    if !(column_width.is_finite() && column_width > 0.0) {
        return 0;
    }
    let cap = item_count.max(1);
    if !container_width.is_finite() {
        return cap;
    }
    let fitting = (container_width.max(0.0) / column_width).floor();
    if fitting >= cap as f32 {
        cap
    } else {
        fitting as usize
    }
}

/// Output of [`stack_items`].
#[derive(Debug, Clone, PartialEq)]
pub struct StaggeredAllocation {
    pub columns: usize,
    /// One entry per input size; empty when no column fits.
    pub placements: Vec<Bounds>,
    pub column_heights: ColumnHeights,
    pub size: Size<f32>,
}

/// Place items of the given sizes into columns.
///
/// Items wider than a column are scaled down to the column width, keeping
/// their aspect ratio. The container keeps its width; its height is that of
/// the tallest column.
pub fn stack_items(column_width: f32, container_width: f32, sizes: &[Size<f32>]) -> StaggeredAllocation {
    let columns = column_count(column_width, container_width, sizes.len());
    let mut column_heights = ColumnHeights::new(columns);
    let mut placements = Vec::with_capacity(if columns == 0 { 0 } else { sizes.len() });

    if columns > 0 {
        for size in sizes {
            let Some(column) = column_heights.shortest() else {
                break;
            };

            let (width, height) = fit_to_column(*size, column_width);
            placements.push(Bounds::new(
                column as f32 * column_width,
                column_heights.height(column),
                width,
                height,
            ));
            column_heights.push(column, height);
        }
    }

    let width = if container_width.is_finite() {
        container_width
    } else {
        columns as f32 * column_width
    };

    StaggeredAllocation {
        columns,
        placements,
        size: Size { width, height: column_heights.max() },
        column_heights,
    }
}

fn fit_to_column(size: Size<f32>, column_width: f32) -> (f32, f32) {
    if size.width > column_width {
        let scale = column_width / size.width;
        (column_width, size.height * scale)
    } else {
        (size.width, size.height)
    }
}

/// Masonry panel.
pub struct StaggeredPanel {
    desired_column_width: Signal<f32>,
    /// Column width captured by the last measure, reused by arrange.
    measured_column_width: Option<f32>,
    invalidation: LayoutInvalidation,
    report: LayoutReport,
    _watchers: Vec<Effect>,
}

impl StaggeredPanel {
    pub fn new() -> Self {
        Self::build(StaggeredConfig::default().desired_column_width)
    }

    pub fn from_config(config: &StaggeredConfig) -> Result<Self, LayoutError> {
        config.validate()?;
        Ok(Self::build(config.desired_column_width))
    }

    fn build(desired_column_width: f32) -> Self {
        let desired_column_width = Signal::new(desired_column_width);
        let invalidation = LayoutInvalidation::new();
        let watchers = vec![invalidation.watch(&desired_column_width, InvalidationType::Measure)];

        Self {
            desired_column_width,
            measured_column_width: None,
            invalidation,
            report: LayoutReport::default(),
            _watchers: watchers,
        }
    }

    pub fn with_desired_column_width(self, width: f32) -> Result<Self, LayoutError> {
        self.set_desired_column_width(width)?;
        Ok(self)
    }

    pub fn set_desired_column_width(&self, width: f32) -> Result<(), LayoutError> {
        validate_column_width(width)?;
        self.desired_column_width.set_if_changed(width);
        Ok(())
    }

    pub fn desired_column_width(&self) -> f32 {
        self.desired_column_width.get()
    }

    /// Shared handle; setting it from elsewhere invalidates this panel.
    /// Invalid widths written through the handle place nothing.
    pub fn desired_column_width_signal(&self) -> Signal<f32> {
        self.desired_column_width.clone()
    }

    pub fn config(&self) -> StaggeredConfig {
        StaggeredConfig {
            desired_column_width: self.desired_column_width.get(),
        }
    }

    fn set_report(&mut self, placed: usize, unplaced: Vec<usize>, degradation: Option<Degradation>) {
        if let Some(degradation) = &degradation {
            warn!(%degradation, "staggered panel left items unplaced");
        }
        self.report = LayoutReport { placed, unplaced, degradation };
    }
}

impl Panel for StaggeredPanel {
    fn measure<I: LayoutItem>(&mut self, items: &mut [I], available: Size<AvailableSpace>) -> Size<f32> {
        let column_width = self.desired_column_width.get();
        self.measured_column_width = Some(column_width);
        self.invalidation.mark_measured();

        let available_width = definite(available.width).unwrap_or(f32::INFINITY);
        let columns = column_count(column_width, available_width, items.len());

        if columns == 0 {
            let degradation = (!items.is_empty()).then_some(Degradation::NoColumns { column_width, available_width });
            self.set_report(0, (0..items.len()).collect(), degradation);
            let width = if available_width.is_finite() { available_width } else { 0.0 };
            return Size { width, height: 0.0 };
        }

        let proposal = Size {
            width: AvailableSpace::Definite(column_width),
            height: available.height,
        };

        let mut column_heights = ColumnHeights::new(columns);
        for item in items.iter_mut() {
            let Some(column) = column_heights.shortest() else {
                break;
            };
            let desired = item.measure(proposal);
            column_heights.push(column, desired.height);
        }

        let width = if available_width.is_finite() {
            available_width
        } else {
            columns as f32 * column_width
        };
        let height = column_heights.max();

        self.set_report(items.len(), Vec::new(), None);
        debug!(columns, column_width, width, height, "staggered panel measured");

        Size { width, height }
    }

    fn arrange<I: LayoutItem>(&mut self, items: &mut [I], final_size: Size<f32>) -> Arrangement {
        let column_width = self
            .measured_column_width
            .unwrap_or_else(|| self.desired_column_width.get());
        self.invalidation.mark_arranged();

        let sizes: Vec<Size<f32>> = items.iter().map(|item| item.desired_size()).collect();
        let allocation = stack_items(column_width, final_size.width, &sizes);

        let mut bounds = vec![None; items.len()];
        for (index, placement) in allocation.placements.iter().enumerate() {
            items[index].arrange(*placement);
            bounds[index] = Some(*placement);
        }

        let placed = allocation.placements.len();
        let degradation = (allocation.columns == 0 && !items.is_empty()).then_some(Degradation::NoColumns {
            column_width,
            available_width: final_size.width,
        });
        self.set_report(placed, (placed..items.len()).collect(), degradation);

        debug!(
            columns = allocation.columns,
            column_width,
            placed,
            height = allocation.size.height,
            "staggered panel arranged"
        );

        Arrangement { size: final_size, bounds }
    }

    fn invalidation(&self) -> &LayoutInvalidation {
        &self.invalidation
    }

    fn report(&self) -> &LayoutReport {
        &self.report
    }
}

impl Default for StaggeredPanel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{Sizing, StaticItem};
    use taffy::prelude::TaffyMaxContent;

    fn size(width: f32, height: f32) -> Size<f32> {
        Size { width, height }
    }

    #[test]
    fn test_shortest_prefers_leftmost() {
        let mut heights = ColumnHeights::new(3);
        assert_eq!(heights.shortest(), Some(0));
        heights.push(0, 10.0);
        assert_eq!(heights.shortest(), Some(1));
        heights.push(1, 10.0);
        heights.push(2, 10.0);
        assert_eq!(heights.shortest(), Some(0));
        assert_eq!(ColumnHeights::new(0).shortest(), None);
    }

    #[test]
    fn test_equal_items_fill_columns_left_to_right() {
        let sizes = vec![size(100.0, 50.0); 4];
        let allocation = stack_items(100.0, 300.0, &sizes);
        let columns: Vec<f32> = allocation.placements.iter().map(|b| b.x).collect();
        assert_eq!(columns, vec![0.0, 100.0, 200.0, 0.0]);
        assert_eq!(allocation.placements[3].y, 50.0);
        assert_eq!(allocation.size, size(300.0, 100.0));
    }

    #[test]
    fn test_item_goes_to_shortest_column() {
        let sizes = vec![size(100.0, 300.0), size(100.0, 50.0), size(100.0, 50.0)];
        let allocation = stack_items(100.0, 200.0, &sizes);
        assert_eq!(allocation.placements[2], Bounds::new(100.0, 50.0, 100.0, 50.0));
        assert_eq!(allocation.column_heights.as_slice(), &[300.0, 100.0]);
    }

    #[test]
    fn test_wide_item_is_scaled_to_column() {
        let allocation = stack_items(250.0, 500.0, &[size(400.0, 200.0)]);
        assert_eq!(allocation.placements[0], Bounds::new(0.0, 0.0, 250.0, 125.0));
        assert_eq!(allocation.size.height, 125.0);
    }

    #[test]
    fn test_narrow_container_places_nothing() {
        let allocation = stack_items(250.0, 200.0, &[size(100.0, 100.0)]);
        assert_eq!(allocation.columns, 0);
        assert!(allocation.placements.is_empty());
        assert_eq!(allocation.size, size(200.0, 0.0));
    }

    #[test]
    fn test_column_count() {
        assert_eq!(column_count(250.0, 1000.0, 10), 4);
        assert_eq!(column_count(250.0, 999.0, 10), 3);
        assert_eq!(column_count(250.0, 1000.0, 2), 2);
        assert_eq!(column_count(250.0, f32::INFINITY, 5), 5);
        assert_eq!(column_count(0.0, 1000.0, 5), 0);
        assert_eq!(column_count(f32::NAN, 1000.0, 5), 0);
    }

    #[test]
    fn test_panel_round_trip() {
        let mut panel = StaggeredPanel::new().with_desired_column_width(100.0).unwrap();
        let mut items = vec![
            StaticItem::new(100.0, 80.0),
            StaticItem::new(100.0, 40.0),
            StaticItem::new(200.0, 100.0).with_sizing(Sizing::FitWidth),
        ];

        let desired = panel.measure(
            &mut items,
            Size { width: AvailableSpace::Definite(250.0), height: AvailableSpace::MaxContent },
        );
        assert_eq!(desired, size(250.0, 90.0));

        let arrangement = panel.arrange(&mut items, desired);
        assert_eq!(arrangement.bounds[2], Some(Bounds::new(100.0, 40.0, 100.0, 50.0)));
        assert_eq!(items[0].arranged(), Some(Bounds::new(0.0, 0.0, 100.0, 80.0)));
        assert!(!panel.report().is_degraded());
    }

    #[test]
    fn test_panel_too_narrow_is_degraded() {
        let mut panel = StaggeredPanel::new();
        let mut items = vec![StaticItem::new(100.0, 100.0)];

        let desired = panel.measure(
            &mut items,
            Size { width: AvailableSpace::Definite(100.0), height: AvailableSpace::MaxContent },
        );
        assert_eq!(desired, size(100.0, 0.0));
        assert!(panel.report().is_degraded());

        let arrangement = panel.arrange(&mut items, desired);
        assert_eq!(arrangement.bounds, vec![None]);
        assert_eq!(items[0].arranged(), None);
        assert_eq!(panel.report().unplaced, vec![0]);
    }

    #[test]
    fn test_empty_narrow_panel_is_not_degraded() {
        let mut panel = StaggeredPanel::new();
        let mut items: Vec<StaticItem> = Vec::new();

        let desired = panel.measure(
            &mut items,
            Size { width: AvailableSpace::Definite(100.0), height: AvailableSpace::MaxContent },
        );
        assert!(!panel.report().is_degraded());

        panel.arrange(&mut items, desired);
        assert!(!panel.report().is_degraded());
    }

    #[test]
    fn test_unbounded_width_uses_one_column_per_item() {
        let mut panel = StaggeredPanel::new();
        let mut items = vec![StaticItem::new(100.0, 100.0), StaticItem::new(100.0, 60.0)];
        let desired = panel.measure(&mut items, Size::MAX_CONTENT);
        assert_eq!(desired, size(500.0, 100.0));
    }

    #[test]
    fn test_rejects_invalid_width() {
        let panel = StaggeredPanel::new();
        assert!(panel.set_desired_column_width(0.0).is_err());
        assert!(panel.set_desired_column_width(f32::INFINITY).is_err());
        assert_eq!(panel.desired_column_width(), 250.0);
    }

    #[test]
    fn test_width_change_invalidates() {
        let mut panel = StaggeredPanel::new();
        let mut items = vec![StaticItem::new(10.0, 10.0)];
        let desired = panel.measure(&mut items, Size::MAX_CONTENT);
        panel.arrange(&mut items, desired);
        assert!(panel.invalidation().is_clean());

        panel.set_desired_column_width(120.0).unwrap();
        assert!(panel.invalidation().needs_measure());
    }
}
