//! Uniform grid: equal-sized cells with automatic placement.
//!
//! Items that declare a cell keep it and reserve their whole span. Every other
//! visible item takes the next free cell in reading order.

use gui_reactive::{Effect, Signal};
use taffy::{AvailableSpace, Size};
use tracing::{debug, warn};

use crate::config::UniformGridConfig;
use crate::dimensions::GridDimensions;
use crate::geometry::Bounds;
use crate::invalidation::{InvalidationType, LayoutInvalidation};
use crate::item::{GridAttachment, LayoutItem};
use crate::occupancy::{FlowDirection, Footprint, OccupancyGrid};
use crate::panel::{Arrangement, Degradation, LayoutReport, Panel};
use crate::tracks::TrackDefinitions;

/// Cell range assigned to one item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellPlacement {
    pub row: usize,
    pub column: usize,
    pub row_span: usize,
    pub column_span: usize,
    /// Chosen by the allocator rather than declared by the item.
    pub auto: bool,
}

impl CellPlacement {
    fn manual(grid: &GridAttachment) -> Self {
        Self {
            row: grid.row.unwrap_or(0),
            column: grid.column.unwrap_or(0),
            row_span: grid.row_span(),
            column_span: grid.column_span(),
            auto: false,
        }
    }

    pub fn footprint(&self) -> Footprint {
        Footprint::new(self.row, self.column, self.row_span, self.column_span)
    }

    /// Pull the origin inside the grid and trim the span at the far edges.
    pub fn clamped(&self, dimensions: GridDimensions) -> Self {
        let row = self.row.min(dimensions.rows.saturating_sub(1));
        let column = self.column.min(dimensions.columns.saturating_sub(1));
        Self {
            row,
            column,
            row_span: self.row_span.min(dimensions.rows - row).max(1),
            column_span: self.column_span.min(dimensions.columns - column).max(1),
            auto: self.auto,
        }
    }
}

/// Output of [`allocate_cells`], aligned with its input slice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridAllocation {
    pub dimensions: GridDimensions,
    pub placements: Vec<Option<CellPlacement>>,
    /// Input positions of auto items that found no free cell.
    pub unplaced: Vec<usize>,
    pub auto_requested: usize,
}

impl GridAllocation {
    pub fn degradation(&self) -> Option<Degradation> {
        if self.unplaced.is_empty() {
            return None;
        }
        Some(Degradation::SlotsExhausted {
            requested: self.auto_requested,
            free: self.auto_requested - self.unplaced.len(),
        })
    }
}

/// Assign a cell to every item.
///
/// Manual items are placed first at their declared cell, pulled inside the
/// grid, and reserve their span. Auto items then take free cells one by one (1x1) in input order;
/// when cells run out the rest stay unplaced.
pub fn allocate_cells(
    dimensions: GridDimensions,
    items: &[GridAttachment],
    flow_direction: FlowDirection,
    first_column: Option<usize>,
) -> GridAllocation {
    let mut occupancy = OccupancyGrid::new(dimensions.rows, dimensions.columns);
    let mut placements = vec![None; items.len()];

    for (index, grid) in items.iter().enumerate() {
        if !grid.is_auto_placed() {
            let mut placement = CellPlacement::manual(grid);
            if !dimensions.is_empty() {
                placement = placement.clamped(dimensions);
            }
            occupancy.fill(placement.footprint());
            placements[index] = Some(placement);
        }
    }

    let mut slots = occupancy.free_slots(first_column, flow_direction);
    let mut unplaced = Vec::new();
    let mut auto_requested = 0;

    for (index, grid) in items.iter().enumerate() {
        if !grid.is_auto_placed() {
            continue;
        }
        auto_requested += 1;

        match slots.next() {
            Some(cell) => {
                placements[index] = Some(CellPlacement {
                    row: cell.row,
                    column: cell.column,
                    row_span: 1,
                    column_span: 1,
                    auto: true,
                });
            }
            None => unplaced.push(index),
        }
    }

    GridAllocation {
        dimensions,
        placements,
        unplaced,
        auto_requested,
    }
}

/// Grid panel whose cells all share one size.
pub struct UniformGrid {
    rows: Signal<usize>,
    columns: Signal<usize>,
    first_column: Signal<Option<usize>>,
    flow_direction: Signal<FlowDirection>,
    row_definitions: TrackDefinitions,
    column_definitions: TrackDefinitions,
    dimensions: GridDimensions,
    invalidation: LayoutInvalidation,
    report: LayoutReport,
    _watchers: Vec<Effect>,
}

impl UniformGrid {
    pub fn new() -> Self {
        Self::from_config(&UniformGridConfig::default())
    }

    pub fn from_config(config: &UniformGridConfig) -> Self {
        let rows = Signal::new(config.rows);
        let columns = Signal::new(config.columns);
        let first_column = Signal::new(config.first_column);
        let flow_direction = Signal::new(config.flow_direction);

        let invalidation = LayoutInvalidation::new();
        let watchers = vec![
            invalidation.watch(&rows, InvalidationType::Measure),
            invalidation.watch(&columns, InvalidationType::Measure),
            invalidation.watch(&first_column, InvalidationType::Measure),
            invalidation.watch(&flow_direction, InvalidationType::Measure),
        ];

        Self {
            rows,
            columns,
            first_column,
            flow_direction,
            row_definitions: TrackDefinitions::new(),
            column_definitions: TrackDefinitions::new(),
            dimensions: GridDimensions::default(),
            invalidation,
            report: LayoutReport::default(),
            _watchers: watchers,
        }
    }

    pub fn with_rows(self, rows: usize) -> Self {
        self.rows.set(rows);
        self
    }

    pub fn with_columns(self, columns: usize) -> Self {
        self.columns.set(columns);
        self
    }

    pub fn with_first_column(self, first_column: Option<usize>) -> Self {
        self.first_column.set(first_column);
        self
    }

    pub fn with_flow_direction(self, flow_direction: FlowDirection) -> Self {
        self.flow_direction.set(flow_direction);
        self
    }

    pub fn set_rows(&self, rows: usize) {
        self.rows.set_if_changed(rows);
    }

    pub fn set_columns(&self, columns: usize) {
        self.columns.set_if_changed(columns);
    }

    pub fn set_first_column(&self, first_column: Option<usize>) {
        self.first_column.set_if_changed(first_column);
    }

    pub fn set_flow_direction(&self, flow_direction: FlowDirection) {
        self.flow_direction.set_if_changed(flow_direction);
    }

    /// Shared handle; setting it from elsewhere invalidates this panel.
    pub fn rows_signal(&self) -> Signal<usize> {
        self.rows.clone()
    }

    pub fn columns_signal(&self) -> Signal<usize> {
        self.columns.clone()
    }

    pub fn first_column_signal(&self) -> Signal<Option<usize>> {
        self.first_column.clone()
    }

    pub fn flow_direction_signal(&self) -> Signal<FlowDirection> {
        self.flow_direction.clone()
    }

    pub fn config(&self) -> UniformGridConfig {
        UniformGridConfig {
            rows: self.rows.get(),
            columns: self.columns.get(),
            first_column: self.first_column.get(),
            flow_direction: self.flow_direction.get(),
        }
    }

    /// Dimensions resolved by the last pass.
    pub fn dimensions(&self) -> GridDimensions {
        self.dimensions
    }

    pub fn row_definitions(&self) -> &TrackDefinitions {
        &self.row_definitions
    }

    pub fn column_definitions(&self) -> &TrackDefinitions {
        &self.column_definitions
    }

    pub fn row_definitions_mut(&mut self) -> &mut TrackDefinitions {
        self.invalidation.invalidate(InvalidationType::Measure);
        &mut self.row_definitions
    }

    pub fn column_definitions_mut(&mut self) -> &mut TrackDefinitions {
        self.invalidation.invalidate(InvalidationType::Measure);
        &mut self.column_definitions
    }

    /// Resolve dimensions and cells for the visible items.
    ///
    /// Returns the item indices of visible items alongside an allocation
    /// indexed by position in that list.
    fn allocate<I: LayoutItem>(&self, items: &[I]) -> (Vec<usize>, GridAllocation) {
        let visible: Vec<usize> = (0..items.len()).filter(|&index| items[index].is_visible()).collect();
        let attachments: Vec<GridAttachment> = visible.iter().map(|&index| items[index].grid()).collect();

        let first_column = self.first_column.get();
        let dimensions = GridDimensions::resolve(self.rows.get(), self.columns.get(), &attachments, first_column);
        let allocation = allocate_cells(dimensions, &attachments, self.flow_direction.get(), first_column);

        (visible, allocation)
    }

    fn update_report(&mut self, visible: &[usize], allocation: &GridAllocation) {
        let degradation = allocation.degradation();
        if let Some(degradation) = &degradation {
            warn!(%degradation, "uniform grid left items unplaced");
        }

        self.report = LayoutReport {
            placed: allocation.placements.iter().filter(|placement| placement.is_some()).count(),
            unplaced: allocation.unplaced.iter().map(|&slot| visible[slot]).collect(),
            degradation,
        };
    }
}

impl Panel for UniformGrid {
    fn measure<I: LayoutItem>(&mut self, items: &mut [I], available: Size<AvailableSpace>) -> Size<f32> {
        let (visible, allocation) = self.allocate(items);
        let dimensions = allocation.dimensions;

        self.dimensions = dimensions;
        self.row_definitions.sync(dimensions.rows);
        self.column_definitions.sync(dimensions.columns);
        self.update_report(&visible, &allocation);
        self.invalidation.mark_measured();

        if dimensions.is_empty() {
            debug!(items = items.len(), "uniform grid has no cells");
            return Size::ZERO;
        }

        let cell_available = Size {
            width: per_track(available.width, dimensions.columns),
            height: per_track(available.height, dimensions.rows),
        };

        let mut cell = Size::ZERO;
        for (slot, &index) in visible.iter().enumerate() {
            let placement = allocation.placements[slot].map(|placement| placement.clamped(dimensions));
            let (row_span, column_span) = placement
                .map(|placement| (placement.row_span, placement.column_span))
                .unwrap_or((1, 1));

            let proposal = Size {
                width: spanned(cell_available.width, column_span),
                height: spanned(cell_available.height, row_span),
            };
            let desired = items[index].measure(proposal);

            if placement.is_some() {
                cell.width = cell.width.max(desired.width / column_span as f32);
                cell.height = cell.height.max(desired.height / row_span as f32);
            }
        }

        let desired = Size {
            width: cell.width * dimensions.columns as f32,
            height: cell.height * dimensions.rows as f32,
        };

        debug!(
            rows = dimensions.rows,
            columns = dimensions.columns,
            placed = self.report.placed,
            width = desired.width,
            height = desired.height,
            "uniform grid measured"
        );

        desired
    }

    fn arrange<I: LayoutItem>(&mut self, items: &mut [I], final_size: Size<f32>) -> Arrangement {
        let (visible, allocation) = self.allocate(items);
        let dimensions = allocation.dimensions;

        self.dimensions = dimensions;
        self.update_report(&visible, &allocation);
        self.invalidation.mark_arranged();

        let mut bounds = vec![None; items.len()];
        if dimensions.is_empty() {
            return Arrangement { size: final_size, bounds };
        }

        let cell_width = final_size.width / dimensions.columns as f32;
        let cell_height = final_size.height / dimensions.rows as f32;

        for (slot, &index) in visible.iter().enumerate() {
            let Some(placement) = allocation.placements[slot] else {
                continue;
            };
            let placement = placement.clamped(dimensions);
            let cell_bounds = Bounds::new(
                placement.column as f32 * cell_width,
                placement.row as f32 * cell_height,
                placement.column_span as f32 * cell_width,
                placement.row_span as f32 * cell_height,
            );

            items[index].arrange(cell_bounds);
            bounds[index] = Some(cell_bounds);
        }

        debug!(
            rows = dimensions.rows,
            columns = dimensions.columns,
            cell_width,
            cell_height,
            "uniform grid arranged"
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

impl Default for UniformGrid {
    fn default() -> Self {
        Self::new()
    }
}

fn per_track(space: AvailableSpace, count: usize) -> AvailableSpace {
    match space {
        AvailableSpace::Definite(value) => AvailableSpace::Definite(value / count as f32),
        other => other,
    }
}

fn spanned(space: AvailableSpace, span: usize) -> AvailableSpace {
    match space {
        AvailableSpace::Definite(value) => AvailableSpace::Definite(value * span as f32),
        other => other,
    }
}
