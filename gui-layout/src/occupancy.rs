//! Cell bookkeeping for the uniform grid.
//!
//! [`OccupancyGrid`] records which cells manually placed items already claim,
//! and [`FreeSlots`] walks the remaining cells in reading order.

use serde::{Deserialize, Serialize};

/// Reading direction of the grid. Right-to-left scans each row backwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowDirection {
    #[default]
    LeftToRight,
    RightToLeft,
}

impl FlowDirection {
    pub fn is_reversed(self) -> bool {
        matches!(self, FlowDirection::RightToLeft)
    }
}

/// A (row, column) coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    pub row: usize,
    pub column: usize,
}

impl Cell {
    pub fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }
}

/// Rectangle of cells anchored at `origin`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Footprint {
    pub origin: Cell,
    pub row_span: usize,
    pub column_span: usize,
}

impl Footprint {
    pub fn new(row: usize, column: usize, row_span: usize, column_span: usize) -> Self {
        Self {
            origin: Cell::new(row, column),
            row_span: row_span.max(1),
            column_span: column_span.max(1),
        }
    }

    pub fn single(cell: Cell) -> Self {
        Self { origin: cell, row_span: 1, column_span: 1 }
    }

    pub fn contains(&self, cell: Cell) -> bool {
        cell.row >= self.origin.row
            && cell.row - self.origin.row < self.row_span
            && cell.column >= self.origin.column
            && cell.column - self.origin.column < self.column_span
    }

    /// Cells covered, clipped to a `rows` x `columns` grid.
    pub fn cells_within(&self, rows: usize, columns: usize) -> impl Iterator<Item = Cell> {
        let row_end = self.origin.row.saturating_add(self.row_span).min(rows);
        let column_start = self.origin.column;
        let column_end = self.origin.column.saturating_add(self.column_span).min(columns);

        (self.origin.row..row_end).flat_map(move |row| {
            (column_start..column_end).map(move |column| Cell::new(row, column))
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OccupancyGrid {
    rows: usize,
    columns: usize,
    cells: Vec<bool>,
}

impl OccupancyGrid {
    pub fn new(rows: usize, columns: usize) -> Self {
        Self {
            rows,
            columns,
            cells: vec![false; rows.saturating_mul(columns)],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Claim every cell of `footprint` that lies inside the grid.
    /// Parts outside the grid are ignored.
    pub fn fill(&mut self, footprint: Footprint) {
        for cell in footprint.cells_within(self.rows, self.columns) {
            let index = cell.row * self.columns + cell.column;
            self.cells[index] = true;
        }
    }

    /// Out-of-range cells read as free; they can never be yielded by a scan.
    pub fn is_occupied(&self, row: usize, column: usize) -> bool {
        row < self.rows && column < self.columns && self.cells[row * self.columns + column]
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|&&taken| taken).count()
    }

    pub fn free_count(&self) -> usize {
        self.cells.len() - self.occupied_count()
    }

    /// Lazily enumerate unclaimed cells row by row.
    ///
    /// The first row starts at `first_column` (clamped to the last column),
    /// counted from the right edge when `direction` is reversed.
    pub fn free_slots(&self, first_column: Option<usize>, direction: FlowDirection) -> FreeSlots<'_> {
        let first_column = first_column.unwrap_or(0).min(self.columns.saturating_sub(1));
        let mut slots = FreeSlots {
            grid: self,
            direction,
            first_column,
            row: 0,
            cursor: None,
        };
        slots.cursor = slots.row_start(0);
        slots
    }
}

/// Iterator over free cells of an [`OccupancyGrid`].
#[derive(Debug, Clone)]
pub struct FreeSlots<'a> {
    grid: &'a OccupancyGrid,
    direction: FlowDirection,
    first_column: usize,
    row: usize,
    cursor: Option<usize>,
}

impl FreeSlots<'_> {
    fn row_start(&self, row: usize) -> Option<usize> {
        let columns = self.grid.columns;
        if columns == 0 || row >= self.grid.rows {
            return None;
        }

        let offset = if row == 0 { self.first_column } else { 0 };
        Some(match self.direction {
            FlowDirection::LeftToRight => offset,
            FlowDirection::RightToLeft => columns - 1 - offset,
        })
    }

    fn step(&self, column: usize) -> Option<usize> {
        match self.direction {
            FlowDirection::LeftToRight => Some(column + 1).filter(|&next| next < self.grid.columns),
            FlowDirection::RightToLeft => column.checked_sub(1),
        }
    }
}

impl Iterator for FreeSlots<'_> {
    type Item = Cell;

    fn next(&mut self) -> Option<Cell> {
        while self.row < self.grid.rows {
            while let Some(column) = self.cursor {
                self.cursor = self.step(column);
                if !self.grid.is_occupied(self.row, column) {
                    return Some(Cell::new(self.row, column));
                }
            }

            self.row += 1;
            self.cursor = self.row_start(self.row);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_scan_is_row_major() {
        let grid = OccupancyGrid::new(2, 3);
        let cells: Vec<Cell> = grid.free_slots(None, FlowDirection::LeftToRight).collect();
        assert_eq!(
            cells,
            vec![
                Cell::new(0, 0),
                Cell::new(0, 1),
                Cell::new(0, 2),
                Cell::new(1, 0),
                Cell::new(1, 1),
                Cell::new(1, 2),
            ]
        );
    }

    #[test]
    fn test_reverse_scan_starts_at_last_column() {
        let grid = OccupancyGrid::new(2, 3);
        let cells: Vec<Cell> = grid.free_slots(None, FlowDirection::RightToLeft).collect();
        assert_eq!(cells[0], Cell::new(0, 2));
        assert_eq!(cells[2], Cell::new(0, 0));
        assert_eq!(cells[3], Cell::new(1, 2));
        assert_eq!(cells.len(), 6);
    }

    #[test]
    fn test_first_column_offset_only_applies_to_first_row() {
        let grid = OccupancyGrid::new(2, 7);
        let forward: Vec<Cell> = grid.free_slots(Some(3), FlowDirection::LeftToRight).collect();
        assert_eq!(forward[0], Cell::new(0, 3));
        assert_eq!(forward[4], Cell::new(1, 0));
        assert_eq!(forward.len(), 4 + 7);

        let reversed: Vec<Cell> = grid.free_slots(Some(3), FlowDirection::RightToLeft).collect();
        assert_eq!(reversed[0], Cell::new(0, 3));
        assert_eq!(reversed[3], Cell::new(0, 0));
        assert_eq!(reversed[4], Cell::new(1, 6));
    }

    #[test]
    fn test_offset_beyond_grid_is_clamped() {
        let grid = OccupancyGrid::new(1, 3);
        let cells: Vec<Cell> = grid.free_slots(Some(10), FlowDirection::LeftToRight).collect();
        assert_eq!(cells, vec![Cell::new(0, 2)]);
    }

    #[test]
    fn test_fill_clips_at_edges_and_scan_skips_claimed() {
        let mut grid = OccupancyGrid::new(3, 3);
        grid.fill(Footprint::new(1, 1, 2, 2));
        grid.fill(Footprint::new(2, 2, 5, 5));
        assert_eq!(grid.occupied_count(), 4);
        assert!(grid.is_occupied(2, 2));

        let cells: Vec<Cell> = grid.free_slots(None, FlowDirection::LeftToRight).collect();
        assert_eq!(cells.len(), 5);
        assert!(cells.iter().all(|cell| !Footprint::new(1, 1, 2, 2).contains(*cell)));
    }

    #[test]
    fn test_empty_grid_yields_nothing() {
        let grid = OccupancyGrid::new(0, 0);
        assert!(grid.is_empty());
        assert_eq!(grid.free_slots(Some(2), FlowDirection::RightToLeft).count(), 0);

        let no_columns = OccupancyGrid::new(4, 0);
        assert_eq!(no_columns.free_slots(None, FlowDirection::LeftToRight).count(), 0);
    }

    #[test]
    fn test_scan_stops_early() {
        let grid = OccupancyGrid::new(100, 100);
        let first_two: Vec<Cell> = grid.free_slots(None, FlowDirection::LeftToRight).take(2).collect();
        assert_eq!(first_two, vec![Cell::new(0, 0), Cell::new(0, 1)]);
    }
}
