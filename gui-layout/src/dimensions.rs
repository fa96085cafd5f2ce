use crate::item::GridAttachment;

/// Effective row and column count of a uniform grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct GridDimensions {
    pub rows: usize,
    pub columns: usize,
}

impl GridDimensions {
    pub fn new(rows: usize, columns: usize) -> Self {
        Self { rows, columns }
    }

    /// A grid with no cells places nothing and reports zero size.
    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.columns == 0
    }

    pub fn cell_count(&self) -> usize {
        self.rows.saturating_mul(self.columns)
    }

    /// Work out the grid shape from the configured counts (0 = infer) and
    /// the items to place.
    ///
    /// Inference uses the total cell demand of `items`. With only columns
    /// given, the first-row offset pushes content down; with neither given,
    /// the grid is the smallest square that fits.
    pub fn resolve(
        rows: usize,
        columns: usize,
        items: &[GridAttachment],
        first_column: Option<usize>,
    ) -> Self {
        if rows > 0 && columns > 0 {
            return Self::new(rows, columns);
        }

        let demand = items
            .iter()
            .map(GridAttachment::cell_demand)
            .fold(0, usize::saturating_add);
        if demand == 0 {
            return Self::default();
        }

        match (rows, columns) {
            (0, 0) => {
                let side = ceil_sqrt(demand);
                Self::new(side, side)
            }
            (0, columns) => {
                let first = first_column.unwrap_or(0).min(columns - 1);
                Self::new(demand.saturating_add(first).div_ceil(columns), columns)
            }
            (rows, _) => Self::new(rows, demand.div_ceil(rows)),
        }
    }
}

fn ceil_sqrt(value: usize) -> usize {
    let mut root = (value as f64).sqrt() as usize;
    // Float rounding can land one off either way for large inputs.
    while root.saturating_mul(root) > value {
        root -= 1;
    }
    while root.saturating_mul(root) < value {
        root += 1;
    }
    root
}
