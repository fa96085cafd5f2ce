use serde::{Deserialize, Serialize};
use taffy::{AvailableSpace, Size};

use crate::geometry::{definite, Bounds};

/// Tri-state opt-in/opt-out of grid auto placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AutoLayout {
    #[default]
    Unset,
    Enabled,
    Disabled,
}

/// Grid-related properties a panel reads from each item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct GridAttachment {
    pub row: Option<usize>,
    pub column: Option<usize>,
    pub row_span: usize,
    pub column_span: usize,
    pub auto_layout: AutoLayout,
}

impl Default for GridAttachment {
    fn default() -> Self {
        Self {
            row: None,
            column: None,
            row_span: 1,
            column_span: 1,
            auto_layout: AutoLayout::Unset,
        }
    }
}

impl GridAttachment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a fixed cell
    pub fn at(mut self, row: usize, column: usize) -> Self {
        self.row = Some(row);
        self.column = Some(column);
        self
    }

    pub fn row(mut self, row: usize) -> Self {
        self.row = Some(row);
        self
    }

    pub fn column(mut self, column: usize) -> Self {
        self.column = Some(column);
        self
    }

    /// Set the row and column span. Zero spans are clamped to one.
    pub fn span(mut self, row_span: usize, column_span: usize) -> Self {
        self.row_span = row_span.max(1);
        self.column_span = column_span.max(1);
        self
    }

    pub fn auto_layout(mut self, auto_layout: AutoLayout) -> Self {
        self.auto_layout = auto_layout;
        self
    }

    pub fn row_span(&self) -> usize {
        self.row_span.max(1)
    }

    pub fn column_span(&self) -> usize {
        self.column_span.max(1)
    }

    /// Number of cells this item asks for.
    pub fn cell_demand(&self) -> usize {
        self.row_span().saturating_mul(self.column_span())
    }

    /// Whether the uniform grid should pick a free slot for this item.
    ///
    /// An unflagged item declared at exactly (0, 0) stays where it was put.
    pub fn is_auto_placed(&self) -> bool {
        match self.auto_layout {
            AutoLayout::Enabled => true,
            AutoLayout::Disabled => false,
            AutoLayout::Unset => self.row.is_none() && self.column.is_none(),
        }
    }
}

/// An element a panel can measure and position.
pub trait LayoutItem {
    /// Measure within `available` and remember the result as the desired size.
    fn measure(&mut self, available: Size<AvailableSpace>) -> Size<f32>;

    /// Size recorded by the last `measure` call.
    fn desired_size(&self) -> Size<f32>;

    /// Final bounds chosen by the panel.
    fn arrange(&mut self, bounds: Bounds);

    fn grid(&self) -> GridAttachment {
        GridAttachment::default()
    }

    /// Collapsed items take no part in grid placement.
    fn is_visible(&self) -> bool {
        true
    }
}

/// How a [`StaticItem`] answers a measure request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sizing {
    /// Always report the natural size, whatever the proposal.
    #[default]
    Natural,
    /// Shrink to a definite proposed width, keeping the aspect ratio.
    FitWidth,
}

/// A leaf item with a natural size, used by hosts that only need boxes.
#[derive(Debug, Clone, PartialEq)]
pub struct StaticItem {
    natural: Size<f32>,
    sizing: Sizing,
    grid: GridAttachment,
    visible: bool,
    desired: Size<f32>,
    arranged: Option<Bounds>,
}

impl StaticItem {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            natural: Size { width: width.max(0.0), height: height.max(0.0) },
            sizing: Sizing::Natural,
            grid: GridAttachment::default(),
            visible: true,
            desired: Size::ZERO,
            arranged: None,
        }
    }

    pub fn with_sizing(mut self, sizing: Sizing) -> Self {
        self.sizing = sizing;
        self
    }

    pub fn with_grid(mut self, grid: GridAttachment) -> Self {
        self.grid = grid;
        self
    }

    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    pub fn set_natural_size(&mut self, width: f32, height: f32) {
        self.natural = Size { width: width.max(0.0), height: height.max(0.0) };
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn grid_mut(&mut self) -> &mut GridAttachment {
        &mut self.grid
    }

    pub fn natural_size(&self) -> Size<f32> {
        self.natural
    }

    pub fn arranged(&self) -> Option<Bounds> {
        self.arranged
    }
}

impl LayoutItem for StaticItem {
    fn measure(&mut self, available: Size<AvailableSpace>) -> Size<f32> {
        self.desired = match (self.sizing, definite(available.width)) {
            (Sizing::FitWidth, Some(width)) if self.natural.width > width && self.natural.width > 0.0 => {
                let scale = width / self.natural.width;
                Size { width, height: self.natural.height * scale }
            }
            _ => self.natural,
        };
        self.desired
    }

    fn desired_size(&self) -> Size<f32> {
        self.desired
    }

    fn arrange(&mut self, bounds: Bounds) {
        self.arranged = Some(bounds);
    }

    fn grid(&self) -> GridAttachment {
        self.grid
    }

    fn is_visible(&self) -> bool {
        self.visible
    }
}

impl<T: LayoutItem + ?Sized> LayoutItem for Box<T> {
    fn measure(&mut self, available: Size<AvailableSpace>) -> Size<f32> {
        (**self).measure(available)
    }

    fn desired_size(&self) -> Size<f32> {
        (**self).desired_size()
    }

    fn arrange(&mut self, bounds: Bounds) {
        (**self).arrange(bounds)
    }

    fn grid(&self) -> GridAttachment {
        (**self).grid()
    }

    fn is_visible(&self) -> bool {
        (**self).is_visible()
    }
}
