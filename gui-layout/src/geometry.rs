use taffy::{AvailableSpace, Point, Size};

/// An axis-aligned rectangle in panel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub const ZERO: Bounds = Bounds { x: 0.0, y: 0.0, width: 0.0, height: 0.0 };

    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn from_parts(location: Point<f32>, size: Size<f32>) -> Self {
        Self::new(location.x, location.y, size.width, size.height)
    }

    pub fn location(&self) -> Point<f32> {
        Point { x: self.x, y: self.y }
    }

    pub fn size(&self) -> Size<f32> {
        Size { width: self.width, height: self.height }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Check if this rectangle overlaps another with non-zero area
    pub fn intersects(&self, other: &Bounds) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// Smallest rectangle covering both
    pub fn union(&self, other: &Bounds) -> Bounds {
        let left = self.x.min(other.x);
        let top = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());

        Bounds::new(left, top, right - left, bottom - top)
    }

    pub fn area(&self) -> f32 {
        self.width * self.height
    }
}

/// Definite size of an available-space proposal, or `None` for min/max-content.
pub(crate) fn definite(space: AvailableSpace) -> Option<f32> {
    match space {
        AvailableSpace::Definite(value) if value.is_finite() => Some(value.max(0.0)),
        _ => None,
    }
}
