use taffy::{AvailableSpace, Size};
use tracing::{debug, instrument};

use crate::geometry::Bounds;
use crate::layout_cache::{ArrangeCache, CacheStats};
use crate::item::LayoutItem;
use crate::panel::{Arrangement, LayoutReport, Panel};

/// Everything a host learns from one [`LayoutHost::layout`] call.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutPass {
    pub desired_size: Size<f32>,
    pub final_size: Size<f32>,
    pub arrangement: Arrangement,
    /// Merged rectangles whose contents changed since the previous pass.
    pub dirty_regions: Vec<Bounds>,
    pub report: LayoutReport,
    pub measured: bool,
    pub arranged: bool,
}

/// Owns a panel plus its items and runs measure and arrange only when
/// something they depend on changed.
pub struct LayoutHost<P: Panel, I: LayoutItem> {
    panel: P,
    items: Vec<I>,
    cache: ArrangeCache,
    last_available: Option<Size<f32>>,
    desired_size: Size<f32>,
    last_arrangement: Option<Arrangement>,
    items_dirty: bool,
}

impl<P: Panel, I: LayoutItem> LayoutHost<P, I> {
    pub fn new(panel: P) -> Self {
        Self::with_items(panel, Vec::new())
    }

    pub fn with_items(panel: P, items: Vec<I>) -> Self {
        Self {
            panel,
            items,
            cache: ArrangeCache::new(),
            last_available: None,
            desired_size: Size::ZERO,
            last_arrangement: None,
            items_dirty: true,
        }
    }

    pub fn push_item(&mut self, item: I) {
        self.items.push(item);
        self.items_dirty = true;
    }

    pub fn remove_item(&mut self, index: usize) -> Option<I> {
        if index >= self.items.len() {
            return None;
        }
        self.items_dirty = true;
        Some(self.items.remove(index))
    }

    pub fn items(&self) -> &[I] {
        &self.items
    }

    /// Mutable access marks the items changed; the next pass re-measures.
    pub fn items_mut(&mut self) -> &mut Vec<I> {
        self.items_dirty = true;
        &mut self.items
    }

    pub fn panel(&self) -> &P {
        &self.panel
    }

    /// Panel setters invalidate through their own signals.
    pub fn panel_mut(&mut self) -> &mut P {
        &mut self.panel
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Whether the next [`LayoutHost::layout`] call with `available` would
    /// do any work.
    pub fn needs_layout(&self, available: Size<f32>) -> bool {
        self.needs_measure(available) || self.panel.invalidation().needs_arrange()
    }

    fn needs_measure(&self, available: Size<f32>) -> bool {
        self.items_dirty
            || self.last_available != Some(available)
            || self.panel.invalidation().needs_measure()
    }

    /// Lay the items out within `available`. Infinite axes are measured as
    /// max-content and take the panel's desired extent.
    #[instrument(skip_all, fields(width = available.width, height = available.height))]
    pub fn layout(&mut self, available: Size<f32>) -> LayoutPass {
        let measured = self.needs_measure(available);
        if measured {
            let proposal = Size {
                width: proposal_axis(available.width),
                height: proposal_axis(available.height),
            };
            self.desired_size = self.panel.measure(&mut self.items, proposal);
            self.last_available = Some(available);
            self.items_dirty = false;
        }

        let final_size = Size {
            width: final_axis(available.width, self.desired_size.width),
            height: final_axis(available.height, self.desired_size.height),
        };

        let arranged = measured || self.panel.invalidation().needs_arrange() || self.last_arrangement.is_none();
        let (arrangement, dirty_regions) = if arranged {
            let arrangement = self.panel.arrange(&mut self.items, final_size);
            let regions = self.cache.update(&arrangement);
            self.last_arrangement = Some(arrangement.clone());
            (arrangement, regions)
        } else {
            (self.last_arrangement.clone().unwrap_or_default(), Vec::new())
        };

        debug!(
            measured,
            arranged,
            placed = arrangement.placed_count(),
            dirty = dirty_regions.len(),
            "layout pass complete"
        );

        LayoutPass {
            desired_size: self.desired_size,
            final_size,
            arrangement,
            dirty_regions,
            report: self.panel.report().clone(),
            measured,
            arranged,
        }
    }
}

fn proposal_axis(available: f32) -> AvailableSpace {
    if available.is_finite() {
        AvailableSpace::Definite(available.max(0.0))
    } else {
        AvailableSpace::MaxContent
    }
}

fn final_axis(available: f32, desired: f32) -> f32 {
    if available.is_finite() {
        available.max(0.0)
    } else {
        desired
    }
}
