use crate::geometry::Bounds;
use crate::panel::Arrangement;

/// Remembers the last bounds of every item so a host can tell which screen
/// areas a new arrangement touched.
#[derive(Debug, Clone, Default)]
pub struct ArrangeCache {
    bounds: Vec<Option<Bounds>>,
    stats: CacheStats,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub updates: u64,
    pub unchanged_updates: u64,
    pub changed_items: u64,
}

impl ArrangeCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bounds(&self, index: usize) -> Option<Bounds> {
        self.bounds.get(index).copied().flatten()
    }

    pub fn len(&self) -> usize {
        self.bounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bounds.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    /// Record `arrangement` and return the merged regions that changed since
    /// the previous one. Both the old and the new rectangle of a moved item
    /// are dirty.
    ///
    /// Items the panel left unplaced keep whatever bounds they had, so they
    /// never produce a region.
    pub fn update(&mut self, arrangement: &Arrangement) -> Vec<Bounds> {
        let mut regions = Vec::new();
        let mut changed = 0;

        let len = arrangement.bounds.len();
        self.bounds.resize(len.max(self.bounds.len()), None);

        for (index, slot) in self.bounds.iter_mut().enumerate() {
            let next = match arrangement.bounds.get(index) {
                Some(Some(bounds)) => Some(*bounds),
                Some(None) => continue,
                // Item removed since the last pass.
                None => None,
            };

            if *slot == next {
                continue;
            }

            changed += 1;
            regions.extend(slot.filter(|bounds| !bounds.is_empty()));
            regions.extend(next.filter(|bounds| !bounds.is_empty()));
            *slot = next;
        }
        self.bounds.truncate(len);

        self.stats.updates += 1;
        self.stats.changed_items += changed;
        if changed == 0 {
            self.stats.unchanged_updates += 1;
        }

        merge_regions(regions)
    }

    pub fn clear(&mut self) {
        self.bounds.clear();
    }
}

/// Merge overlapping rectangles until none of the results intersect.
pub fn merge_regions(regions: Vec<Bounds>) -> Vec<Bounds> {
    let mut merged: Vec<Bounds> = Vec::with_capacity(regions.len());

    for region in regions {
        match merged.iter_mut().find(|existing| existing.intersects(&region)) {
            Some(existing) => *existing = existing.union(&region),
            None => merged.push(region),
        }
    }

    // A union can grow into a neighbour that was disjoint before.
    let mut changed = true;
    while changed && merged.len() > 1 {
        changed = false;
        let mut i = 0;
        while i < merged.len() {
            let mut j = i + 1;
            while j < merged.len() {
                if merged[i].intersects(&merged[j]) {
                    merged[i] = merged[i].union(&merged[j]);
                    merged.remove(j);
                    changed = true;
                } else {
                    j += 1;
                }
            }
            i += 1;
        }
    }

    merged
}
