/// Who created a row or column definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrackOrigin {
    /// Rebuilt by the panel on every measure pass.
    Generated,
    /// Added by the host for the given track index; never removed by the panel.
    User { index: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TrackDefinition {
    pub origin: TrackOrigin,
}

impl TrackDefinition {
    pub fn generated() -> Self {
        Self { origin: TrackOrigin::Generated }
    }

    pub fn user(index: usize) -> Self {
        Self { origin: TrackOrigin::User { index } }
    }

    pub fn is_generated(&self) -> bool {
        self.origin == TrackOrigin::Generated
    }
}

/// Ordered row or column definitions of a uniform grid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackDefinitions {
    tracks: Vec<TrackDefinition>,
}

impl TrackDefinitions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a host-owned definition intended for track `index`.
    pub fn push_user(&mut self, index: usize) {
        self.tracks.push(TrackDefinition::user(index));
    }

    /// Rebuild generated definitions so there is one track per index below
    /// `count`, reusing host-owned definitions that sit at their own index.
    pub fn sync(&mut self, count: usize) {
        self.tracks.retain(|track| !track.is_generated());

        for index in 0..count {
            let reusable = matches!(
                self.tracks.get(index),
                Some(TrackDefinition { origin: TrackOrigin::User { index: declared } }) if *declared == index
            );
            if !reusable {
                self.tracks.insert(index, TrackDefinition::generated());
            }
        }
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn generated_count(&self) -> usize {
        self.tracks.iter().filter(|track| track.is_generated()).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TrackDefinition> {
        self.tracks.iter()
    }

    pub fn get(&self, index: usize) -> Option<&TrackDefinition> {
        self.tracks.get(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sync_generates_tracks() {
        let mut tracks = TrackDefinitions::new();
        tracks.sync(3);
        assert_eq!(tracks.len(), 3);
        assert_eq!(tracks.generated_count(), 3);

        tracks.sync(1);
        assert_eq!(tracks.len(), 1);
    }

    #[test]
    fn test_user_tracks_survive_resync() {
        let mut tracks = TrackDefinitions::new();
        tracks.push_user(0);
        tracks.sync(3);
        assert_eq!(tracks.len(), 3);
        assert_eq!(tracks.get(0), Some(&TrackDefinition::user(0)));
        assert_eq!(tracks.generated_count(), 2);

        tracks.sync(2);
        assert_eq!(tracks.get(0), Some(&TrackDefinition::user(0)));
        assert_eq!(tracks.len(), 2);
    }

    #[test]
    fn test_misplaced_user_track_is_kept_after_generated() {
        let mut tracks = TrackDefinitions::new();
        tracks.push_user(5);
        tracks.sync(2);
        assert_eq!(tracks.len(), 3);
        assert!(tracks.get(0).is_some_and(TrackDefinition::is_generated));
        assert!(tracks.get(1).is_some_and(TrackDefinition::is_generated));
        assert_eq!(tracks.get(2), Some(&TrackDefinition::user(5)));
    }
}
