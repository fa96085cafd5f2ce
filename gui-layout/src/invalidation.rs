use gui_reactive::{Effect, Signal};
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

const MEASURE: u8 = 0b01;
const ARRANGE: u8 = 0b10;

/// Which layout phase a change invalidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InvalidationType {
    /// Desired sizes may change. Implies a new arrangement too.
    Measure,
    /// Only final positions may change.
    Arrange,
}

/// Shared dirty flags for one panel.
///
/// Clones share the same flags, so a signal subscription can hold one and
/// flip it from wherever the configuration is set.
#[derive(Debug, Clone)]
pub struct LayoutInvalidation {
    bits: Arc<AtomicU8>,
}

impl LayoutInvalidation {
    /// Starts dirty: a panel has never been measured.
    pub fn new() -> Self {
        Self {
            bits: Arc::new(AtomicU8::new(MEASURE | ARRANGE)),
        }
    }

    pub fn invalidate(&self, invalidation_type: InvalidationType) {
        let bits = match invalidation_type {
            InvalidationType::Measure => MEASURE | ARRANGE,
            InvalidationType::Arrange => ARRANGE,
        };
        self.bits.fetch_or(bits, Ordering::AcqRel);
    }

    pub fn needs_measure(&self) -> bool {
        self.bits.load(Ordering::Acquire) & MEASURE != 0
    }

    pub fn needs_arrange(&self) -> bool {
        self.bits.load(Ordering::Acquire) & ARRANGE != 0
    }

    pub fn is_clean(&self) -> bool {
        self.bits.load(Ordering::Acquire) == 0
    }

    pub fn mark_measured(&self) {
        self.bits.fetch_and(!MEASURE, Ordering::AcqRel);
    }

    pub fn mark_arranged(&self) {
        self.bits.fetch_and(!ARRANGE, Ordering::AcqRel);
    }

    /// Invalidate whenever `signal` changes, for as long as the effect lives.
    pub fn watch<T>(&self, signal: &Signal<T>, invalidation_type: InvalidationType) -> Effect
    where
        T: Clone + Send + Sync + 'static,
    {
        let flags = self.clone();
        Effect::from_signal(signal, move |_| flags.invalidate(invalidation_type))
    }
}

impl Default for LayoutInvalidation {
    fn default() -> Self {
        Self::new()
    }
}
