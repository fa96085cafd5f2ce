use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::signal::{Signal, SignalId, Subscription};

pub type EffectId = usize;

static NEXT_ID: AtomicUsize = AtomicUsize::new(0);

/// A side effect bound to one or more signals.
///
/// The effect stays subscribed for as long as it is alive; dropping it
/// releases every subscription and runs the cleanup, if any.
pub struct Effect {
    id: EffectId,
    cleanup: Option<Arc<dyn Fn() + Send + Sync>>,
    subscriptions: Vec<Subscription>,
    dependencies: Vec<SignalId>,
}

impl Effect {
    pub fn from_signal<F, T>(signal: &Signal<T>, effect_fn: F) -> Self
    where
        F: Fn(&T) + Send + Sync + 'static,
        T: Clone + Send + Sync + 'static,
    {
        let subscription = signal.subscribe_fn(effect_fn);

        Self {
            id: NEXT_ID.fetch_add(1, Ordering::Relaxed),
            cleanup: None,
            subscriptions: vec![subscription],
            dependencies: vec![signal.id()],
        }
    }

    pub fn from_signals<F, T>(signals: &[&Signal<T>], effect_fn: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
        T: Clone + Send + Sync + 'static,
    {
        let effect_fn = Arc::new(effect_fn);
        let subscriptions = signals
            .iter()
            .map(|signal| {
                let effect_fn = effect_fn.clone();
                signal.subscribe_fn(move |_| (*effect_fn)())
            })
            .collect();

        Self {
            id: NEXT_ID.fetch_add(1, Ordering::Relaxed),
            cleanup: None,
            subscriptions,
            dependencies: signals.iter().map(|s| s.id()).collect(),
        }
    }

    /// Track one more signal with its own callback.
    pub fn and_signal<F, T>(mut self, signal: &Signal<T>, effect_fn: F) -> Self
    where
        F: Fn(&T) + Send + Sync + 'static,
        T: Clone + Send + Sync + 'static,
    {
        self.subscriptions.push(signal.subscribe_fn(effect_fn));
        self.dependencies.push(signal.id());
        self
    }

    pub fn with_cleanup<C>(mut self, cleanup_fn: C) -> Self
    where
        C: Fn() + Send + Sync + 'static,
    {
        self.cleanup = Some(Arc::new(cleanup_fn));
        self
    }

    pub fn id(&self) -> EffectId {
        self.id
    }

    pub fn dependencies(&self) -> &[SignalId] {
        &self.dependencies
    }

    pub fn dispose(self) {
        drop(self);
    }
}

impl Drop for Effect {
    fn drop(&mut self) {
        self.subscriptions.clear();

        if let Some(cleanup) = &self.cleanup {
            cleanup();
        }
    }
}

impl std::fmt::Debug for Effect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Effect")
            .field("id", &self.id)
            .field("dependencies", &self.dependencies)
            .finish_non_exhaustive()
    }
}
