use std::any::Any;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, PoisonError, RwLock, Weak};
use tokio::sync::broadcast;

pub type SignalId = usize;

type Callback<T> = dyn Fn(&T) + Send + Sync;

static NEXT_ID: AtomicUsize = AtomicUsize::new(0);

/// A shared, observable value.
///
/// Clones share the same storage and subscriber list, so a panel can hand a
/// clone of its configuration signal to the host and observe every `set`.
pub struct Signal<T> {
    id: SignalId,
    value: Arc<RwLock<T>>,
    sender: broadcast::Sender<T>,
    subscribers: Arc<RwLock<Vec<Weak<Callback<T>>>>>,
}

/// Keeps a `subscribe_fn` callback alive. Dropping it unsubscribes.
pub struct Subscription {
    _callback: Box<dyn Any + Send + Sync>,
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").finish_non_exhaustive()
    }
}

impl<T> Signal<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn new(value: T) -> Self {
        let (sender, _) = broadcast::channel(64);

        Self {
            id: NEXT_ID.fetch_add(1, Ordering::Relaxed),
            value: Arc::new(RwLock::new(value)),
            sender,
            subscribers: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub fn get(&self) -> T {
        self.value
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        let value = self.value.read().unwrap_or_else(PoisonError::into_inner);
        f(&value)
    }

    /// Replace the value and notify every subscriber.
    pub fn set(&self, value: T) {
        {
            let mut current = self.value.write().unwrap_or_else(PoisonError::into_inner);
            *current = value.clone();
        }
        self.notify(&value);
    }

    pub fn update<F>(&self, f: F)
    where
        F: FnOnce(&mut T),
    {
        let value = {
            let mut current = self.value.write().unwrap_or_else(PoisonError::into_inner);
            f(&mut current);
            current.clone()
        };
        self.notify(&value);
    }

    /// Async listeners. Lagging receivers lose old values, not the latest one.
    pub fn subscribe(&self) -> broadcast::Receiver<T> {
        self.sender.subscribe()
    }

    /// Register a synchronous callback. It runs once immediately with the
    /// current value and then after every change, for as long as the returned
    /// [`Subscription`] lives.
    pub fn subscribe_fn<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let callback: Arc<Callback<T>> = Arc::new(callback);

        {
            let mut subscribers = self.subscribers.write().unwrap_or_else(PoisonError::into_inner);
            subscribers.push(Arc::downgrade(&callback));
        }

        let current = self.get();
        callback(&current);

        Subscription {
            _callback: Box::new(callback),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|weak| weak.strong_count() > 0)
            .count()
    }

    pub fn id(&self) -> SignalId {
        self.id
    }

    fn notify(&self, value: &T) {
        // No receivers is the common case.
        let _ = self.sender.send(value.clone());

        // Callbacks run outside the lock so they may touch this signal again.
        let live: Vec<Arc<Callback<T>>> = {
            let mut subscribers = self.subscribers.write().unwrap_or_else(PoisonError::into_inner);
            subscribers.retain(|weak| weak.strong_count() > 0);
            subscribers.iter().filter_map(Weak::upgrade).collect()
        };

        for callback in live {
            callback(value);
        }
    }
}

impl<T> Signal<T>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    /// Set the value only if it differs, returning whether it changed.
    pub fn set_if_changed(&self, value: T) -> bool {
        {
            let mut current = self.value.write().unwrap_or_else(PoisonError::into_inner);
            if *current == value {
                return false;
            }
            *current = value.clone();
        }
        self.notify(&value);
        true
    }
}

impl<T> Clone for Signal<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            value: self.value.clone(),
            sender: self.sender.clone(),
            subscribers: self.subscribers.clone(),
        }
    }
}

impl<T> std::fmt::Debug for Signal<T>
where
    T: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut debug = f.debug_struct("Signal");
        debug.field("id", &self.id);
        match self.value.try_read() {
            Ok(value) => debug.field("value", &*value),
            Err(_) => debug.field("value", &"<locked>"),
        };
        debug.finish()
    }
}

impl<T> Default for Signal<T>
where
    T: Clone + Default + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new(T::default())
    }
}
