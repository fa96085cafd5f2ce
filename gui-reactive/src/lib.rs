pub mod signal;
pub mod effect;

pub use signal::{Signal, SignalId, Subscription};
pub use effect::{Effect, EffectId};
