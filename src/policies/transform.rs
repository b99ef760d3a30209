//! # Concurrency transformers for same-tag events.
//!
//! [`Transform`] determines how a new event of a tag schedules against
//! handler invocations of that tag which are still running.
//!
//! | Policy | Behavior | Use case |
//! |---|---|---|
//! | `Concurrent` | Every event starts an invocation immediately; invocations interleave freely. | Independent, unrelated events. |
//! | `Sequential` | One invocation at a time, in arrival order; later events queue. | Ordered mutations that must not interleave. |
//! | `Restartable` | A new event cancels the still-running invocation before starting its own. | Superseding queries; only the newest result matters. |
//! | `Droppable` | Events arriving while an invocation runs are discarded, not queued. | Rate-limiting repeated user actions (submit debounce). |
//!
//! ## Edge rules
//! - `Restartable`: the superseded invocation's emitter is closed before the
//!   replacement starts; nothing it publishes afterwards reaches subscribers.
//! - `Droppable`: an event arriving while nothing runs always starts an
//!   invocation; a dropped event is gone (no queueing, no retry).
//! - `Concurrent` applies no backpressure: an unbounded burst of events
//!   starts unboundedly many invocations. Use `Sequential` or `Droppable`
//!   where that is a capacity risk.

/// Policy controlling how same-tag events schedule against each other.
///
/// Selected per event tag at registration time via
/// [`HandlerSpec::with_transform`](crate::HandlerSpec::with_transform);
/// bare [`Unit::on`](crate::Unit::on) registrations use the unit's
/// configured default.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Transform {
    /// Start every invocation immediately; no mutual scheduling (default).
    #[default]
    Concurrent,
    /// Run invocations one at a time in arrival order; later events queue.
    Sequential,
    /// Cancel the running invocation before starting the new one.
    Restartable,
    /// Discard events that arrive while an invocation is running.
    Droppable,
}

impl Transform {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            Transform::Concurrent => "concurrent",
            Transform::Sequential => "sequential",
            Transform::Restartable => "restartable",
            Transform::Droppable => "droppable",
        }
    }
}
