//! # Observer trait for unit lifecycle.
//!
//! Provides [`Observe`] — the extension point for logging, devtools, and
//! time-travel consumers. One observer instance serves every unit in the
//! process, so payloads arrive type-erased (`&dyn Debug`) together with the
//! owning unit's name.
//!
//! All methods default to no-ops; implementors override only what they need.
//!
//! ## Example
//! ```rust
//! use statevisor::{Observe, UnitError};
//!
//! struct FailureCounter;
//!
//! impl Observe for FailureCounter {
//!     fn on_error(&self, unit: &str, error: &UnitError) {
//!         eprintln!("[{unit}] {}", error.as_label());
//!     }
//! }
//! ```

use std::fmt;

use crate::error::UnitError;
use crate::events::TransitionView;

/// Read-only consumer of unit lifecycle notifications.
///
/// ### Rules
/// - Called synchronously from the dispatching/publishing task; do not block.
/// - Must not mutate unit state; reading state and adding new events is the
///   only permitted feedback path.
/// - Errors arrive already classified as [`UnitError`]; transitions arrive
///   once per publish call, in publish order per emitter.
pub trait Observe: Send + Sync + 'static {
    /// A unit was constructed with the given initial state.
    fn on_create(&self, unit: &str, initial: &dyn fmt::Debug) {
        let _ = (unit, initial);
    }

    /// A unit accepted an event for dispatch.
    ///
    /// Fires after handler-existence validation and before the concurrency
    /// transformer, so events later discarded by a `Droppable` lane are
    /// still observed here.
    fn on_event(&self, unit: &str, tag: &str, event: &dyn fmt::Debug) {
        let _ = (unit, tag, event);
    }

    /// A handler attempted a state emission.
    fn on_transition(&self, unit: &str, transition: &TransitionView<'_>) {
        let _ = (unit, transition);
    }

    /// A handler invocation failed, exhausted its retries, or a drain
    /// surfaced an error without a local handler.
    fn on_error(&self, unit: &str, error: &UnitError) {
        let _ = (unit, error);
    }

    /// A unit finished closing.
    fn on_close(&self, unit: &str) {
        let _ = unit;
    }
}
