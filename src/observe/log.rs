//! # Built-in log-facade observer.
//!
//! [`LogObserver`] renders every lifecycle notification through the [`log`]
//! crate. It is the observer active when no [`Runtime`](crate::Runtime) was
//! installed, and a reasonable default for services that already ship a
//! `log` backend.
//!
//! Levels: `trace` for transitions, `debug` for creation/events/close,
//! `error` for errors.

use std::fmt;

use crate::error::UnitError;
use crate::events::TransitionView;
use crate::observe::Observe;

const TARGET: &str = "statevisor";

/// Observer that forwards lifecycle notifications to the `log` facade.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogObserver;

impl LogObserver {
    /// Creates a new log observer.
    pub fn new() -> Self {
        Self
    }
}

impl Observe for LogObserver {
    fn on_create(&self, unit: &str, initial: &dyn fmt::Debug) {
        log::debug!(target: TARGET, "unit={unit} created initial={initial:?}");
    }

    fn on_event(&self, unit: &str, tag: &str, event: &dyn fmt::Debug) {
        log::debug!(target: TARGET, "unit={unit} event tag={tag} payload={event:?}");
    }

    fn on_transition(&self, unit: &str, transition: &TransitionView<'_>) {
        log::trace!(target: TARGET, "unit={unit} transition={transition:?}");
    }

    fn on_error(&self, unit: &str, error: &UnitError) {
        log::error!(
            target: TARGET,
            "unit={unit} error={} detail={}",
            error.as_label(),
            error.as_message()
        );
    }

    fn on_close(&self, unit: &str) {
        log::debug!(target: TARGET, "unit={unit} closed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HandleError;

    // The log facade swallows records without an installed backend; these
    // exercise the formatting paths for panics only.
    #[test]
    fn callbacks_do_not_panic() {
        let obs = LogObserver::new();
        obs.on_create("counter", &0u32);
        obs.on_event("counter", "increment", &"Increment");
        obs.on_error(
            "counter",
            &UnitError::Handler {
                tag: "increment",
                source: HandleError::fail("boom"),
            },
        );
        obs.on_close("counter");
    }
}
