//! # Process runtime: the observer and unit defaults.
//!
//! A process hosts exactly one [`Runtime`]: the active [`Observe`] instance
//! plus the [`Defaults`] every [`UnitConfig`](crate::UnitConfig) inherits.
//! It is installed once via [`install`], **before any unit is constructed**;
//! afterwards it is immutable for the lifetime of the process.
//!
//! ## Ordering rules
//! - `install()` after a previous install → [`InstallError::AlreadyInstalled`].
//! - `install()` after any `Unit::new` → [`InstallError::TooLate`]; units
//!   constructed earlier already captured defaults and report to the
//!   fallback observer, so a late install would split observability.
//! - No install at all → [`LogObserver`] with stock [`Defaults`].
//!
//! ## Example
//! ```rust,no_run
//! use statevisor::{install, Defaults, LogObserver, Runtime};
//!
//! fn main() {
//!     install(Runtime::new().with_observer(std::sync::Arc::new(LogObserver::new())))
//!         .expect("install before constructing units");
//!     // ... construct units, run the app ...
//! }
//! ```

use std::sync::atomic::{AtomicBool, Ordering as AtomicOrdering};
use std::sync::{Arc, OnceLock};
use std::time::Duration;

use crate::error::InstallError;
use crate::observe::{LogObserver, Observe};
use crate::policies::Transform;

static RUNTIME: OnceLock<Runtime> = OnceLock::new();
static UNIT_CONSTRUCTED: AtomicBool = AtomicBool::new(false);

/// Defaults inherited by every unit constructed in this process.
#[derive(Clone, Copy, Debug)]
pub struct Defaults {
    /// Transform used by bare `on()` registrations.
    pub transform: Transform,
    /// Grace window `close()` waits for live invocations.
    pub grace: Duration,
}

impl Default for Defaults {
    /// Returns `transform = Concurrent`, `grace = 5s`.
    fn default() -> Self {
        Self {
            transform: Transform::Concurrent,
            grace: Duration::from_secs(5),
        }
    }
}

/// Process-wide configuration: the active observer and unit defaults.
pub struct Runtime {
    pub(crate) observer: Arc<dyn Observe>,
    pub(crate) defaults: Defaults,
}

impl Runtime {
    /// Creates a runtime with [`LogObserver`] and stock [`Defaults`].
    pub fn new() -> Self {
        Self {
            observer: Arc::new(LogObserver::new()),
            defaults: Defaults::default(),
        }
    }

    /// Replaces the observer.
    pub fn with_observer(mut self, observer: Arc<dyn Observe>) -> Self {
        self.observer = observer;
        self
    }

    /// Replaces the unit defaults.
    pub fn with_defaults(mut self, defaults: Defaults) -> Self {
        self.defaults = defaults;
        self
    }
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new()
    }
}

/// Installs the process runtime.
///
/// Must run before any unit is constructed and at most once; see the module
/// docs for the ordering rules.
pub fn install(runtime: Runtime) -> Result<(), InstallError> {
    if UNIT_CONSTRUCTED.load(AtomicOrdering::SeqCst) {
        return Err(InstallError::TooLate);
    }
    RUNTIME
        .set(runtime)
        .map_err(|_| InstallError::AlreadyInstalled)
}

/// Returns the installed runtime, initializing the fallback on first touch.
pub(crate) fn current() -> &'static Runtime {
    RUNTIME.get_or_init(Runtime::new)
}

/// Records that a unit exists; later installs are rejected as too late.
pub(crate) fn mark_unit_constructed() {
    UNIT_CONSTRUCTED.store(true, AtomicOrdering::SeqCst);
}
