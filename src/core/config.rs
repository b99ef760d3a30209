//! # Per-unit configuration.
//!
//! Provides [`UnitConfig`] — settings one unit carries for its lifetime.
//!
//! `Default` inherits from the process [`Defaults`](crate::Defaults)
//! installed via [`install`](crate::install), so a service configures these
//! once at startup and constructs units with `Unit::new`.

use std::time::Duration;

use crate::observe;
use crate::policies::Transform;

/// Configuration for one unit.
///
/// ## Field semantics
/// - `grace`: maximum time [`Unit::close`](crate::Unit::close) waits for
///   live invocations after cancelling them. Handlers that ignore their
///   cancellation token past this window are abandoned and reported via
///   [`UnitError::GraceExceeded`](crate::UnitError::GraceExceeded).
/// - `transform`: concurrency transform used by bare
///   [`Unit::on`](crate::Unit::on) registrations; `on_spec` with an explicit
///   transform overrides it per tag.
#[derive(Clone, Copy, Debug)]
pub struct UnitConfig {
    /// Grace window for `close()`.
    pub grace: Duration,
    /// Default transform for bare registrations.
    pub transform: Transform,
}

impl Default for UnitConfig {
    /// Inherits the installed process [`Defaults`](crate::Defaults).
    fn default() -> Self {
        let defaults = observe::current().defaults;
        Self {
            grace: defaults.grace,
            transform: defaults.transform,
        }
    }
}
