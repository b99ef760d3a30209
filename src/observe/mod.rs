//! Process-wide observability for units.
//!
//! This module provides the [`Observe`] trait, the built-in [`LogObserver`],
//! and the process [`Runtime`] that carries the single active observer plus
//! the defaults every unit inherits.
//!
//! ## Architecture
//! ```text
//! Unit::new ──────────────► Observe::on_create(unit, initial)
//! Unit::add ──────────────► Observe::on_event(unit, tag, event)
//! Emitter::publish ───────► Observe::on_transition(unit, view)
//! invocation failure ─────► Observe::on_error(unit, error)
//! Unit::close ────────────► Observe::on_close(unit)
//! ```
//!
//! ## Rules
//! - Exactly one observer is active per process; it is part of the
//!   [`Runtime`] installed via [`install`] **before** any unit is
//!   constructed. Without an explicit install, [`LogObserver`] is active.
//! - Observers are read-only consumers: they may log, export metrics, or
//!   trigger new events, but must never mutate state directly.
//! - Callbacks are invoked synchronously on the publishing task; keep them
//!   cheap and non-blocking.

mod log;
mod observer;
mod runtime;

pub use self::log::LogObserver;
pub use observer::Observe;
pub use runtime::{install, Defaults, Runtime};

pub(crate) use runtime::{current, mark_unit_constructed};
