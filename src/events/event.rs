//! # Event contract for unit dispatch.
//!
//! A unit's events form a **closed sum type**: one user enum per unit, where
//! each variant maps to a stable tag string. The tag is the registration key
//! — [`Unit::on`](crate::Unit::on) binds exactly one handler per tag, and
//! [`Unit::add`](crate::Unit::add) routes by the value returned from
//! [`Event::tag`]. Duplicate registrations are rejected at registration time,
//! not discovered at dispatch.
//!
//! Events are transient values: they are moved into the unit, shared with the
//! handler for the duration of its invocation, and never retained afterwards.
//!
//! ## Example
//! ```rust
//! use statevisor::Event;
//!
//! #[derive(Debug)]
//! enum CounterEvent {
//!     Increment,
//!     Reset(i64),
//! }
//!
//! impl Event for CounterEvent {
//!     fn tag(&self) -> &'static str {
//!         match self {
//!             CounterEvent::Increment => "increment",
//!             CounterEvent::Reset(_) => "reset",
//!         }
//!     }
//! }
//!
//! assert_eq!(CounterEvent::Reset(0).tag(), "reset");
//! ```

use std::fmt;

/// Typed trigger value consumed by exactly one registered handler.
///
/// ### Rules
/// - `tag()` must be **total** (every variant returns a tag) and **stable**
///   (the same variant always returns the same tag): an exhaustive `match`
///   over the enum is the expected implementation.
/// - Tags are `&'static str` so the registry can key on them without
///   allocation and report them in errors and logs.
/// - `Debug` is required so the process observer can render event intake
///   without knowing concrete types.
pub trait Event: fmt::Debug + Send + Sync + 'static {
    /// Returns the stable tag identifying this event's variant.
    fn tag(&self) -> &'static str;
}
