//! Runtime core: event dispatch and lifecycle.
//!
//! This module contains the embedded implementation of the statevisor
//! engine. The public API from this module is [`Unit`], [`Emitter`], and
//! [`UnitConfig`].
//!
//! Internal modules:
//! - [`unit`]: registration, event intake, teardown orchestration;
//! - [`lane`]: per-tag scheduling state for each concurrency transform;
//! - [`invoke`]: runs one invocation with retry/backoff and panic isolation;
//! - [`emitter`]: the per-attempt publisher handed to handlers;
//! - [`config`]: per-unit configuration.

mod config;
mod emitter;
mod invoke;
mod lane;
mod unit;

pub use config::UnitConfig;
pub use emitter::Emitter;
pub use unit::Unit;
