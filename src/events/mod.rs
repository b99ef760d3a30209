//! Events and transitions: the intake side of the pipeline.
//!
//! This module groups the event **data model** and the **transition** records
//! produced each time a handler attempts to publish a new state.
//!
//! ## Contents
//! - [`Event`] closed tagged-union contract for unit events
//! - [`Transition`], [`TransitionView`] per-publish observability records
//!
//! ## Quick reference
//! - **Producers**: `Emitter::publish` / `Emitter::update` record one
//!   [`Transition`] per publish call on an open emitter.
//! - **Consumers**: the process observer (`Observe::on_transition`); nothing
//!   in a unit's own logic reads transitions back.

mod event;
mod transition;

pub use event::Event;
pub use transition::{Transition, TransitionView};
