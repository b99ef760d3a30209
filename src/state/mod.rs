//! State values and the state cell: the output side of the pipeline.
//!
//! This module groups the state **contract** and the **cell** that owns a
//! unit's current value.
//!
//! ## Contents
//! - [`State`] blanket contract for state values
//! - [`StateCell`] dedup-gated current-value holder (crate-internal)
//! - [`StateStream`] replay-latest subscription handed to callers
//!
//! ## Rules
//! - The cell is the only mutable resource shared across invocations of one
//!   unit; every publish is serialized through its single notification point.
//! - Consecutive equal values (by `PartialEq`) are never re-emitted.
//! - A late subscriber always receives the current value first.

mod cell;
mod stream;

pub(crate) use cell::{ChangeHook, StateCell};
pub use stream::StateStream;

use std::fmt;

/// Immutable snapshot value published by handlers.
///
/// Blanket-implemented for any type that is cloneable, value-comparable
/// (`PartialEq` is the deduplication rule), debuggable (for the process
/// observer), and sendable across tasks. Treat states as immutable: publish
/// a new value instead of mutating in place.
pub trait State: Clone + PartialEq + fmt::Debug + Send + Sync + 'static {}

impl<T> State for T where T: Clone + PartialEq + fmt::Debug + Send + Sync + 'static {}
