//! # Handler abstractions and specifications.
//!
//! This module provides the core handler-related types:
//! - [`Handle`] - trait for implementing async cancelable event handlers
//! - [`HandlerFn`] - function-based handler implementation
//! - [`HandlerRef`] - shared reference to a handler (`Arc<dyn Handle>`)
//! - [`HandlerSpec`] - specification bundling a handler with policies

mod handler;
mod handler_fn;
mod spec;

pub use handler::{Handle, HandlerRef};
pub use handler_fn::HandlerFn;
pub use spec::HandlerSpec;
