//! Concurrency and retry policies.
//!
//! This module groups the knobs that control **how** concurrently-raised
//! events of one tag are scheduled and **if/when** a failing handler is
//! retried.
//!
//! ## Contents
//! - [`Transform`] how same-tag events schedule against each other
//!   (concurrent / sequential / restartable / droppable)
//! - [`RetryPolicy`] attempt budget for flaky handlers
//! - [`BackoffPolicy`] how retry delays evolve (first / factor / max + jitter)
//! - [`JitterPolicy`] randomization strategy to avoid thundering herd
//!
//! ## Quick wiring
//! ```text
//! HandlerSpec { transform: Transform, retry: Option<RetryPolicy> }
//!      └─► core::lane     uses transform to admit/queue/supersede/drop events
//!      └─► core::invoke   uses retry.backoff.next(attempt) between attempts
//! ```
//!
//! ## Defaults
//! - `Transform::Concurrent` (every event starts a handler immediately).
//! - `RetryPolicy::default()` → 3 attempts over `BackoffPolicy::default()`.
//! - `BackoffPolicy::default()` → first=100ms, factor=2.0, max=30s, jitter=None.

mod backoff;
mod jitter;
mod retry;
mod transform;

pub use backoff::BackoffPolicy;
pub use jitter::JitterPolicy;
pub use retry::RetryPolicy;
pub use transform::Transform;
