//! # Handler specification for registration.
//!
//! Defines [`HandlerSpec`] — a configuration bundle describing how events of
//! one tag are processed: the handler itself, the concurrency [`Transform`],
//! and an optional [`RetryPolicy`] for flaky work.
//!
//! A spec can be created:
//! - **Implicitly** by [`Unit::on`](crate::Unit::on) (unit-default transform,
//!   no retry)
//! - **Explicitly** with [`HandlerSpec::new`] plus `with_*` builders, passed
//!   to [`Unit::on_spec`](crate::Unit::on_spec)
//!
//! ## Example
//! ```rust
//! use statevisor::{Event, HandlerFn, HandlerSpec, RetryPolicy, Transform};
//!
//! #[derive(Debug)]
//! enum QueryEvent { Fetch }
//!
//! impl Event for QueryEvent {
//!     fn tag(&self) -> &'static str { "fetch" }
//! }
//!
//! let spec: HandlerSpec<QueryEvent, Option<String>> =
//!     HandlerSpec::new(HandlerFn::arc(|_event, emit, _ctx| async move {
//!         emit.publish(Some("payload".to_string()));
//!         Ok(())
//!     }))
//!     .with_transform(Transform::Restartable)
//!     .with_retry(RetryPolicy::default());
//!
//! assert_eq!(spec.transform(), Some(Transform::Restartable));
//! ```

use crate::events::Event;
use crate::handlers::HandlerRef;
use crate::policies::{RetryPolicy, Transform};
use crate::state::State;

/// Specification for processing one event tag.
///
/// Bundles together:
/// - The handler itself ([`HandlerRef`])
/// - Concurrency transform ([`Transform`]; `None` = unit default)
/// - Optional retry policy ([`RetryPolicy`])
pub struct HandlerSpec<E: Event, S: State> {
    handler: HandlerRef<E, S>,
    transform: Option<Transform>,
    retry: Option<RetryPolicy>,
}

impl<E: Event, S: State> HandlerSpec<E, S> {
    /// Creates a specification with the unit-default transform and no retry.
    pub fn new(handler: HandlerRef<E, S>) -> Self {
        Self {
            handler,
            transform: None,
            retry: None,
        }
    }

    /// Returns a new spec with an explicit concurrency transform.
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = Some(transform);
        self
    }

    /// Returns a new spec with a retry policy for flaky handlers.
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = Some(retry);
        self
    }

    /// Returns the explicit transform, if one was set.
    pub fn transform(&self) -> Option<Transform> {
        self.transform
    }

    /// Returns the retry policy, if one was set.
    pub fn retry(&self) -> Option<RetryPolicy> {
        self.retry
    }

    pub(crate) fn into_parts(self) -> (HandlerRef<E, S>, Option<Transform>, Option<RetryPolicy>) {
        (self.handler, self.transform, self.retry)
    }
}
