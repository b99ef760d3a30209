//! # Function-backed handler (`HandlerFn`)
//!
//! [`HandlerFn`] wraps a closure `F: Fn(Arc<E>, Emitter, CancellationToken)
//! -> Fut`, producing a fresh future per attempt. This avoids shared mutable
//! state between attempts and restarts; if shared state is needed, move an
//! explicit `Arc<...>` into the closure.
//!
//! ## Example
//! ```rust
//! use statevisor::{Event, HandlerFn, HandlerRef, HandleError};
//!
//! #[derive(Debug)]
//! enum CounterEvent { Increment }
//!
//! impl Event for CounterEvent {
//!     fn tag(&self) -> &'static str { "increment" }
//! }
//!
//! let handler: HandlerRef<CounterEvent, i64> =
//!     HandlerFn::arc(|_event, emit, _ctx| async move {
//!         emit.update(|n| n + 1);
//!         Ok(())
//!     });
//! ```

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::core::Emitter;
use crate::error::HandleError;
use crate::events::Event;
use crate::handlers::handler::{Handle, HandlerRef};
use crate::state::State;

/// Function-backed handler implementation.
///
/// Wraps a closure that *creates* a new future per attempt.
pub struct HandlerFn<F> {
    f: F,
}

impl<F> HandlerFn<F> {
    /// Creates a new function-backed handler.
    ///
    /// Prefer [`HandlerFn::arc`] when you immediately need a [`HandlerRef`].
    pub fn new(f: F) -> Self {
        Self { f }
    }

    /// Creates the handler and returns it as a shared handle (`Arc<dyn Handle>`).
    pub fn arc<E: Event, S: State>(f: F) -> HandlerRef<E, S>
    where
        Self: Handle<E, S>,
    {
        Arc::new(Self { f })
    }
}

#[async_trait]
impl<E, S, F, Fut> Handle<E, S> for HandlerFn<F>
where
    E: Event,
    S: State,
    F: Fn(Arc<E>, Emitter<E, S>, CancellationToken) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), HandleError>> + Send + 'static,
{
    async fn handle(
        &self,
        event: Arc<E>,
        emit: Emitter<E, S>,
        ctx: CancellationToken,
    ) -> Result<(), HandleError> {
        (self.f)(event, emit, ctx).await
    }
}
