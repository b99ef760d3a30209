//! # Handler trait: async, cancelable event processing.
//!
//! This module defines the [`Handle`] trait. A handler receives the
//! triggering event, an [`Emitter`](crate::Emitter) to publish states
//! through, and a [`CancellationToken`] it should check to stop in-flight
//! work when the invocation is superseded or the unit closes. The common
//! handle type is [`HandlerRef`], an `Arc<dyn Handle>` suitable for sharing
//! across invocations.
//!
//! Cancellation is cooperative: the engine never preempts handler code that
//! ignores the token, it only gates what such code can publish.

use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::core::Emitter;
use crate::error::HandleError;
use crate::events::Event;
use crate::state::State;

/// # Asynchronous, cancelable event handler.
///
/// One handler is registered per event tag and invoked once per accepted
/// event (possibly multiple attempts under a retry policy; each attempt gets
/// a fresh emitter). Implementors should regularly check `ctx` and exit
/// promptly when cancelled.
///
/// # Example
/// ```
/// use std::sync::Arc;
/// use async_trait::async_trait;
/// use tokio_util::sync::CancellationToken;
/// use statevisor::{Emitter, Event, Handle, HandleError};
///
/// #[derive(Debug)]
/// enum CounterEvent { Increment }
///
/// impl Event for CounterEvent {
///     fn tag(&self) -> &'static str { "increment" }
/// }
///
/// struct Increment;
///
/// #[async_trait]
/// impl Handle<CounterEvent, i64> for Increment {
///     async fn handle(
///         &self,
///         _event: Arc<CounterEvent>,
///         emit: Emitter<CounterEvent, i64>,
///         _ctx: CancellationToken,
///     ) -> Result<(), HandleError> {
///         emit.update(|n| n + 1);
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait Handle<E: Event, S: State>: Send + Sync + 'static {
    /// Processes one event, publishing zero or more states through `emit`.
    ///
    /// Return [`HandleError::Fail`] for failures that may succeed on retry,
    /// [`HandleError::Fatal`] for failures that must not be retried, and
    /// [`HandleError::Canceled`] when exiting early because `ctx` fired
    /// (treated as a graceful stop, not an error).
    async fn handle(
        &self,
        event: Arc<E>,
        emit: Emitter<E, S>,
        ctx: CancellationToken,
    ) -> Result<(), HandleError>;
}

/// Shared handle to a registered handler.
pub type HandlerRef<E, S> = Arc<dyn Handle<E, S>>;
