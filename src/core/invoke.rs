//! # Invocation: runs one accepted event against its handler.
//!
//! Supervises a single handler invocation with:
//! - retries per [`RetryPolicy`] (fresh emitter per attempt),
//! - cancellable backoff waits between attempts,
//! - panic isolation (a panicking handler is reported, never unwinds into
//!   the engine),
//! - error routing to the process observer.
//!
//! ## Flow
//! ```text
//! loop {
//!   ├─► bail if invocation token cancelled
//!   ├─► attempt += 1
//!   ├─► attempt_once() ── handler(event, emitter, ctx) under catch_unwind
//!   │       │                 └─► emitter closed when the attempt ends
//!   │       ├─ Ok            → done
//!   │       ├─ Err(Canceled) → done (graceful stop, nothing reported)
//!   │       └─ Err(e):
//!   │            ├─ retryable && attempts left → cancellable backoff sleep
//!   │            └─ else → Observe::on_error(Handler | RetryExhausted)
//! }
//! ```
//!
//! ## Rules
//! - Attempts run **sequentially** within one invocation (never parallel).
//! - Each attempt gets a **fresh emitter** whose scope is a child of the
//!   invocation token; cancelling the invocation gates every attempt.
//! - States published by failed attempts are kept; retry re-runs the
//!   handler, it does not roll back the cell.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use tokio::time;
use tokio_util::sync::CancellationToken;

use crate::core::emitter::Emitter;
use crate::error::{HandleError, UnitError};
use crate::events::Event;
use crate::handlers::HandlerRef;
use crate::observe;
use crate::policies::RetryPolicy;
use crate::state::{State, StateCell};

/// Identity and policy shared by every attempt of one invocation.
#[derive(Clone)]
pub(crate) struct InvocationParams {
    /// Owning unit's name (for observer reporting).
    pub unit: Arc<str>,
    /// Event tag this invocation dispatches.
    pub tag: &'static str,
    /// Optional attempt budget for flaky handlers.
    pub retry: Option<RetryPolicy>,
}

/// One accepted event bound to its handler, cell, and cancellation token.
pub(crate) struct Invocation<E: Event, S: State> {
    pub handler: HandlerRef<E, S>,
    pub event: Arc<E>,
    pub cell: StateCell<S>,
    pub params: InvocationParams,
    pub token: CancellationToken,
}

impl<E: Event, S: State> Invocation<E, S> {
    /// Runs the invocation to a terminal state: success, graceful
    /// cancellation, or a reported error.
    pub(crate) async fn run(self) {
        let budget = self.params.retry.map(|r| r.attempts()).unwrap_or(1);
        let mut attempt: u32 = 0;

        loop {
            if self.token.is_cancelled() {
                return;
            }
            attempt += 1;

            match self.attempt_once().await {
                Ok(()) => return,
                Err(HandleError::Canceled) => return,
                Err(err) => {
                    if err.is_retryable() && attempt < budget {
                        let retry = self
                            .params
                            .retry
                            .as_ref()
                            .expect("attempt budget > 1 requires a retry policy");
                        let delay = retry.delay_after(attempt);
                        log::debug!(
                            target: "statevisor",
                            "unit={} tag={} attempt={attempt} failed ({}); next attempt in {delay:?}",
                            self.params.unit,
                            self.params.tag,
                            err.as_label(),
                        );

                        let sleep = time::sleep(delay);
                        tokio::pin!(sleep);
                        tokio::select! {
                            _ = &mut sleep => {}
                            _ = self.token.cancelled() => return,
                        }
                        continue;
                    }

                    let report = if self.params.retry.is_some() && err.is_retryable() {
                        UnitError::RetryExhausted {
                            tag: self.params.tag,
                            attempts: attempt,
                            source: err,
                        }
                    } else {
                        UnitError::Handler {
                            tag: self.params.tag,
                            source: err,
                        }
                    };
                    observe::current()
                        .observer
                        .on_error(&self.params.unit, &report);
                    return;
                }
            }
        }
    }

    /// Executes one attempt with a fresh emitter; the emitter is closed when
    /// the attempt ends, however it ends.
    async fn attempt_once(&self) -> Result<(), HandleError> {
        let scope = self.token.child_token();
        let emitter = Emitter::new(
            Arc::clone(&self.params.unit),
            self.params.tag,
            Arc::clone(&self.event),
            self.cell.clone(),
            scope.clone(),
        );

        let fut = self
            .handler
            .handle(Arc::clone(&self.event), emitter.clone(), scope);
        let result = AssertUnwindSafe(fut).catch_unwind().await;
        emitter.close();

        match result {
            Ok(outcome) => outcome,
            Err(panic) => Err(HandleError::Fatal {
                error: panic_reason(panic),
            }),
        }
    }
}

/// Best-effort extraction of a panic payload message.
fn panic_reason(panic: Box<dyn std::any::Any + Send>) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "handler panicked".to_string()
    }
}
