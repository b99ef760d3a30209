//! # Lane: per-tag scheduling state for one concurrency transform.
//!
//! Registration creates one [`Lane`] per event tag. The lane turns accepted
//! events into tracked [`Invocation`]s according to its [`Transform`]:
//!
//! ```text
//! Concurrent   ──► spawn immediately (no mutual scheduling)
//! Sequential   ──► unbounded queue ─► dedicated worker, one at a time
//! Restartable  ──► cancel current invocation token, then spawn replacement
//! Droppable    ──► atomic busy gate; events during an invocation are dropped
//! ```
//!
//! ## Rules
//! - Every invocation token is a child of the unit scope: unit close cancels
//!   every lane's work with one call.
//! - `Restartable` cancels the superseded token **before** spawning the
//!   replacement; combined with the cell's gate check this guarantees the
//!   old invocation publishes nothing after the new one begins.
//! - `Droppable` flips its gate inside `accept`, synchronously with `add`,
//!   so a burst of adds resolves deterministically (first wins).

use std::sync::atomic::{AtomicBool, Ordering as AtomicOrdering};
use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;

use crate::core::invoke::{Invocation, InvocationParams};
use crate::events::Event;
use crate::handlers::HandlerRef;
use crate::policies::Transform;
use crate::state::{State, StateCell};

/// Scheduling state for one registered event tag.
pub(crate) struct Lane<E: Event, S: State> {
    handler: HandlerRef<E, S>,
    params: InvocationParams,
    cell: StateCell<S>,
    scope: CancellationToken,
    tracker: TaskTracker,
    mode: LaneMode<E>,
}

enum LaneMode<E> {
    Concurrent,
    Sequential { tx: mpsc::UnboundedSender<Arc<E>> },
    Restartable { current: Mutex<Option<CancellationToken>> },
    Droppable { busy: Arc<AtomicBool> },
}

impl<E: Event, S: State> Lane<E, S> {
    /// Builds the lane; `Sequential` spawns its worker task here, so this
    /// must run inside a tokio runtime.
    pub(crate) fn build(
        transform: Transform,
        handler: HandlerRef<E, S>,
        params: InvocationParams,
        cell: StateCell<S>,
        scope: CancellationToken,
        tracker: TaskTracker,
    ) -> Self {
        let mode = match transform {
            Transform::Concurrent => LaneMode::Concurrent,
            Transform::Sequential => {
                let (tx, rx) = mpsc::unbounded_channel();
                spawn_sequential_worker(
                    rx,
                    Arc::clone(&handler),
                    params.clone(),
                    cell.clone(),
                    scope.clone(),
                    &tracker,
                );
                LaneMode::Sequential { tx }
            }
            Transform::Restartable => LaneMode::Restartable {
                current: Mutex::new(None),
            },
            Transform::Droppable => LaneMode::Droppable {
                busy: Arc::new(AtomicBool::new(false)),
            },
        };
        Self {
            handler,
            params,
            cell,
            scope,
            tracker,
            mode,
        }
    }

    /// Schedules one accepted event according to the lane's transform.
    pub(crate) fn accept(&self, event: Arc<E>) {
        match &self.mode {
            LaneMode::Concurrent => {
                let inv = self.invocation(event, self.scope.child_token());
                self.tracker.spawn(inv.run());
            }
            LaneMode::Sequential { tx } => {
                // The worker only disappears during unit teardown; the event
                // is moot then.
                let _ = tx.send(event);
            }
            LaneMode::Restartable { current } => {
                let token = self.scope.child_token();
                let superseded = current
                    .lock()
                    .expect("restartable slot poisoned")
                    .replace(token.clone());
                if let Some(previous) = superseded {
                    // Before the replacement starts: the cell re-checks this
                    // token under its lock, so nothing the superseded
                    // invocation publishes from here on is accepted.
                    previous.cancel();
                }
                let inv = self.invocation(event, token);
                self.tracker.spawn(inv.run());
            }
            LaneMode::Droppable { busy } => {
                if busy.swap(true, AtomicOrdering::AcqRel) {
                    return; // an invocation is active: the event is discarded
                }
                let gate = Arc::clone(busy);
                let inv = self.invocation(event, self.scope.child_token());
                self.tracker.spawn(async move {
                    inv.run().await;
                    gate.store(false, AtomicOrdering::Release);
                });
            }
        }
    }

    fn invocation(&self, event: Arc<E>, token: CancellationToken) -> Invocation<E, S> {
        Invocation {
            handler: Arc::clone(&self.handler),
            event,
            cell: self.cell.clone(),
            params: self.params.clone(),
            token,
        }
    }
}

/// Worker loop for `Sequential`: one invocation at a time, arrival order.
fn spawn_sequential_worker<E: Event, S: State>(
    mut rx: mpsc::UnboundedReceiver<Arc<E>>,
    handler: HandlerRef<E, S>,
    params: InvocationParams,
    cell: StateCell<S>,
    scope: CancellationToken,
    tracker: &TaskTracker,
) {
    let worker_scope = scope.clone();
    tracker.spawn(async move {
        loop {
            tokio::select! {
                biased;
                _ = worker_scope.cancelled() => break,
                next = rx.recv() => match next {
                    Some(event) => {
                        let inv = Invocation {
                            handler: Arc::clone(&handler),
                            event,
                            cell: cell.clone(),
                            params: params.clone(),
                            token: scope.child_token(),
                        };
                        inv.run().await;
                    }
                    None => break,
                }
            }
        }
    });
}
