//! # Emitter: per-attempt state publisher.
//!
//! An [`Emitter`] is handed to exactly one handler attempt. It owns the
//! attempt's open/closed lifecycle (a [`CancellationToken`] child of the
//! invocation), the triggering event, and a handle to the unit's state cell.
//!
//! ## Rules
//! - Once closed, every `publish`/`update` call is a **silent no-op**; the
//!   gate is re-checked inside the cell's notification lock, so a
//!   `Restartable` supersede can never race a late publish through.
//! - Every publish call on an open emitter records **exactly one** transition
//!   for the observer, including publishes the cell then drops as duplicates.
//! - `close()` is idempotent, wakes every active drain, and is called
//!   automatically by the engine when the attempt completes or is cancelled;
//!   handler code may also call it early to terminate a long drain.
//!
//! ## Event flow
//! ```text
//! handler ── publish(next) ──► Transition::record(prev, event, next)
//!                                  └─► Observe::on_transition
//!                              StateCell::publish(next, gate)
//!                                  ├─ dedup / gate / closed checks
//!                                  └─► watch subscribers
//! ```

use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};
use std::sync::Arc;

use futures::{Stream, StreamExt};
use tokio_util::sync::{CancellationToken, WaitForCancellationFuture};

use crate::error::{DrainError, HandleError, UnitError};
use crate::events::{Event, Transition};
use crate::observe;
use crate::state::{State, StateCell};

struct EmitterInner<E, S: State> {
    unit: Arc<str>,
    tag: &'static str,
    event: Arc<E>,
    cell: StateCell<S>,
    scope: CancellationToken,
    drains: AtomicUsize,
}

/// Scoped publisher handed to one handler attempt.
pub struct Emitter<E: Event, S: State> {
    inner: Arc<EmitterInner<E, S>>,
}

impl<E: Event, S: State> Clone for Emitter<E, S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<E: Event, S: State> Emitter<E, S> {
    pub(crate) fn new(
        unit: Arc<str>,
        tag: &'static str,
        event: Arc<E>,
        cell: StateCell<S>,
        scope: CancellationToken,
    ) -> Self {
        Self {
            inner: Arc::new(EmitterInner {
                unit,
                tag,
                event,
                cell,
                scope,
                drains: AtomicUsize::new(0),
            }),
        }
    }

    /// Publishes `next` as the candidate state.
    ///
    /// Silent no-op when the emitter is closed. Records one transition for
    /// the observer; the cell then drops the value if it equals the current
    /// state.
    pub fn publish(&self, next: S) {
        if self.is_closed() {
            return;
        }
        let previous = self.inner.cell.read();
        let transition = Transition::record(previous, Arc::clone(&self.inner.event), next.clone());
        observe::current()
            .observer
            .on_transition(&self.inner.unit, &transition.view());
        self.inner.cell.publish(next, &self.inner.scope);
    }

    /// Computes the candidate state from the unit's current state, then
    /// publishes it.
    ///
    /// The read and the publish are not atomic: overlapping invocations that
    /// both `update` race last-write-wins, which is the documented behavior
    /// for the `Concurrent` transform.
    pub fn update(&self, f: impl FnOnce(&S) -> S) {
        if self.is_closed() {
            return;
        }
        let next = f(&self.inner.cell.read());
        self.publish(next);
    }

    /// Returns whether this emitter has been closed.
    pub fn is_closed(&self) -> bool {
        self.inner.scope.is_cancelled()
    }

    /// Resolves when the emitter is closed; for use in `select!` arms of
    /// handler code doing work outside the drain helpers.
    pub fn closed(&self) -> WaitForCancellationFuture<'_> {
        self.inner.scope.cancelled()
    }

    /// Closes the emitter: gates all further publishes and wakes every
    /// active drain. Idempotent.
    pub fn close(&self) {
        self.inner.scope.cancel();
    }

    /// Number of drains currently consuming external sequences.
    pub fn live_drains(&self) -> usize {
        self.inner.drains.load(AtomicOrdering::Acquire)
    }

    /// Drains an external sequence, invoking `on_item` for each element as a
    /// side effect (it is expected to call [`publish`](Self::publish)).
    ///
    /// Source errors are routed to the unit's error channel. Resolves when
    /// the source completes, errors out of elements, or the emitter closes —
    /// never panics out, so handler code can `await` it unconditionally.
    pub async fn drain_each<T, St, F>(&self, source: St, on_item: F)
    where
        St: Stream<Item = Result<T, DrainError>>,
        F: FnMut(T),
    {
        self.drain_inner(source, on_item, |err| {
            observe::current().observer.on_error(
                &self.inner.unit,
                &UnitError::Handler {
                    tag: self.inner.tag,
                    source: HandleError::fail(err.to_string()),
                },
            );
        })
        .await;
    }

    /// Like [`drain_each`](Self::drain_each), but errors are handed to the
    /// caller-supplied `on_error` instead of the unit error channel.
    pub async fn drain_each_with<T, St, FI, FE>(&self, source: St, on_item: FI, on_error: FE)
    where
        St: Stream<Item = Result<T, DrainError>>,
        FI: FnMut(T),
        FE: FnMut(DrainError),
    {
        self.drain_inner(source, on_item, on_error).await;
    }

    /// Drains an external sequence, mapping each element (and each error)
    /// to a state that is published automatically.
    pub async fn drain_mapped<T, St, FM, FE>(&self, source: St, mut map: FM, mut map_err: FE)
    where
        St: Stream<Item = Result<T, DrainError>>,
        FM: FnMut(T) -> S,
        FE: FnMut(DrainError) -> S,
    {
        self.drain_inner(
            source,
            |item| self.publish(map(item)),
            |err| self.publish(map_err(err)),
        )
        .await;
    }

    async fn drain_inner<T, St, FI, FE>(&self, source: St, mut on_item: FI, mut on_error: FE)
    where
        St: Stream<Item = Result<T, DrainError>>,
        FI: FnMut(T),
        FE: FnMut(DrainError),
    {
        self.inner.drains.fetch_add(1, AtomicOrdering::AcqRel);
        tokio::pin!(source);
        loop {
            tokio::select! {
                biased;
                _ = self.inner.scope.cancelled() => break,
                item = source.next() => match item {
                    Some(Ok(value)) => on_item(value),
                    Some(Err(err)) => on_error(err),
                    None => break,
                }
            }
        }
        self.inner.drains.fetch_sub(1, AtomicOrdering::AcqRel);
    }
}
