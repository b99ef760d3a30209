//! # State cell: dedup-gated current-value holder.
//!
//! [`StateCell`] is a thin wrapper around [`tokio::sync::watch`] that owns a
//! unit's current state and its change notification.
//!
//! ## Rules
//! - **Synchronous reads**: `read()` always returns the current value.
//! - **Deduplication**: a publish whose value equals the current one (by
//!   `PartialEq`) is dropped; subscribers never see consecutive duplicates.
//! - **Gated publishes**: every publish carries the publishing invocation's
//!   cancellation token. The gate is re-checked *inside* the watch lock, so
//!   once a superseding invocation has cancelled its predecessor, nothing the
//!   predecessor publishes can reach subscribers — even if the publish was
//!   already in flight on another worker thread.
//! - **Close completes streams**: `close()` is idempotent and makes every
//!   [`StateStream`] return `None` after the values already observed.
//!
//! The optional change hook fires with (previous, next) inside the
//! notification lock, before subscribers observe the value.

use std::sync::{Arc, RwLock};

use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use crate::state::{State, StateStream};

/// Hook invoked with (previous, next) on every accepted publish.
pub(crate) type ChangeHook<S> = Box<dyn Fn(&S, &S) + Send + Sync>;

struct CellInner<S> {
    tx: watch::Sender<S>,
    closed: CancellationToken,
    hook: RwLock<Option<ChangeHook<S>>>,
}

/// Current-value holder with dedup, replay-latest subscription, and teardown.
pub(crate) struct StateCell<S: State> {
    inner: Arc<CellInner<S>>,
}

impl<S: State> Clone for StateCell<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: State> StateCell<S> {
    /// Creates a cell seeded with the initial state.
    pub(crate) fn new(initial: S) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self {
            inner: Arc::new(CellInner {
                tx,
                closed: CancellationToken::new(),
                hook: RwLock::new(None),
            }),
        }
    }

    /// Returns a clone of the current state.
    pub(crate) fn read(&self) -> S {
        self.inner.tx.borrow().clone()
    }

    /// Installs the on-change hook. Replaces any previous hook.
    pub(crate) fn set_hook(&self, hook: ChangeHook<S>) {
        *self.inner.hook.write().expect("state hook lock poisoned") = Some(hook);
    }

    /// Publishes `next` unless the cell is closed, the publisher's `gate` is
    /// cancelled, or `next` equals the current value.
    ///
    /// Returns whether the publish was accepted. All three checks happen
    /// inside the watch lock: the lock is the single serialization point for
    /// one unit's state, so a gate cancelled before this call can never lose
    /// the race to an in-flight publish.
    pub(crate) fn publish(&self, next: S, gate: &CancellationToken) -> bool {
        if self.inner.closed.is_cancelled() || gate.is_cancelled() {
            return false;
        }
        let hook = self.inner.hook.read().expect("state hook lock poisoned");
        let mut accepted = false;
        self.inner.tx.send_if_modified(|current| {
            if self.inner.closed.is_cancelled() || gate.is_cancelled() {
                return false;
            }
            if *current == next {
                return false;
            }
            if let Some(h) = hook.as_ref() {
                h(current, &next);
            }
            *current = next.clone();
            accepted = true;
            true
        });
        accepted
    }

    /// Creates a replay-latest subscription to this cell.
    pub(crate) fn subscribe(&self) -> StateStream<S> {
        StateStream::new(self.inner.tx.subscribe(), self.inner.closed.clone())
    }

    /// Completes every subscription. Idempotent.
    pub(crate) fn close(&self) {
        self.inner.closed.cancel();
    }

    pub(crate) fn is_closed(&self) -> bool {
        self.inner.closed.is_cancelled()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_gate() -> CancellationToken {
        CancellationToken::new()
    }

    #[test]
    fn read_returns_initial_state() {
        let cell = StateCell::new(41u32);
        assert_eq!(cell.read(), 41);
    }

    #[test]
    fn publish_accepts_distinct_and_drops_duplicates() {
        let cell = StateCell::new(0u32);
        let gate = open_gate();
        assert!(cell.publish(1, &gate));
        assert!(!cell.publish(1, &gate), "duplicate must be dropped");
        assert!(cell.publish(2, &gate));
        assert_eq!(cell.read(), 2);
    }

    #[test]
    fn cancelled_gate_suppresses_publish() {
        let cell = StateCell::new(0u32);
        let gate = open_gate();
        gate.cancel();
        assert!(!cell.publish(1, &gate));
        assert_eq!(cell.read(), 0);
    }

    #[test]
    fn closed_cell_suppresses_publish() {
        let cell = StateCell::new(0u32);
        cell.close();
        assert!(!cell.publish(1, &open_gate()));
        assert_eq!(cell.read(), 0);
    }

    #[test]
    fn close_is_idempotent() {
        let cell = StateCell::new(0u32);
        cell.close();
        cell.close();
        assert!(cell.is_closed());
    }

    #[test]
    fn hook_fires_with_previous_and_next_on_accepted_publish_only() {
        use std::sync::Mutex;

        let cell = StateCell::new(0u32);
        let seen: Arc<Mutex<Vec<(u32, u32)>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        cell.set_hook(Box::new(move |prev, next| {
            sink.lock().unwrap().push((*prev, *next));
        }));

        let gate = open_gate();
        cell.publish(1, &gate);
        cell.publish(1, &gate); // deduped, hook must not fire
        cell.publish(2, &gate);

        assert_eq!(*seen.lock().unwrap(), vec![(0, 1), (1, 2)]);
    }

    #[tokio::test]
    async fn subscriber_replays_latest_then_sees_changes() {
        let cell = StateCell::new(10u32);
        let gate = open_gate();
        let mut stream = cell.subscribe();

        assert_eq!(stream.next().await, Some(10));
        cell.publish(11, &gate);
        assert_eq!(stream.next().await, Some(11));

        cell.close();
        assert_eq!(stream.next().await, None);
    }
}
