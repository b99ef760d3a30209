//! # Replay-latest state subscription.
//!
//! [`StateStream`] is the subscription handle returned by
//! [`Unit::stream`](crate::Unit::stream). The first `next()` call yields the
//! current state immediately (a late subscriber never waits for a new event);
//! subsequent calls yield each distinct value accepted by the cell, and
//! `None` once the unit is closed.
//!
//! A slow subscriber observes the **latest** state, not every intermediate
//! value: the underlying watch channel collapses values the subscriber never
//! polled for. Distinctness is still guaranteed — two consecutive `next()`
//! results are never equal.
//!
//! ## Example
//! ```text
//! let mut states = unit.stream();
//! while let Some(state) = states.next().await {
//!     render(&state);
//! }
//! // None: the unit was closed.
//! ```

use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use crate::state::State;

/// Subscription to a unit's state, with replay-latest semantics.
pub struct StateStream<S: State> {
    rx: watch::Receiver<S>,
    closed: CancellationToken,
    last: Option<S>,
}

impl<S: State> StateStream<S> {
    pub(crate) fn new(rx: watch::Receiver<S>, closed: CancellationToken) -> Self {
        Self {
            rx,
            closed,
            last: None,
        }
    }

    /// Returns the next distinct state, or `None` once the unit is closed.
    ///
    /// The first call resolves immediately with the current state. Never
    /// yields an error: teardown is expressed as stream completion.
    pub async fn next(&mut self) -> Option<S> {
        if self.last.is_none() {
            let current = self.rx.borrow_and_update().clone();
            self.last = Some(current.clone());
            return Some(current);
        }
        loop {
            tokio::select! {
                biased;
                changed = self.rx.changed() => {
                    if changed.is_err() {
                        return None;
                    }
                    let value = self.rx.borrow_and_update().clone();
                    // The watch channel collapses unread intermediates; skip
                    // a collapsed run that lands back on the last value seen.
                    if self.last.as_ref() != Some(&value) {
                        self.last = Some(value.clone());
                        return Some(value);
                    }
                }
                _ = self.closed.cancelled() => return None,
            }
        }
    }

    /// Returns a clone of the current state without consuming a change.
    pub fn current(&self) -> S {
        self.rx.borrow().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture(initial: u32) -> (watch::Sender<u32>, CancellationToken) {
        let (tx, _rx) = watch::channel(initial);
        (tx, CancellationToken::new())
    }

    #[tokio::test]
    async fn first_next_resolves_immediately_with_current() {
        let (tx, closed) = fixture(5);
        let mut stream = StateStream::new(tx.subscribe(), closed);
        assert_eq!(stream.next().await, Some(5));
    }

    #[tokio::test]
    async fn yields_each_change_in_order() {
        let (tx, closed) = fixture(0);
        let mut stream = StateStream::new(tx.subscribe(), closed);
        assert_eq!(stream.next().await, Some(0));

        tx.send_replace(1);
        assert_eq!(stream.next().await, Some(1));
        tx.send_replace(2);
        assert_eq!(stream.next().await, Some(2));
    }

    #[tokio::test]
    async fn collapsed_run_back_to_same_value_is_skipped() {
        let (tx, closed) = fixture(0);
        let mut stream = StateStream::new(tx.subscribe(), closed.clone());
        assert_eq!(stream.next().await, Some(0));

        // Subscriber is not polling while the value bounces 0 -> 7 -> 0.
        tx.send_replace(7);
        tx.send_replace(0);
        closed.cancel();
        // The collapsed notification lands back on 0; next() must not yield
        // a duplicate and must observe completion instead.
        assert_eq!(stream.next().await, None);
    }

    #[tokio::test]
    async fn completes_after_close() {
        let (tx, closed) = fixture(3);
        let mut stream = StateStream::new(tx.subscribe(), closed.clone());
        assert_eq!(stream.next().await, Some(3));
        closed.cancel();
        assert_eq!(stream.next().await, None);
        assert_eq!(stream.next().await, None, "completion is terminal");
    }

    #[tokio::test]
    async fn current_reads_without_consuming() {
        let (tx, closed) = fixture(9);
        let stream = StateStream::new(tx.subscribe(), closed);
        assert_eq!(stream.current(), 9);
        assert_eq!(stream.current(), 9);
    }
}
