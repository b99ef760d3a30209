//! # Transition records for observability.
//!
//! A [`Transition`] captures one attempted state emission: the state before
//! the publish call, the event whose handler made it, and the candidate next
//! state. Exactly one transition is recorded per `publish`/`update` call on
//! an open emitter — including calls the state cell later drops under the
//! deduplication rule ([`Transition::is_noop`] distinguishes those).
//!
//! ## Ordering guarantees
//! Each transition has a globally unique sequence number (`seq`) that
//! increases monotonically across all units in the process. Within a single
//! emitter, `seq` order equals publish-call order.
//!
//! Transitions are consumed only by the process observer; unit logic never
//! reads them back.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::sync::Arc;
use std::time::SystemTime;

use crate::events::Event;
use crate::state::State;

/// Global sequence counter for transition ordering.
static TRANSITION_SEQ: AtomicU64 = AtomicU64::new(0);

/// Observability record of one attempted state emission.
///
/// - `seq`: monotonic global sequence for ordering
/// - `at`: wall-clock timestamp (for logs)
/// - `previous` / `event` / `next`: the transition triple
#[derive(Clone)]
pub struct Transition<E, S> {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// State observed at the moment of the publish call.
    pub previous: S,
    /// The event whose handler produced this emission.
    pub event: Arc<E>,
    /// Candidate next state.
    pub next: S,
}

impl<E: Event, S: State> Transition<E, S> {
    /// Records a new transition with the current timestamp and next sequence number.
    pub(crate) fn record(previous: S, event: Arc<E>, next: S) -> Self {
        Self {
            seq: TRANSITION_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            previous,
            event,
            next,
        }
    }

    /// Returns `true` when the candidate equals the previous state.
    ///
    /// Such transitions are still handed to the observer (one per publish
    /// call), but the state cell drops the publish under the dedup rule and
    /// subscribers never see the value again.
    pub fn is_noop(&self) -> bool {
        self.previous == self.next
    }

    /// Returns the type-erased projection handed to the process observer.
    pub fn view(&self) -> TransitionView<'_> {
        TransitionView {
            seq: self.seq,
            at: self.at,
            tag: self.event.tag(),
            previous: &self.previous,
            event: &*self.event,
            next: &self.next,
        }
    }
}

impl<E: fmt::Debug, S: fmt::Debug> fmt::Debug for Transition<E, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transition")
            .field("seq", &self.seq)
            .field("previous", &self.previous)
            .field("event", &self.event)
            .field("next", &self.next)
            .finish()
    }
}

/// Type-erased view of a [`Transition`], handed to [`Observe`](crate::Observe).
///
/// One process-wide observer serves units of every event/state type, so the
/// payloads are exposed as `&dyn Debug` plus the event's stable tag.
pub struct TransitionView<'a> {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Tag of the triggering event.
    pub tag: &'a str,
    /// State observed at the moment of the publish call.
    pub previous: &'a dyn fmt::Debug,
    /// The triggering event.
    pub event: &'a dyn fmt::Debug,
    /// Candidate next state.
    pub next: &'a dyn fmt::Debug,
}

impl fmt::Debug for TransitionView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transition")
            .field("seq", &self.seq)
            .field("tag", &self.tag)
            .field("previous", self.previous)
            .field("event", self.event)
            .field("next", self.next)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    enum Ping {
        Ping,
    }

    impl Event for Ping {
        fn tag(&self) -> &'static str {
            "ping"
        }
    }

    #[test]
    fn seq_is_monotonic() {
        let ev = Arc::new(Ping::Ping);
        let a = Transition::record(0u32, ev.clone(), 1u32);
        let b = Transition::record(1u32, ev, 2u32);
        assert!(b.seq > a.seq);
    }

    #[test]
    fn noop_detection_uses_value_equality() {
        let ev = Arc::new(Ping::Ping);
        assert!(Transition::record(7u32, ev.clone(), 7u32).is_noop());
        assert!(!Transition::record(7u32, ev, 8u32).is_noop());
    }

    #[test]
    fn view_carries_tag_and_renders() {
        let ev = Arc::new(Ping::Ping);
        let t = Transition::record(1u32, ev, 2u32);
        let view = t.view();
        assert_eq!(view.tag, "ping");
        let rendered = format!("{view:?}");
        assert!(rendered.contains("ping"));
        assert!(rendered.contains('1'));
        assert!(rendered.contains('2'));
    }
}
