//! # Unit: the event-to-state dispatch engine.
//!
//! A [`Unit`] owns one state value, a registry of event-tag handlers, and
//! the scheduling/teardown machinery between them. Callers push typed events
//! in with [`Unit::add`]; handlers asynchronously publish states through an
//! [`Emitter`](crate::Emitter); subscribers observe distinct states via
//! [`Unit::stream`].
//!
//! ## High-level architecture
//! ```text
//! add(event)
//!   ├─ closed?            → silent no-op
//!   ├─ handler for tag?   → UnitError::UnhandledEvent
//!   ├─ Observe::on_event
//!   └─► Lane (per-tag transform: concurrent/sequential/restartable/droppable)
//!          └─► Invocation (retry/backoff, panic isolation)
//!                 └─► handler(event, Emitter, ctx)
//!                        └─ publish/update ──► Observe::on_transition
//!                                              StateCell (dedup + gate)
//!                                                 └─► StateStream subscribers
//! ```
//!
//! ## Teardown path
//! ```text
//! close():
//!   1. closed flag flips (synchronous; later add() calls are no-ops)
//!   2. unit scope cancels → every live emitter closes, every drain and
//!      backoff wait wakes
//!   3. tracker waits up to cfg.grace for invocations to finish
//!   4. state cell closes → every StateStream completes
//!   5. Observe::on_close
//! ```
//!
//! ## Example
//! ```rust
//! use statevisor::{Event, HandlerFn, Unit};
//!
//! #[derive(Debug)]
//! enum CounterEvent { Increment }
//!
//! impl Event for CounterEvent {
//!     fn tag(&self) -> &'static str { "increment" }
//! }
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let unit: Unit<CounterEvent, i64> = Unit::new("counter", 0);
//! unit.on("increment", HandlerFn::arc(|_event, emit, _ctx| async move {
//!     emit.update(|n| n + 1);
//!     Ok(())
//! })).unwrap();
//!
//! unit.add(CounterEvent::Increment).unwrap();
//! let mut states = unit.stream();
//! assert_eq!(states.next().await, Some(0));
//! assert_eq!(states.next().await, Some(1));
//!
//! unit.close().await.unwrap();
//! # }
//! ```

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering as AtomicOrdering};
use std::sync::{Arc, RwLock};

use tokio::time;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;

use crate::core::config::UnitConfig;
use crate::core::invoke::InvocationParams;
use crate::core::lane::Lane;
use crate::error::{PersistError, UnitError};
use crate::events::Event;
use crate::handlers::{HandlerRef, HandlerSpec};
use crate::observe;
use crate::state::{State, StateCell, StateStream};

/// One addressable state machine: events in, observable state out.
///
/// ### Responsibilities
/// - **Registration**: at most one handler per event tag, bound once.
/// - **Dispatch**: route accepted events through the tag's concurrency
///   transform; track every invocation for teardown.
/// - **Observability**: report creation, events, transitions, errors, and
///   close to the process observer.
/// - **Teardown**: close every live emitter and subscription before the
///   state cell completes.
pub struct Unit<E: Event, S: State> {
    name: Arc<str>,
    cfg: UnitConfig,
    cell: StateCell<S>,
    lanes: RwLock<HashMap<&'static str, Lane<E, S>>>,
    scope: CancellationToken,
    tracker: TaskTracker,
    closed: AtomicBool,
}

impl<E: Event, S: State> Unit<E, S> {
    /// Creates a unit with the given name and initial state, inheriting the
    /// process defaults. No I/O is performed.
    pub fn new(name: impl Into<Arc<str>>, initial: S) -> Self {
        Self::with_config(name, initial, UnitConfig::default())
    }

    /// Creates a unit with an explicit configuration.
    pub fn with_config(name: impl Into<Arc<str>>, initial: S, cfg: UnitConfig) -> Self {
        observe::mark_unit_constructed();
        let name: Arc<str> = name.into();
        let cell = StateCell::new(initial.clone());

        let hooked = Arc::clone(&name);
        cell.set_hook(Box::new(move |previous, next| {
            log::trace!(
                target: "statevisor",
                "unit={hooked} change {previous:?} -> {next:?}"
            );
        }));

        observe::current().observer.on_create(&name, &initial);

        Self {
            name,
            cfg,
            cell,
            lanes: RwLock::new(HashMap::new()),
            scope: CancellationToken::new(),
            tracker: TaskTracker::new(),
            closed: AtomicBool::new(false),
        }
    }

    /// Returns the unit's stable name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns a clone of the current state. Always defined, synchronous.
    pub fn state(&self) -> S {
        self.cell.read()
    }

    /// Applies a pure projection to the current state and returns the result.
    pub fn select<K>(&self, map: impl FnOnce(&S) -> K) -> K {
        map(&self.cell.read())
    }

    /// Subscribes to the state: the current value first, then every distinct
    /// accepted value, completing on close.
    pub fn stream(&self) -> StateStream<S> {
        self.cell.subscribe()
    }

    /// Returns whether `close()` has begun.
    pub fn is_closed(&self) -> bool {
        self.closed.load(AtomicOrdering::SeqCst)
    }

    /// Registers `handler` for `tag` with the unit's default transform and
    /// no retry.
    ///
    /// # Errors
    /// [`UnitError::DuplicateHandler`] if the tag is already bound; the
    /// first handler stays intact.
    pub fn on(&self, tag: &'static str, handler: HandlerRef<E, S>) -> Result<(), UnitError> {
        self.on_spec(tag, HandlerSpec::new(handler))
    }

    /// Registers a full [`HandlerSpec`] for `tag`.
    ///
    /// `Sequential` lanes spawn their worker here, so registration must run
    /// inside a tokio runtime.
    ///
    /// # Errors
    /// [`UnitError::DuplicateHandler`] if the tag is already bound.
    pub fn on_spec(&self, tag: &'static str, spec: HandlerSpec<E, S>) -> Result<(), UnitError> {
        let mut lanes = self.lanes.write().expect("handler registry poisoned");
        if lanes.contains_key(tag) {
            return Err(UnitError::DuplicateHandler { tag });
        }

        let (handler, transform, retry) = spec.into_parts();
        let lane = Lane::build(
            transform.unwrap_or(self.cfg.transform),
            handler,
            InvocationParams {
                unit: Arc::clone(&self.name),
                tag,
                retry,
            },
            self.cell.clone(),
            self.scope.clone(),
            self.tracker.clone(),
        );
        lanes.insert(tag, lane);
        Ok(())
    }

    /// Pushes an event into the unit.
    ///
    /// A closed unit ignores the event silently (teardown races are not
    /// errors). Otherwise the event is routed through its tag's lane; the
    /// observer sees it even when a `Droppable` lane then discards it.
    ///
    /// # Errors
    /// [`UnitError::UnhandledEvent`] if no handler is registered for the
    /// event's tag; the state is untouched.
    pub fn add(&self, event: E) -> Result<(), UnitError> {
        if self.is_closed() {
            return Ok(());
        }
        let tag = event.tag();
        let lanes = self.lanes.read().expect("handler registry poisoned");
        let Some(lane) = lanes.get(tag) else {
            return Err(UnitError::UnhandledEvent { tag });
        };

        observe::current().observer.on_event(&self.name, tag, &event);
        lane.accept(Arc::new(event));
        Ok(())
    }

    /// Serializes the current state for a persistence collaborator.
    ///
    /// The unit itself performs no I/O; hand the snapshot to a
    /// [`SnapshotStore`](crate::SnapshotStore).
    pub fn snapshot(&self) -> Result<String, PersistError>
    where
        S: serde::Serialize,
    {
        Ok(serde_json::to_string(&self.cell.read())?)
    }

    /// Closes the unit: rejects further events, closes every live emitter,
    /// cancels every drain and backoff wait, completes all state streams,
    /// and reports close to the observer. Idempotent — the second call is an
    /// immediate `Ok`.
    ///
    /// # Errors
    /// [`UnitError::GraceExceeded`] when invocations ignore cancellation
    /// past the configured grace window; teardown still completes and the
    /// stragglers are abandoned.
    pub async fn close(&self) -> Result<(), UnitError> {
        if self.closed.swap(true, AtomicOrdering::SeqCst) {
            return Ok(());
        }

        self.scope.cancel();
        self.tracker.close();
        let waited = time::timeout(self.cfg.grace, self.tracker.wait()).await;

        self.cell.close();
        observe::current().observer.on_close(&self.name);

        match waited {
            Ok(()) => Ok(()),
            Err(_) => Err(UnitError::GraceExceeded {
                grace: self.cfg.grace,
            }),
        }
    }
}

impl<E: Event, S: State> Drop for Unit<E, S> {
    /// Best-effort cleanup for units dropped without `close()`: cancels all
    /// live work and completes subscriber streams. Use `close()` for the
    /// full teardown contract (grace wait, observer notification).
    fn drop(&mut self) {
        self.scope.cancel();
        self.cell.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::emitter::Emitter;
    use crate::error::HandleError;
    use crate::handlers::HandlerFn;
    use crate::policies::{BackoffPolicy, JitterPolicy, RetryPolicy, Transform};
    use std::sync::atomic::AtomicU32;
    use std::sync::Mutex;
    use std::time::Duration;
    use tokio::time::{sleep, Instant};

    #[derive(Debug)]
    enum Ev {
        Inc,
        Work(u32),
        Fetch,
    }

    impl Event for Ev {
        fn tag(&self) -> &'static str {
            match self {
                Ev::Inc => "inc",
                Ev::Work(_) => "work",
                Ev::Fetch => "fetch",
            }
        }
    }

    fn increment_handler() -> HandlerRef<Ev, i64> {
        HandlerFn::arc(|_event, emit: Emitter<Ev, i64>, _ctx| async move {
            emit.update(|n| n + 1);
            Ok(())
        })
    }

    /// Collects every value a stream yields until it completes.
    fn collect_stream(
        mut stream: StateStream<i64>,
    ) -> (Arc<Mutex<Vec<i64>>>, tokio::task::JoinHandle<()>) {
        let collected = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&collected);
        let task = tokio::spawn(async move {
            while let Some(value) = stream.next().await {
                sink.lock().unwrap().push(value);
            }
        });
        (collected, task)
    }

    #[tokio::test]
    async fn late_subscriber_replays_current_state() {
        let unit: Unit<Ev, i64> = Unit::new("replay", 42);
        let mut stream = unit.stream();
        assert_eq!(stream.next().await, Some(42));
        assert_eq!(unit.state(), 42);
    }

    #[tokio::test]
    async fn duplicate_registration_is_rejected_and_first_stays() {
        let unit: Unit<Ev, i64> = Unit::new("dup", 0);
        unit.on("inc", increment_handler()).unwrap();

        let second: HandlerRef<Ev, i64> =
            HandlerFn::arc(|_event, emit: Emitter<Ev, i64>, _ctx| async move {
                emit.publish(-100);
                Ok(())
            });
        let err = unit.on("inc", second).unwrap_err();
        assert!(matches!(err, UnitError::DuplicateHandler { tag: "inc" }));

        unit.add(Ev::Inc).unwrap();
        sleep(Duration::from_millis(10)).await;
        assert_eq!(unit.state(), 1, "first handler must remain bound");
    }

    #[tokio::test]
    async fn unhandled_event_is_an_error_and_state_is_untouched() {
        let unit: Unit<Ev, i64> = Unit::new("unhandled", 7);
        let err = unit.add(Ev::Fetch).unwrap_err();
        assert!(matches!(err, UnitError::UnhandledEvent { tag: "fetch" }));
        assert_eq!(unit.state(), 7);
    }

    #[tokio::test]
    async fn add_after_close_is_a_silent_noop() {
        let unit: Unit<Ev, i64> = Unit::new("after-close", 0);
        unit.on("inc", increment_handler()).unwrap();
        unit.close().await.unwrap();

        assert!(unit.is_closed());
        assert!(unit.add(Ev::Inc).is_ok());
        sleep(Duration::from_millis(10)).await;
        assert_eq!(unit.state(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn concurrent_increments_all_apply() {
        let unit: Unit<Ev, i64> = Unit::new("concurrent", 0);
        unit.on("inc", increment_handler()).unwrap();

        unit.add(Ev::Inc).unwrap();
        unit.add(Ev::Inc).unwrap();
        unit.add(Ev::Inc).unwrap();
        sleep(Duration::from_millis(10)).await;

        // Each invocation read-then-wrote the current state at emit time, so
        // three distinct increments were applied.
        assert_eq!(unit.state(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn consecutive_duplicate_publishes_are_not_redelivered() {
        let unit: Unit<Ev, i64> = Unit::new("dedup", 0);

        let handler: HandlerRef<Ev, i64> =
            HandlerFn::arc(|_event, emit: Emitter<Ev, i64>, _ctx| async move {
                emit.publish(5);
                sleep(Duration::from_millis(5)).await;
                emit.publish(5); // duplicate: dropped by the cell
                sleep(Duration::from_millis(5)).await;
                emit.publish(6);
                Ok(())
            });
        unit.on("work", handler).unwrap();

        let (collected, _task) = collect_stream(unit.stream());
        sleep(Duration::from_millis(1)).await;

        unit.add(Ev::Work(0)).unwrap();
        sleep(Duration::from_millis(50)).await;

        assert_eq!(*collected.lock().unwrap(), vec![0, 5, 6]);
    }

    #[tokio::test(start_paused = true)]
    async fn sequential_never_interleaves_invocations() {
        let unit: Unit<Ev, i64> = Unit::new("sequential", 0);
        let order: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&order);

        let handler: HandlerRef<Ev, i64> =
            HandlerFn::arc(move |event: Arc<Ev>, _emit: Emitter<Ev, i64>, _ctx| {
                let sink = Arc::clone(&sink);
                async move {
                    let id = match &*event {
                        Ev::Work(id) => *id,
                        other => unreachable!("unexpected event {other:?}"),
                    };
                    sink.lock().unwrap().push(format!("start-{id}"));
                    sleep(Duration::from_millis(20)).await;
                    sink.lock().unwrap().push(format!("end-{id}"));
                    Ok(())
                }
            });
        unit.on_spec(
            "work",
            HandlerSpec::new(handler).with_transform(Transform::Sequential),
        )
        .unwrap();

        unit.add(Ev::Work(1)).unwrap();
        unit.add(Ev::Work(2)).unwrap();
        sleep(Duration::from_millis(100)).await;

        assert_eq!(
            *order.lock().unwrap(),
            vec!["start-1", "end-1", "start-2", "end-2"],
            "invocation 2 must not begin before invocation 1 completes"
        );
    }

    #[tokio::test(start_paused = true)]
    async fn restartable_supersedes_and_suppresses_late_publishes() {
        let unit: Unit<Ev, i64> = Unit::new("restartable", 0);

        let handler: HandlerRef<Ev, i64> =
            HandlerFn::arc(|event: Arc<Ev>, emit: Emitter<Ev, i64>, _ctx| async move {
                let id = match &*event {
                    Ev::Work(id) => *id,
                    other => unreachable!("unexpected event {other:?}"),
                };
                emit.publish(id as i64);
                sleep(Duration::from_millis(50)).await;
                emit.publish(id as i64 * 100);
                Ok(())
            });
        unit.on_spec(
            "work",
            HandlerSpec::new(handler).with_transform(Transform::Restartable),
        )
        .unwrap();

        let (collected, _task) = collect_stream(unit.stream());
        sleep(Duration::from_millis(1)).await;

        unit.add(Ev::Work(1)).unwrap();
        sleep(Duration::from_millis(1)).await; // first invocation starts, publishes 1
        unit.add(Ev::Work(2)).unwrap(); // supersedes invocation 1
        sleep(Duration::from_millis(200)).await;

        assert_eq!(unit.state(), 200);
        let seen = collected.lock().unwrap().clone();
        assert!(
            !seen.contains(&100),
            "superseded invocation must not publish after the replacement starts (saw {seen:?})"
        );
        assert!(seen.contains(&1) && seen.contains(&2));
    }

    #[tokio::test(start_paused = true)]
    async fn droppable_discards_events_while_running() {
        let unit: Unit<Ev, i64> = Unit::new("droppable", 0);
        let invocations = Arc::new(AtomicU32::new(0));
        let count = Arc::clone(&invocations);

        let handler: HandlerRef<Ev, i64> =
            HandlerFn::arc(move |_event, emit: Emitter<Ev, i64>, _ctx| {
                let count = Arc::clone(&count);
                async move {
                    count.fetch_add(1, AtomicOrdering::SeqCst);
                    sleep(Duration::from_millis(30)).await;
                    emit.update(|n| n + 1);
                    Ok(())
                }
            });
        unit.on_spec(
            "work",
            HandlerSpec::new(handler).with_transform(Transform::Droppable),
        )
        .unwrap();

        unit.add(Ev::Work(1)).unwrap(); // starts, gate flips synchronously
        unit.add(Ev::Work(2)).unwrap(); // dropped: no invocation, no transition
        sleep(Duration::from_millis(100)).await;

        assert_eq!(invocations.load(AtomicOrdering::SeqCst), 1);
        assert_eq!(unit.state(), 1);

        unit.add(Ev::Work(3)).unwrap(); // nothing running: accepted again
        sleep(Duration::from_millis(100)).await;
        assert_eq!(invocations.load(AtomicOrdering::SeqCst), 2);
        assert_eq!(unit.state(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn retry_succeeds_within_budget_with_exponential_waits() {
        let unit: Unit<Ev, i64> = Unit::new("retry-ok", 0);
        let starts: Arc<Mutex<Vec<Instant>>> = Arc::new(Mutex::new(Vec::new()));
        let log = Arc::clone(&starts);

        let handler: HandlerRef<Ev, i64> =
            HandlerFn::arc(move |_event, emit: Emitter<Ev, i64>, _ctx| {
                let log = Arc::clone(&log);
                async move {
                    let attempt = {
                        let mut log = log.lock().unwrap();
                        log.push(Instant::now());
                        log.len()
                    };
                    if attempt < 3 {
                        return Err(HandleError::fail("flaky upstream"));
                    }
                    emit.publish(99);
                    Ok(())
                }
            });
        unit.on_spec(
            "fetch",
            HandlerSpec::new(handler).with_retry(RetryPolicy::new(
                3,
                BackoffPolicy {
                    first: Duration::from_millis(100),
                    max: Duration::from_secs(10),
                    factor: 2.0,
                    jitter: JitterPolicy::None,
                },
            )),
        )
        .unwrap();

        unit.add(Ev::Fetch).unwrap();
        sleep(Duration::from_secs(2)).await;

        assert_eq!(unit.state(), 99, "exactly one successful emission");
        let starts = starts.lock().unwrap();
        assert_eq!(starts.len(), 3);

        let tolerance = Duration::from_millis(5);
        let wait1 = starts[1] - starts[0];
        let wait2 = starts[2] - starts[1];
        assert!(
            wait1 >= Duration::from_millis(100) && wait1 <= Duration::from_millis(100) + tolerance,
            "first wait {wait1:?} should be ~100ms"
        );
        assert!(
            wait2 >= Duration::from_millis(200) && wait2 <= Duration::from_millis(200) + tolerance,
            "second wait {wait2:?} should be ~200ms"
        );
        assert!(wait2 >= wait1, "waits must be non-decreasing");
    }

    #[tokio::test(start_paused = true)]
    async fn retry_stops_after_exactly_max_attempts() {
        let unit: Unit<Ev, i64> = Unit::new("retry-exhausted", 0);
        let attempts = Arc::new(AtomicU32::new(0));
        let count = Arc::clone(&attempts);

        let handler: HandlerRef<Ev, i64> =
            HandlerFn::arc(move |_event, _emit: Emitter<Ev, i64>, _ctx| {
                let count = Arc::clone(&count);
                async move {
                    count.fetch_add(1, AtomicOrdering::SeqCst);
                    Err(HandleError::fail("always down"))
                }
            });
        unit.on_spec(
            "fetch",
            HandlerSpec::new(handler).with_retry(RetryPolicy::new(
                3,
                BackoffPolicy {
                    first: Duration::from_millis(10),
                    max: Duration::from_secs(1),
                    factor: 2.0,
                    jitter: JitterPolicy::None,
                },
            )),
        )
        .unwrap();

        unit.add(Ev::Fetch).unwrap();
        sleep(Duration::from_secs(5)).await;

        assert_eq!(attempts.load(AtomicOrdering::SeqCst), 3);
        assert_eq!(unit.state(), 0);
    }

    #[tokio::test]
    async fn close_is_idempotent_and_completes_streams() {
        let unit: Unit<Ev, i64> = Unit::new("close", 1);
        let mut stream = unit.stream();
        assert_eq!(stream.next().await, Some(1));

        unit.close().await.unwrap();
        unit.close().await.unwrap();
        assert_eq!(stream.next().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn close_suppresses_publishes_from_live_handlers() {
        let cfg = UnitConfig {
            grace: Duration::from_millis(50),
            ..UnitConfig::default()
        };
        let unit: Unit<Ev, i64> = Unit::with_config("close-suppress", 0, cfg);

        let handler: HandlerRef<Ev, i64> =
            HandlerFn::arc(|_event, emit: Emitter<Ev, i64>, _ctx| async move {
                emit.publish(1);
                // Deliberately ignores its cancellation token.
                sleep(Duration::from_secs(3600)).await;
                emit.publish(999);
                Ok(())
            });
        unit.on("work", handler).unwrap();

        unit.add(Ev::Work(0)).unwrap();
        sleep(Duration::from_millis(5)).await;
        assert_eq!(unit.state(), 1);

        let err = unit.close().await.unwrap_err();
        assert!(matches!(err, UnitError::GraceExceeded { .. }));
        assert_eq!(unit.state(), 1, "post-close publish must be suppressed");
    }

    #[tokio::test(start_paused = true)]
    async fn close_waits_for_cooperative_handlers() {
        let cfg = UnitConfig {
            grace: Duration::from_secs(10),
            ..UnitConfig::default()
        };
        let unit: Unit<Ev, i64> = Unit::with_config("close-coop", 0, cfg);

        let handler: HandlerRef<Ev, i64> =
            HandlerFn::arc(|_event, emit: Emitter<Ev, i64>, ctx| async move {
                emit.publish(1);
                ctx.cancelled().await;
                Err(HandleError::Canceled)
            });
        unit.on("work", handler).unwrap();

        unit.add(Ev::Work(0)).unwrap();
        sleep(Duration::from_millis(5)).await;

        unit.close().await.unwrap();
        assert_eq!(unit.state(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn handler_error_does_not_poison_later_dispatch() {
        let unit: Unit<Ev, i64> = Unit::new("resilient", 0);
        unit.on("inc", increment_handler()).unwrap();

        let failing: HandlerRef<Ev, i64> =
            HandlerFn::arc(|_event, _emit: Emitter<Ev, i64>, _ctx| async move {
                Err(HandleError::fatal("broken"))
            });
        unit.on("work", failing).unwrap();

        unit.add(Ev::Work(1)).unwrap();
        sleep(Duration::from_millis(5)).await;

        unit.add(Ev::Inc).unwrap();
        sleep(Duration::from_millis(5)).await;
        assert_eq!(unit.state(), 1, "sibling dispatch keeps working");
    }

    #[tokio::test(start_paused = true)]
    async fn drains_feed_states_through_the_emitter() {
        let unit: Unit<Ev, i64> = Unit::new("drain", 0);

        let handler: HandlerRef<Ev, i64> =
            HandlerFn::arc(|_event, emit: Emitter<Ev, i64>, _ctx| async move {
                let source = futures::stream::iter(vec![Ok(1i64), Ok(2), Ok(3)]);
                emit.drain_mapped(source, |v| v * 10, |_err| -1).await;
                Ok(())
            });
        unit.on("work", handler).unwrap();

        unit.add(Ev::Work(0)).unwrap();
        sleep(Duration::from_millis(10)).await;

        // The drain published 10, 20, 30 in publish-call order; the cell
        // holds the last of them.
        assert_eq!(unit.state(), 30);
    }

    #[tokio::test]
    async fn snapshot_serializes_current_state() {
        let unit: Unit<Ev, i64> = Unit::new("snap", 5);
        assert_eq!(unit.snapshot().unwrap(), "5");
    }

    #[tokio::test]
    async fn select_projects_current_state() {
        let unit: Unit<Ev, i64> = Unit::new("select", 21);
        assert_eq!(unit.select(|n| n * 2), 42);
    }
}
