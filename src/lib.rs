//! # statevisor
//!
//! **Statevisor** is a unidirectional state-management core for Rust.
//!
//! Callers push typed **events** into a [`Unit`]; registered handlers
//! asynchronously produce **states** in response, observable by any number
//! of subscribers. Per-event-tag concurrency policies decide how
//! concurrently-arriving events schedule against each other, and a
//! retry/backoff policy covers idempotent-but-flaky work such as remote
//! fetches. The crate is designed as a building block for UI bindings,
//! caches, and higher-level application state layers.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!     caller ──► Unit::add(event)
//!                  │
//!                  ├─ closed? ─► silent no-op
//!                  ├─ no handler for tag? ─► UnitError::UnhandledEvent
//!                  ├─ Observe::on_event
//!                  ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  Lane (one per registered tag)                                    │
//! │  - Concurrent:  spawn every invocation immediately                │
//! │  - Sequential:  queue; one invocation at a time, arrival order    │
//! │  - Restartable: cancel the running invocation, then spawn         │
//! │  - Droppable:   discard events while an invocation runs           │
//! └──────────────────────────────┬────────────────────────────────────┘
//!                                ▼
//!                     ┌────────────────────┐
//!                     │     Invocation     │  retry/backoff per
//!                     │ (tracked, child    │  RetryPolicy, panic
//!                     │  cancellation)     │  isolation
//!                     └─────────┬──────────┘
//!                               ▼
//!              handler(event, Emitter, CancellationToken)
//!                               │
//!                  publish / update / drain_*
//!                               ▼
//!            Observe::on_transition   StateCell (dedup + gate)
//!                                          │
//!                                          ▼
//!                              StateStream subscribers
//!                        (replay-latest, distinct values,
//!                         complete on close)
//! ```
//!
//! ### Lifecycle
//! ```text
//! Unit::new(name, initial)        no I/O; Observe::on_create
//!   │
//!   ├─ on(tag, handler)           at most one handler per tag
//!   ├─ add(event) ...             dispatch per lane policy
//!   │
//!   └─ close().await
//!        ├─ 1. closed flag flips (later add() is a no-op)
//!        ├─ 2. unit scope cancels: emitters close, drains and
//!        │      backoff waits wake
//!        ├─ 3. wait for invocations up to UnitConfig::grace
//!        ├─ 4. state cell closes: every StateStream completes
//!        └─ 5. Observe::on_close
//! ```
//!
//! ## Features
//! | Area              | Description                                                          | Key types / traits                      |
//! |-------------------|----------------------------------------------------------------------|-----------------------------------------|
//! | **Units**         | Named state machines: events in, observable state out.               | [`Unit`], [`UnitConfig`]                |
//! | **Handlers**      | Async, cancelable event handlers with per-tag registration.          | [`Handle`], [`HandlerFn`], [`HandlerSpec`] |
//! | **Emitters**      | Per-attempt publishers; one-shot and stream-draining emission.       | [`Emitter`]                             |
//! | **Policies**      | Concurrency transforms and retry/backoff for flaky handlers.         | [`Transform`], [`RetryPolicy`], [`BackoffPolicy`] |
//! | **Observability** | One process-wide observer for events, transitions, errors.           | [`Observe`], [`Runtime`], [`install`]   |
//! | **Persistence**   | Snapshot surface for external stores; the core does no I/O.          | [`SnapshotStore`], [`seed`], [`persist`] |
//! | **Errors**        | Typed errors for registration, dispatch, and handler failures.       | [`UnitError`], [`HandleError`]          |
//!
//! ## Example
//! ```rust
//! use statevisor::{Event, HandlerFn, HandlerSpec, Transform, Unit};
//!
//! #[derive(Debug)]
//! enum CounterEvent {
//!     Increment,
//!     Reset,
//! }
//!
//! impl Event for CounterEvent {
//!     fn tag(&self) -> &'static str {
//!         match self {
//!             CounterEvent::Increment => "increment",
//!             CounterEvent::Reset => "reset",
//!         }
//!     }
//! }
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let unit: Unit<CounterEvent, i64> = Unit::new("counter", 0);
//!
//!     unit.on("increment", HandlerFn::arc(|_event, emit, _ctx| async move {
//!         emit.update(|n| n + 1);
//!         Ok(())
//!     }))?;
//!
//!     unit.on_spec(
//!         "reset",
//!         HandlerSpec::new(HandlerFn::arc(|_event, emit, _ctx| async move {
//!             emit.publish(0);
//!             Ok(())
//!         }))
//!         .with_transform(Transform::Droppable),
//!     )?;
//!
//!     let mut states = unit.stream();
//!     assert_eq!(states.next().await, Some(0));
//!
//!     unit.add(CounterEvent::Increment)?;
//!     assert_eq!(states.next().await, Some(1));
//!
//!     unit.close().await?;
//!     assert_eq!(states.next().await, None);
//!     Ok(())
//! }
//! ```

mod core;
mod error;
mod events;
mod handlers;
mod observe;
mod persist;
mod policies;
mod state;

// ---- Public re-exports ----

pub use crate::core::{Emitter, Unit, UnitConfig};
pub use error::{DrainError, HandleError, InstallError, PersistError, UnitError};
pub use events::{Event, Transition, TransitionView};
pub use handlers::{Handle, HandlerFn, HandlerRef, HandlerSpec};
pub use observe::{install, Defaults, LogObserver, Observe, Runtime};
pub use persist::{persist, seed, MemoryStore, SnapshotStore};
pub use policies::{BackoffPolicy, JitterPolicy, RetryPolicy, Transform};
pub use state::{State, StateStream};
