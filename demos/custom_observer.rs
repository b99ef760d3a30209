//! # Demo: custom_observer
//!
//! Installs a custom process observer before constructing any unit, then
//! watches it receive creation, event, transition, and close notifications.
//!
//! Demonstrates how to:
//! - Implement [`Observe`] (override only the hooks you need).
//! - Install it via [`install`] + [`Runtime`] at process start.
//!
//! ## Run
//! ```bash
//! cargo run --example custom_observer
//! ```

use std::fmt;
use std::sync::Arc;

use statevisor::{install, Event, HandlerFn, Observe, Runtime, TransitionView, Unit, UnitError};

struct Printer;

impl Observe for Printer {
    fn on_create(&self, unit: &str, initial: &dyn fmt::Debug) {
        println!("[observer] {unit}: created with {initial:?}");
    }

    fn on_event(&self, unit: &str, tag: &str, event: &dyn fmt::Debug) {
        println!("[observer] {unit}: event {tag} ({event:?})");
    }

    fn on_transition(&self, unit: &str, transition: &TransitionView<'_>) {
        println!(
            "[observer] {unit}: {:?} -> {:?} (seq={})",
            transition.previous, transition.next, transition.seq
        );
    }

    fn on_error(&self, unit: &str, error: &UnitError) {
        eprintln!("[observer] {unit}: {}", error.as_message());
    }

    fn on_close(&self, unit: &str) {
        println!("[observer] {unit}: closed");
    }
}

#[derive(Debug)]
enum PingEvent {
    Ping,
}

impl Event for PingEvent {
    fn tag(&self) -> &'static str {
        "ping"
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Install the observer BEFORE any unit exists; a later install fails
    install(Runtime::new().with_observer(Arc::new(Printer)))?;

    // 2. Construct and use a unit; every hook above fires
    let unit: Unit<PingEvent, u64> = Unit::new("pinger", 0);
    unit.on(
        "ping",
        HandlerFn::arc(|_event, emit, _ctx| async move {
            emit.update(|n| n + 1);
            Ok(())
        }),
    )?;

    let mut states = unit.stream();
    let _ = states.next().await;

    unit.add(PingEvent::Ping)?;
    let _ = states.next().await;

    unit.close().await?;
    Ok(())
}
