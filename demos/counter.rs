//! # Demo: counter
//!
//! Minimal example of a single unit with one event handler and a state
//! subscriber, without retries or custom transforms.
//!
//! Demonstrates how to:
//! - Define an event enum implementing [`Event`].
//! - Register a handler using [`HandlerFn`].
//! - Observe distinct states through [`Unit::stream`] and close cleanly.
//!
//! ## Flow
//! ```text
//! Unit::new("counter", 0)
//!     ├─► on("increment", handler)
//!     ├─► add(Increment) ×3
//!     │     └─► handler: emit.update(|n| n + 1)
//!     ├─► stream: 0, 1, 2, 3
//!     └─► close() → stream completes
//! ```
//!
//! ## Run
//! ```bash
//! cargo run --example counter
//! ```

use statevisor::{Event, HandlerFn, Unit};

#[derive(Debug)]
enum CounterEvent {
    Increment,
}

impl Event for CounterEvent {
    fn tag(&self) -> &'static str {
        "increment"
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Create the unit (no I/O, defaults are fine here)
    let unit: Unit<CounterEvent, i64> = Unit::new("counter", 0);

    // 2. Bind exactly one handler to the "increment" tag
    unit.on(
        "increment",
        HandlerFn::arc(|_event, emit, _ctx| async move {
            emit.update(|n| n + 1);
            Ok(())
        }),
    )?;

    // 3. Subscribe before dispatching: the current value replays first
    let mut states = unit.stream();
    println!("[counter] initial = {:?}", states.next().await);

    // 4. Dispatch a few events and watch the distinct states arrive
    for _ in 0..3 {
        unit.add(CounterEvent::Increment)?;
        println!("[counter] state   = {:?}", states.next().await);
    }

    // 5. Close: later events are ignored, the stream completes
    unit.close().await?;
    assert_eq!(states.next().await, None);
    println!("[counter] closed");
    Ok(())
}
