//! # Demo: query_retry
//!
//! A fetch-style unit: a `Restartable` transform so newer queries supersede
//! older ones, decorated with retry/backoff for a flaky upstream.
//!
//! The simulated fetch fails twice before succeeding, showing how the
//! backoff delay grows between attempts and how only the final result
//! reaches subscribers.
//!
//! ## Flow
//! ```text
//! add(Fetch)
//!   └─► Restartable lane ─► Invocation
//!         ├─► attempt 1 → Err(Fail "boom #1")
//!         ├─► sleep(100ms)
//!         ├─► attempt 2 → Err(Fail "boom #2")
//!         ├─► sleep(200ms)
//!         └─► attempt 3 → publish(Ready { .. }) → done
//! ```
//!
//! ## Run
//! ```bash
//! cargo run --example query_retry
//! ```

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use statevisor::{
    BackoffPolicy, Event, HandleError, HandlerFn, HandlerSpec, JitterPolicy, RetryPolicy,
    Transform, Unit,
};

static FAIL_COUNT: AtomicU64 = AtomicU64::new(0);

#[derive(Debug)]
enum QueryEvent {
    Fetch,
}

impl Event for QueryEvent {
    fn tag(&self) -> &'static str {
        "fetch"
    }
}

#[derive(Clone, Debug, PartialEq)]
enum QueryState {
    Idle,
    Ready(String),
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Create the unit
    let unit: Unit<QueryEvent, QueryState> = Unit::new("user-query", QueryState::Idle);

    // 2. Register a flaky fetch: restartable + 3 attempts of exponential backoff
    let spec = HandlerSpec::new(HandlerFn::arc(|_event, emit, _ctx| async move {
        let attempt = FAIL_COUNT.fetch_add(1, Ordering::Relaxed) + 1;
        println!("[fetch] attempt {attempt}");
        if attempt < 3 {
            return Err(HandleError::fail(format!("boom #{attempt}")));
        }
        emit.publish(QueryState::Ready("payload".to_string()));
        Ok(())
    }))
    .with_transform(Transform::Restartable)
    .with_retry(RetryPolicy::new(
        3,
        BackoffPolicy {
            first: Duration::from_millis(100),
            max: Duration::from_secs(5),
            factor: 2.0,
            jitter: JitterPolicy::None,
        },
    ));
    unit.on_spec("fetch", spec)?;

    // 3. Dispatch and wait for the query to settle
    let mut states = unit.stream();
    assert_eq!(states.next().await, Some(QueryState::Idle));

    unit.add(QueryEvent::Fetch)?;
    println!("[fetch] result = {:?}", states.next().await);

    unit.close().await?;
    Ok(())
}
