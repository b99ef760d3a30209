//! # Retry policy for flaky handlers.
//!
//! [`RetryPolicy`] bounds how many times an invocation re-runs its handler
//! after a retryable failure, and delegates the wait between attempts to a
//! [`BackoffPolicy`]. It is applied **per invocation**: each accepted event
//! gets its own attempt budget, and the budget does not carry across events.
//!
//! Per-invocation state machine:
//! ```text
//! attempting(n) ── success ────────────────────────► done
//!       │
//!       ├── retryable failure, n < max_attempts ──► waiting(backoff.next(n-1))
//!       │                                                │ (cancellable)
//!       │                                                ▼
//!       │                                          attempting(n+1)
//!       │
//!       ├── retryable failure, n == max_attempts ─► exhausted (observer error)
//!       └── fatal failure ───────────────────────► failed    (observer error)
//! ```
//!
//! Cancellation (a `Restartable` supersede or unit close) is observable
//! during the waiting state and short-circuits to a cancelled terminal state
//! without invoking the handler again.
//!
//! # Example
//! ```rust
//! use std::time::Duration;
//! use statevisor::{BackoffPolicy, JitterPolicy, RetryPolicy};
//!
//! let retry = RetryPolicy::new(
//!     4,
//!     BackoffPolicy {
//!         first: Duration::from_millis(50),
//!         max: Duration::from_secs(5),
//!         factor: 2.0,
//!         jitter: JitterPolicy::None,
//!     },
//! );
//!
//! // Wait after the n-th failed attempt: first × factor^(n-1)
//! assert_eq!(retry.delay_after(1), Duration::from_millis(50));
//! assert_eq!(retry.delay_after(2), Duration::from_millis(100));
//! assert_eq!(retry.delay_after(3), Duration::from_millis(200));
//! ```

use std::time::Duration;

use crate::policies::BackoffPolicy;

/// Attempt budget and backoff schedule for one handler invocation.
#[derive(Clone, Copy, Debug)]
pub struct RetryPolicy {
    /// Maximum number of attempts, including the first (clamped to ≥ 1).
    pub max_attempts: u32,
    /// Delay schedule between attempts.
    pub backoff: BackoffPolicy,
}

impl Default for RetryPolicy {
    /// Returns a budget of 3 attempts over [`BackoffPolicy::default`].
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff: BackoffPolicy::default(),
        }
    }
}

impl RetryPolicy {
    /// Creates a policy with the given attempt budget and backoff schedule.
    pub fn new(max_attempts: u32, backoff: BackoffPolicy) -> Self {
        Self {
            max_attempts,
            backoff,
        }
    }

    /// Returns the attempt budget, clamped to a minimum of 1.
    pub fn attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }

    /// Returns the wait after the `attempt`-th failure (1-based).
    ///
    /// The first failed attempt waits `backoff.first`, the second waits
    /// `first × factor`, and so on.
    pub fn delay_after(&self, attempt: u32) -> Duration {
        self.backoff.next(attempt.saturating_sub(1))
    }
}
