//! Error types used by the statevisor runtime and event handlers.
//!
//! This module defines the main error enums:
//!
//! - [`UnitError`] — errors raised by a unit's registration/dispatch surface
//!   and errors routed to the process observer.
//! - [`HandleError`] — errors raised by individual handler invocations.
//! - [`InstallError`] — errors raised when installing the process runtime.
//! - [`PersistError`] — errors raised by the snapshot surface.
//!
//! The unit/handler types provide helper methods (`as_label`, `as_message`)
//! for logging/metrics and utilities such as [`HandleError::is_retryable`].

use std::time::Duration;
use thiserror::Error;

/// Boxed error produced by an external sequence drained through an emitter.
pub type DrainError = Box<dyn std::error::Error + Send + Sync>;

/// # Errors produced by a unit's public surface or routed to the observer.
///
/// `DuplicateHandler` and `UnhandledEvent` are returned synchronously from
/// [`Unit::on`](crate::Unit::on) and [`Unit::add`](crate::Unit::add).
/// `Handler` and `RetryExhausted` never surface to callers; they are routed
/// to the process observer's error hook. `GraceExceeded` is returned from
/// [`Unit::close`](crate::Unit::close) when live invocations outstay the
/// configured grace window.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum UnitError {
    /// A handler is already registered for this event tag.
    #[error("`{tag}` can only have one registered handler")]
    DuplicateHandler {
        /// The event tag that was registered twice.
        tag: &'static str,
    },

    /// An event was added without a registered handler for its tag.
    #[error("add(`{tag}`) was called without a registered handler; register one via on(\"{tag}\", ...)")]
    UnhandledEvent {
        /// The event tag that had no handler.
        tag: &'static str,
    },

    /// A handler invocation failed (error return or panic).
    #[error("handler for `{tag}` failed: {source}")]
    Handler {
        /// The event tag whose handler failed.
        tag: &'static str,
        /// The underlying handler error.
        source: HandleError,
    },

    /// A retrying handler exhausted its attempt budget.
    ///
    /// `source` is the error of the **last** attempt.
    #[error("handler for `{tag}` exhausted {attempts} attempts: {source}")]
    RetryExhausted {
        /// The event tag whose handler was retried.
        tag: &'static str,
        /// Total attempts made (equals the configured maximum).
        attempts: u32,
        /// The last attempt's error.
        source: HandleError,
    },

    /// Close grace window was exceeded; live invocations were abandoned.
    #[error("close grace {grace:?} exceeded; live invocations were abandoned")]
    GraceExceeded {
        /// The configured grace duration.
        grace: Duration,
    },
}

impl UnitError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use statevisor::UnitError;
    ///
    /// let err = UnitError::UnhandledEvent { tag: "increment" };
    /// assert_eq!(err.as_label(), "unit_unhandled_event");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            UnitError::DuplicateHandler { .. } => "unit_duplicate_handler",
            UnitError::UnhandledEvent { .. } => "unit_unhandled_event",
            UnitError::Handler { .. } => "unit_handler_failed",
            UnitError::RetryExhausted { .. } => "unit_retry_exhausted",
            UnitError::GraceExceeded { .. } => "unit_grace_exceeded",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            UnitError::DuplicateHandler { tag } => format!("duplicate handler for `{tag}`"),
            UnitError::UnhandledEvent { tag } => format!("no handler registered for `{tag}`"),
            UnitError::Handler { tag, source } => format!("`{tag}`: {}", source.as_message()),
            UnitError::RetryExhausted {
                tag,
                attempts,
                source,
            } => format!(
                "`{tag}`: gave up after {attempts} attempts; last: {}",
                source.as_message()
            ),
            UnitError::GraceExceeded { grace } => format!("grace exceeded after {grace:?}"),
        }
    }
}

/// # Errors produced by handler invocations.
///
/// These represent failures of individual async handlers dispatched by a
/// unit. `Fail` is retryable under a [`RetryPolicy`](crate::RetryPolicy);
/// `Fatal` and `Canceled` are not.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum HandleError {
    /// Handler failed but may succeed if retried.
    #[error("execution failed: {error}")]
    Fail {
        /// The underlying error message.
        error: String,
    },

    /// Non-recoverable fatal error (never retried).
    #[error("fatal error (no retry): {error}")]
    Fatal {
        /// The underlying error message.
        error: String,
    },

    /// Invocation was cancelled (superseded or unit teardown).
    #[error("invocation cancelled")]
    Canceled,
}

impl HandleError {
    /// Creates a retryable failure from any displayable cause.
    pub fn fail(error: impl Into<String>) -> Self {
        HandleError::Fail {
            error: error.into(),
        }
    }

    /// Creates a fatal, never-retried failure from any displayable cause.
    pub fn fatal(error: impl Into<String>) -> Self {
        HandleError::Fatal {
            error: error.into(),
        }
    }

    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use statevisor::HandleError;
    ///
    /// let err = HandleError::fail("boom");
    /// assert_eq!(err.as_label(), "handler_failed");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            HandleError::Fail { .. } => "handler_failed",
            HandleError::Fatal { .. } => "handler_fatal",
            HandleError::Canceled => "handler_canceled",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            HandleError::Fail { error } => format!("error: {error}"),
            HandleError::Fatal { error } => format!("fatal: {error}"),
            HandleError::Canceled => "invocation cancelled".to_string(),
        }
    }

    /// Indicates whether the error type is safe to retry.
    ///
    /// Returns `true` only for [`HandleError::Fail`].
    ///
    /// # Example
    /// ```
    /// use statevisor::HandleError;
    ///
    /// assert!(HandleError::fail("flaky fetch").is_retryable());
    /// assert!(!HandleError::fatal("bad payload").is_retryable());
    /// assert!(!HandleError::Canceled.is_retryable());
    /// ```
    pub fn is_retryable(&self) -> bool {
        matches!(self, HandleError::Fail { .. })
    }
}

/// # Errors produced when installing the process runtime.
///
/// See [`install`](crate::install) for the init-before-any-unit ordering.
#[non_exhaustive]
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallError {
    /// A runtime was already installed for this process.
    #[error("a process runtime is already installed")]
    AlreadyInstalled,

    /// A unit has already been constructed; installation must happen first.
    #[error("install must run before any unit is constructed")]
    TooLate,
}

/// # Errors produced by the snapshot/persistence surface.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum PersistError {
    /// Snapshot (de)serialization failed.
    #[error("snapshot serialization failed: {0}")]
    Serde(#[from] serde_json::Error),

    /// The snapshot store reported a failure.
    #[error("snapshot store failure: {0}")]
    Store(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_error_labels_are_stable() {
        let err = UnitError::DuplicateHandler { tag: "increment" };
        assert_eq!(err.as_label(), "unit_duplicate_handler");

        let err = UnitError::RetryExhausted {
            tag: "fetch",
            attempts: 3,
            source: HandleError::fail("connection reset"),
        };
        assert_eq!(err.as_label(), "unit_retry_exhausted");
        assert!(err.as_message().contains("3 attempts"));
        assert!(err.as_message().contains("connection reset"));
    }

    #[test]
    fn handle_error_retryability() {
        assert!(HandleError::fail("x").is_retryable());
        assert!(!HandleError::fatal("x").is_retryable());
        assert!(!HandleError::Canceled.is_retryable());
    }

    #[test]
    fn handle_error_display_includes_cause() {
        let err = HandleError::fail("socket closed");
        assert_eq!(err.to_string(), "execution failed: socket closed");
        let err = HandleError::fatal("schema mismatch");
        assert!(err.to_string().contains("no retry"));
    }
}
