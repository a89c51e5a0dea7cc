//! Error types used by the eventcast engine.
//!
//! Three error enums, one per failure domain:
//!
//! - [`EngineError`] — failures of the engine runtime itself (shutdown, signals).
//! - [`NotifyError`] — per-observer delivery failures, local to the broadcast hub.
//! - [`SinkError`] — completion-log write failures, logged and never propagated.
//!
//! Each type provides [`as_label`](EngineError::as_label) returning a short
//! stable snake_case label for logs and metrics.

use std::time::Duration;
use thiserror::Error;

/// # Errors produced by the engine runtime.
///
/// These represent failures in the engine's own lifecycle, not in any
/// individual event or observer.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum EngineError {
    /// Shutdown grace period was exceeded; observer workers had to be abandoned.
    #[error("shutdown grace period {grace:?} exceeded; forcing termination")]
    GraceExceeded {
        /// The configured grace duration.
        grace: Duration,
    },

    /// Installing the OS shutdown signal listener failed.
    #[error("failed to install shutdown signal handler: {0}")]
    Signal(#[from] std::io::Error),
}

impl EngineError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use eventcast::EngineError;
    /// use std::time::Duration;
    ///
    /// let err = EngineError::GraceExceeded { grace: Duration::from_secs(5) };
    /// assert_eq!(err.as_label(), "engine_grace_exceeded");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            EngineError::GraceExceeded { .. } => "engine_grace_exceeded",
            EngineError::Signal(_) => "engine_signal",
        }
    }
}

/// # Errors produced by notification delivery to a single observer.
///
/// Delivery errors are local to the broadcast hub: the failing observer is
/// unregistered and the remaining observers are unaffected. These errors
/// never reach the registry or the ticker.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum NotifyError {
    /// The observer's connection is gone; no further delivery is possible.
    #[error("observer connection closed")]
    Closed,

    /// The observer's transport write failed or timed out.
    #[error("observer transport error: {reason}")]
    Transport {
        /// The underlying transport failure message.
        reason: String,
    },
}

impl NotifyError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            NotifyError::Closed => "notify_closed",
            NotifyError::Transport { .. } => "notify_transport",
        }
    }
}

/// # Errors produced by the completion sink.
///
/// Sink failures are logged by the ticker and never propagated: the in-memory
/// completion transition has already happened and is not rolled back.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum SinkError {
    /// Appending to the completion log failed.
    #[error("completion log write failed: {0}")]
    Io(#[from] std::io::Error),

    /// Serializing the completed event failed.
    #[error("completion log serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl SinkError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            SinkError::Io(_) => "sink_io",
            SinkError::Serialize(_) => "sink_serialize",
        }
    }
}
