//! # Completion sink trait.
//!
//! [`CompletionSink`] is the seam to durable storage of completed events.
//! The ticker calls [`record`](CompletionSink::record) exactly once per
//! completion transition, fire-and-forget: a failed write is logged and the
//! in-memory transition is not rolled back.

use async_trait::async_trait;

use crate::error::SinkError;
use crate::events::ScheduledEvent;

/// Durable log of completed events.
///
/// Implementations must be safe to call from the ticker task; keep `record`
/// reasonably fast or internally buffered, since it runs once per completed
/// event within a tick.
#[async_trait]
pub trait CompletionSink: Send + Sync + 'static {
    /// Appends one finalized event to the log.
    async fn record(&self, event: &ScheduledEvent) -> Result<(), SinkError>;
}
