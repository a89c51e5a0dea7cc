//! # Scheduled event model.
//!
//! [`ScheduledEvent`] is the canonical record owned by the registry: an opaque
//! identifier, immutable text fields, an absolute scheduled time, and a
//! monotonic [`EventStatus`] that only ever moves `Pending → Completed`.
//!
//! Events serialize in camelCase (`scheduledTime`) with lowercase status
//! values, matching the notification wire shape.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a scheduled event.
///
/// Backed by a random UUID so that identifiers never collide, even for
/// inserts landing within the same clock tick. A purely time-based id would
/// not survive high-frequency concurrent inserts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventId(Uuid);

impl EventId {
    /// Allocates a fresh unique id.
    pub(crate) fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the inner UUID.
    #[must_use]
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Lifecycle state of a scheduled event.
///
/// Monotonic: once `Completed`, an event never reverts to `Pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    /// Scheduled time has not passed yet (or the ticker has not observed it).
    Pending,
    /// Terminal state; the completion transition has been applied.
    Completed,
}

impl EventStatus {
    #[inline]
    pub fn is_pending(&self) -> bool {
        matches!(self, EventStatus::Pending)
    }

    #[inline]
    pub fn is_completed(&self) -> bool {
        matches!(self, EventStatus::Completed)
    }
}

/// A scheduled event tracked by the registry.
///
/// `id`, `title`, `description` and `scheduled_time` are immutable after
/// creation; only `status` changes, and only through the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledEvent {
    /// Opaque unique identifier, assigned at creation.
    pub id: EventId,
    /// Short human-readable title.
    pub title: String,
    /// Free-form description.
    pub description: String,
    /// Absolute wall-clock time the event is scheduled for.
    pub scheduled_time: DateTime<Utc>,
    /// Current lifecycle state.
    pub status: EventStatus,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;

    #[test]
    fn serializes_in_wire_shape() {
        let event = ScheduledEvent {
            id: EventId::new(),
            title: "standup".into(),
            description: "daily sync".into(),
            scheduled_time: Utc::now() + TimeDelta::minutes(10),
            status: EventStatus::Pending,
        };

        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"scheduledTime\""));
        assert!(json.contains("\"status\":\"pending\""));

        let back: ScheduledEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }

    #[test]
    fn status_predicates() {
        assert!(EventStatus::Pending.is_pending());
        assert!(!EventStatus::Pending.is_completed());
        assert!(EventStatus::Completed.is_completed());
    }
}
