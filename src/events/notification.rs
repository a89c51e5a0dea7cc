//! # Notifications pushed to connected observers.
//!
//! The [`NotificationKind`] enum classifies the messages observers receive:
//! - `Welcome` — sent once to a newly registered observer, carrying the
//!   current pending-event snapshot (never broadcast);
//! - `OverlapWarning` — two pending events are scheduled too close together;
//! - `PreStart` — an event enters the advance-warning band, at most once;
//! - `Completion` — an event's scheduled time has passed.
//!
//! Notifications are transient: they exist only in transit from producer to
//! hub to observers and are never persisted.
//!
//! ## Ordering guarantees
//! Each notification has a globally unique sequence number (`seq`) that
//! increases monotonically with emission order. Within one observer's stream
//! delivery is FIFO, so `seq` is strictly increasing per observer.
//!
//! ## Wire shape
//! ```json
//! { "seq": 7, "at": "...", "type": "pre-start", "message": "...", "event": { ... } }
//! ```

use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::event::ScheduledEvent;

/// Global sequence counter for notification ordering.
static NOTIFICATION_SEQ: AtomicU64 = AtomicU64::new(0);

/// Classification of observer notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NotificationKind {
    /// Greeting for a newly connected observer; carries the pending snapshot.
    Welcome,
    /// Two pending events are scheduled within the overlap window.
    OverlapWarning,
    /// An event is about to start (entered the pre-start band).
    PreStart,
    /// An event's scheduled time has passed; it is now completed.
    Completion,
}

/// A transient message delivered to observers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock emission timestamp.
    pub at: DateTime<Utc>,
    /// Notification classification.
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    /// Human-readable text.
    pub message: String,
    /// The associated event, where applicable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event: Option<ScheduledEvent>,
    /// Pending-event snapshot; set only on `Welcome`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pending: Option<Vec<ScheduledEvent>>,
}

impl Notification {
    /// Creates a notification of the given kind with the current timestamp
    /// and the next global sequence number.
    pub fn new(kind: NotificationKind, message: impl Into<String>) -> Self {
        Self {
            seq: NOTIFICATION_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: Utc::now(),
            kind,
            message: message.into(),
            event: None,
            pending: None,
        }
    }

    /// Attaches the associated event.
    #[inline]
    pub fn with_event(mut self, event: ScheduledEvent) -> Self {
        self.event = Some(event);
        self
    }

    /// Attaches a pending-event snapshot.
    #[inline]
    pub fn with_pending(mut self, pending: Vec<ScheduledEvent>) -> Self {
        self.pending = Some(pending);
        self
    }

    /// Greeting for a newly registered observer, carrying the current
    /// pending snapshot.
    pub fn welcome(pending: Vec<ScheduledEvent>) -> Self {
        let message = format!("connected; {} pending event(s)", pending.len());
        Notification::new(NotificationKind::Welcome, message).with_pending(pending)
    }

    /// Warning that two events are scheduled within the overlap window.
    ///
    /// The message orders the two titles canonically (by scheduled time, then
    /// title), so either insertion order produces the same text. The newly
    /// inserted event rides along as the associated event.
    pub fn overlap(inserted: &ScheduledEvent, other: &ScheduledEvent) -> Self {
        let (first, second) =
            if (inserted.scheduled_time, &inserted.title) <= (other.scheduled_time, &other.title) {
                (inserted, other)
            } else {
                (other, inserted)
            };
        let message = format!("'{}' overlaps with '{}'", first.title, second.title);
        Notification::new(NotificationKind::OverlapWarning, message).with_event(inserted.clone())
    }

    /// Advance warning that an event is about to start.
    pub fn pre_start(event: &ScheduledEvent) -> Self {
        let message = format!("'{}' is about to start", event.title);
        Notification::new(NotificationKind::PreStart, message).with_event(event.clone())
    }

    /// Terminal notice that an event's scheduled time has passed.
    pub fn completion(event: &ScheduledEvent) -> Self {
        let message = format!("'{}' has completed", event.title);
        Notification::new(NotificationKind::Completion, message).with_event(event.clone())
    }
}
