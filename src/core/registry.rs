//! # Event registry: canonical event store and lifecycle owner.
//!
//! [`EventRegistry`] owns every [`ScheduledEvent`] exclusively; no other
//! component mutates an event directly. All reads and writes go through a
//! single async `RwLock`, so a tick never observes a half-written event and
//! concurrent inserts never corrupt the store.
//!
//! ## Rules
//! - Ids are unique under arbitrary concurrent inserts (random UUIDs).
//! - `Pending → Completed` is the only transition and it is idempotent.
//! - Events are never deleted; completed events are retained for historical
//!   queries.
//! - The pre-start dedup flag lives here, next to the event it guards, so
//!   the advance warning fires once no matter how many ticks observe the
//!   pre-start band.

use chrono::{DateTime, TimeDelta, Utc};
use tokio::sync::RwLock;

use crate::events::{EventId, EventStatus, ScheduledEvent};

/// Registry-private wrapper carrying per-event scheduler state.
struct StoredEvent {
    event: ScheduledEvent,
    prestart_notified: bool,
}

/// Result of one scheduler pass over the store.
///
/// Both lists hold clones of the affected events, taken under the same write
/// lock that applied the transitions.
#[derive(Debug, Default)]
pub struct TickOutcome {
    /// Events that entered the pre-start band this pass (first observation).
    pub pre_start: Vec<ScheduledEvent>,
    /// Events whose scheduled time has passed; now `Completed`.
    pub completed: Vec<ScheduledEvent>,
}

/// Thread-safe store of scheduled events.
#[derive(Default)]
pub struct EventRegistry {
    events: RwLock<Vec<StoredEvent>>,
}

impl EventRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates a fresh id, stores the event as `Pending`, returns a clone.
    pub async fn insert(
        &self,
        title: impl Into<String>,
        description: impl Into<String>,
        scheduled_time: DateTime<Utc>,
    ) -> ScheduledEvent {
        let event = ScheduledEvent {
            id: EventId::new(),
            title: title.into(),
            description: description.into(),
            scheduled_time,
            status: EventStatus::Pending,
        };

        self.events.write().await.push(StoredEvent {
            event: event.clone(),
            prestart_notified: false,
        });
        event
    }

    /// Returns a snapshot of all pending events, in insertion order.
    pub async fn list_pending(&self) -> Vec<ScheduledEvent> {
        let events = self.events.read().await;
        events
            .iter()
            .filter(|stored| stored.event.status.is_pending())
            .map(|stored| stored.event.clone())
            .collect()
    }

    /// Flips a pending event to `Completed`.
    ///
    /// Returns the finalized event on an actual transition, `None` when the
    /// event is already completed or unknown (idempotent no-op).
    pub async fn transition_to_completed(&self, id: EventId) -> Option<ScheduledEvent> {
        let mut events = self.events.write().await;
        let stored = events.iter_mut().find(|stored| stored.event.id == id)?;
        if stored.event.status.is_completed() {
            return None;
        }
        stored.event.status = EventStatus::Completed;
        Some(stored.event.clone())
    }

    /// One scheduler pass: re-evaluates every pending event against `now`.
    ///
    /// Under a single write lock:
    /// - `now >= scheduled_time` → transition to `Completed`, collected in
    ///   [`TickOutcome::completed`];
    /// - inside the pre-start band and not yet warned → flag set, collected
    ///   in [`TickOutcome::pre_start`];
    /// - otherwise no action. Completed events are never touched.
    pub async fn evaluate(&self, now: DateTime<Utc>, prestart_window: TimeDelta) -> TickOutcome {
        let mut outcome = TickOutcome::default();
        let mut events = self.events.write().await;

        for stored in events.iter_mut() {
            if !stored.event.status.is_pending() {
                continue;
            }

            let lead = stored.event.scheduled_time.signed_duration_since(now);
            if lead <= TimeDelta::zero() {
                stored.event.status = EventStatus::Completed;
                outcome.completed.push(stored.event.clone());
            } else if lead <= prestart_window && !stored.prestart_notified {
                stored.prestart_notified = true;
                outcome.pre_start.push(stored.event.clone());
            }
        }
        outcome
    }

    /// Returns the total number of stored events, completed included.
    pub async fn len(&self) -> usize {
        self.events.read().await.len()
    }

    /// Returns true if the registry holds no events.
    pub async fn is_empty(&self) -> bool {
        self.events.read().await.is_empty()
    }
}
