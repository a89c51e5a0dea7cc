//! # Overlap detection.
//!
//! Pure functions over a pending snapshot: no locks, no clock reads. The
//! insert path runs [`find_overlaps`] synchronously against the snapshot
//! taken right after the insert and maps every hit to one overlap-warning
//! notification.

use chrono::TimeDelta;

use crate::events::ScheduledEvent;

/// Returns true when two distinct events are scheduled strictly closer
/// together than `window`.
///
/// Symmetric in its arguments; an event never overlaps itself.
pub fn overlaps(a: &ScheduledEvent, b: &ScheduledEvent, window: TimeDelta) -> bool {
    a.id != b.id && (a.scheduled_time - b.scheduled_time).abs() < window
}

/// Collects every event in `pending` conflicting with `candidate`.
pub fn find_overlaps(
    candidate: &ScheduledEvent,
    pending: &[ScheduledEvent],
    window: TimeDelta,
) -> Vec<ScheduledEvent> {
    pending
        .iter()
        .filter(|other| overlaps(candidate, other, window))
        .cloned()
        .collect()
}
