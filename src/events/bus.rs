//! # Notification bus.
//!
//! [`Bus`] is a thin wrapper around [`tokio::sync::broadcast`] that decouples
//! notification producers (the insert path, the ticker) from the hub listener
//! that fans deliveries out to observers.
//!
//! ## Rules
//! - **Non-blocking publish**: `publish()` never blocks or awaits.
//! - **Bounded capacity**: a single ring buffer stores recent notifications.
//! - **Lag handling**: a slow receiver gets `RecvError::Lagged(n)` and skips
//!   the `n` oldest items.
//! - **No persistence**: notifications are dropped when no receiver is live.

use tokio::sync::broadcast;

use super::notification::Notification;

/// Broadcast channel for in-flight notifications.
///
/// Cheap to clone (internally holds an `Arc`-backed sender); multiple
/// producers publish concurrently and each receiver observes every
/// notification published after it subscribed.
#[derive(Clone, Debug)]
pub struct Bus {
    tx: broadcast::Sender<Notification>,
}

impl Bus {
    /// Creates a new bus with the given channel capacity (clamped to 1).
    pub fn new(capacity: usize) -> Self {
        let (tx, _rx) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    /// Publishes a notification to all active receivers.
    ///
    /// If there are no receivers the notification is dropped; the call still
    /// returns immediately.
    pub fn publish(&self, notification: Notification) {
        let _ = self.tx.send(notification);
    }

    /// Creates an independent receiver observing subsequent notifications.
    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.tx.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::notification::NotificationKind;

    #[tokio::test]
    async fn receivers_observe_published_notifications() {
        let bus = Bus::new(8);
        let mut rx = bus.subscribe();

        bus.publish(Notification::new(NotificationKind::Welcome, "hi"));

        let got = rx.recv().await.unwrap();
        assert_eq!(got.kind, NotificationKind::Welcome);
        assert_eq!(got.message, "hi");
    }

    #[tokio::test]
    async fn publish_without_receivers_is_a_noop() {
        let bus = Bus::new(1);
        // Must not block or panic.
        bus.publish(Notification::new(NotificationKind::Welcome, "dropped"));
    }
}
