//! # Broadcast hub: dynamic observer registry with isolated fan-out.
//!
//! [`ObserverSet`] tracks connected observers and delivers notifications to
//! all of them. Every observer gets a dedicated bounded queue and worker
//! task, so delivery to one observer is never blocked or aborted by the
//! failure or slowness of another.
//!
//! ## Architecture
//! ```text
//! broadcast(n)
//!     │
//!     ├──► [queue 1] ──► worker 1 ──► observer1.on_notify()
//!     │    (bounded)         └──────► Err/panic → unregister observer 1
//!     ├──► [queue 2] ──► worker 2 ──► observer2.on_notify()
//!     └──► [queue N] ──► worker N ──► observerN.on_notify()
//! ```
//!
//! ## Rules
//! - **Registration greeting**: `register` enqueues a `Welcome` notification
//!   carrying the pending snapshot to that observer only, before anything
//!   broadcast later can reach it.
//! - **Per-observer FIFO**: each observer sees notifications in emission
//!   order; no ordering is promised across observers.
//! - **Failure eviction**: a delivery error, a closed queue, or a panicking
//!   observer unregisters that observer as a side effect; no retries.
//! - **Overflow**: a full queue drops the notification for that observer
//!   only; the observer stays registered.
//! - **Non-blocking**: `broadcast` uses `try_send` and never waits on an
//!   observer's transport.

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::sync::Arc;

use futures::FutureExt;
use tokio::sync::{mpsc, RwLock};
use tokio::task::JoinHandle;

use crate::events::{Notification, ScheduledEvent};
use crate::observers::Observe;

/// Identifier of a registered observer, unique within one [`ObserverSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

impl fmt::Display for ObserverId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "observer-{}", self.0)
    }
}

/// Per-observer queue metadata.
struct ObserverChannel {
    name: &'static str,
    sender: mpsc::Sender<Arc<Notification>>,
    worker: JoinHandle<()>,
}

/// Live set of connected observers.
///
/// Connect/disconnect may occur concurrently with broadcast delivery: the
/// map is guarded by an async `RwLock` and `broadcast` iterates a snapshot
/// of senders, so mutation never corrupts an in-flight fan-out.
pub struct ObserverSet {
    observers: RwLock<HashMap<ObserverId, ObserverChannel>>,
    next_id: AtomicU64,
}

impl ObserverSet {
    /// Creates an empty set.
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            observers: RwLock::new(HashMap::new()),
            next_id: AtomicU64::new(0),
        })
    }

    /// Adds an observer to the live set and spawns its worker.
    ///
    /// A `Welcome` notification carrying `pending` is enqueued for this
    /// observer before it is visible to `broadcast`, so the greeting is
    /// always the first item in its stream regardless of concurrent traffic.
    pub async fn register(
        self: &Arc<Self>,
        observer: Arc<dyn Observe>,
        pending: Vec<ScheduledEvent>,
    ) -> ObserverId {
        let id = ObserverId(self.next_id.fetch_add(1, AtomicOrdering::Relaxed));
        let name = observer.name();
        let capacity = observer.queue_capacity().max(1);
        let (tx, mut rx) = mpsc::channel::<Arc<Notification>>(capacity);

        // The queue is brand-new and capacity >= 1: this cannot fail.
        let _ = tx.try_send(Arc::new(Notification::welcome(pending)));

        let set = Arc::downgrade(self);
        let worker = tokio::spawn(async move {
            while let Some(notification) = rx.recv().await {
                let fut = observer.on_notify(notification.as_ref());
                let failure = match std::panic::AssertUnwindSafe(fut).catch_unwind().await {
                    Ok(Ok(())) => None,
                    Ok(Err(err)) => Some(err.to_string()),
                    Err(panic) => Some(panic_reason(&panic)),
                };
                if let Some(reason) = failure {
                    tracing::warn!(
                        observer = observer.name(),
                        %id,
                        reason = %reason,
                        "delivery failed; unregistering observer"
                    );
                    if let Some(set) = set.upgrade() {
                        set.remove(id).await;
                    }
                    break;
                }
            }
        });

        let channel = ObserverChannel {
            name,
            sender: tx,
            worker,
        };
        self.observers.write().await.insert(id, channel);
        id
    }

    /// Removes an observer from the live set; idempotent.
    ///
    /// The observer's queue is closed; its worker drains what was already
    /// queued and exits.
    pub async fn unregister(&self, id: ObserverId) {
        self.remove(id).await;
    }

    /// Delivers a notification to every currently registered observer.
    ///
    /// Per-observer `try_send`: a full queue drops the notification for that
    /// observer only, a closed queue evicts the observer. Never blocks on an
    /// observer's transport.
    pub async fn broadcast(&self, notification: Notification) {
        let shared = Arc::new(notification);
        let targets: Vec<_> = {
            let observers = self.observers.read().await;
            observers
                .iter()
                .map(|(id, ch)| (*id, ch.name, ch.sender.clone()))
                .collect()
        };

        let mut dead = Vec::new();
        for (id, name, sender) in targets {
            match sender.try_send(Arc::clone(&shared)) {
                Ok(()) => {}
                Err(mpsc::error::TrySendError::Full(_)) => {
                    tracing::warn!(observer = name, %id, "queue full; notification dropped");
                }
                Err(mpsc::error::TrySendError::Closed(_)) => dead.push(id),
            }
        }
        for id in dead {
            self.remove(id).await;
        }
    }

    /// Returns the number of currently registered observers.
    pub async fn len(&self) -> usize {
        self.observers.read().await.len()
    }

    /// Returns true if no observer is registered.
    pub async fn is_empty(&self) -> bool {
        self.observers.read().await.is_empty()
    }

    /// Closes all queues and joins all workers.
    ///
    /// Queued notifications are drained before each worker exits.
    pub async fn shutdown(&self) {
        let drained: Vec<ObserverChannel> = {
            let mut observers = self.observers.write().await;
            observers.drain().map(|(_, ch)| ch).collect()
        };

        for channel in drained {
            let ObserverChannel { sender, worker, .. } = channel;
            drop(sender);
            let _ = worker.await;
        }
    }

    async fn remove(&self, id: ObserverId) -> bool {
        self.observers.write().await.remove(&id).is_some()
    }
}

fn panic_reason(panic: &(dyn std::any::Any + Send)) -> String {
    if let Some(msg) = panic.downcast_ref::<&'static str>() {
        (*msg).to_string()
    } else if let Some(msg) = panic.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NotifyError;
    use crate::events::{EventId, EventStatus, NotificationKind};
    use async_trait::async_trait;
    use chrono::{TimeDelta, Utc};
    use std::sync::atomic::AtomicUsize;
    use std::sync::Mutex;
    use std::time::Duration;

    fn sample_event(title: &str, minutes_from_now: i64) -> ScheduledEvent {
        ScheduledEvent {
            id: EventId::new(),
            title: title.into(),
            description: String::new(),
            scheduled_time: Utc::now() + TimeDelta::minutes(minutes_from_now),
            status: EventStatus::Pending,
        }
    }

    #[derive(Default)]
    struct Collector {
        seen: Mutex<Vec<Notification>>,
    }

    impl Collector {
        fn seen(&self) -> Vec<Notification> {
            self.seen.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Observe for Collector {
        async fn on_notify(&self, notification: &Notification) -> Result<(), NotifyError> {
            self.seen.lock().unwrap().push(notification.clone());
            Ok(())
        }

        fn name(&self) -> &'static str {
            "collector"
        }
    }

    /// Accepts the greeting, then fails every delivery.
    struct Broken;

    #[async_trait]
    impl Observe for Broken {
        async fn on_notify(&self, notification: &Notification) -> Result<(), NotifyError> {
            match notification.kind {
                NotificationKind::Welcome => Ok(()),
                _ => Err(NotifyError::Closed),
            }
        }

        fn name(&self) -> &'static str {
            "broken"
        }
    }

    async fn wait_until<F>(mut cond: F)
    where
        F: FnMut() -> bool,
    {
        for _ in 0..200 {
            if cond() {
                return;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("condition not reached within 2s");
    }

    #[tokio::test]
    async fn register_delivers_welcome_with_snapshot() {
        let set = ObserverSet::new();
        let obs = Arc::new(Collector::default());

        set.register(obs.clone(), vec![sample_event("standup", 10)])
            .await;

        wait_until(|| obs.seen().len() == 1).await;
        let seen = obs.seen();
        assert_eq!(seen[0].kind, NotificationKind::Welcome);
        assert_eq!(seen[0].pending.as_ref().unwrap().len(), 1);
        assert_eq!(seen[0].pending.as_ref().unwrap()[0].title, "standup");
    }

    #[tokio::test]
    async fn broadcast_is_fifo_per_observer() {
        let set = ObserverSet::new();
        let obs = Arc::new(Collector::default());
        set.register(obs.clone(), Vec::new()).await;

        let event = sample_event("standup", 4);
        set.broadcast(Notification::pre_start(&event)).await;
        set.broadcast(Notification::completion(&event)).await;

        wait_until(|| obs.seen().len() == 3).await;
        let seen = obs.seen();
        assert_eq!(seen[0].kind, NotificationKind::Welcome);
        assert_eq!(seen[1].kind, NotificationKind::PreStart);
        assert_eq!(seen[2].kind, NotificationKind::Completion);
        assert!(seen.windows(2).all(|w| w[0].seq < w[1].seq));
    }

    #[tokio::test]
    async fn failed_observer_is_evicted_without_disturbing_others() {
        let set = ObserverSet::new();
        let alpha = Arc::new(Collector::default());
        let beta = Arc::new(Collector::default());

        set.register(alpha.clone(), Vec::new()).await;
        set.register(beta.clone(), Vec::new()).await;
        set.register(Arc::new(Broken), Vec::new()).await;
        assert_eq!(set.len().await, 3);

        set.broadcast(Notification::completion(&sample_event("standup", -1)))
            .await;

        wait_until(|| alpha.seen().len() == 2 && beta.seen().len() == 2).await;

        for _ in 0..200 {
            if set.len().await == 2 {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        assert_eq!(set.len().await, 2);
        assert_eq!(alpha.seen()[1].kind, NotificationKind::Completion);
        assert_eq!(beta.seen()[1].kind, NotificationKind::Completion);
    }

    #[tokio::test]
    async fn unregister_is_idempotent() {
        let set = ObserverSet::new();
        let id = set
            .register(Arc::new(Collector::default()), Vec::new())
            .await;
        assert_eq!(set.len().await, 1);

        set.unregister(id).await;
        set.unregister(id).await;
        assert_eq!(set.len().await, 0);
    }

    /// Signals entry into `on_notify`, then blocks until the gate opens.
    struct Slow {
        entered: AtomicUsize,
        gate: Arc<tokio::sync::Semaphore>,
        seen: Mutex<Vec<Notification>>,
    }

    #[async_trait]
    impl Observe for Slow {
        async fn on_notify(&self, notification: &Notification) -> Result<(), NotifyError> {
            self.entered.fetch_add(1, AtomicOrdering::SeqCst);
            let _permit = self.gate.acquire().await.unwrap();
            self.seen.lock().unwrap().push(notification.clone());
            Ok(())
        }

        fn name(&self) -> &'static str {
            "slow"
        }

        fn queue_capacity(&self) -> usize {
            1
        }
    }

    #[tokio::test]
    async fn full_queue_drops_but_keeps_observer() {
        let set = ObserverSet::new();
        let gate = Arc::new(tokio::sync::Semaphore::new(0));
        let slow = Arc::new(Slow {
            entered: AtomicUsize::new(0),
            gate: Arc::clone(&gate),
            seen: Mutex::new(Vec::new()),
        });

        set.register(slow.clone(), Vec::new()).await;
        // The worker is now blocked inside the welcome delivery.
        wait_until(|| slow.entered.load(AtomicOrdering::SeqCst) == 1).await;

        let event = sample_event("standup", 4);
        set.broadcast(Notification::pre_start(&event)).await; // queued
        set.broadcast(Notification::completion(&event)).await; // dropped, queue full

        assert_eq!(set.len().await, 1);

        gate.add_permits(16);
        wait_until(|| slow.seen.lock().unwrap().len() == 2).await;
        let seen = slow.seen.lock().unwrap().clone();
        assert_eq!(seen[0].kind, NotificationKind::Welcome);
        assert_eq!(seen[1].kind, NotificationKind::PreStart);
    }

    #[tokio::test]
    async fn shutdown_drains_queued_notifications() {
        let set = ObserverSet::new();
        let obs = Arc::new(Collector::default());
        set.register(obs.clone(), Vec::new()).await;

        set.broadcast(Notification::completion(&sample_event("standup", -1)))
            .await;
        set.shutdown().await;

        assert_eq!(obs.seen().len(), 2);
        assert_eq!(set.len().await, 0);
    }
}
