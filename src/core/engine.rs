//! # Engine: wires registry, ticker, bus, and the broadcast hub.
//!
//! The [`Engine`] owns the notification bus, the [`EventRegistry`], the
//! [`ObserverSet`], and the completion sink. It exposes the operations the
//! API and transport layers consume (insert, list-pending, register,
//! unregister), spawns the background tasks, and drives graceful shutdown
//! on OS signals.
//!
//! ## High-level architecture
//! ```text
//! insert() ──► registry ──► overlap detector ──► Bus
//!                                                 ▲
//! Ticker (periodic) ──► registry.evaluate() ──────┘
//!                            └──► sink.record() per completion
//!
//! Bus ──► hub listener ──► ObserverSet::broadcast ──► per-observer queues
//! register() ──────────────► ObserverSet (welcome + pending snapshot)
//! ```
//!
//! ## Shutdown path
//! ```text
//! wait_for_shutdown_signal()
//!     └─► token.cancel()            → ticker and hub listener exit
//!     └─► hub shutdown within grace:
//!            ├─ drained in time → Ok(())
//!            └─ grace exceeded  → EngineError::GraceExceeded
//! ```

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::time;
use tokio_util::sync::CancellationToken;

use crate::config::EngineConfig;
use crate::core::overlap::find_overlaps;
use crate::core::registry::EventRegistry;
use crate::core::shutdown;
use crate::core::ticker::Ticker;
use crate::error::EngineError;
use crate::events::{Bus, EventId, Notification, ScheduledEvent};
use crate::observers::{Observe, ObserverId, ObserverSet};
use crate::sinks::CompletionSink;

/// Event notification engine.
///
/// Cheap to share: hand out `Arc<Engine>` (or clones of the inner handles)
/// to the API and transport layers.
pub struct Engine {
    cfg: EngineConfig,
    bus: Bus,
    registry: Arc<EventRegistry>,
    observers: Arc<ObserverSet>,
    sink: Arc<dyn CompletionSink>,
}

impl Engine {
    /// Creates an engine with the given configuration and completion sink.
    pub fn new(cfg: EngineConfig, sink: Arc<dyn CompletionSink>) -> Self {
        let bus = Bus::new(cfg.bus_capacity_clamped());
        Self {
            cfg,
            bus,
            registry: Arc::new(EventRegistry::new()),
            observers: ObserverSet::new(),
            sink,
        }
    }

    /// Returns the engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.cfg
    }

    /// Creates a new pending event and emits overlap warnings.
    ///
    /// The overlap detector runs synchronously against the pending snapshot
    /// before this call returns; one warning is published per conflicting
    /// pending event.
    pub async fn insert(
        &self,
        title: impl Into<String>,
        description: impl Into<String>,
        scheduled_time: DateTime<Utc>,
    ) -> ScheduledEvent {
        let event = self
            .registry
            .insert(title, description, scheduled_time)
            .await;

        let pending = self.registry.list_pending().await;
        for other in find_overlaps(&event, &pending, self.cfg.overlap()) {
            self.bus.publish(Notification::overlap(&event, &other));
        }
        event
    }

    /// Returns a snapshot of all pending events.
    pub async fn pending(&self) -> Vec<ScheduledEvent> {
        self.registry.list_pending().await
    }

    /// Completes an event ahead of its schedule.
    ///
    /// On an actual transition the completion notification is published and
    /// the sink invoked, exactly as when the ticker observes the deadline.
    /// Idempotent: completing an already-completed (or unknown) event
    /// returns `None` and has no side effects.
    pub async fn complete(&self, id: EventId) -> Option<ScheduledEvent> {
        let event = self.registry.transition_to_completed(id).await?;

        self.bus.publish(Notification::completion(&event));
        if let Err(err) = self.sink.record(&event).await {
            tracing::warn!(
                event = %event.id,
                error = %err,
                label = err.as_label(),
                "completion sink write failed"
            );
        }
        Some(event)
    }

    /// Registers a connected observer.
    ///
    /// The observer immediately receives a welcome notification carrying
    /// the current pending snapshot; everything broadcast afterwards follows
    /// in emission order.
    pub async fn register(&self, observer: Arc<dyn Observe>) -> ObserverId {
        let pending = self.registry.list_pending().await;
        self.observers.register(observer, pending).await
    }

    /// Unregisters an observer; idempotent.
    pub async fn unregister(&self, id: ObserverId) {
        self.observers.unregister(id).await;
    }

    /// Spawns the background tasks (hub listener and ticker) under `token`.
    ///
    /// Use this when embedding the engine in a host process that manages its
    /// own lifecycle; [`run`](Engine::run) wraps it with signal handling.
    pub fn start(&self, token: &CancellationToken) {
        self.spawn_hub_listener(token.child_token());
        self.spawn_ticker(token.child_token());
    }

    /// Runs the engine until an OS termination signal arrives, then shuts
    /// down gracefully within the configured grace period.
    pub async fn run(&self) -> Result<(), EngineError> {
        let token = CancellationToken::new();
        self.start(&token);

        shutdown::wait_for_shutdown_signal().await?;
        token.cancel();

        match time::timeout(self.cfg.grace, self.observers.shutdown()).await {
            Ok(()) => Ok(()),
            Err(_) => Err(EngineError::GraceExceeded {
                grace: self.cfg.grace,
            }),
        }
    }

    /// Forwards every bus notification to the observer set.
    fn spawn_hub_listener(&self, token: CancellationToken) {
        let mut rx = self.bus.subscribe();
        let observers = Arc::clone(&self.observers);

        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = token.cancelled() => break,
                    msg = rx.recv() => match msg {
                        Ok(notification) => observers.broadcast(notification).await,
                        Err(tokio::sync::broadcast::error::RecvError::Closed) => break,
                        Err(tokio::sync::broadcast::error::RecvError::Lagged(skipped)) => {
                            tracing::warn!(skipped, "hub listener lagged; notifications skipped");
                        }
                    }
                }
            }
        });
    }

    fn spawn_ticker(&self, token: CancellationToken) {
        let ticker = Ticker::new(
            Arc::clone(&self.registry),
            self.bus.clone(),
            Arc::clone(&self.sink),
            &self.cfg,
        );
        tokio::spawn(ticker.run(token));
    }
}
