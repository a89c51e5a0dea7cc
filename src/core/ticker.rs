//! # Ticker: periodic schedule re-evaluation.
//!
//! The [`Ticker`] is a dedicated background task on a fixed interval. Each
//! tick takes one registry pass ([`EventRegistry::evaluate`]) and publishes
//! the resulting pre-start and completion notifications; completed events
//! are additionally handed to the completion sink.
//!
//! ## Rules
//! - One tick runs to completion before the next is scheduled; ticks never
//!   overlap.
//! - A tick that finds nothing to act on is a cheap no-op.
//! - The pre-start warning fires at most once per event (registry flag);
//!   re-observing an event inside the band is not a repeat warning.
//! - A sink failure is logged and never stops the loop or rolls back the
//!   completion transition.

use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Utc};
use tokio::time::{self, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::config::EngineConfig;
use crate::core::registry::EventRegistry;
use crate::events::{Bus, Notification};
use crate::sinks::CompletionSink;

/// Time-driven state machine over the registry.
pub(crate) struct Ticker {
    registry: Arc<EventRegistry>,
    bus: Bus,
    sink: Arc<dyn CompletionSink>,
    period: std::time::Duration,
    prestart_window: TimeDelta,
}

impl Ticker {
    pub(crate) fn new(
        registry: Arc<EventRegistry>,
        bus: Bus,
        sink: Arc<dyn CompletionSink>,
        cfg: &EngineConfig,
    ) -> Self {
        Self {
            registry,
            bus,
            sink,
            period: cfg.tick,
            prestart_window: cfg.prestart(),
        }
    }

    /// Runs the tick loop until the token is cancelled.
    pub(crate) async fn run(self, token: CancellationToken) {
        let mut ticks = time::interval(self.period);
        ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = token.cancelled() => break,
                _ = ticks.tick() => self.tick(Utc::now()).await,
            }
        }
    }

    /// One evaluation pass against the given instant.
    pub(crate) async fn tick(&self, now: DateTime<Utc>) {
        let outcome = self.registry.evaluate(now, self.prestart_window).await;

        for event in outcome.pre_start {
            self.bus.publish(Notification::pre_start(&event));
        }

        for event in outcome.completed {
            self.bus.publish(Notification::completion(&event));
            if let Err(err) = self.sink.record(&event).await {
                tracing::warn!(
                    event = %event.id,
                    error = %err,
                    label = err.as_label(),
                    "completion sink write failed"
                );
            }
        }
    }
}
