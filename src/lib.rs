//! # eventcast
//!
//! **Eventcast** tracks scheduled events and pushes notifications to
//! connected observers in real time as event state changes: creation-time
//! overlap warnings, an advance warning shortly before start, and a
//! completion notice once the scheduled time has passed.
//!
//! The crate is a building block for notification services: the network API
//! (create/list), the observer transport (e.g. WebSocket sessions), and
//! process bootstrap live in the host application and plug into the seams
//! exposed here ([`Engine`], [`Observe`], [`CompletionSink`]).
//!
//! ## Architecture
//! ### Overview
//! ```text
//!   API layer                         transport layer
//!      │ insert / pending                │ register / unregister
//!      ▼                                 ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  Engine                                                           │
//! │  - EventRegistry (canonical events, one lock boundary)            │
//! │  - overlap detector (pure, runs on insert)                        │
//! │  - Ticker (periodic schedule re-evaluation)                       │
//! │  - Bus (broadcast notifications)                                  │
//! │  - ObserverSet (fan-out to connected observers)                   │
//! └──────┬──────────────────────┬─────────────────────────┬───────────┘
//!        │ publish              │ publish                 │ record
//!        ▼                      ▼                         ▼
//!   OverlapWarning        PreStart / Completion     CompletionSink
//!        │                      │                   (JSON Lines file, ...)
//!        └──────────┬───────────┘
//!                   ▼
//!     ┌────────────────────────┐
//!     │   Bus ──► hub listener │
//!     └───────────┬────────────┘
//!         ┌───────┼───────┐
//!         ▼       ▼       ▼
//!     [queue 1][queue 2][queue N]     (bounded, per observer)
//!         ▼       ▼       ▼
//!     worker1  worker2  workerN
//!         ▼       ▼       ▼
//!     obs1.on  obs2.on  obsN.on
//!      _notify  _notify  _notify
//! ```
//!
//! ### Event lifecycle
//! ```text
//! insert ──► Pending
//!              │  (ticker, each tick)
//!              ├─ now < scheduled - prestart_window   → no action
//!              ├─ inside pre-start band, first time   → PreStart (once per event)
//!              └─ now >= scheduled                    → Completed
//!                                                        ├─ Completion notification
//!                                                        └─ CompletionSink::record
//! Completed ──► terminal, never touched again
//! ```
//!
//! ## Guarantees
//! | Concern            | Behavior                                                        |
//! |--------------------|-----------------------------------------------------------------|
//! | Id uniqueness      | Random UUIDs; safe under concurrent inserts                     |
//! | State consistency  | One `RwLock` boundary; a tick never sees a half-written event   |
//! | Pre-start dedup    | Per-event flag; at most one advance warning per event           |
//! | Observer isolation | Bounded queue + worker per observer; failures evict, never block|
//! | Ordering           | FIFO per observer; `seq` restores global emission order         |
//! | Delivery           | Best effort; no guarantees to disconnected or slow observers    |
//!
//! ## Example
//! ```no_run
//! use std::sync::Arc;
//! use async_trait::async_trait;
//! use chrono::{TimeDelta, Utc};
//! use eventcast::{
//!     CompletionSink, Engine, EngineConfig, JsonlSink, Notification, NotifyError, Observe,
//! };
//!
//! struct Printer;
//!
//! #[async_trait]
//! impl Observe for Printer {
//!     async fn on_notify(&self, n: &Notification) -> Result<(), NotifyError> {
//!         println!("{}", n.message);
//!         Ok(())
//!     }
//!
//!     fn name(&self) -> &'static str { "printer" }
//! }
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let sink = Arc::new(JsonlSink::new("completed_events.log"));
//!     let engine = Engine::new(EngineConfig::default(), sink);
//!
//!     engine.register(Arc::new(Printer)).await;
//!     engine
//!         .insert("standup", "daily sync", Utc::now() + TimeDelta::minutes(10))
//!         .await;
//!
//!     // Ticks until SIGINT/SIGTERM, then drains observers gracefully.
//!     engine.run().await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Optional features
//! - `logging`: exports a simple built-in [`LogWriter`] observer
//!   _(demo/reference only)_.

mod config;
mod core;
mod error;
mod events;
mod observers;
mod sinks;

// ---- Public re-exports ----

pub use config::EngineConfig;
pub use core::{Engine, EventRegistry, TickOutcome};
pub use error::{EngineError, NotifyError, SinkError};
pub use events::{EventId, EventStatus, Notification, NotificationKind, ScheduledEvent};
pub use observers::{Observe, ObserverId, ObserverSet};
pub use sinks::{CompletionSink, JsonlSink};

// Optional: expose a simple built-in logging observer (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use observers::LogWriter;
