//! Observer trait and the broadcast hub.
//!
//! This module provides the [`Observe`] trait (one implementation per
//! connected client) and [`ObserverSet`], the hub that tracks the live set
//! and fans notifications out with per-observer isolation.
//!
//! ## Notification flow
//! ```text
//! insert path / ticker ── publish ──► Bus ──► hub listener (in Engine)
//!                                                 │
//!                                                 ▼
//!                                          ObserverSet::broadcast
//!                                       ┌─────────┼─────────┐
//!                                       ▼         ▼         ▼
//!                                   observer1 observer2 observerN
//! ```

mod observer;
mod set;

#[cfg(feature = "logging")]
mod log;

pub use observer::Observe;
pub use set::{ObserverId, ObserverSet};

#[cfg(feature = "logging")]
pub use log::LogWriter;
