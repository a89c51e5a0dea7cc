//! # Global engine configuration.
//!
//! Provides [`EngineConfig`], the centralized settings for the notification
//! engine: ticker cadence, the pre-start and overlap windows, bus capacity,
//! and the graceful-shutdown bound.
//!
//! The windows are stored as [`std::time::Duration`] and converted to signed
//! [`chrono::TimeDelta`] via the [`prestart`](EngineConfig::prestart) and
//! [`overlap`](EngineConfig::overlap) accessors; prefer the accessors over
//! converting at call sites.

use std::time::Duration;

use chrono::TimeDelta;

/// Global configuration for the notification engine.
///
/// ## Field semantics
/// - `tick`: ticker period; must be short relative to `prestart_window` so the
///   pre-start band is observed at least once per event
/// - `prestart_window`: how far before its scheduled time an event triggers
///   the single advance warning
/// - `overlap_window`: two pending events closer together than this are
///   considered conflicting
/// - `bus_capacity`: notification bus ring buffer size (min 1; clamped)
/// - `grace`: maximum wait for observer workers to drain on shutdown
#[derive(Clone, Debug)]
pub struct EngineConfig {
    /// Ticker period between schedule re-evaluations.
    pub tick: Duration,

    /// Advance-warning band before an event's scheduled time.
    pub prestart_window: Duration,

    /// Threshold under which two scheduled times are considered conflicting.
    pub overlap_window: Duration,

    /// Capacity of the notification bus broadcast channel ring buffer.
    ///
    /// Slow internal receivers that lag behind more than `bus_capacity`
    /// messages skip older items. Minimum value is 1 (enforced by the bus).
    pub bus_capacity: usize,

    /// Maximum time to wait for observer workers to drain during shutdown.
    pub grace: Duration,
}

impl EngineConfig {
    /// Returns the pre-start window as a signed delta for wall-clock math.
    #[inline]
    pub fn prestart(&self) -> TimeDelta {
        TimeDelta::from_std(self.prestart_window).unwrap_or(TimeDelta::MAX)
    }

    /// Returns the overlap window as a signed delta for wall-clock math.
    #[inline]
    pub fn overlap(&self) -> TimeDelta {
        TimeDelta::from_std(self.overlap_window).unwrap_or(TimeDelta::MAX)
    }

    /// Returns a bus capacity clamped to a minimum of 1.
    #[inline]
    pub fn bus_capacity_clamped(&self) -> usize {
        self.bus_capacity.max(1)
    }
}

impl Default for EngineConfig {
    /// Default configuration:
    ///
    /// - `tick = 60s` (bounds worst-case notification latency)
    /// - `prestart_window = 5min`
    /// - `overlap_window = 30min`
    /// - `bus_capacity = 1024`
    /// - `grace = 30s`
    fn default() -> Self {
        Self {
            tick: Duration::from_secs(60),
            prestart_window: Duration::from_secs(5 * 60),
            overlap_window: Duration::from_secs(30 * 60),
            bus_capacity: 1024,
            grace: Duration::from_secs(30),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_accessors_match_fields() {
        let cfg = EngineConfig::default();
        assert_eq!(cfg.prestart(), TimeDelta::minutes(5));
        assert_eq!(cfg.overlap(), TimeDelta::minutes(30));
    }

    #[test]
    fn bus_capacity_is_clamped() {
        let cfg = EngineConfig {
            bus_capacity: 0,
            ..EngineConfig::default()
        };
        assert_eq!(cfg.bus_capacity_clamped(), 1);
    }
}
