//! Clock abstraction for determinism.
//!
//! Event timestamps and cache expiry deadlines are both derived from an
//! injected clock so tests can pin or advance time explicitly.

use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};

/// Abstraction over system time for deterministic behavior.
pub trait Clock: Send + Sync {
    /// Returns the current time.
    fn now(&self) -> DateTime<Utc>;

    /// Returns the instant `ttl` from now, saturating at the maximum
    /// representable timestamp.
    fn deadline_after(&self, ttl: Duration) -> DateTime<Utc> {
        let now = self.now();
        TimeDelta::from_std(ttl)
            .ok()
            .and_then(|delta| now.checked_add_signed(delta))
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }
}

/// Production clock that delegates to the system clock.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
