//! Service configuration read from the environment.

use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

use nexusone_core::store::DEFAULT_METRICS_TTL;
use nexusone_event_bus::EventBusConfig;
use nexusone_event_bus::config::{DEFAULT_LANE_CAPACITY, DEFAULT_LANES};

use crate::error::AppError;

/// Seconds a cached metrics snapshot lives after its last update.
pub const METRICS_TTL_VAR: &str = "NEXUS_METRICS_TTL_SECS";
/// Number of per-user serialization lanes in the event bus.
pub const EVENT_LANES_VAR: &str = "NEXUS_EVENT_LANES";
/// Queue depth of each lane.
pub const LANE_CAPACITY_VAR: &str = "NEXUS_LANE_CAPACITY";
/// Seconds between expiry sweeps of the metrics cache.
pub const SWEEP_INTERVAL_VAR: &str = "NEXUS_SWEEP_INTERVAL_SECS";

const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// Runtime settings for the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Lifetime of a cached metrics snapshot.
    pub metrics_ttl: Duration,
    /// Number of event bus lanes.
    pub lanes: usize,
    /// Queue depth per lane.
    pub lane_capacity: usize,
    /// Interval of the background expiry sweep.
    pub sweep_interval: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            metrics_ttl: DEFAULT_METRICS_TTL,
            lanes: DEFAULT_LANES,
            lane_capacity: DEFAULT_LANE_CAPACITY,
            sweep_interval: DEFAULT_SWEEP_INTERVAL,
        }
    }
}

impl AppConfig {
    /// Reads the configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a variable is set but is not a positive
    /// integer.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through `lookup`, falling back to defaults
    /// for unset variables.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a variable is set but is not a positive
    /// integer.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let defaults = Self::default();
        Ok(Self {
            metrics_ttl: Duration::from_secs(positive(
                &lookup,
                METRICS_TTL_VAR,
                defaults.metrics_ttl.as_secs(),
            )?),
            lanes: positive(&lookup, EVENT_LANES_VAR, defaults.lanes)?,
            lane_capacity: positive(&lookup, LANE_CAPACITY_VAR, defaults.lane_capacity)?,
            sweep_interval: Duration::from_secs(positive(
                &lookup,
                SWEEP_INTERVAL_VAR,
                defaults.sweep_interval.as_secs(),
            )?),
        })
    }

    /// Event bus settings derived from this configuration.
    #[must_use]
    pub fn event_bus(&self) -> EventBusConfig {
        EventBusConfig::default()
            .with_lanes(self.lanes)
            .with_lane_capacity(self.lane_capacity)
    }
}

fn positive<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T, AppError>
where
    T: FromStr + PartialEq + Default,
    T::Err: Display,
{
    let Some(raw) = lookup(key) else {
        return Ok(default);
    };
    let value: T = raw
        .trim()
        .parse()
        .map_err(|e| AppError::Config(format!("{key} must be a positive integer: {e}")))?;
    if value == T::default() {
        return Err(AppError::Config(format!("{key} must be greater than zero")));
    }
    Ok(value)
}
