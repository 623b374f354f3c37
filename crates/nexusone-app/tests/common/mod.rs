//! Shared helpers for application integration tests.
#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, TimeZone, Utc};
use nexusone_app::config::AppConfig;
use nexusone_app::state::AppState;
use nexusone_core::clock::Clock;
use nexusone_test_support::{FixedClock, ManualClock};

/// Fixed start time used across all integration tests.
pub fn start_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap()
}

/// Small configuration so tests exercise lane sharing between users.
pub fn test_config() -> AppConfig {
    AppConfig {
        metrics_ttl: Duration::from_secs(300),
        lanes: 4,
        lane_capacity: 64,
        sweep_interval: Duration::from_secs(60),
    }
}

/// Builds the full application state on a fixed clock.
pub fn build_state() -> AppState {
    AppState::bootstrap(&test_config(), Arc::new(FixedClock(start_time()))).unwrap()
}

/// Builds the full application state on a clock the test can move.
pub fn build_state_with_clock() -> (AppState, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new(start_time()));
    let state = AppState::bootstrap(&test_config(), Arc::clone(&clock) as Arc<dyn Clock>).unwrap();
    (state, clock)
}
