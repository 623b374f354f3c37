//! NexusOne application library.
//!
//! Wires the finance, task and analytics contexts around the event bus and
//! the metrics cache. The `nexusone-app` binary and the integration tests
//! both build on [`state::AppState`].

pub mod config;
pub mod error;
pub mod state;
pub mod telemetry;
