//! NexusOne: application error types.

use nexusone_event_bus::EventBusError;
use thiserror::Error;

/// Startup and runtime errors for the service.
#[derive(Debug, Error)]
pub enum AppError {
    /// A configuration variable is missing or invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// The event bus rejected a wiring or lifecycle operation.
    #[error("event bus error: {0}")]
    Bus(#[from] EventBusError),

    /// Signal handling or other I/O error.
    #[error("server error: {0}")]
    Server(#[from] std::io::Error),
}
