//! Event bus error types.

use nexusone_core::error::DomainError;
use thiserror::Error;

/// Errors returned to callers of the bus.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EventBusError {
    /// A subscription was attempted after start-up wiring was frozen.
    #[error("event bus is sealed; subscriptions must be registered at start-up")]
    Sealed,

    /// The bus has been shut down and no longer accepts events.
    #[error("event bus has been shut down")]
    Closed,
}

/// Why a single handler invocation failed. Failures are logged and counted
/// by the bus, never propagated to the publisher.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HandlerFailure {
    /// The handler returned an error.
    #[error("handler returned an error: {0}")]
    Error(#[from] DomainError),

    /// The handler panicked.
    #[error("handler panicked: {0}")]
    Panic(String),
}
