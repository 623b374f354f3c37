//! Event handler trait.

use async_trait::async_trait;
use nexusone_core::error::DomainError;
use nexusone_core::event::DomainEvent;

/// A subscriber invoked for every event of the types it is registered for.
#[async_trait]
pub trait EventHandler: Send + Sync {
    /// Handler name used in logs.
    fn name(&self) -> &str;

    /// Handles one event.
    ///
    /// # Errors
    ///
    /// Any error is logged by the bus and isolated from other handlers.
    async fn handle(&self, event: &DomainEvent) -> Result<(), DomainError>;
}
