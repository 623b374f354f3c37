//! Event publishing abstraction used by producer contexts.

use async_trait::async_trait;

use crate::error::DomainError;
use crate::event::DomainEvent;

/// Entry point through which producers hand domain events to the
/// aggregation core.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Publishes `event` to all interested subscribers.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the event could not be
    /// accepted for dispatch (for example after shutdown).
    async fn publish(&self, event: DomainEvent) -> Result<(), DomainError>;
}
