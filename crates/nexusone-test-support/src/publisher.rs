//! Test publishers: mock `EventPublisher` implementations for tests.

use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use nexusone_core::error::DomainError;
use nexusone_core::event::DomainEvent;
use nexusone_core::publisher::EventPublisher;

/// A publisher that records every event it is given and always succeeds.
#[derive(Debug, Default)]
pub struct RecordingPublisher {
    published: Mutex<Vec<DomainEvent>>,
}

impl RecordingPublisher {
    /// Returns a snapshot of all events that were published.
    pub fn published_events(&self) -> Vec<DomainEvent> {
        self.published
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl EventPublisher for RecordingPublisher {
    async fn publish(&self, event: DomainEvent) -> Result<(), DomainError> {
        self.published
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
        Ok(())
    }
}

/// A publisher that rejects every event, as a shut-down bus would.
#[derive(Debug)]
pub struct FailingPublisher;

#[async_trait]
impl EventPublisher for FailingPublisher {
    async fn publish(&self, _event: DomainEvent) -> Result<(), DomainError> {
        Err(DomainError::Infrastructure("event bus has been shut down".into()))
    }
}
