//! Test handlers: `EventHandler` implementations for bus wiring tests.

use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use nexusone_core::error::DomainError;
use nexusone_core::event::DomainEvent;
use nexusone_event_bus::EventHandler;

/// A handler that records every event it receives.
#[derive(Debug, Default)]
pub struct RecordingHandler {
    received: Mutex<Vec<DomainEvent>>,
}

impl RecordingHandler {
    /// Returns a snapshot of all events received so far.
    pub fn received_events(&self) -> Vec<DomainEvent> {
        self.received
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl EventHandler for RecordingHandler {
    fn name(&self) -> &str {
        "recording"
    }

    async fn handle(&self, event: &DomainEvent) -> Result<(), DomainError> {
        self.received
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event.clone());
        Ok(())
    }
}

/// A handler that panics on every event.
#[derive(Debug)]
pub struct PanickingHandler;

#[async_trait]
impl EventHandler for PanickingHandler {
    fn name(&self) -> &str {
        "panicking"
    }

    async fn handle(&self, event: &DomainEvent) -> Result<(), DomainError> {
        panic!("panicking handler received {}", event.event_type());
    }
}
