//! Aggregation engine for the Analytics context.
//!
//! Subscribes to finance and task events and folds each one into the
//! affected user's cached metrics snapshot with a read-modify-write against
//! the [`MetricsStore`]. The bus delivers all events for a user on one lane,
//! which is what serializes the read-modify-write per user.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use nexusone_core::error::DomainError;
use nexusone_core::event::{DomainEvent, DomainEventKind, EventType, TaskCompleted, TransactionRecorded};
use nexusone_core::ids::UserId;
use nexusone_core::metrics::MetricsSnapshot;
use nexusone_core::store::MetricsStore;
use nexusone_event_bus::{EventBus, EventBusError, EventHandler};
use tracing::debug;

use crate::domain::rules;

/// Name under which the engine is subscribed.
pub const AGGREGATION_HANDLER_NAME: &str = "analytics.aggregation";

/// Folds domain events into per-user metrics snapshots.
pub struct AggregationEngine {
    store: Arc<dyn MetricsStore>,
    ttl: Duration,
}

impl AggregationEngine {
    /// Creates an engine writing snapshots to `store` with the given TTL.
    #[must_use]
    pub fn new(store: Arc<dyn MetricsStore>, ttl: Duration) -> Self {
        Self { store, ttl }
    }

    /// Subscribes this engine to every event type it aggregates.
    ///
    /// # Errors
    ///
    /// Returns `EventBusError::Sealed` if the bus wiring is already frozen.
    pub fn register(self: &Arc<Self>, bus: &EventBus) -> Result<(), EventBusError> {
        for event_type in EventType::ALL {
            bus.subscribe(event_type, Arc::clone(self) as Arc<dyn EventHandler>)?;
        }
        Ok(())
    }

    /// Applies a recorded transaction to its user's snapshot.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::StoreUnavailable` if the store cannot be read or
    /// written, or `DomainError::Validation` if a total would overflow.
    /// Nothing is retried.
    pub async fn on_transaction_recorded(
        &self,
        event: &TransactionRecorded,
    ) -> Result<MetricsSnapshot, DomainError> {
        let kind = DomainEventKind::TransactionRecorded(event.clone());
        self.read_modify_write(event.user_id, &kind).await
    }

    /// Applies a task completion to its user's snapshot.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::StoreUnavailable` if the store cannot be read or
    /// written. Nothing is retried.
    pub async fn on_task_completed(
        &self,
        event: &TaskCompleted,
    ) -> Result<MetricsSnapshot, DomainError> {
        let kind = DomainEventKind::TaskCompleted(event.clone());
        self.read_modify_write(event.user_id, &kind).await
    }

    async fn read_modify_write(
        &self,
        user_id: UserId,
        kind: &DomainEventKind,
    ) -> Result<MetricsSnapshot, DomainError> {
        let mut snapshot = self
            .store
            .get(user_id)
            .await
            .map_err(store_unavailable)?
            .unwrap_or_else(|| MetricsSnapshot::zero(user_id));

        // An overflowing total is rejected before anything is written back.
        rules::apply(&mut snapshot, kind)?;

        self.store
            .put(user_id, snapshot.clone(), self.ttl)
            .await
            .map_err(store_unavailable)?;

        debug!(
            %user_id,
            total_income = %snapshot.total_income,
            total_expense = %snapshot.total_expense,
            completed_task_count = snapshot.completed_task_count,
            "metrics snapshot updated"
        );
        Ok(snapshot)
    }
}

impl std::fmt::Debug for AggregationEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AggregationEngine")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl EventHandler for AggregationEngine {
    fn name(&self) -> &str {
        AGGREGATION_HANDLER_NAME
    }

    async fn handle(&self, event: &DomainEvent) -> Result<(), DomainError> {
        match &event.kind {
            DomainEventKind::TransactionRecorded(payload) => {
                self.on_transaction_recorded(payload).await?;
            }
            DomainEventKind::TaskCompleted(payload) => {
                self.on_task_completed(payload).await?;
            }
        }
        Ok(())
    }
}

fn store_unavailable(err: DomainError) -> DomainError {
    match err {
        DomainError::StoreUnavailable(_) => err,
        other => DomainError::StoreUnavailable(other.to_string()),
    }
}
