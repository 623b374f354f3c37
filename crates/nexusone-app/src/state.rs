//! Shared application state.
//!
//! Assembles the component graph by constructor injection and exposes the
//! finance, task and dashboard operations to an embedding request layer.

use std::sync::Arc;

use nexusone_analytics::application::aggregation_engine::AggregationEngine;
use nexusone_analytics::application::query_handlers::{DashboardView, get_dashboard_metrics};
use nexusone_core::clock::Clock;
use nexusone_core::error::DomainError;
use nexusone_core::ids::{TaskId, UserId};
use nexusone_core::store::MetricsStore;
use nexusone_event_bus::{EventBus, EventBusError};
use nexusone_finance::application::command_handlers::handle_record_transaction;
use nexusone_finance::application::query_handlers::{TransactionView, list_transactions_for_user};
use nexusone_finance::domain::commands::RecordTransaction;
use nexusone_finance::domain::repository::TransactionRepository;
use nexusone_finance::domain::transaction::{Transaction, TransactionType};
use nexusone_finance::infrastructure::in_memory::InMemoryTransactionRepository;
use nexusone_metrics_cache::memory_store::InMemoryMetricsStore;
use nexusone_metrics_cache::sweeper::spawn_expiry_sweeper;
use nexusone_task::application::command_handlers::{handle_complete_task, handle_create_task};
use nexusone_task::application::query_handlers::{TaskView, list_tasks_for_user};
use nexusone_task::domain::commands::{CompleteTask, CreateTask};
use nexusone_task::domain::repository::TaskRepository;
use nexusone_task::domain::task::{Task, TaskPriority};
use nexusone_task::infrastructure::in_memory::InMemoryTaskRepository;
use rust_decimal::Decimal;
use tokio::task::JoinHandle;
use tracing::info;
use uuid::Uuid;

use crate::config::AppConfig;
use crate::error::AppError;

/// Application state shared across all callers.
#[derive(Clone)]
pub struct AppState {
    /// Clock for event timestamps and cache deadlines.
    pub clock: Arc<dyn Clock>,
    /// TTL-bounded metrics cache.
    pub metrics_store: Arc<InMemoryMetricsStore>,
    /// In-process event bus.
    pub event_bus: Arc<EventBus>,
    /// Aggregation engine subscribed to the bus.
    pub engine: Arc<AggregationEngine>,
    /// Finance transaction repository.
    pub transactions: Arc<dyn TransactionRepository>,
    /// Task repository.
    pub tasks: Arc<dyn TaskRepository>,
    config: AppConfig,
}

impl AppState {
    /// Builds the component graph and subscribes the aggregation engine.
    ///
    /// The bus is left open for further subscriptions; it seals on the first
    /// publish or on an explicit [`EventBus::seal`].
    ///
    /// # Errors
    ///
    /// Returns `AppError::Bus` if the engine cannot be subscribed.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    pub fn bootstrap(config: &AppConfig, clock: Arc<dyn Clock>) -> Result<Self, AppError> {
        let metrics_store = Arc::new(InMemoryMetricsStore::new(Arc::clone(&clock)));
        let event_bus = Arc::new(EventBus::new(config.event_bus()));
        let engine = Arc::new(AggregationEngine::new(
            Arc::clone(&metrics_store) as Arc<dyn MetricsStore>,
            config.metrics_ttl,
        ));
        engine.register(&event_bus)?;

        info!(
            lanes = event_bus.lane_count(),
            metrics_ttl_secs = config.metrics_ttl.as_secs(),
            "application state assembled"
        );

        Ok(Self {
            clock,
            metrics_store,
            event_bus,
            engine,
            transactions: Arc::new(InMemoryTransactionRepository::new()),
            tasks: Arc::new(InMemoryTaskRepository::new()),
            config: config.clone(),
        })
    }

    /// Starts the background expiry sweep of the metrics cache.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    #[must_use]
    pub fn spawn_sweeper(&self) -> JoinHandle<()> {
        spawn_expiry_sweeper(Arc::clone(&self.metrics_store), self.config.sweep_interval)
    }

    /// Records an income or expense for `user_id`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError` if the transaction cannot be persisted.
    pub async fn record_transaction(
        &self,
        user_id: UserId,
        amount: Decimal,
        transaction_type: TransactionType,
    ) -> Result<Transaction, DomainError> {
        let command = RecordTransaction {
            correlation_id: Uuid::new_v4(),
            user_id,
            amount,
            transaction_type,
        };
        handle_record_transaction(
            &command,
            self.clock.as_ref(),
            self.transactions.as_ref(),
            self.event_bus.as_ref(),
        )
        .await
    }

    /// Creates a pending task for `user_id`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError` if the task cannot be persisted.
    pub async fn create_task(
        &self,
        user_id: UserId,
        title: impl Into<String>,
        description: Option<String>,
        priority: TaskPriority,
    ) -> Result<Task, DomainError> {
        let command = CreateTask {
            correlation_id: Uuid::new_v4(),
            user_id,
            title: title.into(),
            description,
            priority,
        };
        handle_create_task(&command, self.tasks.as_ref()).await
    }

    /// Marks `task_id` completed.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::NotFound` for an unknown task and
    /// `DomainError::Validation` for a task that is already completed.
    pub async fn complete_task(&self, task_id: TaskId) -> Result<Task, DomainError> {
        let command = CompleteTask {
            correlation_id: Uuid::new_v4(),
            task_id,
        };
        handle_complete_task(
            &command,
            self.clock.as_ref(),
            self.tasks.as_ref(),
            self.event_bus.as_ref(),
        )
        .await
    }

    /// Returns the dashboard metrics of `user_id`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::StoreUnavailable` if the cache cannot be read.
    pub async fn dashboard(&self, user_id: UserId) -> Result<DashboardView, DomainError> {
        get_dashboard_metrics(user_id, self.metrics_store.as_ref()).await
    }

    /// Lists the transactions of `user_id`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError` if the repository cannot be read.
    pub async fn list_transactions(
        &self,
        user_id: UserId,
    ) -> Result<Vec<TransactionView>, DomainError> {
        list_transactions_for_user(user_id, self.transactions.as_ref()).await
    }

    /// Lists the tasks of `user_id`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError` if the repository cannot be read.
    pub async fn list_tasks(&self, user_id: UserId) -> Result<Vec<TaskView>, DomainError> {
        list_tasks_for_user(user_id, self.tasks.as_ref()).await
    }

    /// Waits until every event published so far has been aggregated.
    ///
    /// # Errors
    ///
    /// Returns `EventBusError::Closed` after [`AppState::shutdown`].
    pub async fn flush(&self) -> Result<(), EventBusError> {
        self.event_bus.flush().await
    }

    /// Drains the event bus and stops its workers.
    pub async fn shutdown(&self) {
        self.event_bus.shutdown().await;
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("metrics_store", &self.metrics_store)
            .field("event_bus", &self.event_bus)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
