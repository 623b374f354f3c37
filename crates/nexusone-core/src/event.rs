//! Domain events consumed by the aggregation core.
//!
//! Events are immutable once constructed. Producers build them with
//! [`DomainEvent::transaction_recorded`] or [`DomainEvent::task_completed`];
//! subscribers receive them by reference.

use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::clock::Clock;
use crate::ids::{TaskId, UserId};

/// Type name of the `TransactionRecorded` event.
pub const TRANSACTION_RECORDED_EVENT_TYPE: &str = "finance.transaction_recorded";

/// Type name of the `TaskCompleted` event.
pub const TASK_COMPLETED_EVENT_TYPE: &str = "task.task_completed";

/// Metadata attached to every domain event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventMetadata {
    /// Unique event identifier.
    pub event_id: Uuid,
    /// Correlation ID for tracing a command through its effects.
    pub correlation_id: Uuid,
    /// Timestamp of event creation.
    pub occurred_at: DateTime<Utc>,
}

impl EventMetadata {
    /// Creates metadata with a fresh event id, stamped by `clock`.
    #[must_use]
    pub fn new(correlation_id: Uuid, clock: &dyn Clock) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            correlation_id,
            occurred_at: clock.now(),
        }
    }
}

/// Emitted when a financial transaction has been recorded for a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecorded {
    /// The user the transaction belongs to.
    pub user_id: UserId,
    /// Positive for income, negative for expense.
    pub signed_amount: Decimal,
}

/// Emitted when a task has been marked completed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskCompleted {
    /// The user who owns the task.
    pub user_id: UserId,
    /// The completed task.
    pub task_id: TaskId,
}

/// Event payload variants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DomainEventKind {
    /// A transaction has been recorded.
    TransactionRecorded(TransactionRecorded),
    /// A task has been completed.
    TaskCompleted(TaskCompleted),
}

/// Discriminant used to route events to subscribers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventType {
    /// Routes [`TransactionRecorded`] events.
    TransactionRecorded,
    /// Routes [`TaskCompleted`] events.
    TaskCompleted,
}

impl EventType {
    /// Every event type, in declaration order.
    pub const ALL: [EventType; 2] = [EventType::TransactionRecorded, EventType::TaskCompleted];

    /// Returns the dotted type name used in logs.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            EventType::TransactionRecorded => TRANSACTION_RECORDED_EVENT_TYPE,
            EventType::TaskCompleted => TASK_COMPLETED_EVENT_TYPE,
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Domain event envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainEvent {
    /// Event metadata.
    pub metadata: EventMetadata,
    /// Event-specific payload.
    pub kind: DomainEventKind,
}

impl DomainEvent {
    /// Builds a `TransactionRecorded` event.
    #[must_use]
    pub fn transaction_recorded(
        user_id: UserId,
        signed_amount: Decimal,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> Self {
        Self {
            metadata: EventMetadata::new(correlation_id, clock),
            kind: DomainEventKind::TransactionRecorded(TransactionRecorded {
                user_id,
                signed_amount,
            }),
        }
    }

    /// Builds a `TaskCompleted` event.
    #[must_use]
    pub fn task_completed(
        user_id: UserId,
        task_id: TaskId,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> Self {
        Self {
            metadata: EventMetadata::new(correlation_id, clock),
            kind: DomainEventKind::TaskCompleted(TaskCompleted { user_id, task_id }),
        }
    }

    /// Returns the routing discriminant for this event.
    #[must_use]
    pub fn event_type(&self) -> EventType {
        match &self.kind {
            DomainEventKind::TransactionRecorded(_) => EventType::TransactionRecorded,
            DomainEventKind::TaskCompleted(_) => EventType::TaskCompleted,
        }
    }

    /// Returns the user whose metrics this event affects.
    #[must_use]
    pub fn user_id(&self) -> UserId {
        match &self.kind {
            DomainEventKind::TransactionRecorded(payload) => payload.user_id,
            DomainEventKind::TaskCompleted(payload) => payload.user_id,
        }
    }
}
