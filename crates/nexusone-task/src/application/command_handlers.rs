//! Command handlers for the Task context.
//!
//! Completion persists the status change first and then announces it to the
//! aggregation core; publication failures are logged, not returned.

use nexusone_core::clock::Clock;
use nexusone_core::error::DomainError;
use nexusone_core::event::DomainEvent;
use nexusone_core::publisher::EventPublisher;
use tracing::{info, warn};

use crate::domain::commands::{CompleteTask, CreateTask};
use crate::domain::repository::TaskRepository;
use crate::domain::task::{NewTask, Task};

/// Handles the `CreateTask` command: persists a new pending task.
///
/// # Errors
///
/// Returns `DomainError` if the task cannot be persisted.
pub async fn handle_create_task(
    command: &CreateTask,
    repo: &dyn TaskRepository,
) -> Result<Task, DomainError> {
    let task = repo
        .insert(NewTask {
            user_id: command.user_id,
            title: command.title.clone(),
            description: command.description.clone(),
            priority: command.priority,
        })
        .await?;

    info!(
        task_id = %task.id,
        user_id = %task.user_id,
        correlation_id = %command.correlation_id,
        "task created"
    );
    Ok(task)
}

/// Handles the `CompleteTask` command: marks the task completed, persists
/// it, and publishes `TaskCompleted`.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if the task does not exist,
/// `DomainError::Validation` if it is already completed, or the repository's
/// error if the transition cannot be persisted.
pub async fn handle_complete_task(
    command: &CompleteTask,
    clock: &dyn Clock,
    repo: &dyn TaskRepository,
    publisher: &dyn EventPublisher,
) -> Result<Task, DomainError> {
    // The repository performs the status check and the write atomically, so
    // concurrent completions of one task publish a single event.
    let task = repo.complete(command.task_id).await?;

    info!(
        task_id = %task.id,
        user_id = %task.user_id,
        correlation_id = %command.correlation_id,
        "task completed"
    );

    let event = DomainEvent::task_completed(task.user_id, task.id, command.correlation_id, clock);
    if let Err(err) = publisher.publish(event).await {
        warn!(
            task_id = %task.id,
            error = %err,
            "failed to publish task completion; dashboard metrics will lag"
        );
    }

    Ok(task)
}
