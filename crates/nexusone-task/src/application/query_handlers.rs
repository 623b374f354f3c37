//! Query handlers for the Task context.

use nexusone_core::error::DomainError;
use nexusone_core::ids::{TaskId, UserId};
use serde::Serialize;

use crate::domain::repository::TaskRepository;
use crate::domain::task::{TaskPriority, TaskStatus};

/// Read-only view of a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskView {
    /// The task identifier.
    pub id: TaskId,
    /// Short title.
    pub title: String,
    /// Optional longer description.
    pub description: Option<String>,
    /// Priority.
    pub priority: TaskPriority,
    /// Current status.
    pub status: TaskStatus,
}

/// Lists the tasks owned by `user_id`, oldest first.
///
/// # Errors
///
/// Returns `DomainError` if the repository cannot be read.
pub async fn list_tasks_for_user(
    user_id: UserId,
    repo: &dyn TaskRepository,
) -> Result<Vec<TaskView>, DomainError> {
    let tasks = repo.find_by_user(user_id).await?;
    Ok(tasks
        .into_iter()
        .map(|task| TaskView {
            id: task.id,
            title: task.title,
            description: task.description,
            priority: task.priority,
            status: task.status,
        })
        .collect())
}
