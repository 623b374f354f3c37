//! Commands for the Task context.

use nexusone_core::ids::{TaskId, UserId};
use uuid::Uuid;

use super::task::TaskPriority;

/// Command to create a task.
#[derive(Debug, Clone)]
pub struct CreateTask {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The owning user.
    pub user_id: UserId,
    /// Short title.
    pub title: String,
    /// Optional longer description.
    pub description: Option<String>,
    /// Priority.
    pub priority: TaskPriority,
}

/// Command to mark a task completed.
#[derive(Debug, Clone)]
pub struct CompleteTask {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The task to complete.
    pub task_id: TaskId,
}
