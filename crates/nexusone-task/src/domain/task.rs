//! Task entity for the Task context.

use nexusone_core::error::DomainError;
use nexusone_core::ids::{TaskId, UserId};
use serde::{Deserialize, Serialize};

/// Relative importance of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskPriority {
    /// Can wait.
    Low,
    /// Normal priority.
    #[default]
    Medium,
    /// Do first.
    High,
}

/// Lifecycle state of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    /// Created, not yet done.
    Pending,
    /// Done.
    Completed,
}

/// A task that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    /// The owning user.
    pub user_id: UserId,
    /// Short title.
    pub title: String,
    /// Optional longer description.
    pub description: Option<String>,
    /// Priority.
    pub priority: TaskPriority,
}

/// A persisted task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Repository-assigned identifier.
    pub id: TaskId,
    /// The owning user.
    pub user_id: UserId,
    /// Short title.
    pub title: String,
    /// Optional longer description.
    pub description: Option<String>,
    /// Priority.
    pub priority: TaskPriority,
    /// Current status.
    pub status: TaskStatus,
}

impl Task {
    /// Marks the task completed.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the task is already completed.
    pub fn complete(&mut self) -> Result<(), DomainError> {
        if self.status == TaskStatus::Completed {
            return Err(DomainError::Validation(format!(
                "task {} is already completed",
                self.id
            )));
        }
        self.status = TaskStatus::Completed;
        Ok(())
    }
}
