//! Task repository abstraction.

use async_trait::async_trait;
use nexusone_core::error::DomainError;
use nexusone_core::ids::{TaskId, UserId};

use super::task::{NewTask, Task};

/// Durable store of tasks.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Persists a new task in `Pending` state and returns it with its
    /// assigned identifier.
    async fn insert(&self, task: NewTask) -> Result<Task, DomainError>;

    /// Loads a task by identifier.
    async fn find_by_id(&self, task_id: TaskId) -> Result<Option<Task>, DomainError>;

    /// Moves a task from `Pending` to `Completed` in one atomic step and
    /// returns the completed task. Of several concurrent calls for one task
    /// exactly one succeeds.
    ///
    /// Returns `DomainError::NotFound` if no task has `task_id` and
    /// `DomainError::Validation` if it is already completed.
    async fn complete(&self, task_id: TaskId) -> Result<Task, DomainError>;

    /// Overwrites an existing task.
    ///
    /// Returns `DomainError::NotFound` if no task has `task.id`.
    async fn update(&self, task: &Task) -> Result<(), DomainError>;

    /// Returns all tasks of `user_id` in creation order.
    async fn find_by_user(&self, user_id: UserId) -> Result<Vec<Task>, DomainError>;
}
