//! In-memory `TaskRepository`.

use std::collections::BTreeMap;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use nexusone_core::error::DomainError;
use nexusone_core::ids::{TaskId, UserId};

use crate::domain::repository::TaskRepository;
use crate::domain::task::{NewTask, Task, TaskStatus};

#[derive(Debug, Default)]
struct Tasks {
    by_id: BTreeMap<TaskId, Task>,
    last_id: i64,
}

/// Process-local task store. Identifiers start at 1.
#[derive(Debug, Default)]
pub struct InMemoryTaskRepository {
    tasks: Mutex<Tasks>,
}

impl InMemoryTaskRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn insert(&self, task: NewTask) -> Result<Task, DomainError> {
        let mut tasks = self.tasks.lock().unwrap_or_else(PoisonError::into_inner);
        tasks.last_id += 1;
        let saved = Task {
            id: TaskId(tasks.last_id),
            user_id: task.user_id,
            title: task.title,
            description: task.description,
            priority: task.priority,
            status: TaskStatus::Pending,
        };
        tasks.by_id.insert(saved.id, saved.clone());
        Ok(saved)
    }

    async fn find_by_id(&self, task_id: TaskId) -> Result<Option<Task>, DomainError> {
        Ok(self
            .tasks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .by_id
            .get(&task_id)
            .cloned())
    }

    async fn complete(&self, task_id: TaskId) -> Result<Task, DomainError> {
        let mut tasks = self.tasks.lock().unwrap_or_else(PoisonError::into_inner);
        let stored = tasks.by_id.get_mut(&task_id).ok_or(DomainError::NotFound {
            entity: "task",
            id: task_id.get(),
        })?;
        stored.complete()?;
        Ok(stored.clone())
    }

    async fn update(&self, task: &Task) -> Result<(), DomainError> {
        let mut tasks = self.tasks.lock().unwrap_or_else(PoisonError::into_inner);
        match tasks.by_id.get_mut(&task.id) {
            Some(stored) => {
                *stored = task.clone();
                Ok(())
            }
            None => Err(DomainError::NotFound {
                entity: "task",
                id: task.id.get(),
            }),
        }
    }

    async fn find_by_user(&self, user_id: UserId) -> Result<Vec<Task>, DomainError> {
        Ok(self
            .tasks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .by_id
            .values()
            .filter(|task| task.user_id == user_id)
            .cloned()
            .collect())
    }
}
