//! Repository port for task persistence, windowed lookup, and completion.

use crate::task::domain::{DueWindow, NewTask, Task, TaskId, TaskStatus};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task persistence contract.
///
/// Implementations must be durable and linearizable per record. Each call is
/// all-or-nothing: a failed call leaves no partial write behind.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Inserts a validated task with status `pending`.
    ///
    /// The store assigns the identifier and creation timestamp and returns
    /// the stored record.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Persistence`] when the write is
    /// rejected or the backend is unavailable.
    async fn insert(&self, task: NewTask) -> TaskRepositoryResult<Task>;

    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Returns pending tasks whose `due_at` lies within `window`, bounds
    /// included, ordered ascending by `due_at` and then by id.
    async fn find_pending_due_between(&self, window: DueWindow) -> TaskRepositoryResult<Vec<Task>>;

    /// Sets the task status to `completed` and returns the status it held
    /// before the call.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist.
    async fn mark_completed(&self, id: TaskId) -> TaskRepositoryResult<TaskStatus>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// The store did not answer within the configured bound.
    #[error("store call timed out after {}ms", .0.as_millis())]
    Timeout(Duration),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
