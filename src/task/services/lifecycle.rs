//! Service layer for task creation, due-today retrieval, and completion.

use crate::task::{
    domain::{DueWindow, NewTask, Task, TaskDomainError, TaskId, TaskStatus},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use chrono::{DateTime, FixedOffset, Offset, Utc};
use mockable::Clock;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Upper bound on a single store call unless configured otherwise.
pub const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_secs(5);

/// Raw request payload for creating a task.
///
/// Fields are kept as optional strings so that absent and empty values are
/// both reported as missing by validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateTaskRequest {
    application_id: Option<String>,
    task_type: Option<String>,
    due_at: Option<String>,
}

impl CreateTaskRequest {
    /// Creates a request with every field present.
    #[must_use]
    pub fn new(
        application_id: impl Into<String>,
        task_type: impl Into<String>,
        due_at: impl Into<String>,
    ) -> Self {
        Self {
            application_id: Some(application_id.into()),
            task_type: Some(task_type.into()),
            due_at: Some(due_at.into()),
        }
    }

    /// Creates a request from fields that may be absent.
    #[must_use]
    pub const fn from_parts(
        application_id: Option<String>,
        task_type: Option<String>,
        due_at: Option<String>,
    ) -> Self {
        Self {
            application_id,
            task_type,
            due_at,
        }
    }

    /// Returns the raw application identifier.
    #[must_use]
    pub fn application_id(&self) -> Option<&str> {
        self.application_id.as_deref()
    }

    /// Returns the raw task type.
    #[must_use]
    pub fn task_type(&self) -> Option<&str> {
        self.task_type.as_deref()
    }

    /// Returns the raw due timestamp.
    #[must_use]
    pub fn due_at(&self) -> Option<&str> {
        self.due_at.as_deref()
    }
}

/// Outcome of a completion call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Completion {
    task_id: TaskId,
    previous_status: TaskStatus,
}

impl Completion {
    /// Returns the completed task's identifier.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns whether the task was already completed before this call.
    ///
    /// When `true` the call changed nothing.
    #[must_use]
    pub const fn already_completed(&self) -> bool {
        self.previous_status.is_completed()
    }
}

/// Service-level errors for task lifecycle operations.
#[derive(Debug, Error)]
pub enum TaskLifecycleError {
    /// Caller input failed validation. Nothing was written.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// The task does not exist.
    #[error("task not found: {0}")]
    NotFound(TaskId),
    /// The store was unavailable, rejected the call, or timed out.
    #[error(transparent)]
    StorageFailure(TaskRepositoryError),
}

impl From<TaskRepositoryError> for TaskLifecycleError {
    fn from(err: TaskRepositoryError) -> Self {
        match err {
            TaskRepositoryError::NotFound(id) => Self::NotFound(id),
            other => Self::StorageFailure(other),
        }
    }
}

/// Result type for task lifecycle service operations.
pub type TaskLifecycleResult<T> = Result<T, TaskLifecycleError>;

/// Task lifecycle orchestration service.
#[derive(Clone)]
pub struct TaskLifecycleService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
    day_offset: FixedOffset,
    store_timeout: Duration,
}

impl<R, C> TaskLifecycleService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a service measuring calendar days in UTC with the default
    /// store timeout.
    #[must_use]
    pub fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self {
            repository,
            clock,
            day_offset: Utc.fix(),
            store_timeout: DEFAULT_STORE_TIMEOUT,
        }
    }

    /// Sets the fixed UTC offset in which due-today day boundaries fall.
    #[must_use]
    pub const fn with_day_offset(mut self, offset: FixedOffset) -> Self {
        self.day_offset = offset;
        self
    }

    /// Sets the upper bound applied to every store call.
    #[must_use]
    pub const fn with_store_timeout(mut self, timeout: Duration) -> Self {
        self.store_timeout = timeout;
        self
    }

    /// Returns the offset used for day boundaries.
    #[must_use]
    pub const fn day_offset(&self) -> FixedOffset {
        self.day_offset
    }

    /// Validates and persists a new pending task.
    ///
    /// "Now" is read once from the clock and used for the due-date check.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Domain`] when validation fails (no store
    /// call is made) or [`TaskLifecycleError::StorageFailure`] when the store
    /// rejects the write or times out.
    pub async fn create_task(&self, request: CreateTaskRequest) -> TaskLifecycleResult<Task> {
        let now = self.clock.utc();
        let new_task = NewTask::validate(
            request.application_id(),
            request.task_type(),
            request.due_at(),
            now,
        )
        .inspect_err(|err| tracing::warn!(error = %err, "rejected task creation"))?;

        let task = self
            .bounded(self.repository.insert(new_task))
            .await
            .inspect_err(|err| tracing::error!(error = %err, "failed to store task"))?;

        tracing::info!(
            task_id = %task.id(),
            application_id = %task.application_id(),
            task_type = %task.task_type(),
            due_at = %task.due_at(),
            "created task"
        );
        Ok(task)
    }

    /// Returns pending tasks due on the calendar day containing `reference`,
    /// ordered ascending by due time.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::StorageFailure`] when the store lookup
    /// fails. An empty day is `Ok` with no tasks.
    pub async fn tasks_due_on(&self, reference: DateTime<Utc>) -> TaskLifecycleResult<Vec<Task>> {
        let window = DueWindow::containing(reference, self.day_offset)?;
        let tasks = self
            .bounded(self.repository.find_pending_due_between(window))
            .await
            .inspect_err(|err| tracing::error!(error = %err, "failed to load due tasks"))?;
        tracing::debug!(
            start = %window.start(),
            end = %window.end(),
            count = tasks.len(),
            "loaded due tasks"
        );
        Ok(tasks)
    }

    /// Returns pending tasks due today according to the service clock.
    ///
    /// # Errors
    ///
    /// See [`TaskLifecycleService::tasks_due_on`].
    pub async fn tasks_due_today(&self) -> TaskLifecycleResult<Vec<Task>> {
        self.tasks_due_on(self.clock.utc()).await
    }

    /// Marks a task completed.
    ///
    /// Completing an already completed task succeeds without change; the
    /// returned [`Completion`] reports which case occurred.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] for an unknown identifier or
    /// [`TaskLifecycleError::StorageFailure`] when the store call fails.
    pub async fn complete_task(&self, id: TaskId) -> TaskLifecycleResult<Completion> {
        let previous_status = self
            .bounded(self.repository.mark_completed(id))
            .await
            .inspect_err(|err| match err {
                TaskRepositoryError::NotFound(_) => {
                    tracing::warn!(task_id = %id, "completion requested for unknown task");
                }
                _ => tracing::error!(task_id = %id, error = %err, "failed to complete task"),
            })?;

        let completion = Completion {
            task_id: id,
            previous_status,
        };
        tracing::info!(
            task_id = %id,
            already_completed = completion.already_completed(),
            "completed task"
        );
        Ok(completion)
    }

    /// Retrieves a task by identifier.
    ///
    /// Returns `Ok(None)` when no such task exists.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::StorageFailure`] when the lookup fails.
    pub async fn find_by_id(&self, id: TaskId) -> TaskLifecycleResult<Option<Task>> {
        let result: TaskRepositoryResult<Option<Task>> =
            self.bounded(self.repository.find_by_id(id)).await;
        Ok(result?)
    }

    async fn bounded<T>(
        &self,
        call: impl Future<Output = TaskRepositoryResult<T>>,
    ) -> TaskRepositoryResult<T> {
        tokio::time::timeout(self.store_timeout, call)
            .await
            .map_err(|_elapsed| TaskRepositoryError::Timeout(self.store_timeout))?
    }
}
