//! Task record, its closed enumerations, and creation validation.

use super::{ApplicationId, ParseTaskStatusError, TaskDomainError, TaskId, parse_due_at};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of follow-up work a task represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskType {
    /// Phone call with the applicant or employer.
    Call,
    /// Email follow-up.
    Email,
    /// Review of application material.
    Review,
}

impl TaskType {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Call => "call",
            Self::Email => "email",
            Self::Review => "review",
        }
    }
}

impl TryFrom<&str> for TaskType {
    type Error = TaskDomainError;

    /// Matching is exact: `"Call"` and `" call"` are rejected.
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "call" => Ok(Self::Call),
            "email" => Ok(Self::Email),
            "review" => Ok(Self::Review),
            _ => Err(TaskDomainError::InvalidEnum(value.to_owned())),
        }
    }
}

impl fmt::Display for TaskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Two-state task lifecycle. The only transition is `Pending → Completed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Work is outstanding.
    Pending,
    /// Work is done. Terminal.
    Completed,
}

impl TaskStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
        }
    }

    /// Returns whether the status is terminal.
    #[must_use]
    pub const fn is_completed(self) -> bool {
        matches!(self, Self::Completed)
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "pending" => Ok(Self::Pending),
            "completed" => Ok(Self::Completed),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validated input for a task that has not been stored yet.
///
/// A `NewTask` can only be obtained through [`NewTask::validate`], so holding
/// one proves the creation checks passed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    application_id: ApplicationId,
    task_type: TaskType,
    due_at: DateTime<Utc>,
    requested_at: DateTime<Utc>,
}

impl NewTask {
    /// Validates raw creation input against `now`.
    ///
    /// Checks run in a fixed order and the first failure is returned:
    /// required fields, task type, timestamp format, then due date.
    ///
    /// # Errors
    ///
    /// - [`TaskDomainError::MissingField`] when any field is absent or empty
    /// - [`TaskDomainError::InvalidEnum`] for an unknown task type
    /// - [`TaskDomainError::InvalidTimestamp`] when `due_at` does not parse
    /// - [`TaskDomainError::PastDueDate`] when `due_at` is not after `now`
    pub fn validate(
        application_id: Option<&str>,
        task_type: Option<&str>,
        due_at: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<Self, TaskDomainError> {
        let raw_application_id = required(application_id, "application_id")?;
        let raw_task_type = required(task_type, "task_type")?;
        let raw_due_at = required(due_at, "due_at")?;

        let parsed_type = TaskType::try_from(raw_task_type)?;
        let parsed_due_at = parse_due_at(raw_due_at)?;
        if parsed_due_at <= now {
            return Err(TaskDomainError::PastDueDate {
                due_at: parsed_due_at,
                now,
            });
        }

        Ok(Self {
            application_id: ApplicationId::new(raw_application_id)?,
            task_type: parsed_type,
            due_at: parsed_due_at,
            requested_at: now,
        })
    }

    /// Returns the referenced application.
    #[must_use]
    pub const fn application_id(&self) -> &ApplicationId {
        &self.application_id
    }

    /// Returns the task type.
    #[must_use]
    pub const fn task_type(&self) -> TaskType {
        self.task_type
    }

    /// Returns the due instant.
    #[must_use]
    pub const fn due_at(&self) -> DateTime<Utc> {
        self.due_at
    }

    /// Returns the instant validation ran against, recorded as the task's
    /// creation time.
    #[must_use]
    pub const fn requested_at(&self) -> DateTime<Utc> {
        self.requested_at
    }

    /// Turns the validated input into a pending task with store-assigned
    /// identity.
    #[must_use]
    pub fn into_task(self, id: TaskId) -> Task {
        Task {
            id,
            application_id: self.application_id,
            task_type: self.task_type,
            due_at: self.due_at,
            status: TaskStatus::Pending,
            created_at: self.requested_at,
        }
    }
}

fn required<'a>(value: Option<&'a str>, field: &'static str) -> Result<&'a str, TaskDomainError> {
    value
        .filter(|present| !present.is_empty())
        .ok_or(TaskDomainError::MissingField(field))
}

/// A stored follow-up task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    application_id: ApplicationId,
    task_type: TaskType,
    due_at: DateTime<Utc>,
    status: TaskStatus,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted application reference.
    pub application_id: ApplicationId,
    /// Persisted task type.
    pub task_type: TaskType,
    /// Persisted due instant.
    pub due_at: DateTime<Utc>,
    /// Persisted lifecycle status.
    pub status: TaskStatus,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Reconstructs a task from persisted storage.
    ///
    /// No creation checks are re-run: a stored `due_at` in the past is valid.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            application_id: data.application_id,
            task_type: data.task_type,
            due_at: data.due_at,
            status: data.status,
            created_at: data.created_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the referenced application.
    #[must_use]
    pub const fn application_id(&self) -> &ApplicationId {
        &self.application_id
    }

    /// Returns the task type.
    #[must_use]
    pub const fn task_type(&self) -> TaskType {
        self.task_type
    }

    /// Returns the due instant.
    #[must_use]
    pub const fn due_at(&self) -> DateTime<Utc> {
        self.due_at
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Moves the task to [`TaskStatus::Completed`].
    ///
    /// Returns the status held before the call. Completing an already
    /// completed task leaves it unchanged.
    pub const fn mark_completed(&mut self) -> TaskStatus {
        let previous = self.status;
        self.status = TaskStatus::Completed;
        previous
    }
}
