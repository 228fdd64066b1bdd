//! Request and response types for the task API.

use crate::task::domain::{Task, TaskId, TaskStatus, TaskType};
use crate::task::services::CreateTaskRequest;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::num::FpCategory;

/// Body of a task creation request.
///
/// Fields are kept as raw JSON so that absent, `null`, falsy, and non-string
/// values all reach validation instead of failing decoding.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateTaskPayload {
    /// Application the task follows up on.
    #[serde(default)]
    pub application_id: Option<Value>,
    /// One of `call`, `email`, `review`.
    #[serde(default)]
    pub task_type: Option<Value>,
    /// Due timestamp.
    #[serde(default)]
    pub due_at: Option<Value>,
}

impl CreateTaskPayload {
    /// Converts the payload into a service request.
    ///
    /// `null`, `false`, `0`, and `""` count as missing. Other non-string
    /// values are passed on as their JSON text, so a numeric `task_type`
    /// fails as an unknown type. A numeric or `true` `due_at` is read as
    /// milliseconds since the Unix epoch.
    #[must_use]
    pub fn into_request(self) -> CreateTaskRequest {
        CreateTaskRequest::from_parts(
            self.application_id.and_then(text_field),
            self.task_type.and_then(text_field),
            self.due_at.and_then(due_at_field),
        )
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(flag) => !flag,
        Value::Number(number) => number
            .as_f64()
            .is_some_and(|n| n.classify() == FpCategory::Zero),
        Value::String(text) => text.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

fn text_field(value: Value) -> Option<String> {
    if is_blank(&value) {
        return None;
    }
    match value {
        Value::String(text) => Some(text),
        other => Some(other.to_string()),
    }
}

fn due_at_field(value: Value) -> Option<String> {
    let epoch_millis = match &value {
        Value::Bool(true) => Some(1),
        Value::Number(number) => number.as_i64().filter(|millis| *millis != 0),
        _ => None,
    };
    epoch_millis
        .and_then(DateTime::from_timestamp_millis)
        .map_or_else(
            || text_field(value),
            |instant| Some(instant.to_rfc3339_opts(SecondsFormat::Millis, true)),
        )
}

/// Successful creation response.
#[derive(Debug, Clone, Serialize)]
pub struct CreateTaskResponse {
    /// Always `true`.
    pub success: bool,
    /// Identifier assigned by the store.
    pub task_id: TaskId,
}

/// Successful completion response.
#[derive(Debug, Clone, Serialize)]
pub struct CompleteTaskResponse {
    /// Always `true`.
    pub success: bool,
    /// Identifier of the completed task.
    pub task_id: TaskId,
    /// Whether the task had already been completed before this call.
    pub already_completed: bool,
}

/// Query parameters for the due-today listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DueTasksQuery {
    /// Reference instant in RFC 3339; defaults to the server clock.
    #[serde(default)]
    pub at: Option<String>,
}

/// Task as exposed to the presentation layer.
#[derive(Debug, Clone, Serialize)]
pub struct TaskRecord {
    /// Task identifier.
    pub id: TaskId,
    /// Referenced application.
    pub application_id: String,
    /// Task type.
    #[serde(rename = "type")]
    pub task_type: TaskType,
    /// Lifecycle status.
    pub status: TaskStatus,
    /// Due instant.
    pub due_at: DateTime<Utc>,
}

impl From<&Task> for TaskRecord {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id(),
            application_id: task.application_id().as_str().to_owned(),
            task_type: task.task_type(),
            status: task.status(),
            due_at: task.due_at(),
        }
    }
}

/// Due-today listing response.
#[derive(Debug, Clone, Serialize)]
pub struct DueTasksResponse {
    /// Pending tasks, ascending by due time.
    pub tasks: Vec<TaskRecord>,
}

/// Health check response payload.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status.
    pub status: String,
    /// Timestamp of the check.
    pub timestamp: DateTime<Utc>,
}
