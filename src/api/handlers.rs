//! API handler implementations for the task lifecycle.

use axum::{
    Json,
    body::Bytes,
    extract::{Path, Query, State},
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::sync::Arc;

use super::error::ApiError;
use super::types::{
    CompleteTaskResponse, CreateTaskPayload, CreateTaskResponse, DueTasksQuery, DueTasksResponse,
    HealthResponse, TaskRecord,
};
use crate::task::{domain::TaskId, ports::TaskRepository, services::TaskLifecycleService};

/// Service handle shared by every handler.
pub type SharedService<R, C> = Arc<TaskLifecycleService<R, C>>;

/// GET /health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_owned(),
        timestamp: Utc::now(),
    })
}

/// POST /tasks
///
/// Validates and stores one task. The body is decoded here rather than by
/// an extractor so that malformed JSON maps to the generic internal error
/// instead of an extractor rejection.
///
/// # Errors
///
/// Returns [`ApiError`] for validation failures (400), store failures
/// (500 with the store message), or an undecodable body (500).
pub async fn create_task<R, C>(
    State(service): State<SharedService<R, C>>,
    body: Bytes,
) -> Result<Json<CreateTaskResponse>, ApiError>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let payload: CreateTaskPayload = serde_json::from_slice(&body)
        .map_err(|err| ApiError::Unexpected(format!("undecodable creation body: {err}")))?;

    let task = service
        .create_task(payload.into_request())
        .await
        .map_err(ApiError::from_creation)?;

    Ok(Json(CreateTaskResponse {
        success: true,
        task_id: task.id(),
    }))
}

/// GET /tasks/due-today
///
/// Lists pending tasks due on the day containing `at`, or today when `at`
/// is omitted.
///
/// # Errors
///
/// Returns [`ApiError::InvalidReference`] for an unparsable `at` and
/// [`ApiError::Store`] when the store lookup fails.
pub async fn list_due_today<R, C>(
    State(service): State<SharedService<R, C>>,
    Query(query): Query<DueTasksQuery>,
) -> Result<Json<DueTasksResponse>, ApiError>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let tasks = match query.at {
        Some(raw) => {
            let reference = DateTime::parse_from_rfc3339(raw.trim())
                .map_err(|_| ApiError::InvalidReference(raw.clone()))?
                .with_timezone(&Utc);
            service.tasks_due_on(reference).await
        }
        None => service.tasks_due_today().await,
    }
    .map_err(ApiError::from_lifecycle)?;

    Ok(Json(DueTasksResponse {
        tasks: tasks.iter().map(TaskRecord::from).collect(),
    }))
}

/// POST /tasks/{id}/complete
///
/// # Errors
///
/// Returns [`ApiError::NotFound`] for a malformed or unknown id and
/// [`ApiError::Store`] when the store update fails.
pub async fn complete_task<R, C>(
    State(service): State<SharedService<R, C>>,
    Path(id): Path<String>,
) -> Result<Json<CompleteTaskResponse>, ApiError>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let task_id = TaskId::parse(&id).ok_or(ApiError::NotFound)?;
    let completion = service
        .complete_task(task_id)
        .await
        .map_err(ApiError::from_lifecycle)?;

    Ok(Json(CompleteTaskResponse {
        success: true,
        task_id: completion.task_id(),
        already_completed: completion.already_completed(),
    }))
}

/// Fallback for unsupported methods on task routes.
pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}
