//! API error type and its mapping onto HTTP responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::task::{
    domain::TaskDomainError, ports::TaskRepositoryError, services::TaskLifecycleError,
};

/// API errors for task operations.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Caller input failed validation.
    #[error("validation error: {0}")]
    Validation(#[from] TaskDomainError),
    /// The `at` query parameter did not parse.
    #[error("invalid reference instant: {0}")]
    InvalidReference(String),
    /// The task does not exist.
    #[error("task not found")]
    NotFound,
    /// A write was rejected by the store; the store's message is returned.
    #[error("store rejected write: {0}")]
    StoreWrite(TaskRepositoryError),
    /// A read or status update failed in the store; details stay in logs.
    #[error("store failure: {0}")]
    Store(TaskRepositoryError),
    /// The route does not accept the request method.
    #[error("method not allowed")]
    MethodNotAllowed,
    /// Anything not anticipated. Never leaks detail to the caller.
    #[error("unexpected fault: {0}")]
    Unexpected(String),
}

impl ApiError {
    /// Maps a failed creation call. Store messages are passed through.
    #[must_use]
    pub fn from_creation(err: TaskLifecycleError) -> Self {
        match err {
            TaskLifecycleError::Domain(domain) => Self::Validation(domain),
            TaskLifecycleError::StorageFailure(store) => Self::StoreWrite(store),
            TaskLifecycleError::NotFound(id) => {
                Self::Unexpected(format!("task {id} vanished during creation"))
            }
        }
    }

    /// Maps a failed retrieval or completion call.
    #[must_use]
    pub fn from_lifecycle(err: TaskLifecycleError) -> Self {
        match err {
            TaskLifecycleError::Domain(domain) => Self::Validation(domain),
            TaskLifecycleError::StorageFailure(store) => Self::Store(store),
            TaskLifecycleError::NotFound(_) => Self::NotFound,
        }
    }

    fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            Self::Validation(TaskDomainError::MissingField(_)) => {
                (StatusCode::BAD_REQUEST, "Missing required fields".to_owned())
            }
            Self::Validation(TaskDomainError::InvalidEnum(_)) => {
                (StatusCode::BAD_REQUEST, "Invalid task_type".to_owned())
            }
            Self::Validation(TaskDomainError::InvalidTimestamp(_)) => {
                (StatusCode::BAD_REQUEST, "Invalid due_at format".to_owned())
            }
            Self::Validation(TaskDomainError::PastDueDate { .. }) => (
                StatusCode::BAD_REQUEST,
                "due_at must be in the future".to_owned(),
            ),
            Self::Validation(TaskDomainError::WindowOutOfRange(_)) | Self::InvalidReference(_) => {
                (StatusCode::BAD_REQUEST, "Invalid at format".to_owned())
            }
            Self::NotFound => (StatusCode::NOT_FOUND, "Task not found".to_owned()),
            Self::StoreWrite(store) => (StatusCode::INTERNAL_SERVER_ERROR, store.to_string()),
            Self::Store(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Storage failure".to_owned(),
            ),
            Self::MethodNotAllowed => (
                StatusCode::METHOD_NOT_ALLOWED,
                "Method not allowed".to_owned(),
            ),
            Self::Unexpected(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_owned(),
            ),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "request rejected");
        }

        (status, Json(json!({ "error": message }))).into_response()
    }
}
