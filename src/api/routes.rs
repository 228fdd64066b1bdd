//! Route table for the task API.

use axum::{
    Router,
    routing::{get, post},
};
use mockable::Clock;

use super::handlers::{
    SharedService, complete_task, create_task, health_check, list_due_today, method_not_allowed,
};
use crate::task::ports::TaskRepository;

/// API routes for the task lifecycle, awaiting their service state.
///
/// `/create-task` mirrors `/tasks` for callers of the legacy endpoint
/// path.
pub fn routes<R, C>() -> Router<SharedService<R, C>>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .route(
            "/tasks",
            post(create_task::<R, C>).fallback(method_not_allowed),
        )
        .route(
            "/create-task",
            post(create_task::<R, C>).fallback(method_not_allowed),
        )
        .route(
            "/tasks/due-today",
            get(list_due_today::<R, C>).fallback(method_not_allowed),
        )
        .route(
            "/tasks/{id}/complete",
            post(complete_task::<R, C>).fallback(method_not_allowed),
        )
}

/// Builds the complete application router around `service`.
pub fn router<R, C>(service: SharedService<R, C>) -> Router
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    routes::<R, C>().with_state(service)
}
