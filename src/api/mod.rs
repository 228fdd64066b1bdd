//! HTTP endpoints for the task lifecycle.
//!
//! Creation keeps the fixed error bodies external callers already depend
//! on; retrieval and completion expose the presentation layer's reads and
//! writes over the same service.

pub mod error;
pub mod handlers;
pub mod routes;
pub mod types;

pub use error::ApiError;
pub use routes::{router, routes};
pub use types::{
    CompleteTaskResponse, CreateTaskPayload, CreateTaskResponse, DueTasksQuery,
    DueTasksResponse, HealthResponse, TaskRecord,
};
