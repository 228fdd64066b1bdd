//! Application services for task lifecycle orchestration.

mod lifecycle;

pub use lifecycle::{
    Completion, CreateTaskRequest, DEFAULT_STORE_TIMEOUT, TaskLifecycleError,
    TaskLifecycleResult, TaskLifecycleService,
};
