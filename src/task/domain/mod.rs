//! Domain model for follow-up task lifecycle management.
//!
//! The domain owns creation validation, the two-state status lifecycle, and
//! calendar-day windowing. It takes "now" as an explicit argument and keeps
//! all infrastructure concerns outside its boundary.

mod due_at;
mod error;
mod ids;
mod task;
mod window;

pub use due_at::parse_due_at;
pub use error::{ParseTaskStatusError, TaskDomainError};
pub use ids::{ApplicationId, TaskId};
pub use task::{NewTask, PersistedTaskData, Task, TaskStatus, TaskType};
pub use window::DueWindow;
