//! Error types for task domain validation and parsing.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors returned while validating task creation input.
///
/// Variants are ordered the way creation checks them: the first failing
/// check wins.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// A required field was absent or empty.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// The task type is outside the closed set of supported types.
    #[error("invalid task type '{0}', expected one of call, email, review")]
    InvalidEnum(String),

    /// The due timestamp could not be parsed into an instant.
    #[error("invalid due_at timestamp '{0}'")]
    InvalidTimestamp(String),

    /// The due timestamp is not strictly after the creation instant.
    #[error("due_at {due_at} is not after {now}")]
    PastDueDate {
        /// Parsed due instant.
        due_at: DateTime<Utc>,
        /// Instant the request was processed.
        now: DateTime<Utc>,
    },

    /// The reference instant has no representable calendar day window.
    #[error("no calendar day window exists around {0}")]
    WindowOutOfRange(DateTime<Utc>),
}

/// Error returned while parsing task statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);
