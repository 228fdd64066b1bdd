//! Diesel row models for task persistence.

use super::schema::tasks;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Store-assigned task identifier.
    pub id: uuid::Uuid,
    /// Referenced application identifier.
    pub application_id: String,
    /// Task type.
    pub task_type: String,
    /// Due instant.
    pub due_at: DateTime<Utc>,
    /// Lifecycle status.
    pub status: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Insert model for task records.
///
/// `id` is left to its column default so the store assigns it.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow {
    /// Referenced application identifier.
    pub application_id: String,
    /// Task type.
    pub task_type: String,
    /// Due instant.
    pub due_at: DateTime<Utc>,
    /// Lifecycle status.
    pub status: String,
    /// Instant the creation request was validated against.
    pub created_at: DateTime<Utc>,
}
