//! Diesel schema for task lifecycle persistence.

diesel::table! {
    /// Follow-up tasks attached to job applications.
    tasks (id) {
        /// Store-assigned task identifier.
        id -> Uuid,
        /// Referenced application identifier.
        application_id -> Text,
        /// Task type: `call`, `email`, or `review`.
        #[sql_name = "type"]
        #[max_length = 20]
        task_type -> Varchar,
        /// Due instant.
        due_at -> Timestamptz,
        /// Lifecycle status: `pending` or `completed`.
        #[max_length = 20]
        status -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}
