//! Diesel schema for personal task persistence.

diesel::table! {
    /// Personal tasks.
    tasks (id) {
        /// Internal task identifier.
        id -> Uuid,
        /// Owner email address.
        #[max_length = 254]
        owner_email -> Varchar,
        /// Task title.
        #[max_length = 255]
        title -> Varchar,
        /// Task description.
        description -> Text,
        /// First day of the task.
        starts_on -> Date,
        /// Last day of the task.
        ends_on -> Date,
        /// Task status.
        #[max_length = 20]
        status -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
