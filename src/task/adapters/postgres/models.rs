//! Diesel row models for personal task persistence.

use super::schema::tasks;
use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;

/// Query, insert, and update model for task records.
#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Internal task identifier.
    pub id: uuid::Uuid,
    /// Owner email address.
    pub owner_email: String,
    /// Task title.
    pub title: String,
    /// Task description.
    pub description: String,
    /// First day of the task.
    pub starts_on: NaiveDate,
    /// Last day of the task.
    pub ends_on: NaiveDate,
    /// Task status.
    pub status: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}
