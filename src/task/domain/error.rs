//! Error types for task domain validation and parsing.

use super::TaskStatus;
use crate::ErrorKind;
use chrono::NaiveDate;
use thiserror::Error;

/// Errors returned while constructing or mutating task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The title is empty after trimming.
    #[error("title must not be empty")]
    EmptyTitle,

    /// The title exceeds the storage limit.
    #[error("title exceeds {max} characters")]
    TitleTooLong {
        /// Maximum accepted length.
        max: usize,
    },

    /// The description is empty after trimming.
    #[error("description must not be empty")]
    EmptyDescription,

    /// The start date lies before the current day.
    #[error("start date {starts_on} is before today ({today})")]
    StartsBeforeToday {
        /// Requested start date.
        starts_on: NaiveDate,
        /// Current day according to the clock.
        today: NaiveDate,
    },

    /// The end date lies before the start date.
    #[error("end date {ends_on} is before start date {starts_on}")]
    EndsBeforeStart {
        /// Requested start date.
        starts_on: NaiveDate,
        /// Requested end date.
        ends_on: NaiveDate,
    },

    /// The status machine does not allow the transition.
    #[error("status transition from {from} to {to} is not allowed")]
    InvalidStatusTransition {
        /// Current status.
        from: TaskStatus,
        /// Requested status.
        to: TaskStatus,
    },
}

impl TaskDomainError {
    /// Classifies the error for callers.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        ErrorKind::ValidationFailed
    }
}

/// Error returned while parsing task statuses.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);
