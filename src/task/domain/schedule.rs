//! Validated date range for tasks and projects.

use super::TaskDomainError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Start and end dates, inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Schedule {
    starts_on: NaiveDate,
    ends_on: NaiveDate,
}

impl Schedule {
    /// Creates a schedule requested on `today`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::StartsBeforeToday`] when `starts_on` is in
    /// the past and [`TaskDomainError::EndsBeforeStart`] when `ends_on`
    /// precedes `starts_on`.
    pub fn new(
        starts_on: NaiveDate,
        ends_on: NaiveDate,
        today: NaiveDate,
    ) -> Result<Self, TaskDomainError> {
        if starts_on < today {
            return Err(TaskDomainError::StartsBeforeToday { starts_on, today });
        }
        if ends_on < starts_on {
            return Err(TaskDomainError::EndsBeforeStart { starts_on, ends_on });
        }
        Ok(Self { starts_on, ends_on })
    }

    /// Reconstructs a schedule from persisted storage without validation.
    #[must_use]
    pub const fn from_persisted(starts_on: NaiveDate, ends_on: NaiveDate) -> Self {
        Self { starts_on, ends_on }
    }

    /// Returns the start date.
    #[must_use]
    pub const fn starts_on(&self) -> NaiveDate {
        self.starts_on
    }

    /// Returns the end date.
    #[must_use]
    pub const fn ends_on(&self) -> NaiveDate {
        self.ends_on
    }
}
