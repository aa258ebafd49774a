//! Personal task aggregate root.

use super::{Details, Schedule, TaskDomainError, TaskId, TaskStatus};
use crate::identity::domain::EmailAddress;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Personal task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    owner: EmailAddress,
    details: Details,
    schedule: Schedule,
    status: TaskStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted owner.
    pub owner: EmailAddress,
    /// Persisted title and description.
    pub details: Details,
    /// Persisted date range.
    pub schedule: Schedule,
    /// Persisted status.
    pub status: TaskStatus,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Validated changes to apply to a task. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskEdit {
    /// Replacement title and description.
    pub details: Option<Details>,
    /// Replacement date range.
    pub schedule: Option<Schedule>,
}

impl TaskEdit {
    /// Returns `true` when the edit changes nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.details.is_none() && self.schedule.is_none()
    }
}

impl Task {
    /// Creates a new task in the [`TaskStatus::Todo`] status.
    #[must_use]
    pub fn new(
        owner: EmailAddress,
        details: Details,
        schedule: Schedule,
        clock: &impl Clock,
    ) -> Self {
        let timestamp = clock.utc();
        Self {
            id: TaskId::new(),
            owner,
            details,
            schedule,
            status: TaskStatus::Todo,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            owner: data.owner,
            details: data.details,
            schedule: data.schedule,
            status: data.status,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the owner's email address.
    #[must_use]
    pub const fn owner(&self) -> &EmailAddress {
        &self.owner
    }

    /// Returns `true` when `email` owns this task.
    #[must_use]
    pub fn is_owned_by(&self, email: &EmailAddress) -> bool {
        &self.owner == email
    }

    /// Returns the title and description.
    #[must_use]
    pub const fn details(&self) -> &Details {
        &self.details
    }

    /// Returns the date range.
    #[must_use]
    pub const fn schedule(&self) -> Schedule {
        self.schedule
    }

    /// Returns the current status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Applies an edit. An empty edit leaves the task untouched.
    pub fn edit(&mut self, edit: TaskEdit, clock: &impl Clock) {
        if edit.is_empty() {
            return;
        }
        if let Some(details) = edit.details {
            self.details = details;
        }
        if let Some(schedule) = edit.schedule {
            self.schedule = schedule;
        }
        self.touch(clock);
    }

    /// Moves the task to `target`.
    ///
    /// Re-applying the current status succeeds without touching the task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidStatusTransition`] when the status
    /// machine does not list the transition.
    pub fn transition_to(
        &mut self,
        target: TaskStatus,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        if !self.status.can_transition_to(target) {
            return Err(TaskDomainError::InvalidStatusTransition {
                from: self.status,
                to: target,
            });
        }
        if self.status == target {
            return Ok(());
        }
        self.status = target;
        self.touch(clock);
        Ok(())
    }

    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}
