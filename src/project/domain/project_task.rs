//! Task that belongs to a shared project.

use super::{ProjectDomainError, ProjectId, ProjectTaskId};
use crate::identity::domain::EmailAddress;
use crate::task::domain::{Details, Schedule, TaskDomainError, TaskStatus};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Task that belongs to exactly one project and is assigned to members.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectTask {
    id: ProjectTaskId,
    project_id: ProjectId,
    details: Details,
    schedule: Option<Schedule>,
    status: TaskStatus,
    assignees: BTreeSet<EmailAddress>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted project task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedProjectTaskData {
    /// Persisted task identifier.
    pub id: ProjectTaskId,
    /// Owning project.
    pub project_id: ProjectId,
    /// Persisted title and description.
    pub details: Details,
    /// Persisted date range, if any.
    pub schedule: Option<Schedule>,
    /// Persisted status.
    pub status: TaskStatus,
    /// Persisted assignees.
    pub assignees: BTreeSet<EmailAddress>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Validated changes to a project task. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectTaskEdit {
    /// Replacement title and description.
    pub details: Option<Details>,
    /// Replacement date range.
    pub schedule: Option<Schedule>,
}

impl ProjectTaskEdit {
    /// Returns `true` when the edit changes nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.details.is_none() && self.schedule.is_none()
    }
}

impl ProjectTask {
    /// Creates a task in [`TaskStatus::Todo`].
    ///
    /// Membership of the assignees is checked by the caller against the
    /// project.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::NoAssignees`] when `assignees` is empty.
    pub fn new(
        project_id: ProjectId,
        details: Details,
        schedule: Option<Schedule>,
        assignees: BTreeSet<EmailAddress>,
        clock: &impl Clock,
    ) -> Result<Self, ProjectDomainError> {
        if assignees.is_empty() {
            return Err(ProjectDomainError::NoAssignees);
        }
        let timestamp = clock.utc();
        Ok(Self {
            id: ProjectTaskId::new(),
            project_id,
            details,
            schedule,
            status: TaskStatus::Todo,
            assignees,
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedProjectTaskData) -> Self {
        Self {
            id: data.id,
            project_id: data.project_id,
            details: data.details,
            schedule: data.schedule,
            status: data.status,
            assignees: data.assignees,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> ProjectTaskId {
        self.id
    }

    /// Returns the owning project.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the title and description.
    #[must_use]
    pub const fn details(&self) -> &Details {
        &self.details
    }

    /// Returns the date range, if one was set.
    #[must_use]
    pub const fn schedule(&self) -> Option<Schedule> {
        self.schedule
    }

    /// Returns the current status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the assignees.
    #[must_use]
    pub const fn assignees(&self) -> &BTreeSet<EmailAddress> {
        &self.assignees
    }

    /// Returns `true` when `email` is assigned to the task.
    #[must_use]
    pub fn is_assigned(&self, email: &EmailAddress) -> bool {
        self.assignees.contains(email)
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
    pub fn edit(&mut self, edit: ProjectTaskEdit, clock: &impl Clock) {
        if edit.is_empty() {
            return;
        }
        if let Some(details) = edit.details {
            self.details = details;
        }
        if let Some(schedule) = edit.schedule {
            self.schedule = Some(schedule);
        }
        self.touch(clock);
    }

    /// Replaces the assignee set.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::NoAssignees`] when `assignees` is empty.
    pub fn assign(
        &mut self,
        assignees: BTreeSet<EmailAddress>,
        clock: &impl Clock,
    ) -> Result<(), ProjectDomainError> {
        if assignees.is_empty() {
            return Err(ProjectDomainError::NoAssignees);
        }
        if assignees == self.assignees {
            return Ok(());
        }
        self.assignees = assignees;
        self.touch(clock);
        Ok(())
    }

    /// Removes `email` from the assignees, stamping the change at `at`.
    ///
    /// Used when a collaborator leaves the project, so the set may end up
    /// empty. Returns `true` when the email was assigned.
    pub fn detach(&mut self, email: &EmailAddress, at: DateTime<Utc>) -> bool {
        let removed = self.assignees.remove(email);
        if removed {
            self.updated_at = at;
        }
        removed
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
