//! Shared project aggregate root.

use super::{Collaborator, ProjectDomainError, ProjectId, Role};
use crate::identity::domain::EmailAddress;
use crate::task::domain::{Details, Schedule};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Shared project aggregate root.
///
/// The owner never appears in [`Project::collaborators`]; they hold the
/// `Admin` role implicitly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    id: ProjectId,
    owner: EmailAddress,
    details: Details,
    schedule: Schedule,
    collaborators: Vec<Collaborator>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted project aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedProjectData {
    /// Persisted project identifier.
    pub id: ProjectId,
    /// Persisted owner.
    pub owner: EmailAddress,
    /// Persisted title and description.
    pub details: Details,
    /// Persisted date range.
    pub schedule: Schedule,
    /// Persisted collaborators in join order.
    pub collaborators: Vec<Collaborator>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Validated changes to apply to a project. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectEdit {
    /// Replacement title and description.
    pub details: Option<Details>,
    /// Replacement date range.
    pub schedule: Option<Schedule>,
}

impl ProjectEdit {
    /// Returns `true` when the edit changes nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.details.is_none() && self.schedule.is_none()
    }
}

impl Project {
    /// Creates a project with no collaborators.
    #[must_use]
    pub fn new(
        owner: EmailAddress,
        details: Details,
        schedule: Schedule,
        clock: &impl Clock,
    ) -> Self {
        let timestamp = clock.utc();
        Self {
            id: ProjectId::new(),
            owner,
            details,
            schedule,
            collaborators: Vec::new(),
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a project from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedProjectData) -> Self {
        Self {
            id: data.id,
            owner: data.owner,
            details: data.details,
            schedule: data.schedule,
            collaborators: data.collaborators,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the project identifier.
    #[must_use]
    pub const fn id(&self) -> ProjectId {
        self.id
    }

    /// Returns the owner's email address.
    #[must_use]
    pub const fn owner(&self) -> &EmailAddress {
        &self.owner
    }

    /// Returns `true` when `email` owns the project.
    #[must_use]
    pub fn is_owner(&self, email: &EmailAddress) -> bool {
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

    /// Returns the collaborators in join order, owner excluded.
    #[must_use]
    pub fn collaborators(&self) -> &[Collaborator] {
        &self.collaborators
    }

    /// Returns the collaborator entry for `email`, if any.
    #[must_use]
    pub fn collaborator(&self, email: &EmailAddress) -> Option<&Collaborator> {
        self.collaborators.iter().find(|c| c.email() == email)
    }

    /// Returns the role `email` holds on this project: `Admin` for the
    /// owner, the stored role for a collaborator, `None` otherwise.
    #[must_use]
    pub fn role_of(&self, email: &EmailAddress) -> Option<Role> {
        if self.is_owner(email) {
            return Some(Role::Admin);
        }
        self.collaborator(email).map(Collaborator::role)
    }

    /// Returns `true` when `email` is the owner or a collaborator.
    #[must_use]
    pub fn is_member(&self, email: &EmailAddress) -> bool {
        self.role_of(email).is_some()
    }

    /// Checks that every email in `assignees` is a member.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::AssigneeNotMember`] for the first
    /// outsider found.
    pub fn ensure_members(&self, assignees: &BTreeSet<EmailAddress>) -> Result<(), ProjectDomainError> {
        match assignees.iter().find(|email| !self.is_member(email)) {
            Some(outsider) => Err(ProjectDomainError::AssigneeNotMember(outsider.clone())),
            None => Ok(()),
        }
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

    /// Applies an edit. An empty edit leaves the project untouched.
    pub fn edit(&mut self, edit: ProjectEdit, clock: &impl Clock) {
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

    /// Adds a collaborator.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::AlreadyOwner`] when the collaborator is
    /// the owner and [`ProjectDomainError::AlreadyCollaborator`] when they
    /// already take part.
    pub fn add_collaborator(
        &mut self,
        collaborator: Collaborator,
        clock: &impl Clock,
    ) -> Result<(), ProjectDomainError> {
        self.ensure_can_join(collaborator.email())?;
        self.collaborators.push(collaborator);
        self.touch(clock);
        Ok(())
    }

    /// Checks that `email` could join as a new collaborator.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::AlreadyOwner`] or
    /// [`ProjectDomainError::AlreadyCollaborator`].
    pub fn ensure_can_join(&self, email: &EmailAddress) -> Result<(), ProjectDomainError> {
        if self.is_owner(email) {
            return Err(ProjectDomainError::AlreadyOwner(email.clone()));
        }
        if self.collaborator(email).is_some() {
            return Err(ProjectDomainError::AlreadyCollaborator(email.clone()));
        }
        Ok(())
    }

    /// Removes a collaborator and returns their entry.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::OwnerIsPermanent`] for the owner and
    /// [`ProjectDomainError::NotCollaborator`] for a non-member.
    pub fn remove_collaborator(
        &mut self,
        email: &EmailAddress,
        clock: &impl Clock,
    ) -> Result<Collaborator, ProjectDomainError> {
        self.ensure_not_owner(email)?;
        let position = self
            .collaborators
            .iter()
            .position(|c| c.email() == email)
            .ok_or_else(|| ProjectDomainError::NotCollaborator(email.clone()))?;
        let removed = self.collaborators.remove(position);
        self.touch(clock);
        Ok(removed)
    }

    /// Changes a collaborator's role. Assigning the current role is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::OwnerIsPermanent`] for the owner and
    /// [`ProjectDomainError::NotCollaborator`] for a non-member.
    pub fn change_role(
        &mut self,
        email: &EmailAddress,
        role: Role,
        clock: &impl Clock,
    ) -> Result<(), ProjectDomainError> {
        self.ensure_not_owner(email)?;
        let collaborator = self
            .collaborators
            .iter_mut()
            .find(|c| c.email() == email)
            .ok_or_else(|| ProjectDomainError::NotCollaborator(email.clone()))?;
        if collaborator.role() == role {
            return Ok(());
        }
        collaborator.set_role(role);
        self.touch(clock);
        Ok(())
    }

    fn ensure_not_owner(&self, email: &EmailAddress) -> Result<(), ProjectDomainError> {
        if self.is_owner(email) {
            return Err(ProjectDomainError::OwnerIsPermanent(email.clone()));
        }
        Ok(())
    }

    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}
