//! Repository ports for projects, project tasks, collaborators, and
//! invitations.
//!
//! Operations that change more than one record (collaborator removal,
//! invitation acceptance, project deletion) are single calls so adapters can
//! apply them atomically.

use crate::ErrorKind;
use crate::identity::domain::EmailAddress;
use crate::project::domain::{
    Collaborator, Invitation, InvitationId, Project, ProjectId, ProjectTask, ProjectTaskId, Role,
};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for project repository operations.
pub type ProjectRepositoryResult<T> = Result<T, ProjectRepositoryError>;

/// Project, collaborator, and project task persistence contract.
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// Stores a new project with its collaborators.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectRepositoryError::DuplicateProject`] when the ID
    /// already exists.
    async fn store_project(&self, project: &Project) -> ProjectRepositoryResult<()>;

    /// Persists the title, description, dates, and update timestamp of an
    /// existing project. Collaborators are changed through the dedicated
    /// operations.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectRepositoryError::ProjectNotFound`] when the project
    /// does not exist.
    async fn update_project(&self, project: &Project) -> ProjectRepositoryResult<()>;

    /// Deletes a project together with its tasks, collaborators, and
    /// invitations.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectRepositoryError::ProjectNotFound`] when the project
    /// does not exist.
    async fn delete_project(&self, id: ProjectId) -> ProjectRepositoryResult<()>;

    /// Finds a project by identifier.
    async fn find_project(&self, id: ProjectId) -> ProjectRepositoryResult<Option<Project>>;

    /// Returns the projects owned by `owner`, oldest first.
    async fn list_owned_projects(
        &self,
        owner: &EmailAddress,
    ) -> ProjectRepositoryResult<Vec<Project>>;

    /// Returns the projects `email` collaborates on, oldest first.
    async fn list_shared_projects(
        &self,
        email: &EmailAddress,
    ) -> ProjectRepositoryResult<Vec<Project>>;

    /// Adds `collaborator` to `project` and records the project's new update
    /// timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectRepositoryError::ProjectNotFound`] or
    /// [`ProjectRepositoryError::DuplicateCollaborator`].
    async fn add_collaborator(
        &self,
        project: &Project,
        collaborator: &Collaborator,
    ) -> ProjectRepositoryResult<()>;

    /// Removes `email` from `project` and, in the same atomic step, from the
    /// assignees of every task of the project.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectRepositoryError::ProjectNotFound`] or
    /// [`ProjectRepositoryError::CollaboratorNotFound`].
    async fn remove_collaborator(
        &self,
        project: &Project,
        email: &EmailAddress,
    ) -> ProjectRepositoryResult<()>;

    /// Sets the role of collaborator `email` on `project`.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectRepositoryError::ProjectNotFound`] or
    /// [`ProjectRepositoryError::CollaboratorNotFound`].
    async fn update_collaborator_role(
        &self,
        project: &Project,
        email: &EmailAddress,
        role: Role,
    ) -> ProjectRepositoryResult<()>;

    /// Stores a new project task. Every assignee is checked against the
    /// project's current members in the same atomic step.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectRepositoryError::ProjectNotFound`] when the project
    /// is gone, [`ProjectRepositoryError::DuplicateTask`] when the ID
    /// already exists, and [`ProjectRepositoryError::AssigneeNotMember`]
    /// when an assignee no longer belongs to the project.
    async fn store_task(&self, task: &ProjectTask) -> ProjectRepositoryResult<()>;

    /// Persists the title, description, dates, status, and update timestamp
    /// of a project task. The stored assignees are left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectRepositoryError::TaskNotFound`] when the task does
    /// not exist.
    async fn update_task(&self, task: &ProjectTask) -> ProjectRepositoryResult<()>;

    /// Persists only the status and update timestamp of a project task.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectRepositoryError::TaskNotFound`] when the task does
    /// not exist.
    async fn update_task_status(&self, task: &ProjectTask) -> ProjectRepositoryResult<()>;

    /// Replaces the assignees of a project task after checking each of them
    /// against the project's current members, in one atomic step.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectRepositoryError::TaskNotFound`],
    /// [`ProjectRepositoryError::ProjectNotFound`], or
    /// [`ProjectRepositoryError::AssigneeNotMember`]; nothing is written in
    /// those cases.
    async fn replace_assignees(&self, task: &ProjectTask) -> ProjectRepositoryResult<()>;

    /// Deletes a project task.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectRepositoryError::TaskNotFound`] when the task does
    /// not exist.
    async fn delete_task(&self, id: ProjectTaskId) -> ProjectRepositoryResult<()>;

    /// Finds a project task by identifier.
    async fn find_task(&self, id: ProjectTaskId) -> ProjectRepositoryResult<Option<ProjectTask>>;

    /// Returns the tasks of a project, oldest first.
    async fn list_tasks(&self, project_id: ProjectId)
    -> ProjectRepositoryResult<Vec<ProjectTask>>;

    /// Returns the tasks, across all projects, assigned to `email`.
    async fn list_tasks_assigned_to(
        &self,
        email: &EmailAddress,
    ) -> ProjectRepositoryResult<Vec<ProjectTask>>;
}

/// Invitation persistence contract.
#[async_trait]
pub trait InvitationRepository: Send + Sync {
    /// Stores a new pending invitation.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectRepositoryError::ProjectNotFound`] when the project
    /// is gone and [`ProjectRepositoryError::PendingInvitationExists`] when
    /// the invitee already has a pending invitation to the project.
    async fn store_invitation(&self, invitation: &Invitation) -> ProjectRepositoryResult<()>;

    /// Finds an invitation by identifier.
    async fn find_invitation(
        &self,
        id: InvitationId,
    ) -> ProjectRepositoryResult<Option<Invitation>>;

    /// Returns the pending invitations addressed to `invitee`, oldest first.
    async fn list_pending_invitations(
        &self,
        invitee: &EmailAddress,
    ) -> ProjectRepositoryResult<Vec<Invitation>>;

    /// Records an accepted invitation and adds `collaborator` to `project`
    /// in one atomic step.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectRepositoryError::InvitationNotFound`],
    /// [`ProjectRepositoryError::InvitationNotPending`] when the stored
    /// invitation was already answered,
    /// [`ProjectRepositoryError::ProjectNotFound`], or
    /// [`ProjectRepositoryError::DuplicateCollaborator`]; nothing is written
    /// in those cases.
    async fn accept_invitation(
        &self,
        invitation: &Invitation,
        project: &Project,
        collaborator: &Collaborator,
    ) -> ProjectRepositoryResult<()>;

    /// Records a declined invitation.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectRepositoryError::InvitationNotFound`] when the
    /// invitation does not exist and
    /// [`ProjectRepositoryError::InvitationNotPending`] when it was already
    /// answered.
    async fn decline_invitation(&self, invitation: &Invitation) -> ProjectRepositoryResult<()>;
}

/// Errors returned by project and invitation repository implementations.
#[derive(Debug, Clone, Error)]
pub enum ProjectRepositoryError {
    /// A project with the same identifier already exists.
    #[error("duplicate project identifier: {0}")]
    DuplicateProject(ProjectId),

    /// A project task with the same identifier already exists.
    #[error("duplicate project task identifier: {0}")]
    DuplicateTask(ProjectTaskId),

    /// The user already collaborates on the project.
    #[error("{0} already collaborates on the project")]
    DuplicateCollaborator(EmailAddress),

    /// The invitee already has a pending invitation to the project.
    #[error("{invitee} already has a pending invitation to project {project_id}")]
    PendingInvitationExists {
        /// Target project.
        project_id: ProjectId,
        /// Invited user.
        invitee: EmailAddress,
    },

    /// The invitation was already accepted or declined.
    #[error("invitation already answered: {0}")]
    InvitationNotPending(InvitationId),

    /// An assignee is neither the owner nor a collaborator of the project.
    #[error("{0} is not a member of the project")]
    AssigneeNotMember(EmailAddress),

    /// The project was not found.
    #[error("project not found: {0}")]
    ProjectNotFound(ProjectId),

    /// The project task was not found.
    #[error("project task not found: {0}")]
    TaskNotFound(ProjectTaskId),

    /// The invitation was not found.
    #[error("invitation not found: {0}")]
    InvitationNotFound(InvitationId),

    /// The collaborator was not found on the project.
    #[error("collaborator not found: {0}")]
    CollaboratorNotFound(EmailAddress),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl ProjectRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }

    /// Classifies the error for callers.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::DuplicateProject(_)
            | Self::DuplicateTask(_)
            | Self::DuplicateCollaborator(_)
            | Self::PendingInvitationExists { .. }
            | Self::InvitationNotPending(_)
            | Self::AssigneeNotMember(_) => ErrorKind::Conflict,
            Self::ProjectNotFound(_)
            | Self::TaskNotFound(_)
            | Self::InvitationNotFound(_)
            | Self::CollaboratorNotFound(_) => ErrorKind::NotFound,
            Self::Persistence(_) => ErrorKind::UpstreamUnavailable,
        }
    }
}
