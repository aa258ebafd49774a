//! Error type shared by the project services.

use crate::ErrorKind;
use crate::identity::{
    domain::{EmailAddress, IdentityDomainError},
    ports::UserRepositoryError,
};
use crate::project::{
    domain::{InvitationId, ProjectDomainError, ProjectId, ProjectTaskId},
    ports::ProjectRepositoryError,
};
use crate::task::domain::{ParseTaskStatusError, TaskDomainError};
use thiserror::Error;

/// Service-level errors for project, project task, and collaboration
/// operations.
#[derive(Debug, Error)]
pub enum ProjectServiceError {
    /// Validation or access policy failed.
    #[error(transparent)]
    Domain(#[from] ProjectDomainError),
    /// An email address in the request is malformed.
    #[error(transparent)]
    InvalidEmail(#[from] IdentityDomainError),
    /// The requested status string is unknown.
    #[error(transparent)]
    InvalidStatus(#[from] ParseTaskStatusError),
    /// Project repository operation failed.
    #[error(transparent)]
    Repository(#[from] ProjectRepositoryError),
    /// User lookup failed.
    #[error(transparent)]
    Users(#[from] UserRepositoryError),
    /// The project does not exist.
    #[error("project not found: {0}")]
    ProjectNotFound(ProjectId),
    /// The project task does not exist.
    #[error("project task not found: {0}")]
    TaskNotFound(ProjectTaskId),
    /// The invitation does not exist.
    #[error("invitation not found: {0}")]
    InvitationNotFound(InvitationId),
    /// No account is registered with the email address.
    #[error("no user registered with {0}")]
    UserNotFound(EmailAddress),
}

impl From<TaskDomainError> for ProjectServiceError {
    fn from(err: TaskDomainError) -> Self {
        Self::Domain(ProjectDomainError::Task(err))
    }
}

impl ProjectServiceError {
    /// Classifies the error for callers.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Domain(err) => err.kind(),
            Self::InvalidEmail(err) => err.kind(),
            Self::InvalidStatus(_) => ErrorKind::ValidationFailed,
            Self::Repository(err) => err.kind(),
            Self::Users(err) => err.kind(),
            Self::ProjectNotFound(_)
            | Self::TaskNotFound(_)
            | Self::InvitationNotFound(_)
            | Self::UserNotFound(_) => ErrorKind::NotFound,
        }
    }
}

/// Result type for project service operations.
pub type ProjectServiceResult<T> = Result<T, ProjectServiceError>;
