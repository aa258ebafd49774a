//! Error types for project domain validation and access policy.

use super::{Capability, InvitationId, InvitationState, ProjectId, Role};
use crate::ErrorKind;
use crate::identity::domain::EmailAddress;
use crate::task::domain::TaskDomainError;
use thiserror::Error;

/// Errors returned by project aggregates and the permission resolver.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProjectDomainError {
    /// Title, description, date range, or status validation failed.
    #[error(transparent)]
    Task(#[from] TaskDomainError),

    /// The user holds no role on the project.
    #[error("{email} is not a member of project {project_id}")]
    NotMember {
        /// Target project.
        project_id: ProjectId,
        /// Calling user.
        email: EmailAddress,
    },

    /// The user's role does not grant the capability.
    #[error("{role} {email} may not {capability} on project {project_id}")]
    MissingCapability {
        /// Target project.
        project_id: ProjectId,
        /// Calling user.
        email: EmailAddress,
        /// Role the user holds.
        role: Role,
        /// Capability that was required.
        capability: Capability,
    },

    /// A `User` tried to change the status of a task not assigned to them.
    #[error("{email} is not assigned to the task")]
    NotAssignee {
        /// Calling user.
        email: EmailAddress,
    },

    /// Only the owner may perform the operation.
    #[error("only the owner of project {project_id} may do this")]
    OwnerOnly {
        /// Target project.
        project_id: ProjectId,
    },

    /// Only an `Admin` may hand out the `Admin` role.
    #[error("{role} may not grant the {granted} role")]
    RoleTooHigh {
        /// Role of the caller.
        role: Role,
        /// Role the caller tried to grant.
        granted: Role,
    },

    /// The owner cannot be removed or have their role changed.
    #[error("{0} owns the project and keeps the admin role")]
    OwnerIsPermanent(EmailAddress),

    /// The user already owns the project.
    #[error("{0} already owns the project")]
    AlreadyOwner(EmailAddress),

    /// The user already collaborates on the project.
    #[error("{0} is already a collaborator")]
    AlreadyCollaborator(EmailAddress),

    /// The user does not collaborate on the project.
    #[error("{0} is not a collaborator")]
    NotCollaborator(EmailAddress),

    /// A project task needs at least one assignee.
    #[error("a project task needs at least one assignee")]
    NoAssignees,

    /// An assignee is not a member of the project.
    #[error("{0} is not a member of the project")]
    AssigneeNotMember(EmailAddress),

    /// The invitation is addressed to someone else.
    #[error("invitation {invitation_id} is not addressed to {email}")]
    NotInvitee {
        /// Target invitation.
        invitation_id: InvitationId,
        /// Calling user.
        email: EmailAddress,
    },

    /// The invitation was already answered.
    #[error("invitation {invitation_id} is already {state}")]
    InvitationClosed {
        /// Target invitation.
        invitation_id: InvitationId,
        /// Current state.
        state: InvitationState,
    },
}

impl ProjectDomainError {
    /// Classifies the error for callers.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Task(err) => err.kind(),
            Self::NotMember { .. }
            | Self::MissingCapability { .. }
            | Self::NotAssignee { .. }
            | Self::OwnerOnly { .. }
            | Self::RoleTooHigh { .. }
            | Self::OwnerIsPermanent(_)
            | Self::NotInvitee { .. } => ErrorKind::NotAuthorized,
            Self::AlreadyOwner(_) | Self::AlreadyCollaborator(_) | Self::InvitationClosed { .. } => {
                ErrorKind::Conflict
            }
            Self::NotCollaborator(_) => ErrorKind::NotFound,
            Self::NoAssignees | Self::AssigneeNotMember(_) => ErrorKind::ValidationFailed,
        }
    }
}

/// Error returned while parsing roles.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown role: {0}")]
pub struct ParseRoleError(pub String);

/// Error returned while parsing invitation states.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown invitation state: {0}")]
pub struct ParseInvitationStateError(pub String);
