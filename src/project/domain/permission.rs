//! Permission resolver.
//!
//! Every project operation goes through [`authorize`]. A caller with no role,
//! or with a role that lacks the capability, gets an error; nothing is
//! skipped silently.

use super::{Capability, Project, ProjectDomainError, ProjectTask, Role};
use crate::identity::domain::EmailAddress;

/// Returns the role `email` holds on `project`.
///
/// The owner is `Admin`; collaborators hold their stored role; anyone else
/// gets `None`.
#[must_use]
pub fn role_of(project: &Project, email: &EmailAddress) -> Option<Role> {
    project.role_of(email)
}

/// Checks that `email` may exercise `capability` on `project` and returns
/// the caller's role.
///
/// # Errors
///
/// Returns [`ProjectDomainError::NotMember`] when the caller has no role,
/// [`ProjectDomainError::OwnerOnly`] for [`Capability::DeleteProject`] by a
/// non-owner, and [`ProjectDomainError::MissingCapability`] when the role is
/// insufficient.
pub fn authorize(
    project: &Project,
    email: &EmailAddress,
    capability: Capability,
) -> Result<Role, ProjectDomainError> {
    let role = role_of(project, email).ok_or_else(|| ProjectDomainError::NotMember {
        project_id: project.id(),
        email: email.clone(),
    })?;

    if capability == Capability::DeleteProject {
        if project.is_owner(email) {
            return Ok(role);
        }
        return Err(ProjectDomainError::OwnerOnly {
            project_id: project.id(),
        });
    }

    if !role.grants(capability) {
        tracing::debug!(project_id = %project.id(), %email, %role, %capability, "capability denied");
        return Err(ProjectDomainError::MissingCapability {
            project_id: project.id(),
            email: email.clone(),
            role,
            capability,
        });
    }
    Ok(role)
}

/// Checks that `email` may change the status of `task`.
///
/// Managers and admins may change any task; users only those assigned to
/// them.
///
/// # Errors
///
/// Returns the errors of [`authorize`] and
/// [`ProjectDomainError::NotAssignee`] for a `User` who is not assigned.
pub fn authorize_status_change(
    project: &Project,
    task: &ProjectTask,
    email: &EmailAddress,
) -> Result<Role, ProjectDomainError> {
    let role = authorize(project, email, Capability::ChangeAssignedTaskStatus)?;
    if role == Role::User && !task.is_assigned(email) {
        return Err(ProjectDomainError::NotAssignee {
            email: email.clone(),
        });
    }
    Ok(role)
}
