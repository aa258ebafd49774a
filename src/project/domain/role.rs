//! Collaborator roles and the capabilities they grant.

use super::ParseRoleError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Role held by a user on a project. Ordered from least to most privileged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Can view the project and update tasks assigned to them.
    User,
    /// Can also manage tasks and invite collaborators.
    Manager,
    /// Full control. The project owner is always an `Admin`.
    Admin,
}

/// Action on a project that requires a minimum role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// View the project, its tasks, and its collaborators.
    ViewProject,
    /// Create, edit, assign, and delete project tasks.
    ManageTasks,
    /// Send invitations.
    InviteCollaborators,
    /// Add and remove collaborators directly.
    ManageCollaborators,
    /// Change a collaborator's role.
    ChangeRoles,
    /// Change the project title, description, or dates.
    EditProject,
    /// Change the status of a project task. `User`s may only do so for tasks
    /// assigned to them.
    ChangeAssignedTaskStatus,
    /// Delete the project. Reserved to the owner whatever the role.
    DeleteProject,
}

impl Capability {
    /// Every capability.
    pub const ALL: [Self; 8] = [
        Self::ViewProject,
        Self::ManageTasks,
        Self::InviteCollaborators,
        Self::ManageCollaborators,
        Self::ChangeRoles,
        Self::EditProject,
        Self::ChangeAssignedTaskStatus,
        Self::DeleteProject,
    ];

    /// Returns the canonical name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ViewProject => "view_project",
            Self::ManageTasks => "manage_tasks",
            Self::InviteCollaborators => "invite_collaborators",
            Self::ManageCollaborators => "manage_collaborators",
            Self::ChangeRoles => "change_roles",
            Self::EditProject => "edit_project",
            Self::ChangeAssignedTaskStatus => "change_assigned_task_status",
            Self::DeleteProject => "delete_project",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Role {
    /// Every role, least privileged first.
    pub const ALL: [Self; 3] = [Self::User, Self::Manager, Self::Admin];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Manager => "manager",
            Self::Admin => "admin",
        }
    }

    /// Returns `true` when the role carries `capability`.
    ///
    /// [`Capability::DeleteProject`] is granted to no role; ownership is
    /// checked separately.
    #[must_use]
    pub const fn grants(self, capability: Capability) -> bool {
        match capability {
            Capability::ViewProject | Capability::ChangeAssignedTaskStatus => true,
            Capability::ManageTasks | Capability::InviteCollaborators => {
                matches!(self, Self::Manager | Self::Admin)
            }
            Capability::ManageCollaborators | Capability::ChangeRoles | Capability::EditProject => {
                matches!(self, Self::Admin)
            }
            Capability::DeleteProject => false,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Role {
    type Error = ParseRoleError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "user" => Ok(Self::User),
            "manager" => Ok(Self::Manager),
            "admin" => Ok(Self::Admin),
            _ => Err(ParseRoleError(value.to_owned())),
        }
    }
}
