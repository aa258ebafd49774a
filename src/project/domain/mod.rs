//! Domain model for shared projects.
//!
//! Titles, descriptions, date ranges, and statuses reuse the value types of
//! [`crate::task::domain`], so projects and project tasks validate exactly
//! like personal tasks.

mod collaborator;
mod error;
mod ids;
mod invitation;
mod permission;
mod project;
mod project_task;
mod role;

pub use collaborator::Collaborator;
pub use error::{ParseInvitationStateError, ParseRoleError, ProjectDomainError};
pub use ids::{InvitationId, ProjectId, ProjectTaskId};
pub use invitation::{Invitation, InvitationState, PersistedInvitationData};
pub use permission::{authorize, authorize_status_change, role_of};
pub use project::{PersistedProjectData, Project, ProjectEdit};
pub use project_task::{PersistedProjectTaskData, ProjectTask, ProjectTaskEdit};
pub use role::{Capability, Role};
