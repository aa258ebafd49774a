//! Application services for projects, project tasks, and collaboration.

mod collaboration;
mod error;
mod lookup;
mod projects;
mod tasks;

pub use collaboration::{CollaborationService, CollaboratorRequest, InviteRequest};
pub use error::{ProjectServiceError, ProjectServiceResult};
pub use projects::{CreateProjectRequest, EditProjectRequest, ProjectService};
pub use tasks::{
    AssignTaskRequest, ChangeProjectTaskStatusRequest, CreateProjectTaskRequest,
    EditProjectTaskRequest, ProjectTaskService,
};
