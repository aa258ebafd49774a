//! Service layer for creating, editing, and listing projects.

use super::lookup::load_project;
use super::ProjectServiceResult;
use crate::identity::domain::Identity;
use crate::project::{
    domain::{Capability, Project, ProjectEdit, ProjectId, Role, authorize},
    ports::ProjectRepository,
};
use crate::task::domain::{Details, Schedule};
use chrono::NaiveDate;
use mockable::Clock;
use std::sync::Arc;

/// Request payload for creating a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateProjectRequest {
    title: String,
    description: String,
    starts_on: NaiveDate,
    ends_on: NaiveDate,
}

impl CreateProjectRequest {
    /// Creates a request with every required field.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        starts_on: NaiveDate,
        ends_on: NaiveDate,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            starts_on,
            ends_on,
        }
    }
}

/// Request payload for editing a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditProjectRequest {
    project_id: ProjectId,
    details: Option<(String, String)>,
    schedule: Option<(NaiveDate, NaiveDate)>,
}

impl EditProjectRequest {
    /// Creates an edit request that changes nothing yet.
    #[must_use]
    pub const fn new(project_id: ProjectId) -> Self {
        Self {
            project_id,
            details: None,
            schedule: None,
        }
    }

    /// Replaces the title and description.
    #[must_use]
    pub fn with_details(mut self, title: impl Into<String>, description: impl Into<String>) -> Self {
        self.details = Some((title.into(), description.into()));
        self
    }

    /// Replaces the date range.
    #[must_use]
    pub const fn with_schedule(mut self, starts_on: NaiveDate, ends_on: NaiveDate) -> Self {
        self.schedule = Some((starts_on, ends_on));
        self
    }
}

/// Project orchestration service.
#[derive(Clone)]
pub struct ProjectService<P, C>
where
    P: ProjectRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<P>,
    clock: Arc<C>,
}

impl<P, C> ProjectService<P, C>
where
    P: ProjectRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new project service.
    #[must_use]
    pub const fn new(repository: Arc<P>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Creates a project owned by the caller.
    ///
    /// # Errors
    ///
    /// Returns a validation error when the details or dates are invalid
    /// (nothing is stored) and a repository error when persistence fails.
    pub async fn create_project(
        &self,
        identity: &Identity,
        request: CreateProjectRequest,
    ) -> ProjectServiceResult<Project> {
        let details = Details::new(request.title, request.description)?;
        let schedule = Schedule::new(request.starts_on, request.ends_on, self.today())?;

        let project = Project::new(identity.email().clone(), details, schedule, &*self.clock);
        self.repository.store_project(&project).await?;
        tracing::info!(project_id = %project.id(), owner = %identity.email(), "created project");
        Ok(project)
    }

    /// Edits the title, description, or dates of a project. Requires
    /// [`Capability::EditProject`].
    ///
    /// # Errors
    ///
    /// Returns `NotFound`, `NotAuthorized`, or validation errors before
    /// anything is written, and a repository error when persistence fails.
    pub async fn edit_project(
        &self,
        identity: &Identity,
        request: EditProjectRequest,
    ) -> ProjectServiceResult<Project> {
        let EditProjectRequest {
            project_id,
            details,
            schedule,
        } = request;

        let mut project = load_project(&*self.repository, project_id).await?;
        authorize(&project, identity.email(), Capability::EditProject)?;

        let edit = ProjectEdit {
            details: details
                .map(|(title, description)| Details::new(title, description))
                .transpose()?,
            schedule: schedule
                .map(|(starts_on, ends_on)| Schedule::new(starts_on, ends_on, self.today()))
                .transpose()?,
        };
        if edit.is_empty() {
            return Ok(project);
        }
        project.edit(edit, &*self.clock);
        self.repository.update_project(&project).await?;
        tracing::info!(project_id = %project_id, editor = %identity.email(), "edited project");
        Ok(project)
    }

    /// Deletes a project with its tasks, collaborators, and invitations.
    /// Only the owner may do this.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` or `NotAuthorized` before anything is written, and
    /// a repository error when persistence fails.
    pub async fn delete_project(
        &self,
        identity: &Identity,
        project_id: ProjectId,
    ) -> ProjectServiceResult<()> {
        let project = load_project(&*self.repository, project_id).await?;
        authorize(&project, identity.email(), Capability::DeleteProject)?;
        self.repository.delete_project(project_id).await?;
        tracing::info!(project_id = %project_id, "deleted project");
        Ok(())
    }

    /// Returns the projects the caller owns.
    ///
    /// # Errors
    ///
    /// Returns a repository error when persistence lookup fails.
    pub async fn list_projects(&self, identity: &Identity) -> ProjectServiceResult<Vec<Project>> {
        Ok(self
            .repository
            .list_owned_projects(identity.email())
            .await?)
    }

    /// Returns the projects the caller collaborates on without owning them.
    ///
    /// # Errors
    ///
    /// Returns a repository error when persistence lookup fails.
    pub async fn list_shared_projects(
        &self,
        identity: &Identity,
    ) -> ProjectServiceResult<Vec<Project>> {
        Ok(self
            .repository
            .list_shared_projects(identity.email())
            .await?)
    }

    /// Returns a project the caller is a member of.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when the project does not exist and
    /// `NotAuthorized` when the caller holds no role on it.
    pub async fn find_project(
        &self,
        identity: &Identity,
        project_id: ProjectId,
    ) -> ProjectServiceResult<Project> {
        let project = load_project(&*self.repository, project_id).await?;
        authorize(&project, identity.email(), Capability::ViewProject)?;
        Ok(project)
    }

    /// Returns the caller's role on a project.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when the project does not exist and
    /// `NotAuthorized` when the caller holds no role on it.
    pub async fn role_of(
        &self,
        identity: &Identity,
        project_id: ProjectId,
    ) -> ProjectServiceResult<Role> {
        let project = load_project(&*self.repository, project_id).await?;
        Ok(authorize(&project, identity.email(), Capability::ViewProject)?)
    }

    fn today(&self) -> NaiveDate {
        self.clock.utc().date_naive()
    }
}
