//! Service layer for tasks that belong to projects.

use super::ProjectServiceResult;
use super::lookup::{load_project, load_task, parse_emails};
use crate::identity::domain::Identity;
use crate::project::{
    domain::{
        Capability, ProjectId, ProjectTask, ProjectTaskEdit, ProjectTaskId, authorize,
        authorize_status_change,
    },
    ports::ProjectRepository,
};
use crate::task::domain::{Details, Schedule, TaskStatus};
use chrono::NaiveDate;
use mockable::Clock;
use std::sync::Arc;

/// Request payload for creating a project task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateProjectTaskRequest {
    project_id: ProjectId,
    title: String,
    description: String,
    schedule: Option<(NaiveDate, NaiveDate)>,
    assignees: Vec<String>,
}

impl CreateProjectTaskRequest {
    /// Creates a request with no assignee and no dates. At least one
    /// assignee must be added before the request is accepted.
    #[must_use]
    pub fn new(
        project_id: ProjectId,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            project_id,
            title: title.into(),
            description: description.into(),
            schedule: None,
            assignees: Vec::new(),
        }
    }

    /// Adds an assignee.
    #[must_use]
    pub fn with_assignee(mut self, email: impl Into<String>) -> Self {
        self.assignees.push(email.into());
        self
    }

    /// Sets the date range.
    #[must_use]
    pub const fn with_schedule(mut self, starts_on: NaiveDate, ends_on: NaiveDate) -> Self {
        self.schedule = Some((starts_on, ends_on));
        self
    }
}

/// Request payload for editing a project task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditProjectTaskRequest {
    task_id: ProjectTaskId,
    details: Option<(String, String)>,
    schedule: Option<(NaiveDate, NaiveDate)>,
}

impl EditProjectTaskRequest {
    /// Creates an edit request that changes nothing yet.
    #[must_use]
    pub const fn new(task_id: ProjectTaskId) -> Self {
        Self {
            task_id,
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

/// Request payload for replacing the assignees of a project task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignTaskRequest {
    task_id: ProjectTaskId,
    assignees: Vec<String>,
}

impl AssignTaskRequest {
    /// Creates a request assigning `assignees`, replacing the current set.
    #[must_use]
    pub fn new<I, S>(task_id: ProjectTaskId, assignees: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            task_id,
            assignees: assignees.into_iter().map(Into::into).collect(),
        }
    }
}

/// Request payload for changing the status of a project task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeProjectTaskStatusRequest {
    task_id: ProjectTaskId,
    status: String,
}

impl ChangeProjectTaskStatusRequest {
    /// Creates a status change request. The status is parsed by the service.
    #[must_use]
    pub fn new(task_id: ProjectTaskId, status: impl Into<String>) -> Self {
        Self {
            task_id,
            status: status.into(),
        }
    }
}

/// Project task orchestration service.
#[derive(Clone)]
pub struct ProjectTaskService<P, C>
where
    P: ProjectRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<P>,
    clock: Arc<C>,
}

impl<P, C> ProjectTaskService<P, C>
where
    P: ProjectRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new project task service.
    #[must_use]
    pub const fn new(repository: Arc<P>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Creates a task in a project. Requires [`Capability::ManageTasks`];
    /// every assignee must be the owner or a collaborator.
    ///
    /// # Errors
    ///
    /// Returns `NotFound`, `NotAuthorized`, or validation errors (including
    /// a missing assignee) before anything is written, and a repository
    /// error when persistence fails.
    pub async fn create_task(
        &self,
        identity: &Identity,
        request: CreateProjectTaskRequest,
    ) -> ProjectServiceResult<ProjectTask> {
        let CreateProjectTaskRequest {
            project_id,
            title,
            description,
            schedule: dates,
            assignees: requested,
        } = request;

        let project = load_project(&*self.repository, project_id).await?;
        authorize(&project, identity.email(), Capability::ManageTasks)?;

        let details = Details::new(title, description)?;
        let schedule = dates
            .map(|(starts_on, ends_on)| Schedule::new(starts_on, ends_on, self.today()))
            .transpose()?;
        let assignees = parse_emails(requested)?;
        project.ensure_members(&assignees)?;

        let task = ProjectTask::new(project_id, details, schedule, assignees, &*self.clock)?;
        self.repository.store_task(&task).await?;
        tracing::info!(
            project_id = %project_id,
            task_id = %task.id(),
            assignees = task.assignees().len(),
            "created project task"
        );
        Ok(task)
    }

    /// Edits the title, description, or dates of a project task. Requires
    /// [`Capability::ManageTasks`].
    ///
    /// # Errors
    ///
    /// Returns `NotFound`, `NotAuthorized`, or validation errors before
    /// anything is written, and a repository error when persistence fails.
    pub async fn edit_task(
        &self,
        identity: &Identity,
        request: EditProjectTaskRequest,
    ) -> ProjectServiceResult<ProjectTask> {
        let EditProjectTaskRequest {
            task_id,
            details,
            schedule,
        } = request;

        let (mut task, project) = load_task(&*self.repository, task_id).await?;
        authorize(&project, identity.email(), Capability::ManageTasks)?;

        let edit = ProjectTaskEdit {
            details: details
                .map(|(title, description)| Details::new(title, description))
                .transpose()?,
            schedule: schedule
                .map(|(starts_on, ends_on)| Schedule::new(starts_on, ends_on, self.today()))
                .transpose()?,
        };
        if edit.is_empty() {
            return Ok(task);
        }
        task.edit(edit, &*self.clock);
        self.repository.update_task(&task).await?;
        tracing::info!(task_id = %task_id, "edited project task");
        Ok(task)
    }

    /// Replaces the assignees of a project task. Requires
    /// [`Capability::ManageTasks`].
    ///
    /// # Errors
    ///
    /// Returns `NotFound`, `NotAuthorized`, or validation errors (an empty
    /// set or an outsider) before anything is written, a `Conflict` when an
    /// assignee stopped being a member before the write, and a repository
    /// error when persistence fails.
    pub async fn assign(
        &self,
        identity: &Identity,
        request: AssignTaskRequest,
    ) -> ProjectServiceResult<ProjectTask> {
        let (mut task, project) = load_task(&*self.repository, request.task_id).await?;
        authorize(&project, identity.email(), Capability::ManageTasks)?;

        let assignees = parse_emails(request.assignees)?;
        project.ensure_members(&assignees)?;
        task.assign(assignees, &*self.clock)?;
        self.repository.replace_assignees(&task).await?;
        tracing::info!(
            task_id = %task.id(),
            assignees = task.assignees().len(),
            "assigned project task"
        );
        Ok(task)
    }

    /// Deletes a project task. Requires [`Capability::ManageTasks`].
    ///
    /// # Errors
    ///
    /// Returns `NotFound` or `NotAuthorized` before anything is written, and
    /// a repository error when persistence fails.
    pub async fn delete_task(
        &self,
        identity: &Identity,
        task_id: ProjectTaskId,
    ) -> ProjectServiceResult<()> {
        let (_, project) = load_task(&*self.repository, task_id).await?;
        authorize(&project, identity.email(), Capability::ManageTasks)?;
        self.repository.delete_task(task_id).await?;
        tracing::info!(task_id = %task_id, "deleted project task");
        Ok(())
    }

    /// Changes the status of a project task.
    ///
    /// Managers and admins may change any task of the project; users only
    /// tasks assigned to them. Requesting the current status succeeds and
    /// leaves the task unchanged.
    ///
    /// # Errors
    ///
    /// Returns `NotFound`, `NotAuthorized`, or an unknown-status validation
    /// error before anything is written, and a repository error when
    /// persistence fails.
    pub async fn change_status(
        &self,
        identity: &Identity,
        request: ChangeProjectTaskStatusRequest,
    ) -> ProjectServiceResult<ProjectTask> {
        let target = TaskStatus::try_from(request.status.as_str())?;
        let (mut task, project) = load_task(&*self.repository, request.task_id).await?;
        authorize_status_change(&project, &task, identity.email())?;
        if task.status() == target {
            return Ok(task);
        }

        let from = task.status();
        task.transition_to(target, &*self.clock)?;
        self.repository.update_task_status(&task).await?;
        tracing::info!(task_id = %task.id(), %from, to = %target, "changed project task status");
        Ok(task)
    }

    /// Returns a project task. Requires [`Capability::ViewProject`].
    ///
    /// # Errors
    ///
    /// Returns `NotFound` or `NotAuthorized`, and a repository error when
    /// persistence lookup fails.
    pub async fn find_task(
        &self,
        identity: &Identity,
        task_id: ProjectTaskId,
    ) -> ProjectServiceResult<ProjectTask> {
        let (task, project) = load_task(&*self.repository, task_id).await?;
        authorize(&project, identity.email(), Capability::ViewProject)?;
        Ok(task)
    }

    /// Returns the tasks of a project. Requires [`Capability::ViewProject`].
    ///
    /// # Errors
    ///
    /// Returns `NotFound` or `NotAuthorized`, and a repository error when
    /// persistence lookup fails.
    pub async fn list_tasks(
        &self,
        identity: &Identity,
        project_id: ProjectId,
    ) -> ProjectServiceResult<Vec<ProjectTask>> {
        let project = load_project(&*self.repository, project_id).await?;
        authorize(&project, identity.email(), Capability::ViewProject)?;
        Ok(self.repository.list_tasks(project_id).await?)
    }

    /// Returns the tasks assigned to the caller across every project.
    ///
    /// # Errors
    ///
    /// Returns a repository error when persistence lookup fails.
    pub async fn list_assigned_tasks(
        &self,
        identity: &Identity,
    ) -> ProjectServiceResult<Vec<ProjectTask>> {
        Ok(self
            .repository
            .list_tasks_assigned_to(identity.email())
            .await?)
    }

    fn today(&self) -> NaiveDate {
        self.clock.utc().date_naive()
    }
}
