//! Service layer for personal task creation, editing, and status changes.

use crate::ErrorKind;
use crate::identity::domain::{EmailAddress, Identity};
use crate::task::{
    domain::{
        Details, ParseTaskStatusError, Schedule, Task, TaskDomainError, TaskEdit, TaskId,
        TaskStatus,
    },
    ports::{TaskRepository, TaskRepositoryError},
};
use chrono::NaiveDate;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for creating a personal task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    title: String,
    description: String,
    starts_on: NaiveDate,
    ends_on: NaiveDate,
}

impl CreateTaskRequest {
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

/// Request payload for editing a personal task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditTaskRequest {
    task_id: TaskId,
    details: Option<(String, String)>,
    schedule: Option<(NaiveDate, NaiveDate)>,
}

impl EditTaskRequest {
    /// Creates an edit request that changes nothing yet.
    #[must_use]
    pub const fn new(task_id: TaskId) -> Self {
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

/// Request payload for moving a task to another status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeStatusRequest {
    task_id: TaskId,
    status: String,
}

impl ChangeStatusRequest {
    /// Creates a status change request. The status is parsed by the service.
    #[must_use]
    pub fn new(task_id: TaskId, status: impl Into<String>) -> Self {
        Self {
            task_id,
            status: status.into(),
        }
    }
}

/// Service-level errors for personal task operations.
#[derive(Debug, Error)]
pub enum TaskLifecycleError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// The requested status string is unknown.
    #[error(transparent)]
    InvalidStatus(#[from] ParseTaskStatusError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
    /// The task does not exist.
    #[error("task not found: {0}")]
    NotFound(TaskId),
    /// The caller does not own the task.
    #[error("{user} does not own task {task_id}")]
    NotOwner {
        /// Requested task.
        task_id: TaskId,
        /// Calling user.
        user: EmailAddress,
    },
}

impl TaskLifecycleError {
    /// Classifies the error for callers.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Domain(err) => err.kind(),
            Self::InvalidStatus(_) => ErrorKind::ValidationFailed,
            Self::Repository(err) => err.kind(),
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::NotOwner { .. } => ErrorKind::NotAuthorized,
        }
    }
}

/// Result type for task lifecycle service operations.
pub type TaskLifecycleResult<T> = Result<T, TaskLifecycleError>;

/// Personal task orchestration service.
#[derive(Clone)]
pub struct TaskLifecycleService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> TaskLifecycleService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task lifecycle service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Creates a personal task owned by the caller.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Domain`] when the details or dates fail
    /// validation (nothing is stored), or [`TaskLifecycleError::Repository`]
    /// when persistence fails.
    pub async fn create_task(
        &self,
        identity: &Identity,
        request: CreateTaskRequest,
    ) -> TaskLifecycleResult<Task> {
        let details = Details::new(request.title, request.description)?;
        let schedule = Schedule::new(request.starts_on, request.ends_on, self.today())?;

        let task = Task::new(identity.email().clone(), details, schedule, &*self.clock);
        self.repository.store(&task).await?;
        tracing::info!(task_id = %task.id(), owner = %identity.email(), "created task");
        Ok(task)
    }

    /// Edits the title, description, or dates of one of the caller's tasks.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] or
    /// [`TaskLifecycleError::NotOwner`] when the task is not the caller's,
    /// [`TaskLifecycleError::Domain`] when a new value fails validation, and
    /// [`TaskLifecycleError::Repository`] when persistence fails.
    pub async fn edit_task(
        &self,
        identity: &Identity,
        request: EditTaskRequest,
    ) -> TaskLifecycleResult<Task> {
        let EditTaskRequest {
            task_id,
            details,
            schedule,
        } = request;

        let edit = TaskEdit {
            details: details
                .map(|(title, description)| Details::new(title, description))
                .transpose()?,
            schedule: schedule
                .map(|(starts_on, ends_on)| Schedule::new(starts_on, ends_on, self.today()))
                .transpose()?,
        };

        let mut task = self.load_owned(identity, task_id).await?;
        if edit.is_empty() {
            return Ok(task);
        }
        task.edit(edit, &*self.clock);
        self.repository.update(&task).await?;
        tracing::info!(task_id = %task_id, "edited task");
        Ok(task)
    }

    /// Moves one of the caller's tasks to another status.
    ///
    /// Requesting the current status succeeds and leaves the task unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::InvalidStatus`] for an unknown status,
    /// [`TaskLifecycleError::NotFound`] or [`TaskLifecycleError::NotOwner`]
    /// when the task is not the caller's, and
    /// [`TaskLifecycleError::Repository`] when persistence fails.
    pub async fn change_status(
        &self,
        identity: &Identity,
        request: ChangeStatusRequest,
    ) -> TaskLifecycleResult<Task> {
        let target = TaskStatus::try_from(request.status.as_str())?;
        let mut task = self.load_owned(identity, request.task_id).await?;
        if task.status() == target {
            return Ok(task);
        }

        let from = task.status();
        task.transition_to(target, &*self.clock)?;
        self.repository.update(&task).await?;
        tracing::info!(task_id = %task.id(), %from, to = %target, "changed task status");
        Ok(task)
    }

    /// Deletes one of the caller's tasks.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] or
    /// [`TaskLifecycleError::NotOwner`] when the task is not the caller's and
    /// [`TaskLifecycleError::Repository`] when persistence fails.
    pub async fn delete_task(&self, identity: &Identity, task_id: TaskId) -> TaskLifecycleResult<()> {
        self.load_owned(identity, task_id).await?;
        self.repository.delete(task_id).await?;
        tracing::info!(task_id = %task_id, "deleted task");
        Ok(())
    }

    /// Returns the caller's tasks.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when persistence lookup
    /// fails.
    pub async fn list_tasks(&self, identity: &Identity) -> TaskLifecycleResult<Vec<Task>> {
        Ok(self.repository.list_by_owner(identity.email()).await?)
    }

    /// Returns one of the caller's tasks.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] or
    /// [`TaskLifecycleError::NotOwner`] when the task is not the caller's and
    /// [`TaskLifecycleError::Repository`] when persistence lookup fails.
    pub async fn find_task(&self, identity: &Identity, task_id: TaskId) -> TaskLifecycleResult<Task> {
        self.load_owned(identity, task_id).await
    }

    async fn load_owned(&self, identity: &Identity, task_id: TaskId) -> TaskLifecycleResult<Task> {
        let task = self
            .repository
            .find_by_id(task_id)
            .await?
            .ok_or(TaskLifecycleError::NotFound(task_id))?;
        if !task.is_owned_by(identity.email()) {
            tracing::warn!(task_id = %task_id, user = %identity.email(), "task access denied");
            return Err(TaskLifecycleError::NotOwner {
                task_id,
                user: identity.email().clone(),
            });
        }
        Ok(task)
    }

    fn today(&self) -> NaiveDate {
        self.clock.utc().date_naive()
    }
}
