//! Loading helpers shared by the project services.

use super::{ProjectServiceError, ProjectServiceResult};
use crate::identity::domain::EmailAddress;
use crate::project::{
    domain::{Project, ProjectId, ProjectTask, ProjectTaskId},
    ports::ProjectRepository,
};
use std::collections::BTreeSet;

pub(super) async fn load_project<P>(repository: &P, id: ProjectId) -> ProjectServiceResult<Project>
where
    P: ProjectRepository + ?Sized,
{
    repository
        .find_project(id)
        .await?
        .ok_or(ProjectServiceError::ProjectNotFound(id))
}

/// Loads a task together with the project it belongs to.
pub(super) async fn load_task<P>(
    repository: &P,
    id: ProjectTaskId,
) -> ProjectServiceResult<(ProjectTask, Project)>
where
    P: ProjectRepository + ?Sized,
{
    let task = repository
        .find_task(id)
        .await?
        .ok_or(ProjectServiceError::TaskNotFound(id))?;
    let project = load_project(repository, task.project_id()).await?;
    Ok((task, project))
}

pub(super) fn parse_emails<I, S>(raw: I) -> ProjectServiceResult<BTreeSet<EmailAddress>>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    raw.into_iter()
        .map(|email| EmailAddress::new(email).map_err(ProjectServiceError::from))
        .collect()
}
