//! In-memory store for projects, project tasks, and invitations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::identity::domain::EmailAddress;
use crate::project::{
    domain::{
        Collaborator, Invitation, InvitationId, PersistedProjectData, PersistedProjectTaskData,
        Project, ProjectId, ProjectTask, ProjectTaskId, Role,
    },
    ports::{
        InvitationRepository, ProjectRepository, ProjectRepositoryError, ProjectRepositoryResult,
    },
};

/// Thread-safe in-memory store implementing both project ports.
///
/// Every call takes a single lock and validates before writing, so a failed
/// call leaves the state unchanged.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProjectStore {
    state: Arc<RwLock<InMemoryProjectState>>,
}

#[derive(Debug, Default)]
struct InMemoryProjectState {
    projects: HashMap<ProjectId, Project>,
    tasks: HashMap<ProjectTaskId, ProjectTask>,
    invitations: HashMap<InvitationId, Invitation>,
}

impl InMemoryProjectStore {
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> ProjectRepositoryResult<RwLockReadGuard<'_, InMemoryProjectState>> {
        self.state.read().map_err(|err| {
            ProjectRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn write(&self) -> ProjectRepositoryResult<RwLockWriteGuard<'_, InMemoryProjectState>> {
        self.state.write().map_err(|err| {
            ProjectRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }
}

impl InMemoryProjectState {
    fn project(&self, id: ProjectId) -> ProjectRepositoryResult<&Project> {
        self.projects
            .get(&id)
            .ok_or(ProjectRepositoryError::ProjectNotFound(id))
    }

    fn replace_collaborators(
        &mut self,
        id: ProjectId,
        collaborators: Vec<Collaborator>,
        updated_at: DateTime<Utc>,
    ) -> ProjectRepositoryResult<()> {
        let stored = self.project(id)?;
        let rebuilt = Project::from_persisted(PersistedProjectData {
            id,
            owner: stored.owner().clone(),
            details: stored.details().clone(),
            schedule: stored.schedule(),
            collaborators,
            created_at: stored.created_at(),
            updated_at,
        });
        self.projects.insert(id, rebuilt);
        Ok(())
    }

    fn ensure_assignees_are_members(&self, task: &ProjectTask) -> ProjectRepositoryResult<()> {
        let project = self.project(task.project_id())?;
        match task
            .assignees()
            .iter()
            .find(|email| !project.is_member(email))
        {
            Some(outsider) => Err(ProjectRepositoryError::AssigneeNotMember(outsider.clone())),
            None => Ok(()),
        }
    }

    fn stored_task(&self, id: ProjectTaskId) -> ProjectRepositoryResult<&ProjectTask> {
        self.tasks
            .get(&id)
            .ok_or(ProjectRepositoryError::TaskNotFound(id))
    }

    fn pending_invitation(&self, id: InvitationId) -> ProjectRepositoryResult<&Invitation> {
        let stored = self
            .invitations
            .get(&id)
            .ok_or(ProjectRepositoryError::InvitationNotFound(id))?;
        if !stored.is_pending() {
            return Err(ProjectRepositoryError::InvitationNotPending(id));
        }
        Ok(stored)
    }

    fn collaborators_with(
        &self,
        id: ProjectId,
        collaborator: &Collaborator,
    ) -> ProjectRepositoryResult<Vec<Collaborator>> {
        let stored = self.project(id)?;
        if stored.collaborator(collaborator.email()).is_some() {
            return Err(ProjectRepositoryError::DuplicateCollaborator(
                collaborator.email().clone(),
            ));
        }
        let mut collaborators = stored.collaborators().to_vec();
        collaborators.push(collaborator.clone());
        Ok(collaborators)
    }
}

fn oldest_first<T>(mut items: Vec<T>, key: impl Fn(&T) -> DateTime<Utc>) -> Vec<T> {
    items.sort_by_key(key);
    items
}

#[async_trait]
impl ProjectRepository for InMemoryProjectStore {
    async fn store_project(&self, project: &Project) -> ProjectRepositoryResult<()> {
        let mut state = self.write()?;
        if state.projects.contains_key(&project.id()) {
            return Err(ProjectRepositoryError::DuplicateProject(project.id()));
        }
        state.projects.insert(project.id(), project.clone());
        Ok(())
    }

    async fn update_project(&self, project: &Project) -> ProjectRepositoryResult<()> {
        let mut state = self.write()?;
        let stored = state.project(project.id())?;
        let rebuilt = Project::from_persisted(PersistedProjectData {
            id: project.id(),
            owner: stored.owner().clone(),
            details: project.details().clone(),
            schedule: project.schedule(),
            collaborators: stored.collaborators().to_vec(),
            created_at: stored.created_at(),
            updated_at: project.updated_at(),
        });
        state.projects.insert(project.id(), rebuilt);
        Ok(())
    }

    async fn delete_project(&self, id: ProjectId) -> ProjectRepositoryResult<()> {
        let mut state = self.write()?;
        state
            .projects
            .remove(&id)
            .ok_or(ProjectRepositoryError::ProjectNotFound(id))?;
        state.tasks.retain(|_, task| task.project_id() != id);
        state
            .invitations
            .retain(|_, invitation| invitation.project_id() != id);
        Ok(())
    }

    async fn find_project(&self, id: ProjectId) -> ProjectRepositoryResult<Option<Project>> {
        let state = self.read()?;
        Ok(state.projects.get(&id).cloned())
    }

    async fn list_owned_projects(
        &self,
        owner: &EmailAddress,
    ) -> ProjectRepositoryResult<Vec<Project>> {
        let state = self.read()?;
        let owned: Vec<Project> = state
            .projects
            .values()
            .filter(|project| project.is_owner(owner))
            .cloned()
            .collect();
        Ok(oldest_first(owned, Project::created_at))
    }

    async fn list_shared_projects(
        &self,
        email: &EmailAddress,
    ) -> ProjectRepositoryResult<Vec<Project>> {
        let state = self.read()?;
        let shared: Vec<Project> = state
            .projects
            .values()
            .filter(|project| project.collaborator(email).is_some())
            .cloned()
            .collect();
        Ok(oldest_first(shared, Project::created_at))
    }

    async fn add_collaborator(
        &self,
        project: &Project,
        collaborator: &Collaborator,
    ) -> ProjectRepositoryResult<()> {
        let mut state = self.write()?;
        let collaborators = state.collaborators_with(project.id(), collaborator)?;
        state.replace_collaborators(project.id(), collaborators, project.updated_at())
    }

    async fn remove_collaborator(
        &self,
        project: &Project,
        email: &EmailAddress,
    ) -> ProjectRepositoryResult<()> {
        let mut state = self.write()?;
        let stored = state.project(project.id())?;
        if stored.collaborator(email).is_none() {
            return Err(ProjectRepositoryError::CollaboratorNotFound(email.clone()));
        }
        let remaining: Vec<Collaborator> = stored
            .collaborators()
            .iter()
            .filter(|c| c.email() != email)
            .cloned()
            .collect();

        let at = project.updated_at();
        state.replace_collaborators(project.id(), remaining, at)?;
        for task in state.tasks.values_mut() {
            if task.project_id() == project.id() {
                task.detach(email, at);
            }
        }
        Ok(())
    }

    async fn update_collaborator_role(
        &self,
        project: &Project,
        email: &EmailAddress,
        role: Role,
    ) -> ProjectRepositoryResult<()> {
        let mut state = self.write()?;
        let stored = state.project(project.id())?;
        if stored.collaborator(email).is_none() {
            return Err(ProjectRepositoryError::CollaboratorNotFound(email.clone()));
        }
        let collaborators: Vec<Collaborator> = stored
            .collaborators()
            .iter()
            .map(|c| {
                if c.email() == email {
                    Collaborator::from_persisted(
                        c.email().clone(),
                        c.last_name().to_owned(),
                        c.first_name().to_owned(),
                        role,
                        c.joined_at(),
                    )
                } else {
                    c.clone()
                }
            })
            .collect();
        state.replace_collaborators(project.id(), collaborators, project.updated_at())
    }

    async fn store_task(&self, task: &ProjectTask) -> ProjectRepositoryResult<()> {
        let mut state = self.write()?;
        state.ensure_assignees_are_members(task)?;
        if state.tasks.contains_key(&task.id()) {
            return Err(ProjectRepositoryError::DuplicateTask(task.id()));
        }
        state.tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn update_task(&self, task: &ProjectTask) -> ProjectRepositoryResult<()> {
        let mut state = self.write()?;
        let stored = state.stored_task(task.id())?;
        let rebuilt = ProjectTask::from_persisted(PersistedProjectTaskData {
            id: task.id(),
            project_id: stored.project_id(),
            details: task.details().clone(),
            schedule: task.schedule(),
            status: task.status(),
            assignees: stored.assignees().clone(),
            created_at: stored.created_at(),
            updated_at: task.updated_at(),
        });
        state.tasks.insert(task.id(), rebuilt);
        Ok(())
    }

    async fn update_task_status(&self, task: &ProjectTask) -> ProjectRepositoryResult<()> {
        let mut state = self.write()?;
        let stored = state.stored_task(task.id())?;
        let rebuilt = ProjectTask::from_persisted(PersistedProjectTaskData {
            id: task.id(),
            project_id: stored.project_id(),
            details: stored.details().clone(),
            schedule: stored.schedule(),
            status: task.status(),
            assignees: stored.assignees().clone(),
            created_at: stored.created_at(),
            updated_at: task.updated_at(),
        });
        state.tasks.insert(task.id(), rebuilt);
        Ok(())
    }

    async fn replace_assignees(&self, task: &ProjectTask) -> ProjectRepositoryResult<()> {
        let mut state = self.write()?;
        let stored = state.stored_task(task.id())?;
        let rebuilt = ProjectTask::from_persisted(PersistedProjectTaskData {
            id: task.id(),
            project_id: stored.project_id(),
            details: stored.details().clone(),
            schedule: stored.schedule(),
            status: stored.status(),
            assignees: task.assignees().clone(),
            created_at: stored.created_at(),
            updated_at: task.updated_at(),
        });
        state.ensure_assignees_are_members(&rebuilt)?;
        state.tasks.insert(task.id(), rebuilt);
        Ok(())
    }

    async fn delete_task(&self, id: ProjectTaskId) -> ProjectRepositoryResult<()> {
        let mut state = self.write()?;
        state
            .tasks
            .remove(&id)
            .ok_or(ProjectRepositoryError::TaskNotFound(id))?;
        Ok(())
    }

    async fn find_task(&self, id: ProjectTaskId) -> ProjectRepositoryResult<Option<ProjectTask>> {
        let state = self.read()?;
        Ok(state.tasks.get(&id).cloned())
    }

    async fn list_tasks(
        &self,
        project_id: ProjectId,
    ) -> ProjectRepositoryResult<Vec<ProjectTask>> {
        let state = self.read()?;
        let tasks: Vec<ProjectTask> = state
            .tasks
            .values()
            .filter(|task| task.project_id() == project_id)
            .cloned()
            .collect();
        Ok(oldest_first(tasks, ProjectTask::created_at))
    }

    async fn list_tasks_assigned_to(
        &self,
        email: &EmailAddress,
    ) -> ProjectRepositoryResult<Vec<ProjectTask>> {
        let state = self.read()?;
        let tasks: Vec<ProjectTask> = state
            .tasks
            .values()
            .filter(|task| task.is_assigned(email))
            .cloned()
            .collect();
        Ok(oldest_first(tasks, ProjectTask::created_at))
    }
}

#[async_trait]
impl InvitationRepository for InMemoryProjectStore {
    async fn store_invitation(&self, invitation: &Invitation) -> ProjectRepositoryResult<()> {
        let mut state = self.write()?;
        state.project(invitation.project_id())?;
        let pending_exists = state.invitations.values().any(|existing| {
            existing.is_pending()
                && existing.project_id() == invitation.project_id()
                && existing.invitee() == invitation.invitee()
        });
        if pending_exists || state.invitations.contains_key(&invitation.id()) {
            return Err(ProjectRepositoryError::PendingInvitationExists {
                project_id: invitation.project_id(),
                invitee: invitation.invitee().clone(),
            });
        }
        state.invitations.insert(invitation.id(), invitation.clone());
        Ok(())
    }

    async fn find_invitation(
        &self,
        id: InvitationId,
    ) -> ProjectRepositoryResult<Option<Invitation>> {
        let state = self.read()?;
        Ok(state.invitations.get(&id).cloned())
    }

    async fn list_pending_invitations(
        &self,
        invitee: &EmailAddress,
    ) -> ProjectRepositoryResult<Vec<Invitation>> {
        let state = self.read()?;
        let pending: Vec<Invitation> = state
            .invitations
            .values()
            .filter(|invitation| invitation.is_pending() && invitation.invitee() == invitee)
            .cloned()
            .collect();
        Ok(oldest_first(pending, Invitation::created_at))
    }

    async fn accept_invitation(
        &self,
        invitation: &Invitation,
        project: &Project,
        collaborator: &Collaborator,
    ) -> ProjectRepositoryResult<()> {
        let mut state = self.write()?;
        state.pending_invitation(invitation.id())?;
        let collaborators = state.collaborators_with(project.id(), collaborator)?;

        state.replace_collaborators(project.id(), collaborators, project.updated_at())?;
        state.invitations.insert(invitation.id(), invitation.clone());
        Ok(())
    }

    async fn decline_invitation(&self, invitation: &Invitation) -> ProjectRepositoryResult<()> {
        let mut state = self.write()?;
        state.pending_invitation(invitation.id())?;
        state.invitations.insert(invitation.id(), invitation.clone());
        Ok(())
    }
}
