//! `PostgreSQL` store implementing the project and invitation ports.
//!
//! Compound operations run inside one transaction. Child rows
//! (collaborators, tasks, assignees, invitations) are removed by
//! `ON DELETE CASCADE` when their project goes.

use super::{
    models::{AssigneeRow, CollaboratorRow, InvitationRow, ProjectRow, ProjectTaskRow},
    schema::{
        project_collaborators, project_invitations, project_task_assignees, project_tasks,
        projects,
    },
};
use crate::db::PgPool;
use crate::identity::domain::EmailAddress;
use crate::project::{
    domain::{
        Collaborator, Invitation, InvitationId, InvitationState, PersistedInvitationData,
        PersistedProjectData, PersistedProjectTaskData, Project, ProjectId, ProjectTask,
        ProjectTaskId, Role,
    },
    ports::{
        InvitationRepository, ProjectRepository, ProjectRepositoryError, ProjectRepositoryResult,
    },
};
use crate::task::domain::{Details, Schedule, TaskStatus};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use std::collections::{BTreeSet, HashMap};
use uuid::Uuid;

/// `PostgreSQL`-backed project and invitation store.
#[derive(Debug, Clone)]
pub struct PostgresProjectStore {
    pool: PgPool,
}

impl PostgresProjectStore {
    /// Creates a new store from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> ProjectRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> ProjectRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(ProjectRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(ProjectRepositoryError::persistence)?
    }
}

impl From<DieselError> for ProjectRepositoryError {
    fn from(err: DieselError) -> Self {
        Self::persistence(err)
    }
}

const fn is_unique_violation(err: &DieselError) -> bool {
    matches!(
        err,
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)
    )
}

const fn is_foreign_key_violation(err: &DieselError) -> bool {
    matches!(
        err,
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _)
    )
}

#[async_trait]
impl ProjectRepository for PostgresProjectStore {
    async fn store_project(&self, project: &Project) -> ProjectRepositoryResult<()> {
        let project_id = project.id();
        let row = project_row(project);
        let collaborators: Vec<CollaboratorRow> = project
            .collaborators()
            .iter()
            .map(|c| collaborator_row(project_id, c))
            .collect();
        self.run_blocking(move |connection| {
            connection.transaction::<_, ProjectRepositoryError, _>(|tx| {
                diesel::insert_into(projects::table)
                    .values(&row)
                    .execute(tx)
                    .map_err(|err| {
                        if is_unique_violation(&err) {
                            ProjectRepositoryError::DuplicateProject(project_id)
                        } else {
                            err.into()
                        }
                    })?;
                if !collaborators.is_empty() {
                    diesel::insert_into(project_collaborators::table)
                        .values(&collaborators)
                        .execute(tx)?;
                }
                Ok(())
            })
        })
        .await
    }

    async fn update_project(&self, project: &Project) -> ProjectRepositoryResult<()> {
        let project_id = project.id();
        let row = project_row(project);
        self.run_blocking(move |connection| {
            let updated = diesel::update(projects::table.find(row.id))
                .set((
                    projects::title.eq(&row.title),
                    projects::description.eq(&row.description),
                    projects::starts_on.eq(row.starts_on),
                    projects::ends_on.eq(row.ends_on),
                    projects::updated_at.eq(row.updated_at),
                ))
                .execute(connection)?;
            if updated == 0 {
                return Err(ProjectRepositoryError::ProjectNotFound(project_id));
            }
            Ok(())
        })
        .await
    }

    async fn delete_project(&self, id: ProjectId) -> ProjectRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let deleted =
                diesel::delete(projects::table.find(id.into_inner())).execute(connection)?;
            if deleted == 0 {
                return Err(ProjectRepositoryError::ProjectNotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn find_project(&self, id: ProjectId) -> ProjectRepositoryResult<Option<Project>> {
        self.run_blocking(move |connection| {
            let rows = projects::table
                .find(id.into_inner())
                .select(ProjectRow::as_select())
                .load::<ProjectRow>(connection)?;
            Ok(load_projects(connection, rows)?.pop())
        })
        .await
    }

    async fn list_owned_projects(
        &self,
        owner: &EmailAddress,
    ) -> ProjectRepositoryResult<Vec<Project>> {
        let owner_email = owner.as_str().to_owned();
        self.run_blocking(move |connection| {
            let rows = projects::table
                .filter(projects::owner_email.eq(owner_email))
                .order(projects::created_at.asc())
                .select(ProjectRow::as_select())
                .load::<ProjectRow>(connection)?;
            load_projects(connection, rows)
        })
        .await
    }

    async fn list_shared_projects(
        &self,
        email: &EmailAddress,
    ) -> ProjectRepositoryResult<Vec<Project>> {
        let collaborator_email = email.as_str().to_owned();
        self.run_blocking(move |connection| {
            let shared_ids = project_collaborators::table
                .filter(project_collaborators::email.eq(collaborator_email))
                .select(project_collaborators::project_id);
            let rows = projects::table
                .filter(projects::id.eq_any(shared_ids))
                .order(projects::created_at.asc())
                .select(ProjectRow::as_select())
                .load::<ProjectRow>(connection)?;
            load_projects(connection, rows)
        })
        .await
    }

    async fn add_collaborator(
        &self,
        project: &Project,
        collaborator: &Collaborator,
    ) -> ProjectRepositoryResult<()> {
        let project_id = project.id();
        let updated_at = project.updated_at();
        let email = collaborator.email().clone();
        let row = collaborator_row(project_id, collaborator);
        self.run_blocking(move |connection| {
            connection.transaction::<_, ProjectRepositoryError, _>(|tx| {
                touch_project(tx, project_id, updated_at)?;
                insert_collaborator(tx, &row, email)
            })
        })
        .await
    }

    async fn remove_collaborator(
        &self,
        project: &Project,
        email: &EmailAddress,
    ) -> ProjectRepositoryResult<()> {
        let project_id = project.id();
        let updated_at = project.updated_at();
        let removed_email = email.clone();
        self.run_blocking(move |connection| {
            connection.transaction::<_, ProjectRepositoryError, _>(|tx| {
                touch_project(tx, project_id, updated_at)?;
                let removed = diesel::delete(
                    project_collaborators::table
                        .filter(project_collaborators::project_id.eq(project_id.into_inner()))
                        .filter(project_collaborators::email.eq(removed_email.as_str())),
                )
                .execute(tx)?;
                if removed == 0 {
                    return Err(ProjectRepositoryError::CollaboratorNotFound(removed_email));
                }

                let project_task_ids = project_tasks::table
                    .filter(project_tasks::project_id.eq(project_id.into_inner()))
                    .select(project_tasks::id);
                let detached: Vec<Uuid> = diesel::delete(
                    project_task_assignees::table
                        .filter(project_task_assignees::email.eq(removed_email.as_str()))
                        .filter(project_task_assignees::task_id.eq_any(project_task_ids)),
                )
                .returning(project_task_assignees::task_id)
                .get_results(tx)?;
                diesel::update(project_tasks::table.filter(project_tasks::id.eq_any(&detached)))
                    .set(project_tasks::updated_at.eq(updated_at))
                    .execute(tx)?;
                tracing::debug!(
                    project_id = %project_id,
                    tasks = detached.len(),
                    "detached removed collaborator from tasks"
                );
                Ok(())
            })
        })
        .await
    }

    async fn update_collaborator_role(
        &self,
        project: &Project,
        email: &EmailAddress,
        role: Role,
    ) -> ProjectRepositoryResult<()> {
        let project_id = project.id();
        let updated_at = project.updated_at();
        let collaborator_email = email.clone();
        self.run_blocking(move |connection| {
            connection.transaction::<_, ProjectRepositoryError, _>(|tx| {
                touch_project(tx, project_id, updated_at)?;
                let updated = diesel::update(
                    project_collaborators::table
                        .filter(project_collaborators::project_id.eq(project_id.into_inner()))
                        .filter(project_collaborators::email.eq(collaborator_email.as_str())),
                )
                .set(project_collaborators::role.eq(role.as_str()))
                .execute(tx)?;
                if updated == 0 {
                    return Err(ProjectRepositoryError::CollaboratorNotFound(collaborator_email));
                }
                Ok(())
            })
        })
        .await
    }

    async fn store_task(&self, task: &ProjectTask) -> ProjectRepositoryResult<()> {
        let task_id = task.id();
        let project_id = task.project_id();
        let requested = task.assignees().clone();
        let row = project_task_row(task);
        let assignees = assignee_rows(task);
        self.run_blocking(move |connection| {
            connection.transaction::<_, ProjectRepositoryError, _>(|tx| {
                ensure_members(tx, project_id, &requested)?;
                diesel::insert_into(project_tasks::table)
                    .values(&row)
                    .execute(tx)
                    .map_err(|err| {
                        if is_unique_violation(&err) {
                            ProjectRepositoryError::DuplicateTask(task_id)
                        } else if is_foreign_key_violation(&err) {
                            ProjectRepositoryError::ProjectNotFound(project_id)
                        } else {
                            err.into()
                        }
                    })?;
                if !assignees.is_empty() {
                    diesel::insert_into(project_task_assignees::table)
                        .values(&assignees)
                        .execute(tx)?;
                }
                Ok(())
            })
        })
        .await
    }

    async fn update_task(&self, task: &ProjectTask) -> ProjectRepositoryResult<()> {
        let task_id = task.id();
        let row = project_task_row(task);
        self.run_blocking(move |connection| {
            let updated = diesel::update(project_tasks::table.find(row.id))
                .set((
                    project_tasks::title.eq(&row.title),
                    project_tasks::description.eq(&row.description),
                    project_tasks::starts_on.eq(row.starts_on),
                    project_tasks::ends_on.eq(row.ends_on),
                    project_tasks::status.eq(&row.status),
                    project_tasks::updated_at.eq(row.updated_at),
                ))
                .execute(connection)?;
            if updated == 0 {
                return Err(ProjectRepositoryError::TaskNotFound(task_id));
            }
            Ok(())
        })
        .await
    }

    async fn update_task_status(&self, task: &ProjectTask) -> ProjectRepositoryResult<()> {
        let task_id = task.id();
        let status = task.status();
        let updated_at = task.updated_at();
        self.run_blocking(move |connection| {
            let updated = diesel::update(project_tasks::table.find(task_id.into_inner()))
                .set((
                    project_tasks::status.eq(status.as_str()),
                    project_tasks::updated_at.eq(updated_at),
                ))
                .execute(connection)?;
            if updated == 0 {
                return Err(ProjectRepositoryError::TaskNotFound(task_id));
            }
            Ok(())
        })
        .await
    }

    async fn replace_assignees(&self, task: &ProjectTask) -> ProjectRepositoryResult<()> {
        let task_id = task.id();
        let updated_at = task.updated_at();
        let requested = task.assignees().clone();
        let assignees = assignee_rows(task);
        self.run_blocking(move |connection| {
            connection.transaction::<_, ProjectRepositoryError, _>(|tx| {
                let stored_project = project_tasks::table
                    .find(task_id.into_inner())
                    .select(project_tasks::project_id)
                    .first::<Uuid>(tx)
                    .optional()?
                    .ok_or(ProjectRepositoryError::TaskNotFound(task_id))?;
                ensure_members(tx, ProjectId::from_uuid(stored_project), &requested)?;

                diesel::update(project_tasks::table.find(task_id.into_inner()))
                    .set(project_tasks::updated_at.eq(updated_at))
                    .execute(tx)?;
                diesel::delete(
                    project_task_assignees::table
                        .filter(project_task_assignees::task_id.eq(task_id.into_inner())),
                )
                .execute(tx)?;
                if !assignees.is_empty() {
                    diesel::insert_into(project_task_assignees::table)
                        .values(&assignees)
                        .execute(tx)?;
                }
                Ok(())
            })
        })
        .await
    }

    async fn delete_task(&self, id: ProjectTaskId) -> ProjectRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let deleted =
                diesel::delete(project_tasks::table.find(id.into_inner())).execute(connection)?;
            if deleted == 0 {
                return Err(ProjectRepositoryError::TaskNotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn find_task(&self, id: ProjectTaskId) -> ProjectRepositoryResult<Option<ProjectTask>> {
        self.run_blocking(move |connection| {
            let rows = project_tasks::table
                .find(id.into_inner())
                .select(ProjectTaskRow::as_select())
                .load::<ProjectTaskRow>(connection)?;
            Ok(load_tasks(connection, rows)?.pop())
        })
        .await
    }

    async fn list_tasks(
        &self,
        project_id: ProjectId,
    ) -> ProjectRepositoryResult<Vec<ProjectTask>> {
        self.run_blocking(move |connection| {
            let rows = project_tasks::table
                .filter(project_tasks::project_id.eq(project_id.into_inner()))
                .order(project_tasks::created_at.asc())
                .select(ProjectTaskRow::as_select())
                .load::<ProjectTaskRow>(connection)?;
            load_tasks(connection, rows)
        })
        .await
    }

    async fn list_tasks_assigned_to(
        &self,
        email: &EmailAddress,
    ) -> ProjectRepositoryResult<Vec<ProjectTask>> {
        let assignee_email = email.as_str().to_owned();
        self.run_blocking(move |connection| {
            let assigned_ids = project_task_assignees::table
                .filter(project_task_assignees::email.eq(assignee_email))
                .select(project_task_assignees::task_id);
            let rows = project_tasks::table
                .filter(project_tasks::id.eq_any(assigned_ids))
                .order(project_tasks::created_at.asc())
                .select(ProjectTaskRow::as_select())
                .load::<ProjectTaskRow>(connection)?;
            load_tasks(connection, rows)
        })
        .await
    }
}

#[async_trait]
impl InvitationRepository for PostgresProjectStore {
    async fn store_invitation(&self, invitation: &Invitation) -> ProjectRepositoryResult<()> {
        let project_id = invitation.project_id();
        let invitee = invitation.invitee().clone();
        let row = invitation_row(invitation);
        self.run_blocking(move |connection| {
            diesel::insert_into(project_invitations::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| {
                    if is_unique_violation(&err) {
                        ProjectRepositoryError::PendingInvitationExists {
                            project_id,
                            invitee,
                        }
                    } else if is_foreign_key_violation(&err) {
                        ProjectRepositoryError::ProjectNotFound(project_id)
                    } else {
                        err.into()
                    }
                })?;
            Ok(())
        })
        .await
    }

    async fn find_invitation(
        &self,
        id: InvitationId,
    ) -> ProjectRepositoryResult<Option<Invitation>> {
        self.run_blocking(move |connection| {
            project_invitations::table
                .find(id.into_inner())
                .select(InvitationRow::as_select())
                .first::<InvitationRow>(connection)
                .optional()?
                .map(row_to_invitation)
                .transpose()
        })
        .await
    }

    async fn list_pending_invitations(
        &self,
        invitee: &EmailAddress,
    ) -> ProjectRepositoryResult<Vec<Invitation>> {
        let invitee_email = invitee.as_str().to_owned();
        self.run_blocking(move |connection| {
            project_invitations::table
                .filter(project_invitations::invitee_email.eq(invitee_email))
                .filter(project_invitations::state.eq(InvitationState::Pending.as_str()))
                .order(project_invitations::created_at.asc())
                .select(InvitationRow::as_select())
                .load::<InvitationRow>(connection)?
                .into_iter()
                .map(row_to_invitation)
                .collect()
        })
        .await
    }

    async fn accept_invitation(
        &self,
        invitation: &Invitation,
        project: &Project,
        collaborator: &Collaborator,
    ) -> ProjectRepositoryResult<()> {
        let invitation_id = invitation.id();
        let accepted = invitation_row(invitation);
        let project_id = project.id();
        let updated_at = project.updated_at();
        let email = collaborator.email().clone();
        let joined = collaborator_row(project_id, collaborator);
        self.run_blocking(move |connection| {
            connection.transaction::<_, ProjectRepositoryError, _>(|tx| {
                answer_pending_invitation(tx, invitation_id, &accepted)?;
                touch_project(tx, project_id, updated_at)?;
                insert_collaborator(tx, &joined, email)
            })
        })
        .await
    }

    async fn decline_invitation(&self, invitation: &Invitation) -> ProjectRepositoryResult<()> {
        let invitation_id = invitation.id();
        let row = invitation_row(invitation);
        self.run_blocking(move |connection| {
            answer_pending_invitation(connection, invitation_id, &row)
        })
        .await
    }
}

fn touch_project(
    connection: &mut PgConnection,
    project_id: ProjectId,
    updated_at: DateTime<Utc>,
) -> ProjectRepositoryResult<()> {
    let updated = diesel::update(projects::table.find(project_id.into_inner()))
        .set(projects::updated_at.eq(updated_at))
        .execute(connection)?;
    if updated == 0 {
        return Err(ProjectRepositoryError::ProjectNotFound(project_id));
    }
    Ok(())
}

/// Locks the project row and checks every assignee against the owner and
/// the current collaborators.
fn ensure_members(
    connection: &mut PgConnection,
    project_id: ProjectId,
    assignees: &BTreeSet<EmailAddress>,
) -> ProjectRepositoryResult<()> {
    let owner_email = projects::table
        .find(project_id.into_inner())
        .select(projects::owner_email)
        .for_update()
        .first::<String>(connection)
        .optional()?
        .ok_or(ProjectRepositoryError::ProjectNotFound(project_id))?;
    let mut members: BTreeSet<String> = project_collaborators::table
        .filter(project_collaborators::project_id.eq(project_id.into_inner()))
        .select(project_collaborators::email)
        .load::<String>(connection)?
        .into_iter()
        .collect();
    members.insert(owner_email);

    match assignees
        .iter()
        .find(|email| !members.contains(email.as_str()))
    {
        Some(outsider) => Err(ProjectRepositoryError::AssigneeNotMember(outsider.clone())),
        None => Ok(()),
    }
}

/// Writes the answered invitation only while the stored row is still
/// pending.
fn answer_pending_invitation(
    connection: &mut PgConnection,
    invitation_id: InvitationId,
    row: &InvitationRow,
) -> ProjectRepositoryResult<()> {
    let updated = diesel::update(
        project_invitations::table
            .find(invitation_id.into_inner())
            .filter(project_invitations::state.eq(InvitationState::Pending.as_str())),
    )
    .set(row)
    .execute(connection)?;
    if updated > 0 {
        return Ok(());
    }

    let exists = diesel::select(diesel::dsl::exists(
        project_invitations::table.find(invitation_id.into_inner()),
    ))
    .get_result::<bool>(connection)?;
    if exists {
        Err(ProjectRepositoryError::InvitationNotPending(invitation_id))
    } else {
        Err(ProjectRepositoryError::InvitationNotFound(invitation_id))
    }
}

fn insert_collaborator(
    connection: &mut PgConnection,
    row: &CollaboratorRow,
    email: EmailAddress,
) -> ProjectRepositoryResult<()> {
    diesel::insert_into(project_collaborators::table)
        .values(row)
        .execute(connection)
        .map_err(|err| {
            if is_unique_violation(&err) {
                ProjectRepositoryError::DuplicateCollaborator(email)
            } else {
                err.into()
            }
        })?;
    Ok(())
}

fn load_projects(
    connection: &mut PgConnection,
    rows: Vec<ProjectRow>,
) -> ProjectRepositoryResult<Vec<Project>> {
    let ids: Vec<Uuid> = rows.iter().map(|row| row.id).collect();
    let mut collaborators: HashMap<Uuid, Vec<Collaborator>> = HashMap::new();
    for row in project_collaborators::table
        .filter(project_collaborators::project_id.eq_any(&ids))
        .order((
            project_collaborators::joined_at.asc(),
            project_collaborators::email.asc(),
        ))
        .select(CollaboratorRow::as_select())
        .load::<CollaboratorRow>(connection)?
    {
        let project_id = row.project_id;
        collaborators
            .entry(project_id)
            .or_default()
            .push(row_to_collaborator(row)?);
    }

    rows.into_iter()
        .map(|row| {
            let members = collaborators.remove(&row.id).unwrap_or_default();
            row_to_project(row, members)
        })
        .collect()
}

fn load_tasks(
    connection: &mut PgConnection,
    rows: Vec<ProjectTaskRow>,
) -> ProjectRepositoryResult<Vec<ProjectTask>> {
    let ids: Vec<Uuid> = rows.iter().map(|row| row.id).collect();
    let mut assignees: HashMap<Uuid, BTreeSet<EmailAddress>> = HashMap::new();
    for row in project_task_assignees::table
        .filter(project_task_assignees::task_id.eq_any(&ids))
        .select(AssigneeRow::as_select())
        .load::<AssigneeRow>(connection)?
    {
        let email = EmailAddress::new(row.email).map_err(ProjectRepositoryError::persistence)?;
        assignees.entry(row.task_id).or_default().insert(email);
    }

    rows.into_iter()
        .map(|row| {
            let assigned = assignees.remove(&row.id).unwrap_or_default();
            row_to_task(row, assigned)
        })
        .collect()
}

fn project_row(project: &Project) -> ProjectRow {
    ProjectRow {
        id: project.id().into_inner(),
        owner_email: project.owner().as_str().to_owned(),
        title: project.details().title().to_owned(),
        description: project.details().description().to_owned(),
        starts_on: project.schedule().starts_on(),
        ends_on: project.schedule().ends_on(),
        created_at: project.created_at(),
        updated_at: project.updated_at(),
    }
}

fn collaborator_row(project_id: ProjectId, collaborator: &Collaborator) -> CollaboratorRow {
    CollaboratorRow {
        project_id: project_id.into_inner(),
        email: collaborator.email().as_str().to_owned(),
        last_name: collaborator.last_name().to_owned(),
        first_name: collaborator.first_name().to_owned(),
        role: collaborator.role().as_str().to_owned(),
        joined_at: collaborator.joined_at(),
    }
}

fn project_task_row(task: &ProjectTask) -> ProjectTaskRow {
    ProjectTaskRow {
        id: task.id().into_inner(),
        project_id: task.project_id().into_inner(),
        title: task.details().title().to_owned(),
        description: task.details().description().to_owned(),
        starts_on: task.schedule().map(|s| s.starts_on()),
        ends_on: task.schedule().map(|s| s.ends_on()),
        status: task.status().as_str().to_owned(),
        created_at: task.created_at(),
        updated_at: task.updated_at(),
    }
}

fn assignee_rows(task: &ProjectTask) -> Vec<AssigneeRow> {
    task.assignees()
        .iter()
        .map(|email| AssigneeRow {
            task_id: task.id().into_inner(),
            email: email.as_str().to_owned(),
        })
        .collect()
}

fn invitation_row(invitation: &Invitation) -> InvitationRow {
    InvitationRow {
        id: invitation.id().into_inner(),
        project_id: invitation.project_id().into_inner(),
        inviter_email: invitation.inviter().as_str().to_owned(),
        invitee_email: invitation.invitee().as_str().to_owned(),
        role: invitation.role().as_str().to_owned(),
        state: invitation.state().as_str().to_owned(),
        created_at: invitation.created_at(),
        responded_at: invitation.responded_at(),
    }
}

fn row_to_collaborator(row: CollaboratorRow) -> ProjectRepositoryResult<Collaborator> {
    let email = EmailAddress::new(row.email).map_err(ProjectRepositoryError::persistence)?;
    let role = Role::try_from(row.role.as_str()).map_err(ProjectRepositoryError::persistence)?;
    Ok(Collaborator::from_persisted(
        email,
        row.last_name,
        row.first_name,
        role,
        row.joined_at,
    ))
}

fn row_to_project(
    row: ProjectRow,
    collaborators: Vec<Collaborator>,
) -> ProjectRepositoryResult<Project> {
    let owner = EmailAddress::new(row.owner_email).map_err(ProjectRepositoryError::persistence)?;
    Ok(Project::from_persisted(PersistedProjectData {
        id: ProjectId::from_uuid(row.id),
        owner,
        details: Details::from_persisted(row.title, row.description),
        schedule: Schedule::from_persisted(row.starts_on, row.ends_on),
        collaborators,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }))
}

fn row_to_task(
    row: ProjectTaskRow,
    assignees: BTreeSet<EmailAddress>,
) -> ProjectRepositoryResult<ProjectTask> {
    let status =
        TaskStatus::try_from(row.status.as_str()).map_err(ProjectRepositoryError::persistence)?;
    let schedule = match (row.starts_on, row.ends_on) {
        (Some(starts_on), Some(ends_on)) => Some(Schedule::from_persisted(starts_on, ends_on)),
        _ => None,
    };
    Ok(ProjectTask::from_persisted(PersistedProjectTaskData {
        id: ProjectTaskId::from_uuid(row.id),
        project_id: ProjectId::from_uuid(row.project_id),
        details: Details::from_persisted(row.title, row.description),
        schedule,
        status,
        assignees,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }))
}

fn row_to_invitation(row: InvitationRow) -> ProjectRepositoryResult<Invitation> {
    let InvitationRow {
        id,
        project_id,
        inviter_email,
        invitee_email,
        role,
        state,
        created_at,
        responded_at,
    } = row;

    let inviter = EmailAddress::new(inviter_email).map_err(ProjectRepositoryError::persistence)?;
    let invitee = EmailAddress::new(invitee_email).map_err(ProjectRepositoryError::persistence)?;
    let role = Role::try_from(role.as_str()).map_err(ProjectRepositoryError::persistence)?;
    let state =
        InvitationState::try_from(state.as_str()).map_err(ProjectRepositoryError::persistence)?;

    Ok(Invitation::from_persisted(PersistedInvitationData {
        id: InvitationId::from_uuid(id),
        project_id: ProjectId::from_uuid(project_id),
        inviter,
        invitee,
        role,
        state,
        created_at,
        responded_at,
    }))
}
