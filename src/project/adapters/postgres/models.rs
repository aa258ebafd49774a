//! Diesel row models for project persistence.

use super::schema::{
    project_collaborators, project_invitations, project_task_assignees, project_tasks, projects,
};
use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;

/// Query and insert model for project records.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = projects)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ProjectRow {
    /// Internal project identifier.
    pub id: uuid::Uuid,
    /// Owner email address.
    pub owner_email: String,
    /// Project title.
    pub title: String,
    /// Project description.
    pub description: String,
    /// First day of the project.
    pub starts_on: NaiveDate,
    /// Last day of the project.
    pub ends_on: NaiveDate,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Query and insert model for collaborator records.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = project_collaborators)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CollaboratorRow {
    /// Owning project.
    pub project_id: uuid::Uuid,
    /// Collaborator email address.
    pub email: String,
    /// Collaborator last name.
    pub last_name: String,
    /// Collaborator first name.
    pub first_name: String,
    /// Collaborator role.
    pub role: String,
    /// When the collaborator joined.
    pub joined_at: DateTime<Utc>,
}

/// Query and insert model for project task records.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = project_tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ProjectTaskRow {
    /// Internal task identifier.
    pub id: uuid::Uuid,
    /// Owning project.
    pub project_id: uuid::Uuid,
    /// Task title.
    pub title: String,
    /// Task description.
    pub description: String,
    /// First day of the task, when scheduled.
    pub starts_on: Option<NaiveDate>,
    /// Last day of the task, when scheduled.
    pub ends_on: Option<NaiveDate>,
    /// Task status.
    pub status: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Query and insert model for assignee records.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = project_task_assignees)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct AssigneeRow {
    /// Assigned task.
    pub task_id: uuid::Uuid,
    /// Assignee email address.
    pub email: String,
}

/// Query, insert, and update model for invitation records.
#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = project_invitations)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(treat_none_as_null = true)]
pub struct InvitationRow {
    /// Internal invitation identifier.
    pub id: uuid::Uuid,
    /// Target project.
    pub project_id: uuid::Uuid,
    /// Inviter email address.
    pub inviter_email: String,
    /// Invitee email address.
    pub invitee_email: String,
    /// Offered role.
    pub role: String,
    /// Invitation state.
    pub state: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// When the invitee answered.
    pub responded_at: Option<DateTime<Utc>>,
}
