//! In-memory integration tests for the collaboration workflow.

use super::helpers::{Workspace, in_days};
use chantier::ErrorKind;
use chantier::project::{
    domain::Role,
    services::{
        ChangeProjectTaskStatusRequest, CreateProjectRequest, CreateProjectTaskRequest,
        EditProjectTaskRequest, InviteRequest,
    },
};
use chantier::task::domain::TaskStatus;
use eyre::WrapErr;

fn kind_of<T, E>(result: Result<T, E>, classify: impl Fn(&E) -> ErrorKind) -> Option<ErrorKind> {
    result.err().as_ref().map(classify)
}

#[tokio::test(flavor = "multi_thread")]
async fn invited_manager_runs_tasks_until_removed() -> Result<(), eyre::Report> {
    let workspace = Workspace::new()?;
    let alice = workspace.sign_up("alice@example.com").await?;
    let bob = workspace.sign_up("bob@example.com").await?;
    let carol = workspace.sign_up("carol@example.com").await?;

    let alpha = workspace
        .projects
        .create_project(
            &alice,
            CreateProjectRequest::new("Alpha", "Launch", in_days(0)?, in_days(60)?),
        )
        .await
        .wrap_err("create Alpha")?;

    for (invitee, identity, role) in [
        ("bob@example.com", &bob, Role::Manager),
        ("carol@example.com", &carol, Role::User),
    ] {
        let invitation = workspace
            .collaboration
            .invite(&alice, InviteRequest::new(alpha.id(), invitee).with_role(role))
            .await
            .wrap_err_with(|| format!("invite {invitee}"))?;
        workspace
            .collaboration
            .accept(identity, invitation.id())
            .await
            .wrap_err_with(|| format!("{invitee} accepts"))?;
    }

    let shared = workspace.projects.list_shared_projects(&bob).await?;
    eyre::ensure!(shared.iter().map(|p| p.id()).eq([alpha.id()]));
    eyre::ensure!(workspace.projects.list_projects(&bob).await?.is_empty());

    let task = workspace
        .project_tasks
        .create_task(
            &bob,
            CreateProjectTaskRequest::new(alpha.id(), "Landing page", "Hero and pricing")
                .with_assignee("carol@example.com")
                .with_schedule(in_days(1)?, in_days(5)?),
        )
        .await
        .wrap_err("manager creates task")?;

    let moved = workspace
        .project_tasks
        .change_status(
            &carol,
            ChangeProjectTaskStatusRequest::new(task.id(), "En cours"),
        )
        .await
        .wrap_err("assignee moves task")?;
    eyre::ensure!(moved.status() == TaskStatus::InProgress);

    let edit = workspace
        .project_tasks
        .edit_task(
            &carol,
            EditProjectTaskRequest::new(task.id()).with_details("Renamed", "By a user"),
        )
        .await;
    eyre::ensure!(kind_of(edit, |e| e.kind()) == Some(ErrorKind::NotAuthorized));

    workspace
        .collaboration
        .remove_collaborator(&alice, alpha.id(), "carol@example.com")
        .await
        .wrap_err("owner removes carol")?;

    let orphaned = workspace.project_tasks.find_task(&bob, task.id()).await?;
    eyre::ensure!(orphaned.assignees().is_empty(), "carol still assigned");
    eyre::ensure!(orphaned.status() == TaskStatus::InProgress);
    eyre::ensure!(workspace.project_tasks.list_assigned_tasks(&carol).await?.is_empty());

    let after = workspace
        .project_tasks
        .change_status(&carol, ChangeProjectTaskStatusRequest::new(task.id(), "Terminé"))
        .await;
    eyre::ensure!(kind_of(after, |e| e.kind()) == Some(ErrorKind::NotAuthorized));
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn deleting_a_project_forgets_its_invitations() -> Result<(), eyre::Report> {
    let workspace = Workspace::new()?;
    let alice = workspace.sign_up("alice@example.com").await?;
    let bob = workspace.sign_up("bob@example.com").await?;

    let alpha = workspace
        .projects
        .create_project(
            &alice,
            CreateProjectRequest::new("Alpha", "Launch", in_days(0)?, in_days(10)?),
        )
        .await?;
    let invitation = workspace
        .collaboration
        .invite(&alice, InviteRequest::new(alpha.id(), "bob@example.com"))
        .await?;
    eyre::ensure!(workspace.collaboration.list_invitations(&bob).await?.len() == 1);

    workspace.projects.delete_project(&alice, alpha.id()).await?;

    eyre::ensure!(workspace.collaboration.list_invitations(&bob).await?.is_empty());
    let accept = workspace.collaboration.accept(&bob, invitation.id()).await;
    eyre::ensure!(kind_of(accept, |e| e.kind()) == Some(ErrorKind::NotFound));
    let gone = workspace.projects.find_project(&alice, alpha.id()).await;
    eyre::ensure!(kind_of(gone, |e| e.kind()) == Some(ErrorKind::NotFound));
    Ok(())
}
