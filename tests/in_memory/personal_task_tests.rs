//! In-memory integration tests for personal task isolation.

use super::helpers::{Workspace, in_days};
use chantier::ErrorKind;
use chantier::task::{
    domain::TaskStatus,
    services::{ChangeStatusRequest, CreateTaskRequest, EditTaskRequest},
};
use eyre::WrapErr;

#[tokio::test(flavor = "multi_thread")]
async fn tasks_are_visible_to_their_owner_only() -> Result<(), eyre::Report> {
    let workspace = Workspace::new()?;
    let alice = workspace.sign_up("alice@example.com").await?;
    let bob = workspace.sign_up("bob@example.com").await?;

    let groceries = workspace
        .tasks
        .create_task(
            &alice,
            CreateTaskRequest::new("Groceries", "Milk and bread", in_days(0)?, in_days(1)?),
        )
        .await
        .wrap_err("create alice's task")?;
    workspace
        .tasks
        .create_task(
            &bob,
            CreateTaskRequest::new("Report", "Quarterly numbers", in_days(2)?, in_days(9)?),
        )
        .await
        .wrap_err("create bob's task")?;

    let mine = workspace.tasks.list_tasks(&alice).await?;
    eyre::ensure!(mine.len() == 1, "alice sees {} tasks", mine.len());
    eyre::ensure!(mine.first().map(|task| task.id()) == Some(groceries.id()));

    let peeked = workspace.tasks.find_task(&bob, groceries.id()).await;
    let edited = workspace
        .tasks
        .edit_task(
            &bob,
            EditTaskRequest::new(groceries.id()).with_details("Hijacked", "Nope"),
        )
        .await;
    let deleted = workspace.tasks.delete_task(&bob, groceries.id()).await;
    for (operation, kind) in [
        ("find", peeked.map(|_| ()).map_err(|err| err.kind())),
        ("edit", edited.map(|_| ()).map_err(|err| err.kind())),
        ("delete", deleted.map_err(|err| err.kind())),
    ] {
        eyre::ensure!(
            kind == Err(ErrorKind::NotAuthorized),
            "{operation} by bob returned {kind:?}"
        );
    }

    let unchanged = workspace.tasks.find_task(&alice, groceries.id()).await?;
    eyre::ensure!(unchanged.details().title() == "Groceries");
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn status_moves_freely_between_labels() -> Result<(), eyre::Report> {
    let workspace = Workspace::new()?;
    let alice = workspace.sign_up("alice@example.com").await?;
    let task = workspace
        .tasks
        .create_task(
            &alice,
            CreateTaskRequest::new("Garden", "Mow the lawn", in_days(0)?, in_days(0)?),
        )
        .await?;
    eyre::ensure!(task.status() == TaskStatus::Todo);

    for (label, expected) in [
        ("Terminé", TaskStatus::Done),
        ("A faire", TaskStatus::Todo),
        ("En cours", TaskStatus::InProgress),
    ] {
        let updated = workspace
            .tasks
            .change_status(&alice, ChangeStatusRequest::new(task.id(), label))
            .await
            .wrap_err_with(|| format!("move to {label}"))?;
        eyre::ensure!(updated.status() == expected, "after {label}: {:?}", updated.status());
    }

    let bogus = workspace
        .tasks
        .change_status(&alice, ChangeStatusRequest::new(task.id(), "Archived"))
        .await;
    let kind = bogus.map(|_| ()).map_err(|err| err.kind());
    eyre::ensure!(kind == Err(ErrorKind::ValidationFailed), "got {kind:?}");
    Ok(())
}
