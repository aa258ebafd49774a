//! Then steps for personal task status BDD scenarios.

use super::world::{TaskStatusWorld, run_async};
use chantier::task::domain::TaskStatus;
use rstest_bdd_macros::then;

#[then(r#"the task status is "{status}""#)]
fn task_status_is(world: &TaskStatusWorld, status: String) -> Result<(), eyre::Report> {
    let expected = TaskStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid expected status in scenario: {err}"))?;
    let stored = run_async(world.service.find_task(world.owner()?, world.created()?.id()))
        .map_err(|err| eyre::eyre!("find task: {err}"))?;
    eyre::ensure!(
        stored.status() == expected,
        "expected {expected}, found {}",
        stored.status()
    );
    Ok(())
}

#[then("the task was not modified")]
fn task_not_modified(world: &TaskStatusWorld) -> Result<(), eyre::Report> {
    let created = world.created()?;
    let stored = run_async(world.service.find_task(world.owner()?, created.id()))
        .map_err(|err| eyre::eyre!("find task: {err}"))?;
    eyre::ensure!(
        stored.updated_at() == created.updated_at(),
        "updated_at moved from {} to {}",
        created.updated_at(),
        stored.updated_at()
    );
    Ok(())
}

#[then(r#"the status change fails with "{kind}""#)]
fn status_change_fails(world: &TaskStatusWorld, kind: String) -> Result<(), eyre::Report> {
    match world.last_failure() {
        Some(actual) if actual.as_str() == kind => Ok(()),
        other => Err(eyre::eyre!("expected {kind} failure, got {other:?}")),
    }
}
