//! Then steps for project collaboration BDD scenarios.

use super::world::{CollaborationWorld, run_async};
use rstest_bdd_macros::then;

#[then(r#"the collaborators of "{title}" are "{expected}""#)]
fn collaborators_are(
    world: &CollaborationWorld,
    title: String,
    expected: String,
) -> Result<(), eyre::Report> {
    let project = world.project()?;
    eyre::ensure!(
        project.details().title() == title,
        "scenario project is titled {}",
        project.details().title()
    );
    let owner = world.identity(project.owner().as_str())?;
    let members = run_async(world.collaboration.list_collaborators(&owner, project.id()))
        .map_err(|err| eyre::eyre!("list collaborators: {err}"))?;
    let actual = members
        .iter()
        .map(|member| format!("{}:{}", member.email(), member.role()))
        .collect::<Vec<_>>()
        .join(", ");
    eyre::ensure!(actual == expected, "expected [{expected}], found [{actual}]");
    Ok(())
}

#[then(r#"the last operation fails with "{kind}""#)]
fn last_operation_fails(world: &CollaborationWorld, kind: String) -> Result<(), eyre::Report> {
    match world.last_outcome {
        Some(Err(actual)) if actual.as_str() == kind => Ok(()),
        ref other => Err(eyre::eyre!("expected {kind} failure, got {other:?}")),
    }
}

#[then("the last operation succeeds")]
fn last_operation_succeeds(world: &CollaborationWorld) -> Result<(), eyre::Report> {
    match world.last_outcome {
        Some(Ok(())) => Ok(()),
        ref other => Err(eyre::eyre!("expected success, got {other:?}")),
    }
}

#[then(r#"task "{title}" has no assignees"#)]
fn task_has_no_assignees(world: &CollaborationWorld, title: String) -> Result<(), eyre::Report> {
    let task_id = world
        .task_ids
        .get(&title)
        .copied()
        .ok_or_else(|| eyre::eyre!("no task titled {title} in this scenario"))?;
    let project = world.project()?;
    let owner = world.identity(project.owner().as_str())?;
    let task = run_async(world.tasks.find_task(&owner, task_id))
        .map_err(|err| eyre::eyre!("find task: {err}"))?;
    eyre::ensure!(
        task.assignees().is_empty(),
        "task still assigned to {:?}",
        task.assignees()
    );
    Ok(())
}
