//! When steps for personal task status BDD scenarios.

use super::world::{TaskStatusWorld, run_async};
use chantier::identity::domain::Identity;
use chantier::task::services::ChangeStatusRequest;
use rstest_bdd_macros::when;

fn change_status(
    world: &mut TaskStatusWorld,
    actor: &Identity,
    status: String,
) -> Result<(), eyre::Report> {
    let task_id = world.created()?.id();
    let result = run_async(
        world
            .service
            .change_status(actor, ChangeStatusRequest::new(task_id, status)),
    );
    world.last_change = Some(result);
    Ok(())
}

#[when(r#"the task status is changed to "{status}""#)]
fn owner_changes_status(world: &mut TaskStatusWorld, status: String) -> Result<(), eyre::Report> {
    let owner = world.owner()?.clone();
    change_status(world, &owner, status)
}

#[when(r#""{actor}" changes the task status to "{status}""#)]
fn actor_changes_status(
    world: &mut TaskStatusWorld,
    actor: String,
    status: String,
) -> Result<(), eyre::Report> {
    let identity = world
        .identities
        .get(&actor)
        .cloned()
        .ok_or_else(|| eyre::eyre!("{actor} is not signed in"))?;
    change_status(world, &identity, status)
}
