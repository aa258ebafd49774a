//! Given steps for personal task status BDD scenarios.

use super::world::{TaskStatusWorld, run_async};
use chantier::identity::domain::{EmailAddress, Identity};
use chantier::task::services::CreateTaskRequest;
use chrono::{Days, Utc};
use eyre::WrapErr;
use rstest_bdd_macros::given;

#[given(r#"a signed-in user "{email}""#)]
fn signed_in_user(world: &mut TaskStatusWorld, email: String) -> Result<(), eyre::Report> {
    let address = EmailAddress::new(email.as_str()).wrap_err("scenario email")?;
    let identity = Identity::new(address);
    if world.owner.is_none() {
        world.owner = Some(identity.clone());
    }
    world.identities.insert(email, identity);
    Ok(())
}

#[given(r#"a personal task titled "{title}""#)]
fn personal_task(world: &mut TaskStatusWorld, title: String) -> Result<(), eyre::Report> {
    let owner = world.owner()?.clone();
    let today = Utc::now().date_naive();
    let ends_on = today
        .checked_add_days(Days::new(3))
        .ok_or_else(|| eyre::eyre!("date out of range"))?;
    let task = run_async(world.service.create_task(
        &owner,
        CreateTaskRequest::new(title, "Scenario task", today, ends_on),
    ))
    .wrap_err("create scenario task")?;
    world.created = Some(task);
    Ok(())
}
