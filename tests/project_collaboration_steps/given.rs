//! Given steps for project collaboration BDD scenarios.

use super::world::{CollaborationWorld, run_async};
use chantier::identity::{domain::Identity, services::RegisterUserRequest};
use chantier::project::{
    domain::Role,
    services::{CollaboratorRequest, CreateProjectRequest, CreateProjectTaskRequest},
};
use chrono::{Days, Utc};
use eyre::WrapErr;
use rstest_bdd_macros::given;

#[given(r#"registered users "{first}", "{second}" and "{third}""#)]
fn registered_users(
    world: &mut CollaborationWorld,
    first: String,
    second: String,
    third: String,
) -> Result<(), eyre::Report> {
    for email in [first, second, third] {
        let user = run_async(world.accounts.register(RegisterUserRequest::new(
            email.as_str(),
            "Durand",
            "Sam",
            "0611223344",
            "a sufficiently long secret",
        )))
        .wrap_err_with(|| format!("register {email}"))?;
        world
            .identities
            .insert(email, Identity::new(user.email().clone()));
    }
    Ok(())
}

#[given(r#""{owner}" owns a project titled "{title}""#)]
fn owns_project(
    world: &mut CollaborationWorld,
    owner: String,
    title: String,
) -> Result<(), eyre::Report> {
    let identity = world.identity(&owner)?;
    let today = Utc::now().date_naive();
    let ends_on = today
        .checked_add_days(Days::new(30))
        .ok_or_else(|| eyre::eyre!("date out of range"))?;
    let project = run_async(world.projects.create_project(
        &identity,
        CreateProjectRequest::new(title, "Scenario project", today, ends_on),
    ))
    .wrap_err("create scenario project")?;
    world.project = Some(project);
    Ok(())
}

#[given(r#""{member}" collaborates on the project as "{role}""#)]
fn collaborates_as(
    world: &mut CollaborationWorld,
    member: String,
    role: String,
) -> Result<(), eyre::Report> {
    let offered = Role::try_from(role.as_str()).map_err(|err| eyre::eyre!("{err}"))?;
    let project = world.project()?.clone();
    let owner = world.identity(project.owner().as_str())?;
    let updated = run_async(world.collaboration.add_collaborator(
        &owner,
        CollaboratorRequest::new(project.id(), member, offered),
    ))
    .wrap_err("add scenario collaborator")?;
    world.project = Some(updated);
    Ok(())
}

#[given(r#"a project task "{title}" assigned to "{assignee}""#)]
fn task_assigned_to(
    world: &mut CollaborationWorld,
    title: String,
    assignee: String,
) -> Result<(), eyre::Report> {
    let project = world.project()?.clone();
    let owner = world.identity(project.owner().as_str())?;
    let task = run_async(world.tasks.create_task(
        &owner,
        CreateProjectTaskRequest::new(project.id(), title.as_str(), "Scenario task")
            .with_assignee(assignee),
    ))
    .wrap_err("create scenario task")?;
    world.task_ids.insert(title, task.id());
    Ok(())
}
