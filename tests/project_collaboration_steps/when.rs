//! When steps for project collaboration BDD scenarios.

use super::world::{CollaborationWorld, run_async};
use chantier::project::{domain::Role, services::InviteRequest};
use rstest_bdd_macros::when;

#[when(r#""{inviter}" invites "{invitee}" as "{role}""#)]
fn invites(
    world: &mut CollaborationWorld,
    inviter: String,
    invitee: String,
    role: String,
) -> Result<(), eyre::Report> {
    let offered = Role::try_from(role.as_str()).map_err(|err| eyre::eyre!("{err}"))?;
    let identity = world.identity(&inviter)?;
    let project_id = world.project()?.id();
    let result = run_async(world.collaboration.invite(
        &identity,
        InviteRequest::new(project_id, invitee).with_role(offered),
    ));
    if let Ok(ref invitation) = result {
        world.last_invitation = Some(invitation.id());
    }
    world.record(result, |err| err.kind());
    Ok(())
}

#[when(r#""{responder}" accepts the invitation"#)]
fn accepts(world: &mut CollaborationWorld, responder: String) -> Result<(), eyre::Report> {
    let identity = world.identity(&responder)?;
    let invitation_id = world
        .last_invitation
        .ok_or_else(|| eyre::eyre!("no invitation was sent in this scenario"))?;
    let result = run_async(world.collaboration.accept(&identity, invitation_id));
    world.record(result, |err| err.kind());
    Ok(())
}

#[when(r#""{actor}" removes "{member}" from the project"#)]
fn removes(
    world: &mut CollaborationWorld,
    actor: String,
    member: String,
) -> Result<(), eyre::Report> {
    let identity = world.identity(&actor)?;
    let project_id = world.project()?.id();
    let result = run_async(world.collaboration.remove_collaborator(
        &identity,
        project_id,
        member.as_str(),
    ));
    world.record(result, |err| err.kind());
    Ok(())
}
