//! Invitations and collaborator management.
//!
//! Invitations move from `Pending` to either `Accepted` or `Declined`.
//! Accepting one adds the invitee to the project in the same store call
//! that closes the invitation.

use super::lookup::load_project;
use super::{ProjectServiceError, ProjectServiceResult};
use crate::identity::{
    domain::{EmailAddress, Identity, User, UserProfile},
    ports::UserRepository,
};
use crate::project::{
    domain::{
        Capability, Collaborator, Invitation, InvitationId, Project, ProjectDomainError,
        ProjectId, Role, authorize,
    },
    ports::{InvitationRepository, ProjectRepository},
};
use mockable::Clock;
use std::sync::Arc;

/// Request payload for inviting a user to a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InviteRequest {
    project_id: ProjectId,
    candidate_email: String,
    role: Role,
}

impl InviteRequest {
    /// Creates an invitation request. The role defaults to [`Role::User`].
    #[must_use]
    pub fn new(project_id: ProjectId, candidate_email: impl Into<String>) -> Self {
        Self {
            project_id,
            candidate_email: candidate_email.into(),
            role: Role::User,
        }
    }

    /// Sets the role offered to the candidate.
    #[must_use]
    pub const fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }
}

/// Request payload for adding or re-ranking a collaborator directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollaboratorRequest {
    project_id: ProjectId,
    email: String,
    role: Role,
}

impl CollaboratorRequest {
    /// Creates a request naming a user and a role.
    #[must_use]
    pub fn new(project_id: ProjectId, email: impl Into<String>, role: Role) -> Self {
        Self {
            project_id,
            email: email.into(),
            role,
        }
    }
}

/// Collaboration workflow service.
#[derive(Clone)]
pub struct CollaborationService<S, U, C>
where
    S: ProjectRepository + InvitationRepository,
    U: UserRepository,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    users: Arc<U>,
    clock: Arc<C>,
}

impl<S, U, C> CollaborationService<S, U, C>
where
    S: ProjectRepository + InvitationRepository,
    U: UserRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new collaboration service.
    #[must_use]
    pub const fn new(store: Arc<S>, users: Arc<U>, clock: Arc<C>) -> Self {
        Self {
            store,
            users,
            clock,
        }
    }

    /// Looks up a user who could be invited to a project.
    ///
    /// # Errors
    ///
    /// Returns `NotAuthorized` unless the caller may invite, `NotFound` when
    /// no user has the address, and `Conflict` when the candidate already
    /// owns or collaborates on the project.
    pub async fn search_candidate(
        &self,
        identity: &Identity,
        project_id: ProjectId,
        email: &str,
    ) -> ProjectServiceResult<UserProfile> {
        let project = load_project(&*self.store, project_id).await?;
        authorize(&project, identity.email(), Capability::InviteCollaborators)?;

        let candidate = self.find_user(&EmailAddress::new(email)?).await?;
        project.ensure_can_join(candidate.email())?;
        Ok(candidate.profile().clone())
    }

    /// Invites a user to a project.
    ///
    /// Requires [`Capability::InviteCollaborators`]; only an `Admin` may
    /// offer the `Admin` role.
    ///
    /// # Errors
    ///
    /// Returns `NotAuthorized`, `NotFound`, or `Conflict` (owner, existing
    /// collaborator, or pending invitation) before anything is written, and
    /// a repository error when persistence fails.
    pub async fn invite(
        &self,
        identity: &Identity,
        request: InviteRequest,
    ) -> ProjectServiceResult<Invitation> {
        let project = load_project(&*self.store, request.project_id).await?;
        let inviter_role = authorize(&project, identity.email(), Capability::InviteCollaborators)?;
        if request.role == Role::Admin && inviter_role != Role::Admin {
            return Err(ProjectDomainError::RoleTooHigh {
                role: inviter_role,
                granted: request.role,
            }
            .into());
        }

        let candidate = self
            .find_user(&EmailAddress::new(request.candidate_email)?)
            .await?;
        project.ensure_can_join(candidate.email())?;

        let invitation = Invitation::new(
            project.id(),
            identity.email().clone(),
            candidate.email().clone(),
            request.role,
            &*self.clock,
        );
        self.store.store_invitation(&invitation).await?;
        tracing::info!(
            invitation_id = %invitation.id(),
            project_id = %project.id(),
            invitee = %candidate.email(),
            role = %request.role,
            "sent invitation"
        );
        Ok(invitation)
    }

    /// Returns the pending invitations addressed to the caller.
    ///
    /// # Errors
    ///
    /// Returns a repository error when persistence lookup fails.
    pub async fn list_invitations(
        &self,
        identity: &Identity,
    ) -> ProjectServiceResult<Vec<Invitation>> {
        Ok(self
            .store
            .list_pending_invitations(identity.email())
            .await?)
    }

    /// Accepts an invitation and joins the project with the offered role.
    ///
    /// # Errors
    ///
    /// Returns `NotAuthorized` when the invitation is addressed to someone
    /// else, `Conflict` when it was already answered or the caller already
    /// collaborates, `NotFound` when the invitation or project is gone, and
    /// a repository error when persistence fails. Nothing is written on
    /// failure.
    pub async fn accept(
        &self,
        identity: &Identity,
        invitation_id: InvitationId,
    ) -> ProjectServiceResult<Project> {
        let mut invitation = self.load_invitation(invitation_id).await?;
        invitation.accept(identity.email(), &*self.clock)?;

        let mut project = load_project(&*self.store, invitation.project_id()).await?;
        let user = self.find_user(identity.email()).await?;
        let collaborator = Collaborator::join(user.profile(), invitation.role(), self.clock.utc());
        project.add_collaborator(collaborator.clone(), &*self.clock)?;

        self.store
            .accept_invitation(&invitation, &project, &collaborator)
            .await?;
        tracing::info!(
            invitation_id = %invitation_id,
            project_id = %project.id(),
            collaborator = %identity.email(),
            role = %invitation.role(),
            "accepted invitation"
        );
        Ok(project)
    }

    /// Declines an invitation.
    ///
    /// # Errors
    ///
    /// Returns `NotAuthorized` when the invitation is addressed to someone
    /// else, `Conflict` when it was already answered, `NotFound` when it does
    /// not exist, and a repository error when persistence fails.
    pub async fn decline(
        &self,
        identity: &Identity,
        invitation_id: InvitationId,
    ) -> ProjectServiceResult<Invitation> {
        let mut invitation = self.load_invitation(invitation_id).await?;
        invitation.decline(identity.email(), &*self.clock)?;
        self.store.decline_invitation(&invitation).await?;
        tracing::info!(invitation_id = %invitation_id, "declined invitation");
        Ok(invitation)
    }

    /// Adds a registered user to a project without an invitation. Requires
    /// [`Capability::ManageCollaborators`].
    ///
    /// # Errors
    ///
    /// Returns `NotAuthorized`, `NotFound` for an unknown user, or
    /// `Conflict` when the user already owns or collaborates on the project.
    pub async fn add_collaborator(
        &self,
        identity: &Identity,
        request: CollaboratorRequest,
    ) -> ProjectServiceResult<Project> {
        let mut project = load_project(&*self.store, request.project_id).await?;
        authorize(&project, identity.email(), Capability::ManageCollaborators)?;

        let user = self.find_user(&EmailAddress::new(request.email)?).await?;
        let collaborator = Collaborator::join(user.profile(), request.role, self.clock.utc());
        project.add_collaborator(collaborator.clone(), &*self.clock)?;

        self.store.add_collaborator(&project, &collaborator).await?;
        tracing::info!(
            project_id = %project.id(),
            collaborator = %collaborator.email(),
            role = %collaborator.role(),
            "added collaborator"
        );
        Ok(project)
    }

    /// Removes a collaborator from a project and unassigns them from every
    /// task of the project. Requires [`Capability::ManageCollaborators`].
    ///
    /// # Errors
    ///
    /// Returns `NotAuthorized` (including for the owner), `NotFound` when
    /// the user does not collaborate, and a repository error when
    /// persistence fails.
    pub async fn remove_collaborator(
        &self,
        identity: &Identity,
        project_id: ProjectId,
        collaborator: &str,
    ) -> ProjectServiceResult<Project> {
        let mut project = load_project(&*self.store, project_id).await?;
        authorize(&project, identity.email(), Capability::ManageCollaborators)?;

        let email = EmailAddress::new(collaborator)?;
        project.remove_collaborator(&email, &*self.clock)?;
        self.store.remove_collaborator(&project, &email).await?;
        tracing::info!(project_id = %project_id, collaborator = %email, "removed collaborator");
        Ok(project)
    }

    /// Changes a collaborator's role. Requires [`Capability::ChangeRoles`].
    ///
    /// # Errors
    ///
    /// Returns `NotAuthorized` (including for the owner), `NotFound` when
    /// the user does not collaborate, and a repository error when
    /// persistence fails.
    pub async fn change_collaborator_role(
        &self,
        identity: &Identity,
        request: CollaboratorRequest,
    ) -> ProjectServiceResult<Project> {
        let mut project = load_project(&*self.store, request.project_id).await?;
        authorize(&project, identity.email(), Capability::ChangeRoles)?;

        let email = EmailAddress::new(request.email)?;
        let previous = project.role_of(&email);
        project.change_role(&email, request.role, &*self.clock)?;
        if previous == Some(request.role) {
            return Ok(project);
        }
        self.store
            .update_collaborator_role(&project, &email, request.role)
            .await?;
        tracing::info!(
            project_id = %project.id(),
            collaborator = %email,
            role = %request.role,
            "changed collaborator role"
        );
        Ok(project)
    }

    /// Lists the members of a project: the owner first, as an implicit
    /// `Admin` who joined when the project was created, then the
    /// collaborators in join order.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` or `NotAuthorized`, and a repository error when
    /// persistence lookup fails.
    pub async fn list_collaborators(
        &self,
        identity: &Identity,
        project_id: ProjectId,
    ) -> ProjectServiceResult<Vec<Collaborator>> {
        let project = load_project(&*self.store, project_id).await?;
        authorize(&project, identity.email(), Capability::ViewProject)?;

        let owner = self.find_user(project.owner()).await?;
        let mut members = Vec::with_capacity(project.collaborators().len() + 1);
        members.push(Collaborator::join(
            owner.profile(),
            Role::Admin,
            project.created_at(),
        ));
        members.extend_from_slice(project.collaborators());
        Ok(members)
    }

    async fn find_user(&self, email: &EmailAddress) -> ProjectServiceResult<User> {
        self.users
            .find_by_email(email)
            .await?
            .ok_or_else(|| ProjectServiceError::UserNotFound(email.clone()))
    }

    async fn load_invitation(&self, id: InvitationId) -> ProjectServiceResult<Invitation> {
        self.store
            .find_invitation(id)
            .await?
            .ok_or(ProjectServiceError::InvitationNotFound(id))
    }
}
