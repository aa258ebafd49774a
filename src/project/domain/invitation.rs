//! Invitations to join a project.

use super::{InvitationId, ParseInvitationStateError, ProjectDomainError, ProjectId, Role};
use crate::identity::domain::EmailAddress;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of an invitation.
///
/// `Pending` moves to exactly one of the terminal states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvitationState {
    /// Waiting for the invitee.
    Pending,
    /// The invitee joined the project.
    Accepted,
    /// The invitee refused.
    Declined,
}

impl InvitationState {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Declined => "declined",
        }
    }
}

impl fmt::Display for InvitationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for InvitationState {
    type Error = ParseInvitationStateError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "pending" => Ok(Self::Pending),
            "accepted" => Ok(Self::Accepted),
            "declined" => Ok(Self::Declined),
            _ => Err(ParseInvitationStateError(value.to_owned())),
        }
    }
}

/// Offer for a user to join a project with a given role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invitation {
    id: InvitationId,
    project_id: ProjectId,
    inviter: EmailAddress,
    invitee: EmailAddress,
    role: Role,
    state: InvitationState,
    created_at: DateTime<Utc>,
    responded_at: Option<DateTime<Utc>>,
}

/// Parameter object for reconstructing a persisted invitation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedInvitationData {
    /// Persisted invitation identifier.
    pub id: InvitationId,
    /// Target project.
    pub project_id: ProjectId,
    /// User who sent the invitation.
    pub inviter: EmailAddress,
    /// User the invitation is addressed to.
    pub invitee: EmailAddress,
    /// Role offered.
    pub role: Role,
    /// Persisted state.
    pub state: InvitationState,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// When the invitee answered, if they have.
    pub responded_at: Option<DateTime<Utc>>,
}

impl Invitation {
    /// Creates a pending invitation.
    #[must_use]
    pub fn new(
        project_id: ProjectId,
        inviter: EmailAddress,
        invitee: EmailAddress,
        role: Role,
        clock: &impl Clock,
    ) -> Self {
        Self {
            id: InvitationId::new(),
            project_id,
            inviter,
            invitee,
            role,
            state: InvitationState::Pending,
            created_at: clock.utc(),
            responded_at: None,
        }
    }

    /// Reconstructs an invitation from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedInvitationData) -> Self {
        Self {
            id: data.id,
            project_id: data.project_id,
            inviter: data.inviter,
            invitee: data.invitee,
            role: data.role,
            state: data.state,
            created_at: data.created_at,
            responded_at: data.responded_at,
        }
    }

    /// Returns the invitation identifier.
    #[must_use]
    pub const fn id(&self) -> InvitationId {
        self.id
    }

    /// Returns the target project.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the user who sent the invitation.
    #[must_use]
    pub const fn inviter(&self) -> &EmailAddress {
        &self.inviter
    }

    /// Returns the addressee.
    #[must_use]
    pub const fn invitee(&self) -> &EmailAddress {
        &self.invitee
    }

    /// Returns the role offered.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    /// Returns the current state.
    #[must_use]
    pub const fn state(&self) -> InvitationState {
        self.state
    }

    /// Returns `true` while the invitation awaits an answer.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.state == InvitationState::Pending
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns when the invitee answered.
    #[must_use]
    pub const fn responded_at(&self) -> Option<DateTime<Utc>> {
        self.responded_at
    }

    /// Marks the invitation accepted by `responder`.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::NotInvitee`] when `responder` is not the
    /// addressee and [`ProjectDomainError::InvitationClosed`] when the
    /// invitation was already answered.
    pub fn accept(
        &mut self,
        responder: &EmailAddress,
        clock: &impl Clock,
    ) -> Result<(), ProjectDomainError> {
        self.respond(responder, InvitationState::Accepted, clock)
    }

    /// Marks the invitation declined by `responder`.
    ///
    /// # Errors
    ///
    /// Same as [`Self::accept`].
    pub fn decline(
        &mut self,
        responder: &EmailAddress,
        clock: &impl Clock,
    ) -> Result<(), ProjectDomainError> {
        self.respond(responder, InvitationState::Declined, clock)
    }

    fn respond(
        &mut self,
        responder: &EmailAddress,
        answer: InvitationState,
        clock: &impl Clock,
    ) -> Result<(), ProjectDomainError> {
        if &self.invitee != responder {
            return Err(ProjectDomainError::NotInvitee {
                invitation_id: self.id,
                email: responder.clone(),
            });
        }
        if !self.is_pending() {
            return Err(ProjectDomainError::InvitationClosed {
                invitation_id: self.id,
                state: self.state,
            });
        }
        self.state = answer;
        self.responded_at = Some(clock.utc());
        Ok(())
    }
}
