//! Membership of a user in a project.

use super::Role;
use crate::identity::domain::{EmailAddress, UserProfile};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user who takes part in a project, with the role they hold.
///
/// Names are copied from the user's profile when they join.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collaborator {
    email: EmailAddress,
    last_name: String,
    first_name: String,
    role: Role,
    joined_at: DateTime<Utc>,
}

impl Collaborator {
    /// Creates a collaborator entry for `profile` joining at `joined_at`.
    #[must_use]
    pub fn join(profile: &UserProfile, role: Role, joined_at: DateTime<Utc>) -> Self {
        Self {
            email: profile.email().clone(),
            last_name: profile.last_name().to_owned(),
            first_name: profile.first_name().to_owned(),
            role,
            joined_at,
        }
    }

    /// Reconstructs a collaborator from persisted storage.
    #[must_use]
    pub const fn from_persisted(
        email: EmailAddress,
        last_name: String,
        first_name: String,
        role: Role,
        joined_at: DateTime<Utc>,
    ) -> Self {
        Self {
            email,
            last_name,
            first_name,
            role,
            joined_at,
        }
    }

    /// Returns the collaborator's email address.
    #[must_use]
    pub const fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Returns the collaborator's last name.
    #[must_use]
    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    /// Returns the collaborator's first name.
    #[must_use]
    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    /// Returns the collaborator's role.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    /// Returns when the collaborator joined.
    #[must_use]
    pub const fn joined_at(&self) -> DateTime<Utc> {
        self.joined_at
    }

    pub(super) const fn set_role(&mut self, role: Role) {
        self.role = role;
    }
}
