//! Authenticated caller identity.

use super::EmailAddress;
use serde::{Deserialize, Serialize};

/// The user on whose behalf a command or query runs.
///
/// Produced by [`crate::identity::services::AccountService::authenticate`]
/// and passed explicitly into every service call.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Identity {
    email: EmailAddress,
}

impl Identity {
    /// Creates an identity for the given email address.
    #[must_use]
    pub const fn new(email: EmailAddress) -> Self {
        Self { email }
    }

    /// Returns the authenticated email address.
    #[must_use]
    pub const fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Returns `true` when this identity is the given user.
    #[must_use]
    pub fn is(&self, email: &EmailAddress) -> bool {
        &self.email == email
    }
}

impl From<EmailAddress> for Identity {
    fn from(email: EmailAddress) -> Self {
        Self::new(email)
    }
}
