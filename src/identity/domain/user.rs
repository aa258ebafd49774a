//! User aggregate and public profile.

use super::{EmailAddress, IdentityDomainError, UserId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Public part of a user record: what collaborators and inviters may see.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    email: EmailAddress,
    last_name: String,
    first_name: String,
    phone: String,
}

impl UserProfile {
    /// Creates a validated profile.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityDomainError`] when a name or the phone number is
    /// empty after trimming.
    pub fn new(
        email: EmailAddress,
        last_name: impl Into<String>,
        first_name: impl Into<String>,
        phone: impl Into<String>,
    ) -> Result<Self, IdentityDomainError> {
        Ok(Self {
            email,
            last_name: required(last_name.into(), IdentityDomainError::EmptyLastName)?,
            first_name: required(first_name.into(), IdentityDomainError::EmptyFirstName)?,
            phone: required(phone.into(), IdentityDomainError::EmptyPhone)?,
        })
    }

    /// Returns the email address.
    #[must_use]
    pub const fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Returns the family name.
    #[must_use]
    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    /// Returns the given name.
    #[must_use]
    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    /// Returns the phone number.
    #[must_use]
    pub fn phone(&self) -> &str {
        &self.phone
    }
}

fn required(value: String, error: IdentityDomainError) -> Result<String, IdentityDomainError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(error);
    }
    Ok(trimmed.to_owned())
}

/// PHC-formatted password hash.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wraps an already computed PHC string.
    #[must_use]
    pub const fn from_phc(value: String) -> Self {
        Self(value)
    }

    /// Returns the PHC string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(<redacted>)")
    }
}

/// Registered user aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    profile: UserProfile,
    password_hash: PasswordHash,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedUserData {
    /// Persisted user identifier.
    pub id: UserId,
    /// Persisted public profile.
    pub profile: UserProfile,
    /// Persisted password hash.
    pub password_hash: PasswordHash,
    /// Persisted registration timestamp.
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Creates a newly registered user.
    #[must_use]
    pub fn new(profile: UserProfile, password_hash: PasswordHash, clock: &impl Clock) -> Self {
        Self {
            id: UserId::new(),
            profile,
            password_hash,
            created_at: clock.utc(),
        }
    }

    /// Reconstructs a user from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedUserData) -> Self {
        Self {
            id: data.id,
            profile: data.profile,
            password_hash: data.password_hash,
            created_at: data.created_at,
        }
    }

    /// Returns the user identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Returns the email address.
    #[must_use]
    pub const fn email(&self) -> &EmailAddress {
        self.profile.email()
    }

    /// Returns the public profile.
    #[must_use]
    pub const fn profile(&self) -> &UserProfile {
        &self.profile
    }

    /// Returns the stored password hash.
    #[must_use]
    pub const fn password_hash(&self) -> &PasswordHash {
        &self.password_hash
    }

    /// Returns the registration timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
