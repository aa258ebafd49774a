//! Login sessions keyed by credential digest.

use super::{EmailAddress, IdentityDomainError};
use chrono::{DateTime, Duration, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// Hex-encoded SHA-256 digest of an opaque credential.
///
/// Only digests are stored; the plaintext credential is returned to the
/// caller once at login.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CredentialDigest(String);

impl CredentialDigest {
    /// Computes the digest of a plaintext credential.
    #[must_use]
    pub fn of(credential: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(credential.as_bytes());
        Self(hex::encode(hasher.finalize()))
    }

    /// Wraps a digest read back from storage.
    #[must_use]
    pub const fn from_hex(value: String) -> Self {
        Self(value)
    }

    /// Returns the hex digest.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CredentialDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An issued login session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    digest: CredentialDigest,
    email: EmailAddress,
    issued_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
}

impl Session {
    /// Opens a session for `email` that lasts `ttl` from now.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityDomainError::SessionExpiryOutOfRange`] when the
    /// expiry falls outside the representable time range.
    pub fn open(
        digest: CredentialDigest,
        email: EmailAddress,
        ttl: Duration,
        clock: &impl Clock,
    ) -> Result<Self, IdentityDomainError> {
        let issued_at = clock.utc();
        let expires_at = issued_at
            .checked_add_signed(ttl)
            .ok_or(IdentityDomainError::SessionExpiryOutOfRange)?;
        Ok(Self {
            digest,
            email,
            issued_at,
            expires_at,
        })
    }

    /// Reconstructs a session from persisted storage.
    #[must_use]
    pub const fn from_persisted(
        digest: CredentialDigest,
        email: EmailAddress,
        issued_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            digest,
            email,
            issued_at,
            expires_at,
        }
    }

    /// Returns the credential digest.
    #[must_use]
    pub const fn digest(&self) -> &CredentialDigest {
        &self.digest
    }

    /// Returns the session owner.
    #[must_use]
    pub const fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Returns the issue timestamp.
    #[must_use]
    pub const fn issued_at(&self) -> DateTime<Utc> {
        self.issued_at
    }

    /// Returns the expiry timestamp.
    #[must_use]
    pub const fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// Returns `true` once `now` has reached the expiry timestamp.
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}
