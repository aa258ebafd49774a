//! Repository ports for users and login sessions.

use crate::ErrorKind;
use crate::identity::domain::{CredentialDigest, EmailAddress, Session, User, UserId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for identity repository operations.
pub type UserRepositoryResult<T> = Result<T, UserRepositoryError>;

/// User persistence contract.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Stores a newly registered user.
    ///
    /// # Errors
    ///
    /// Returns [`UserRepositoryError::DuplicateEmail`] when the address is
    /// already registered or [`UserRepositoryError::DuplicateUser`] when the
    /// identifier already exists.
    async fn store(&self, user: &User) -> UserRepositoryResult<()>;

    /// Finds a user by email address.
    ///
    /// Returns `None` when no user registered with the address.
    async fn find_by_email(&self, email: &EmailAddress) -> UserRepositoryResult<Option<User>>;

    /// Finds a user by identifier.
    ///
    /// Returns `None` when the user does not exist.
    async fn find_by_id(&self, id: UserId) -> UserRepositoryResult<Option<User>>;
}

/// Login session persistence contract.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Stores an issued session.
    ///
    /// # Errors
    ///
    /// Returns [`UserRepositoryError::DuplicateSession`] when the digest is
    /// already in use.
    async fn store_session(&self, session: &Session) -> UserRepositoryResult<()>;

    /// Finds a session by credential digest.
    ///
    /// Returns `None` when the credential was never issued or was revoked.
    async fn find_session(&self, digest: &CredentialDigest)
    -> UserRepositoryResult<Option<Session>>;

    /// Revokes a session. Revoking an unknown digest is not an error.
    async fn revoke_session(&self, digest: &CredentialDigest) -> UserRepositoryResult<()>;
}

/// Errors returned by identity repository implementations.
#[derive(Debug, Clone, Error)]
pub enum UserRepositoryError {
    /// A user with the same identifier already exists.
    #[error("duplicate user identifier: {0}")]
    DuplicateUser(UserId),

    /// The email address is already registered.
    #[error("email already registered: {0}")]
    DuplicateEmail(EmailAddress),

    /// A session with the same digest already exists.
    #[error("duplicate session credential")]
    DuplicateSession,

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl UserRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }

    /// Classifies the error for callers.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::DuplicateUser(_) | Self::DuplicateEmail(_) | Self::DuplicateSession => {
                ErrorKind::Conflict
            }
            Self::Persistence(_) => ErrorKind::UpstreamUnavailable,
        }
    }
}
