//! Service layer for registration, login, and credential resolution.

use super::{Argon2Hasher, PasswordError, generate_credential};
use crate::ErrorKind;
use crate::config::AccountSettings;
use crate::identity::{
    domain::{
        CredentialDigest, EmailAddress, Identity, IdentityDomainError, PasswordHash, Session, User,
        UserProfile,
    },
    ports::{SessionRepository, UserRepository, UserRepositoryError},
};
use chrono::{DateTime, TimeDelta, Utc};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for registering a new account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterUserRequest {
    email: String,
    last_name: String,
    first_name: String,
    phone: String,
    password: String,
    password_confirmation: String,
}

impl RegisterUserRequest {
    /// Creates a registration request. The confirmation defaults to the
    /// password itself; use [`Self::with_confirmation`] to pass what the user
    /// typed a second time.
    #[must_use]
    pub fn new(
        email: impl Into<String>,
        last_name: impl Into<String>,
        first_name: impl Into<String>,
        phone: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        let secret: String = password.into();
        Self {
            email: email.into(),
            last_name: last_name.into(),
            first_name: first_name.into(),
            phone: phone.into(),
            password_confirmation: secret.clone(),
            password: secret,
        }
    }

    /// Sets the password confirmation.
    #[must_use]
    pub fn with_confirmation(mut self, confirmation: impl Into<String>) -> Self {
        self.password_confirmation = confirmation.into();
        self
    }
}

/// Request payload for logging in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginRequest {
    email: String,
    password: String,
}

impl LoginRequest {
    /// Creates a login request.
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

/// Result of a successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedSession {
    credential: String,
    identity: Identity,
    expires_at: DateTime<Utc>,
}

impl IssuedSession {
    /// Returns the opaque credential to present on later calls.
    #[must_use]
    pub fn credential(&self) -> &str {
        &self.credential
    }

    /// Returns the logged-in identity.
    #[must_use]
    pub const fn identity(&self) -> &Identity {
        &self.identity
    }

    /// Returns the credential expiry.
    #[must_use]
    pub const fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }
}

/// Service-level errors for account operations.
#[derive(Debug, Error)]
pub enum AccountError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] IdentityDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] UserRepositoryError),
    /// Password hashing failed.
    #[error(transparent)]
    Password(#[from] PasswordError),
    /// The email and password pair does not match an account.
    #[error("invalid email or password")]
    InvalidCredentials,
    /// The credential was never issued or has been revoked.
    #[error("unknown credential")]
    UnknownCredential,
    /// The credential has expired.
    #[error("credential expired at {0}")]
    CredentialExpired(DateTime<Utc>),
    /// No account exists for the email address.
    #[error("no user registered with {0}")]
    UserNotFound(EmailAddress),
    /// The configured session lifetime is not a positive number of minutes
    /// within range.
    #[error("invalid session lifetime: {0} minutes")]
    InvalidSessionTtl(i64),
}

impl AccountError {
    /// Classifies the error for callers.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Domain(err) => err.kind(),
            Self::Repository(err) => err.kind(),
            Self::Password(PasswordError::Parameters(_) | PasswordError::Hash(_))
            | Self::InvalidSessionTtl(_) => ErrorKind::ValidationFailed,
            Self::Password(PasswordError::Verify(_) | PasswordError::Worker(_)) => {
                ErrorKind::UpstreamUnavailable
            }
            Self::InvalidCredentials | Self::UnknownCredential | Self::CredentialExpired(_) => {
                ErrorKind::NotAuthorized
            }
            Self::UserNotFound(_) => ErrorKind::NotFound,
        }
    }
}

/// Result type for account service operations.
pub type AccountResult<T> = Result<T, AccountError>;

/// Account orchestration service; also the Auth collaborator that resolves
/// credentials into identities.
#[derive(Clone)]
pub struct AccountService<R, C>
where
    R: UserRepository + SessionRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
    hasher: Argon2Hasher,
    min_password_length: usize,
    session_ttl: TimeDelta,
}

impl<R, C> AccountService<R, C>
where
    R: UserRepository + SessionRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new account service.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::Password`] when the configured Argon2
    /// parameters are invalid and [`AccountError::InvalidSessionTtl`] when
    /// the session lifetime is not a positive, representable number of
    /// minutes.
    pub fn new(repository: Arc<R>, clock: Arc<C>, settings: &AccountSettings) -> AccountResult<Self> {
        let hasher = Argon2Hasher::new(
            settings.password_memory_kib,
            settings.password_iterations,
            settings.password_parallelism,
        )?;
        let session_ttl = TimeDelta::try_minutes(settings.session_ttl_minutes)
            .filter(|ttl| *ttl > TimeDelta::zero())
            .ok_or(AccountError::InvalidSessionTtl(settings.session_ttl_minutes))?;
        Ok(Self {
            repository,
            clock,
            hasher,
            min_password_length: settings.min_password_length,
            session_ttl,
        })
    }

    /// Registers a new account.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::Domain`] when a field fails validation or the
    /// confirmation differs, and [`AccountError::Repository`] when the email
    /// is already registered or persistence fails.
    pub async fn register(&self, request: RegisterUserRequest) -> AccountResult<User> {
        let RegisterUserRequest {
            email: address,
            last_name,
            first_name,
            phone,
            password,
            password_confirmation,
        } = request;

        let email = EmailAddress::new(address)?;
        let profile = UserProfile::new(email, last_name, first_name, phone)?;
        if password.chars().count() < self.min_password_length {
            return Err(IdentityDomainError::PasswordTooShort {
                min: self.min_password_length,
            }
            .into());
        }
        if password != password_confirmation {
            return Err(IdentityDomainError::PasswordMismatch.into());
        }

        let hash = self.hash_password(password).await?;
        let user = User::new(profile, hash, &*self.clock);
        self.repository.store(&user).await?;
        tracing::info!(user = %user.email(), user_id = %user.id(), "registered user");
        Ok(user)
    }

    /// Verifies a password and issues a new credential.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::InvalidCredentials`] for an unknown email or
    /// a wrong password, and [`AccountError::Repository`] when persistence
    /// fails.
    pub async fn login(&self, request: LoginRequest) -> AccountResult<IssuedSession> {
        let Ok(email) = EmailAddress::new(request.email) else {
            return Err(AccountError::InvalidCredentials);
        };
        let Some(user) = self.repository.find_by_email(&email).await? else {
            tracing::warn!(user = %email, "login rejected: unknown account");
            return Err(AccountError::InvalidCredentials);
        };
        if !self
            .verify_password(request.password, user.password_hash().clone())
            .await?
        {
            tracing::warn!(user = %email, "login rejected: wrong password");
            return Err(AccountError::InvalidCredentials);
        }

        let credential = generate_credential();
        let session = Session::open(
            CredentialDigest::of(&credential),
            email.clone(),
            self.session_ttl,
            &*self.clock,
        )?;
        self.repository.store_session(&session).await?;
        tracing::info!(user = %email, expires_at = %session.expires_at(), "issued session");

        Ok(IssuedSession {
            credential,
            identity: Identity::new(email),
            expires_at: session.expires_at(),
        })
    }

    /// Resolves a credential into the identity it was issued to.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::UnknownCredential`] or
    /// [`AccountError::CredentialExpired`] when the credential cannot be
    /// used, and [`AccountError::Repository`] when persistence fails.
    pub async fn authenticate(&self, credential: &str) -> AccountResult<Identity> {
        let digest = CredentialDigest::of(credential);
        let session = self
            .repository
            .find_session(&digest)
            .await?
            .ok_or(AccountError::UnknownCredential)?;
        if session.is_expired_at(self.clock.utc()) {
            return Err(AccountError::CredentialExpired(session.expires_at()));
        }
        Ok(Identity::new(session.email().clone()))
    }

    /// Revokes a credential. Unknown credentials are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::Repository`] when persistence fails.
    pub async fn logout(&self, credential: &str) -> AccountResult<()> {
        let digest = CredentialDigest::of(credential);
        self.repository.revoke_session(&digest).await?;
        tracing::debug!("revoked session");
        Ok(())
    }

    /// Returns the profile of the calling user.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::UserNotFound`] when the identity no longer
    /// maps to an account, and [`AccountError::Repository`] when persistence
    /// fails.
    pub async fn profile(&self, identity: &Identity) -> AccountResult<UserProfile> {
        self.repository
            .find_by_email(identity.email())
            .await?
            .map(|user| user.profile().clone())
            .ok_or_else(|| AccountError::UserNotFound(identity.email().clone()))
    }

    /// Looks up another user's public profile by email.
    ///
    /// Returns `Ok(None)` when nobody registered with the address.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::Domain`] when the address is malformed and
    /// [`AccountError::Repository`] when persistence fails.
    pub async fn find_by_email(&self, address: &str) -> AccountResult<Option<UserProfile>> {
        let email = EmailAddress::new(address)?;
        Ok(self
            .repository
            .find_by_email(&email)
            .await?
            .map(|user| user.profile().clone()))
    }

    async fn hash_password(&self, password: String) -> AccountResult<PasswordHash> {
        let hasher = self.hasher.clone();
        let hash = tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|err| PasswordError::Worker(err.to_string()))??;
        Ok(hash)
    }

    async fn verify_password(&self, password: String, hash: PasswordHash) -> AccountResult<bool> {
        let hasher = self.hasher.clone();
        let matches = tokio::task::spawn_blocking(move || hasher.verify(&password, &hash))
            .await
            .map_err(|err| PasswordError::Worker(err.to_string()))??;
        Ok(matches)
    }
}
