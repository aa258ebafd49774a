//! In-memory store for users and login sessions.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::identity::{
    domain::{CredentialDigest, EmailAddress, Session, User, UserId},
    ports::{SessionRepository, UserRepository, UserRepositoryError, UserRepositoryResult},
};

/// Thread-safe in-memory account store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAccountStore {
    state: Arc<RwLock<InMemoryAccountState>>,
}

#[derive(Debug, Default)]
struct InMemoryAccountState {
    users: HashMap<UserId, User>,
    email_index: HashMap<EmailAddress, UserId>,
    sessions: HashMap<CredentialDigest, Session>,
}

impl InMemoryAccountStore {
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> UserRepositoryResult<RwLockReadGuard<'_, InMemoryAccountState>> {
        self.state.read().map_err(|err| {
            UserRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn write(&self) -> UserRepositoryResult<RwLockWriteGuard<'_, InMemoryAccountState>> {
        self.state.write().map_err(|err| {
            UserRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }
}

#[async_trait]
impl UserRepository for InMemoryAccountStore {
    async fn store(&self, user: &User) -> UserRepositoryResult<()> {
        let mut state = self.write()?;
        if state.users.contains_key(&user.id()) {
            return Err(UserRepositoryError::DuplicateUser(user.id()));
        }
        if state.email_index.contains_key(user.email()) {
            return Err(UserRepositoryError::DuplicateEmail(user.email().clone()));
        }

        state.email_index.insert(user.email().clone(), user.id());
        state.users.insert(user.id(), user.clone());
        Ok(())
    }

    async fn find_by_email(&self, email: &EmailAddress) -> UserRepositoryResult<Option<User>> {
        let state = self.read()?;
        Ok(state
            .email_index
            .get(email)
            .and_then(|id| state.users.get(id))
            .cloned())
    }

    async fn find_by_id(&self, id: UserId) -> UserRepositoryResult<Option<User>> {
        let state = self.read()?;
        Ok(state.users.get(&id).cloned())
    }
}

#[async_trait]
impl SessionRepository for InMemoryAccountStore {
    async fn store_session(&self, session: &Session) -> UserRepositoryResult<()> {
        let mut state = self.write()?;
        if state.sessions.contains_key(session.digest()) {
            return Err(UserRepositoryError::DuplicateSession);
        }
        state
            .sessions
            .insert(session.digest().clone(), session.clone());
        Ok(())
    }

    async fn find_session(
        &self,
        digest: &CredentialDigest,
    ) -> UserRepositoryResult<Option<Session>> {
        let state = self.read()?;
        Ok(state.sessions.get(digest).cloned())
    }

    async fn revoke_session(&self, digest: &CredentialDigest) -> UserRepositoryResult<()> {
        let mut state = self.write()?;
        state.sessions.remove(digest);
        Ok(())
    }
}
