//! `PostgreSQL` repository implementation for accounts and sessions.

use super::{
    models::{NewUserRow, SessionRow, UserRow},
    schema::{sessions, users},
};
use crate::db::PgPool;
use crate::identity::{
    domain::{
        CredentialDigest, EmailAddress, PasswordHash, PersistedUserData, Session, User, UserId,
        UserProfile,
    },
    ports::{SessionRepository, UserRepository, UserRepositoryError, UserRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL`-backed account store.
#[derive(Debug, Clone)]
pub struct PostgresAccountStore {
    pool: PgPool,
}

impl PostgresAccountStore {
    /// Creates a new store from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> UserRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> UserRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(UserRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(UserRepositoryError::persistence)?
    }
}

#[async_trait]
impl UserRepository for PostgresAccountStore {
    async fn store(&self, user: &User) -> UserRepositoryResult<()> {
        let user_id = user.id();
        let email = user.email().clone();
        let new_row = to_new_row(user);

        self.run_blocking(move |connection| {
            diesel::insert_into(users::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, ref info)
                        if is_email_unique_violation(info.as_ref()) =>
                    {
                        UserRepositoryError::DuplicateEmail(email.clone())
                    }
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        UserRepositoryError::DuplicateUser(user_id)
                    }
                    _ => UserRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn find_by_email(&self, email: &EmailAddress) -> UserRepositoryResult<Option<User>> {
        let lookup = email.as_str().to_owned();
        self.run_blocking(move |connection| {
            let row = users::table
                .filter(users::email.eq(lookup))
                .select(UserRow::as_select())
                .first::<UserRow>(connection)
                .optional()
                .map_err(UserRepositoryError::persistence)?;
            row.map(row_to_user).transpose()
        })
        .await
    }

    async fn find_by_id(&self, id: UserId) -> UserRepositoryResult<Option<User>> {
        self.run_blocking(move |connection| {
            let row = users::table
                .filter(users::id.eq(id.into_inner()))
                .select(UserRow::as_select())
                .first::<UserRow>(connection)
                .optional()
                .map_err(UserRepositoryError::persistence)?;
            row.map(row_to_user).transpose()
        })
        .await
    }
}

#[async_trait]
impl SessionRepository for PostgresAccountStore {
    async fn store_session(&self, session: &Session) -> UserRepositoryResult<()> {
        let row = SessionRow {
            digest: session.digest().as_str().to_owned(),
            email: session.email().as_str().to_owned(),
            issued_at: session.issued_at(),
            expires_at: session.expires_at(),
        };
        self.run_blocking(move |connection| {
            diesel::insert_into(sessions::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        UserRepositoryError::DuplicateSession
                    }
                    _ => UserRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn find_session(
        &self,
        digest: &CredentialDigest,
    ) -> UserRepositoryResult<Option<Session>> {
        let lookup = digest.as_str().to_owned();
        self.run_blocking(move |connection| {
            let row = sessions::table
                .filter(sessions::digest.eq(lookup))
                .select(SessionRow::as_select())
                .first::<SessionRow>(connection)
                .optional()
                .map_err(UserRepositoryError::persistence)?;
            row.map(row_to_session).transpose()
        })
        .await
    }

    async fn revoke_session(&self, digest: &CredentialDigest) -> UserRepositoryResult<()> {
        let lookup = digest.as_str().to_owned();
        self.run_blocking(move |connection| {
            diesel::delete(sessions::table.filter(sessions::digest.eq(lookup)))
                .execute(connection)
                .map_err(UserRepositoryError::persistence)?;
            Ok(())
        })
        .await
    }
}

fn to_new_row(user: &User) -> NewUserRow {
    let profile = user.profile();
    NewUserRow {
        id: user.id().into_inner(),
        email: profile.email().as_str().to_owned(),
        last_name: profile.last_name().to_owned(),
        first_name: profile.first_name().to_owned(),
        phone: profile.phone().to_owned(),
        password_hash: user.password_hash().as_str().to_owned(),
        created_at: user.created_at(),
    }
}

fn row_to_user(row: UserRow) -> UserRepositoryResult<User> {
    let UserRow {
        id,
        email: stored_email,
        last_name,
        first_name,
        phone,
        password_hash,
        created_at,
    } = row;

    let email = EmailAddress::new(stored_email).map_err(UserRepositoryError::persistence)?;
    let profile = UserProfile::new(email, last_name, first_name, phone)
        .map_err(UserRepositoryError::persistence)?;

    Ok(User::from_persisted(PersistedUserData {
        id: UserId::from_uuid(id),
        profile,
        password_hash: PasswordHash::from_phc(password_hash),
        created_at,
    }))
}

fn row_to_session(row: SessionRow) -> UserRepositoryResult<Session> {
    let email = EmailAddress::new(row.email).map_err(UserRepositoryError::persistence)?;
    Ok(Session::from_persisted(
        CredentialDigest::from_hex(row.digest),
        email,
        row.issued_at,
        row.expires_at,
    ))
}

fn is_email_unique_violation(info: &dyn DatabaseErrorInformation) -> bool {
    info.constraint_name()
        .is_some_and(|name| name == "users_email_key")
}
