//! `PostgreSQL` connection pooling and schema setup.

use crate::config::DatabaseSettings;
use diesel::connection::SimpleConnection;
use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool, PoolError};
use thiserror::Error;

/// `PostgreSQL` connection pool shared by all Diesel adapters.
pub type PgPool = Pool<ConnectionManager<PgConnection>>;

/// Ordered schema migrations, applied by [`apply_migrations`].
pub const MIGRATIONS: [(&str, &str); 2] = [
    (
        "2026-10-01-000000_create_accounts",
        include_str!("../migrations/2026-10-01-000000_create_accounts/up.sql"),
    ),
    (
        "2026-10-01-000001_create_tasks_and_projects",
        include_str!("../migrations/2026-10-01-000001_create_tasks_and_projects/up.sql"),
    ),
];

/// Errors raised while preparing the database.
#[derive(Debug, Error)]
pub enum DatabaseSetupError {
    /// The pool could not be built or a connection checked out.
    #[error("connection pool error: {0}")]
    Pool(#[from] PoolError),

    /// A migration script failed.
    #[error("migration {name} failed: {source}")]
    Migration {
        /// Migration directory name.
        name: &'static str,
        /// Database failure.
        #[source]
        source: diesel::result::Error,
    },
}

/// Builds a connection pool from configuration.
///
/// # Errors
///
/// Returns [`DatabaseSetupError::Pool`] when the pool cannot be created.
pub fn build_pool(settings: &DatabaseSettings) -> Result<PgPool, DatabaseSetupError> {
    let manager = ConnectionManager::<PgConnection>::new(settings.url.as_str());
    Ok(Pool::builder()
        .max_size(settings.max_connections)
        .build(manager)?)
}

/// Applies every migration in order on one connection.
///
/// Scripts use `IF NOT EXISTS` guards, so reapplying them is harmless.
///
/// # Errors
///
/// Returns [`DatabaseSetupError`] when a connection cannot be obtained or a
/// script fails.
pub fn apply_migrations(pool: &PgPool) -> Result<(), DatabaseSetupError> {
    let mut connection = pool.get()?;
    for (name, sql) in MIGRATIONS {
        tracing::info!(migration = name, "applying migration");
        connection
            .batch_execute(sql)
            .map_err(|source| DatabaseSetupError::Migration { name, source })?;
    }
    Ok(())
}
