//! Applies the Chantier schema to the configured `PostgreSQL` database.
//!
//! Usage:
//!
//! ```text
//! CHANTIER__DATABASE__URL=postgres://localhost/chantier chantier-migrate
//! ```
//!
//! Configuration is read the same way as by the library: optional
//! `chantier.toml`, then `.env`, then `CHANTIER__` environment variables.

use chantier::config::ChantierConfig;
use chantier::db::{DatabaseSetupError, apply_migrations, build_pool};
use chantier::telemetry::{TelemetryError, init_tracing};
use thiserror::Error;

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that can occur while migrating.
#[derive(Debug, Error)]
enum MigrateError {
    #[error("failed to load configuration: {0}")]
    Config(#[from] config::ConfigError),
    #[error(transparent)]
    Telemetry(#[from] TelemetryError),
    #[error(transparent)]
    Database(#[from] DatabaseSetupError),
}

fn main() -> Result<(), BoxError> {
    run().map_err(Into::into)
}

fn run() -> Result<(), MigrateError> {
    let config = ChantierConfig::load()?;
    init_tracing(&config.telemetry)?;

    let pool = build_pool(&config.database)?;
    if let Err(err) = apply_migrations(&pool) {
        tracing::error!(error = %err, "migration aborted");
        return Err(err.into());
    }
    tracing::info!("schema is up to date");
    Ok(())
}
