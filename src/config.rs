//! Layered configuration for Chantier.
//!
//! Values come from, in increasing precedence: built-in defaults, an
//! optional `chantier.toml` in the working directory, a `.env` file, and
//! `CHANTIER__`-prefixed environment variables with `__` separating nested
//! keys (for example `CHANTIER__DATABASE__URL` or
//! `CHANTIER__ACCOUNTS__SESSION_TTL_MINUTES`).

use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

/// Environment variable prefix.
const ENV_PREFIX: &str = "CHANTIER";

/// Base name of the optional configuration file.
const CONFIG_FILE: &str = "chantier";

/// Complete application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChantierConfig {
    /// Database connection settings.
    pub database: DatabaseSettings,
    /// Account and session policy.
    pub accounts: AccountSettings,
    /// Logging settings.
    pub telemetry: TelemetrySettings,
}

/// Database connection settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    /// `PostgreSQL` connection URL.
    pub url: String,
    /// Maximum number of pooled connections.
    pub max_connections: u32,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            url: "postgres://localhost/chantier".to_owned(),
            max_connections: 10,
        }
    }
}

/// Account registration and session policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccountSettings {
    /// Minimum accepted password length, in characters.
    pub min_password_length: usize,
    /// Lifetime of an issued login credential, in minutes.
    pub session_ttl_minutes: i64,
    /// Argon2id memory cost in KiB.
    pub password_memory_kib: u32,
    /// Argon2id iteration count.
    pub password_iterations: u32,
    /// Argon2id lane count.
    pub password_parallelism: u32,
}

impl Default for AccountSettings {
    fn default() -> Self {
        Self {
            min_password_length: 8,
            session_ttl_minutes: 12 * 60,
            password_memory_kib: 19_456,
            password_iterations: 2,
            password_parallelism: 1,
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TelemetrySettings {
    /// `tracing-subscriber` filter directive, e.g. `chantier=debug,info`.
    pub filter: String,
    /// Emit JSON lines instead of human-readable output.
    pub json: bool,
}

impl Default for TelemetrySettings {
    fn default() -> Self {
        Self {
            filter: "info".to_owned(),
            json: false,
        }
    }
}

impl ChantierConfig {
    /// Loads configuration from the optional file, `.env`, and the
    /// environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a source cannot be read or a value has
    /// the wrong type.
    pub fn load() -> Result<Self, ConfigError> {
        if let Err(err) = dotenvy::dotenv() {
            if !err.not_found() {
                return Err(ConfigError::Foreign(Box::new(err)));
            }
        }

        Config::builder()
            .add_source(File::with_name(CONFIG_FILE).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()
    }

    /// Parses configuration from a TOML document, filling gaps with
    /// defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the document is malformed or a value has
    /// the wrong type.
    pub fn from_toml(source: &str) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from_str(source, FileFormat::Toml))
            .build()?
            .try_deserialize()
    }
}
