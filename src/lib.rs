//! Chantier: collaborative task and project management core.
//!
//! This crate provides the domain rules behind a task and project tracker:
//! who may see, modify, or transition which entities. Users keep personal
//! tasks, open projects, invite collaborators with a role, and move tasks
//! through their statuses.
//!
//! # Architecture
//!
//! Chantier follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for storage
//! - **Adapters**: Concrete implementations of ports (in-memory, `PostgreSQL`)
//! - **Services**: Command and query operations taking an explicit identity
//!
//! # Modules
//!
//! - [`identity`]: Accounts, credentials, and authenticated identities
//! - [`task`]: Personal tasks and the shared status machine
//! - [`project`]: Projects, collaborators, invitations, and permissions
//! - [`config`]: Layered configuration loading
//! - [`telemetry`]: Structured logging setup
//! - [`db`]: Connection pooling and schema migrations

pub mod config;
pub mod db;
pub mod error;
pub mod identity;
pub mod project;
pub mod task;
pub mod telemetry;

pub use error::ErrorKind;
