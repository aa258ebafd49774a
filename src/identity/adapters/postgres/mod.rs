//! `PostgreSQL` adapters for accounts and sessions.

mod models;
mod repository;
mod schema;

pub use repository::PostgresAccountStore;
