//! `PostgreSQL` adapters for personal task persistence.

mod models;
mod repository;
mod schema;

pub use repository::PostgresTaskRepository;
