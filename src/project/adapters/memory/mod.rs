//! In-memory adapters for project persistence.

mod project;

pub use project::InMemoryProjectStore;
