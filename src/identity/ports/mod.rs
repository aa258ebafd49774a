//! Port contracts for account and session storage.

pub mod repository;

pub use repository::{
    SessionRepository, UserRepository, UserRepositoryError, UserRepositoryResult,
};
