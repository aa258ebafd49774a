//! Port contracts for project persistence.

mod repository;

pub use repository::{
    InvitationRepository, ProjectRepository, ProjectRepositoryError, ProjectRepositoryResult,
};
