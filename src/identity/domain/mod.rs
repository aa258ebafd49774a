//! Domain model for user accounts and sessions.
//!
//! Users are identified by a normalized email address, which is also the
//! reference other contexts use when naming owners, collaborators, and
//! assignees.

mod authenticated;
mod email;
mod error;
mod ids;
mod session;
mod user;

pub use authenticated::Identity;
pub use email::EmailAddress;
pub use error::IdentityDomainError;
pub use ids::UserId;
pub use session::{CredentialDigest, Session};
pub use user::{PasswordHash, PersistedUserData, User, UserProfile};
