//! Application services for registration, login, and identity resolution.

mod accounts;
mod credential;
mod password;

pub use accounts::{
    AccountError, AccountResult, AccountService, IssuedSession, LoginRequest,
    RegisterUserRequest,
};
pub use credential::generate_credential;
pub use password::{Argon2Hasher, PasswordError};
