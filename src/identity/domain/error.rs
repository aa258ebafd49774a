//! Error types for identity domain validation.

use crate::ErrorKind;
use thiserror::Error;

/// Errors returned while constructing identity domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IdentityDomainError {
    /// The email address is malformed.
    #[error("invalid email address '{0}'")]
    InvalidEmail(String),

    /// The last name is empty after trimming.
    #[error("last name must not be empty")]
    EmptyLastName,

    /// The first name is empty after trimming.
    #[error("first name must not be empty")]
    EmptyFirstName,

    /// The phone number is empty after trimming.
    #[error("phone number must not be empty")]
    EmptyPhone,

    /// The password is shorter than the configured minimum.
    #[error("password must contain at least {min} characters")]
    PasswordTooShort {
        /// Minimum accepted length.
        min: usize,
    },

    /// The password and its confirmation differ.
    #[error("password confirmation does not match")]
    PasswordMismatch,

    /// A session expiry cannot be represented.
    #[error("session expiry is out of range")]
    SessionExpiryOutOfRange,
}

impl IdentityDomainError {
    /// Classifies the error for callers.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        ErrorKind::ValidationFailed
    }
}
