//! Error classification shared by every service.
//!
//! Each layer keeps its own `thiserror` enum; callers that only need to
//! decide how to react (show a form error, refuse, retry) match on
//! [`ErrorKind`] instead.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Caller-facing failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Input failed validation before any mutation was attempted.
    ValidationFailed,
    /// The caller lacks the capability required for the operation.
    NotAuthorized,
    /// A referenced entity or user does not exist.
    NotFound,
    /// The operation collides with existing state.
    Conflict,
    /// The storage layer failed; the operation may be retried.
    UpstreamUnavailable,
}

impl ErrorKind {
    /// Returns the canonical string form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ValidationFailed => "validation_failed",
            Self::NotAuthorized => "not_authorized",
            Self::NotFound => "not_found",
            Self::Conflict => "conflict",
            Self::UpstreamUnavailable => "upstream_unavailable",
        }
    }

    /// Returns `true` when retrying the same call may succeed.
    #[must_use]
    pub const fn is_retryable(self) -> bool {
        matches!(self, Self::UpstreamUnavailable)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
