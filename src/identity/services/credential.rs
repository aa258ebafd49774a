//! Opaque login credential generation.

use rand::{Rng, distributions::Alphanumeric, thread_rng};

/// Number of alphanumeric characters in an issued credential.
const CREDENTIAL_LENGTH: usize = 48;

/// Generates a random opaque credential.
///
/// The format carries no meaning; callers present it back verbatim and the
/// store only keeps its digest.
#[must_use]
pub fn generate_credential() -> String {
    thread_rng()
        .sample_iter(&Alphanumeric)
        .take(CREDENTIAL_LENGTH)
        .map(char::from)
        .collect()
}
