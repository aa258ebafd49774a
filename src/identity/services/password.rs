//! Password hashing with Argon2id.
//!
//! Hashes are stored in PHC string format, which embeds the algorithm,
//! parameters, and salt, so verification does not depend on the parameters
//! currently configured.

use crate::identity::domain::PasswordHash;
use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{
        self, PasswordHash as PhcString, PasswordHasher, PasswordVerifier, SaltString,
        rand_core::OsRng,
    },
};
use thiserror::Error;

/// Errors raised while hashing or verifying passwords.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordError {
    /// The configured Argon2 parameters are out of range.
    #[error("invalid Argon2 parameters: {0}")]
    Parameters(String),

    /// Hashing failed.
    #[error("failed to hash password: {0}")]
    Hash(String),

    /// A stored hash could not be parsed or checked.
    #[error("failed to verify password: {0}")]
    Verify(String),

    /// The blocking worker running the hash computation did not finish.
    #[error("password worker failed: {0}")]
    Worker(String),
}

/// Argon2id hasher with fixed cost parameters.
#[derive(Debug, Clone)]
pub struct Argon2Hasher {
    params: Params,
}

impl Argon2Hasher {
    /// Creates a hasher with the given memory cost (KiB), iteration count,
    /// and parallelism.
    ///
    /// # Errors
    ///
    /// Returns [`PasswordError::Parameters`] when Argon2 rejects the values.
    pub fn new(memory_kib: u32, iterations: u32, parallelism: u32) -> Result<Self, PasswordError> {
        let params = Params::new(memory_kib, iterations, parallelism, Some(32))
            .map_err(|err| PasswordError::Parameters(err.to_string()))?;
        Ok(Self { params })
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    /// Hashes a plaintext password with a fresh random salt.
    ///
    /// # Errors
    ///
    /// Returns [`PasswordError::Hash`] when hashing fails.
    pub fn hash(&self, password: &str) -> Result<PasswordHash, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);
        let phc = self
            .argon2()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|err| PasswordError::Hash(err.to_string()))?;
        Ok(PasswordHash::from_phc(phc.to_string()))
    }

    /// Checks a plaintext password against a stored hash.
    ///
    /// # Errors
    ///
    /// Returns [`PasswordError::Verify`] when the stored hash is malformed.
    pub fn verify(&self, password: &str, hash: &PasswordHash) -> Result<bool, PasswordError> {
        let parsed =
            PhcString::new(hash.as_str()).map_err(|err| PasswordError::Verify(err.to_string()))?;
        match self.argon2().verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(err) => Err(PasswordError::Verify(err.to_string())),
        }
    }
}
