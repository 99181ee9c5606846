//! Credential store port: password hashing and verification.

use crate::identity::domain::PasswordDigest;
use thiserror::Error;

/// Result type for credential operations.
pub type CredentialResult<T> = Result<T, CredentialError>;

/// Hashes and verifies plain-text passwords.
///
/// Hashing is CPU-bound, so the port is synchronous.
pub trait PasswordHasher: Send + Sync {
    /// Hashes a plain-text password into a storable digest.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialError::Hashing`] when the hasher fails.
    fn hash(&self, password: &str) -> CredentialResult<PasswordDigest>;

    /// Checks a plain-text password against a stored digest.
    ///
    /// Returns `Ok(false)` for a wrong password.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialError::MalformedDigest`] when the stored digest
    /// cannot be parsed.
    fn verify(&self, password: &str, digest: &PasswordDigest) -> CredentialResult<bool>;
}

/// Errors returned by password hashers.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CredentialError {
    /// Hashing failed.
    #[error("failed to hash password: {0}")]
    Hashing(String),

    /// The stored digest is not a valid encoded hash.
    #[error("stored password digest is malformed")]
    MalformedDigest,
}
