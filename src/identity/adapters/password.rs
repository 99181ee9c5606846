//! Argon2 password hashing adapter.

use argon2::{
    Argon2,
    password_hash::{
        PasswordHash, PasswordHasher as _, PasswordVerifier as _, SaltString, rand_core::OsRng,
    },
};

use crate::identity::{
    domain::PasswordDigest,
    ports::{CredentialError, CredentialResult, PasswordHasher},
};

/// Password hasher backed by Argon2id with default parameters.
#[derive(Debug, Clone, Copy, Default)]
pub struct Argon2PasswordHasher;

impl Argon2PasswordHasher {
    /// Creates a hasher with default Argon2 parameters.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, password: &str) -> CredentialResult<PasswordDigest> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| PasswordDigest::new(hash.to_string()))
            .map_err(|err| CredentialError::Hashing(err.to_string()))
    }

    fn verify(&self, password: &str, digest: &PasswordDigest) -> CredentialResult<bool> {
        let parsed =
            PasswordHash::new(digest.as_str()).map_err(|_| CredentialError::MalformedDigest)?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }
}
