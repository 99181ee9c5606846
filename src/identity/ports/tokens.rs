//! Token issuer port for session identity.

use crate::identity::domain::UserId;
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Result type for token operations.
pub type TokenResult<T> = Result<T, TokenError>;

/// Signed session token handed to a client after sign-in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionToken {
    /// Encoded token value.
    pub value: String,
    /// Instant after which the token is rejected.
    pub expires_at: DateTime<Utc>,
}

/// Issues and verifies session tokens.
pub trait TokenIssuer: Send + Sync {
    /// Issues a token binding the given user.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Signing`] when the token cannot be encoded.
    fn issue(&self, user_id: UserId, issued_at: DateTime<Utc>) -> TokenResult<SessionToken>;

    /// Verifies a token and returns the bound user.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Expired`] for expired tokens and
    /// [`TokenError::Invalid`] for anything else that fails verification.
    fn verify(&self, token: &str) -> TokenResult<UserId>;
}

/// Errors returned by token issuers.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    /// The token is malformed, tampered with, or signed with another key.
    #[error("invalid session token")]
    Invalid,

    /// The token has expired.
    #[error("session token expired")]
    Expired,

    /// The token could not be signed.
    #[error("failed to sign session token: {0}")]
    Signing(String),
}
