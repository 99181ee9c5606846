//! Error types for identity domain validation and parsing.

use super::NotificationId;
use thiserror::Error;

/// Errors returned while constructing or mutating user values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IdentityDomainError {
    /// The display name is empty after trimming.
    #[error("user name must not be empty")]
    EmptyName,

    /// The email address is malformed.
    #[error("invalid email address '{0}'")]
    InvalidEmail(String),

    /// The plain-text password is shorter than the minimum length.
    #[error("password must be at least {min} characters")]
    PasswordTooShort {
        /// Minimum accepted password length.
        min: usize,
    },

    /// The external identity provider or subject is empty.
    #[error("external identity requires a provider and a subject")]
    InvalidExternalIdentity,

    /// The notification does not belong to the user.
    #[error("notification not found: {0}")]
    NotificationNotFound(NotificationId),
}

/// Error returned while parsing system roles.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown system role: {0}")]
pub struct ParseSystemRoleError(pub String);
