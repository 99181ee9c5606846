//! Credential a user signs in with.

use super::IdentityDomainError;
use serde::{Deserialize, Serialize};

/// Opaque password hash in PHC string format.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PasswordDigest(String);

impl PasswordDigest {
    /// Wraps an already-hashed password.
    #[must_use]
    pub fn new(digest: impl Into<String>) -> Self {
        Self(digest.into())
    }

    /// Returns the encoded digest.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for PasswordDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("PasswordDigest(..)")
    }
}

/// Identity asserted by an external provider, such as an OAuth subject.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExternalIdentity {
    provider: String,
    subject: String,
}

impl ExternalIdentity {
    /// Creates a validated external identity.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityDomainError::InvalidExternalIdentity`] when either
    /// part is empty after trimming.
    pub fn new(
        provider: impl Into<String>,
        subject: impl Into<String>,
    ) -> Result<Self, IdentityDomainError> {
        let provider_name = provider.into().trim().to_ascii_lowercase();
        let subject_id = subject.into().trim().to_owned();
        if provider_name.is_empty() || subject_id.is_empty() {
            return Err(IdentityDomainError::InvalidExternalIdentity);
        }
        Ok(Self {
            provider: provider_name,
            subject: subject_id,
        })
    }

    /// Returns the provider name, lowercased.
    #[must_use]
    pub fn provider(&self) -> &str {
        &self.provider
    }

    /// Returns the provider-scoped subject identifier.
    #[must_use]
    pub fn subject(&self) -> &str {
        &self.subject
    }
}

/// The single credential of a user account.
///
/// Exactly one of a password or an external identity is ever set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Credential {
    /// Local password account.
    Password {
        /// Hashed password.
        digest: PasswordDigest,
    },
    /// Federated account.
    External {
        /// Provider-asserted identity.
        identity: ExternalIdentity,
    },
}

impl Credential {
    /// Returns the password digest for local accounts.
    #[must_use]
    pub const fn password(&self) -> Option<&PasswordDigest> {
        match self {
            Self::Password { digest } => Some(digest),
            Self::External { .. } => None,
        }
    }

    /// Returns the external identity for federated accounts.
    #[must_use]
    pub const fn external(&self) -> Option<&ExternalIdentity> {
        match self {
            Self::Password { .. } => None,
            Self::External { identity } => Some(identity),
        }
    }
}
