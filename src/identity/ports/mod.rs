//! Port contracts for user accounts.
//!
//! Ports define infrastructure-agnostic interfaces used by account services
//! and by the notification inbox adapter.

pub mod credentials;
pub mod repository;
pub mod tokens;

pub use credentials::{CredentialError, CredentialResult, PasswordHasher};
pub use repository::{UserRepository, UserRepositoryError, UserRepositoryResult};
pub use tokens::{SessionToken, TokenError, TokenIssuer, TokenResult};
