//! Repository port for user persistence and notification delivery.

use crate::identity::domain::{EmailAddress, NotificationId, NotificationRecord, User, UserId};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for user repository operations.
pub type UserRepositoryResult<T> = Result<T, UserRepositoryError>;

/// User persistence contract.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Stores a new user.
    ///
    /// # Errors
    ///
    /// Returns [`UserRepositoryError::DuplicateUser`] when the identifier
    /// exists or [`UserRepositoryError::DuplicateEmail`] when the email is
    /// already registered.
    async fn store(&self, user: &User) -> UserRepositoryResult<()>;

    /// Persists changes to an existing user.
    ///
    /// # Errors
    ///
    /// Returns [`UserRepositoryError::NotFound`] when the user does not
    /// exist.
    async fn update(&self, user: &User) -> UserRepositoryResult<()>;

    /// Finds a user by identifier.
    async fn find_by_id(&self, id: UserId) -> UserRepositoryResult<Option<User>>;

    /// Finds a user by normalised email address.
    async fn find_by_email(&self, email: &EmailAddress) -> UserRepositoryResult<Option<User>>;

    /// Appends a notification to the user's persisted list.
    ///
    /// Implementations apply the append as a single write so concurrent
    /// appends for the same user are not lost.
    ///
    /// # Errors
    ///
    /// Returns [`UserRepositoryError::NotFound`] when the user does not
    /// exist.
    async fn append_notification(
        &self,
        user_id: UserId,
        record: NotificationRecord,
    ) -> UserRepositoryResult<()>;

    /// Marks one of the user's notifications as read and returns it.
    ///
    /// Like [`UserRepository::append_notification`] this is a single write,
    /// so it never discards notifications appended in the meantime.
    /// Returns `Ok(None)` when the user has no such notification.
    ///
    /// # Errors
    ///
    /// Returns [`UserRepositoryError::NotFound`] when the user does not
    /// exist.
    async fn mark_notification_read(
        &self,
        user_id: UserId,
        id: NotificationId,
        at: DateTime<Utc>,
    ) -> UserRepositoryResult<Option<NotificationRecord>>;
}

/// Errors returned by user repository implementations.
#[derive(Debug, Clone, Error)]
pub enum UserRepositoryError {
    /// A user with the same identifier already exists.
    #[error("duplicate user identifier: {0}")]
    DuplicateUser(UserId),

    /// A user with the same email already exists.
    #[error("duplicate email: {0}")]
    DuplicateEmail(EmailAddress),

    /// The user was not found.
    #[error("user not found: {0}")]
    NotFound(UserId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl UserRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
