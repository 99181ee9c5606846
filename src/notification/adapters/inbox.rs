//! Inbox backed by the user repository.

use async_trait::async_trait;
use std::sync::Arc;

use crate::identity::{
    domain::{NotificationRecord, UserId},
    ports::{UserRepository, UserRepositoryError},
};
use crate::notification::ports::{ChannelError, ChannelResult, NotificationInbox};

/// Appends notifications to the list stored on each user.
#[derive(Debug, Clone)]
pub struct UserInbox<U>
where
    U: UserRepository,
{
    users: Arc<U>,
}

impl<U> UserInbox<U>
where
    U: UserRepository,
{
    /// Creates an inbox writing through `users`.
    #[must_use]
    pub const fn new(users: Arc<U>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl<U> NotificationInbox for UserInbox<U>
where
    U: UserRepository,
{
    async fn append(&self, recipient: UserId, record: NotificationRecord) -> ChannelResult<()> {
        self.users
            .append_notification(recipient, record)
            .await
            .map_err(|err| match err {
                UserRepositoryError::NotFound(id) => ChannelError::RecipientNotFound(id),
                other => ChannelError::Delivery(other.to_string()),
            })
    }
}
