//! Delivery channels: persisted inbox, real-time push, and email.

use crate::comment::domain::CommentId;
use crate::identity::domain::{NotificationKind, NotificationRecord, UserId};
use crate::project::domain::ProjectId;
use crate::task::domain::TaskId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Result type for channel operations.
pub type ChannelResult<T> = Result<T, ChannelError>;

/// Errors returned by delivery channels.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ChannelError {
    /// The addressed user does not exist.
    #[error("notification recipient not found: {0}")]
    RecipientNotFound(UserId),

    /// The channel could not deliver the message.
    #[error("delivery failed: {0}")]
    Delivery(String),
}

/// Real-time push topic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PushTopic {
    /// Personal topic of one user.
    User(UserId),
    /// Topic shared by everyone watching a project.
    Project(ProjectId),
}

impl fmt::Display for PushTopic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User(id) => write!(f, "user-{id}"),
            Self::Project(id) => write!(f, "project-{id}"),
        }
    }
}

/// Payload published on a push topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PushEvent {
    /// Event kind.
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    /// Rendered message.
    pub message: String,
    /// Project the event belongs to.
    pub project_id: ProjectId,
    /// Task the event is about, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_id: Option<TaskId>,
    /// Comment the event is about, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment_id: Option<CommentId>,
    /// When the event was published.
    pub created_at: DateTime<Utc>,
}

/// A composed email ready to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    /// Sender address.
    pub from: String,
    /// Recipient address.
    pub to: String,
    /// Subject line.
    pub subject: String,
    /// HTML body.
    pub html: String,
}

/// Persisted per-user notification list.
#[async_trait]
pub trait NotificationInbox: Send + Sync {
    /// Appends `record` to the recipient's list.
    ///
    /// # Errors
    ///
    /// Returns [`ChannelError::RecipientNotFound`] for unknown users and
    /// [`ChannelError::Delivery`] when the write fails.
    async fn append(&self, recipient: UserId, record: NotificationRecord) -> ChannelResult<()>;
}

/// Real-time push channel.
///
/// Publishing to a topic nobody listens on succeeds.
#[async_trait]
pub trait PushChannel: Send + Sync {
    /// Publishes `event` on `topic`.
    ///
    /// # Errors
    ///
    /// Returns [`ChannelError::Delivery`] when the transport fails.
    async fn publish(&self, topic: PushTopic, event: PushEvent) -> ChannelResult<()>;
}

/// Outbound email transport.
#[async_trait]
pub trait EmailSender: Send + Sync {
    /// Sends `email`.
    ///
    /// # Errors
    ///
    /// Returns [`ChannelError::Delivery`] when the transport rejects the
    /// message.
    async fn send(&self, email: OutgoingEmail) -> ChannelResult<()>;
}
