//! Notifications persisted on the receiving user.

use super::NotificationId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of lifecycle event a notification reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationKind {
    /// The user was assigned to a task.
    TaskAssigned,
    /// A task the user is assigned to changed status.
    TaskStatusChanged,
    /// Someone commented on a task the user follows.
    TaskComment,
    /// A task the user is assigned to is nearing its deadline.
    TaskDeadline,
    /// The user was added to a project.
    ProjectMemberAdded,
}

impl NotificationKind {
    /// Returns the canonical wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TaskAssigned => "TASK_ASSIGNED",
            Self::TaskStatusChanged => "TASK_STATUS_CHANGED",
            Self::TaskComment => "TASK_COMMENT",
            Self::TaskDeadline => "TASK_DEADLINE",
            Self::ProjectMemberAdded => "PROJECT_MEMBER_ADDED",
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A notification as stored in a user's notification list.
///
/// Serialises to `{id, type, message, read, createdAt}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationRecord {
    id: NotificationId,
    #[serde(rename = "type")]
    kind: NotificationKind,
    message: String,
    read: bool,
    created_at: DateTime<Utc>,
}

impl NotificationRecord {
    /// Creates an unread notification.
    #[must_use]
    pub fn new(kind: NotificationKind, message: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id: NotificationId::new(),
            kind,
            message: message.into(),
            read: false,
            created_at,
        }
    }

    /// Returns the notification identifier.
    #[must_use]
    pub const fn id(&self) -> NotificationId {
        self.id
    }

    /// Returns the notification kind.
    #[must_use]
    pub const fn kind(&self) -> NotificationKind {
        self.kind
    }

    /// Returns the human-readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns whether the user has read the notification.
    #[must_use]
    pub const fn is_read(&self) -> bool {
        self.read
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub(crate) const fn mark_read(&mut self) {
        self.read = true;
    }
}
