//! Events emitted by lifecycle services after a commit.

use crate::comment::domain::CommentId;
use crate::identity::domain::{NotificationKind, UserId};
use crate::project::domain::{Project, ProjectId};
use crate::task::domain::{Priority, Task, TaskId, TaskStatus};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Task fields captured at the moment an event was emitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskSnapshot {
    /// Task identifier.
    pub id: TaskId,
    /// Owning project.
    pub project_id: ProjectId,
    /// Title.
    pub title: String,
    /// Description.
    pub description: String,
    /// Status after the mutation.
    pub status: TaskStatus,
    /// Priority.
    pub priority: Priority,
    /// Deadline.
    pub deadline: DateTime<Utc>,
    /// Assignees after the mutation.
    pub assignees: Vec<UserId>,
    /// Creating user.
    pub created_by: UserId,
}

impl From<&Task> for TaskSnapshot {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id(),
            project_id: task.project_id(),
            title: task.title().to_owned(),
            description: task.description().to_owned(),
            status: task.status(),
            priority: task.priority(),
            deadline: task.deadline(),
            assignees: task.assignees().to_vec(),
            created_by: task.created_by(),
        }
    }
}

/// Project fields captured at the moment an event was emitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectSnapshot {
    /// Project identifier.
    pub id: ProjectId,
    /// Project name.
    pub name: String,
}

impl From<&Project> for ProjectSnapshot {
    fn from(project: &Project) -> Self {
        Self {
            id: project.id(),
            name: project.name().to_owned(),
        }
    }
}

/// Something that happened to a task or project and may concern users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifecycleEvent {
    /// A user was assigned to a task.
    TaskAssigned {
        /// The task.
        task: TaskSnapshot,
        /// The newly assigned user.
        assignee: UserId,
    },
    /// A task's status changed.
    TaskStatusChanged {
        /// The task, with its new status.
        task: TaskSnapshot,
        /// Status before the change.
        previous: TaskStatus,
        /// User who made the change.
        changed_by: UserId,
    },
    /// A comment was posted on a task.
    TaskCommented {
        /// The task.
        task: TaskSnapshot,
        /// The new comment.
        comment_id: CommentId,
        /// Commenting user.
        commenter: UserId,
        /// Commenting user's display name.
        commenter_name: String,
    },
    /// A task's deadline is close.
    DeadlineApproaching {
        /// The task.
        task: TaskSnapshot,
        /// Whole days left, rounded up.
        days_remaining: u64,
    },
    /// A user was added to a project.
    ProjectMemberAdded {
        /// The project.
        project: ProjectSnapshot,
        /// The added user.
        member: UserId,
        /// User who added them.
        added_by: UserId,
        /// Display name of the user who added them.
        added_by_name: String,
    },
}

impl LifecycleEvent {
    /// Returns the notification kind recorded for this event.
    #[must_use]
    pub const fn kind(&self) -> NotificationKind {
        match self {
            Self::TaskAssigned { .. } => NotificationKind::TaskAssigned,
            Self::TaskStatusChanged { .. } => NotificationKind::TaskStatusChanged,
            Self::TaskCommented { .. } => NotificationKind::TaskComment,
            Self::DeadlineApproaching { .. } => NotificationKind::TaskDeadline,
            Self::ProjectMemberAdded { .. } => NotificationKind::ProjectMemberAdded,
        }
    }

    /// Returns the project the event belongs to.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        match self {
            Self::TaskAssigned { task, .. }
            | Self::TaskStatusChanged { task, .. }
            | Self::TaskCommented { task, .. }
            | Self::DeadlineApproaching { task, .. } => task.project_id,
            Self::ProjectMemberAdded { project, .. } => project.id,
        }
    }

    /// Returns the task the event is about, if any.
    #[must_use]
    pub const fn task_id(&self) -> Option<TaskId> {
        match self {
            Self::TaskAssigned { task, .. }
            | Self::TaskStatusChanged { task, .. }
            | Self::TaskCommented { task, .. }
            | Self::DeadlineApproaching { task, .. } => Some(task.id),
            Self::ProjectMemberAdded { .. } => None,
        }
    }

    /// Returns the comment the event is about, if any.
    #[must_use]
    pub const fn comment_id(&self) -> Option<CommentId> {
        match self {
            Self::TaskCommented { comment_id, .. } => Some(*comment_id),
            _ => None,
        }
    }
}
