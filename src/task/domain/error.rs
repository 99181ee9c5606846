//! Error types for task domain validation and parsing.

use super::{AttachmentId, TaskId};
use thiserror::Error;

/// Errors returned while constructing or mutating tasks.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TaskDomainError {
    /// The title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// The description is empty after trimming.
    #[error("task description must not be empty")]
    EmptyDescription,

    /// The assignee set is empty.
    #[error("a task needs at least one assignee")]
    NoAssignees,

    /// An hour value is negative or not finite.
    #[error("hours must be a finite, non-negative number, got {0}")]
    InvalidHours(f64),

    /// A dependency edge points at the task itself.
    #[error("task {0} cannot depend on itself")]
    SelfDependency(TaskId),

    /// Attachment metadata is incomplete.
    #[error("attachment requires a file name, original name, and MIME type")]
    IncompleteAttachment,

    /// The attachment does not belong to the task.
    #[error("attachment not found: {0}")]
    AttachmentNotFound(AttachmentId),
}

/// Error returned while parsing task statuses.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);

/// Error returned while parsing task priorities.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task priority: {0}")]
pub struct ParsePriorityError(pub String);

/// Error returned while parsing dependency kinds.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown dependency kind: {0}")]
pub struct ParseDependencyKindError(pub String);
