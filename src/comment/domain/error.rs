//! Error types for comment validation and parsing.

use super::CommentId;
use crate::task::domain::TaskId;
use thiserror::Error;

/// Errors returned while constructing or mutating comments.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CommentDomainError {
    /// The content is empty after trimming.
    #[error("comment content must not be empty")]
    EmptyContent,

    /// The parent comment belongs to another task.
    #[error("parent comment {parent} does not belong to task {task}")]
    ParentOnOtherTask {
        /// Parent comment addressed by the reply.
        parent: CommentId,
        /// Task the reply is posted on.
        task: TaskId,
    },
}

/// Error returned while parsing reaction kinds.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown reaction: {0}")]
pub struct ParseReactionKindError(pub String);
