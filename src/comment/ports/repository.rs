//! Repository port for comment persistence.

use crate::comment::domain::{Comment, CommentId};
use crate::store::StoreResult;
use crate::task::domain::TaskId;
use async_trait::async_trait;

/// Comment persistence contract.
///
/// Comments are deleted only through the cascades of
/// [`crate::store::WorkspaceStore`].
#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Stores a new comment.
    ///
    /// # Errors
    ///
    /// Returns [`crate::store::StoreError::NotFound`] when the comment's
    /// task does not exist, or [`crate::store::StoreError::Duplicate`] when
    /// the identifier is taken.
    async fn store_comment(&self, comment: &Comment) -> StoreResult<()>;

    /// Persists changes to an existing comment.
    ///
    /// # Errors
    ///
    /// Returns [`crate::store::StoreError::NotFound`] when the comment does
    /// not exist.
    async fn update_comment(&self, comment: &Comment) -> StoreResult<()>;

    /// Finds a comment by identifier.
    async fn find_comment(&self, id: CommentId) -> StoreResult<Option<Comment>>;

    /// Lists every comment on a task, oldest first.
    async fn list_task_comments(&self, task: TaskId) -> StoreResult<Vec<Comment>>;

    /// Lists the direct replies to a comment, oldest first.
    async fn list_replies(&self, parent: CommentId) -> StoreResult<Vec<Comment>>;

    /// Counts the comments on a task.
    async fn count_task_comments(&self, task: TaskId) -> StoreResult<usize>;
}
