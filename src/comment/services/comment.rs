//! Editing, reactions, and thread reads for task comments.

use mockable::Clock;
use std::sync::Arc;
use tracing::info;

use crate::access::{AccessDenied, Capability, DenialCode, RequestContext, Resource, authorize};
use crate::comment::domain::{Comment, CommentId, CommentThread, ReactionKind, ReactionOutcome};
use crate::error::{EntityRef, ServiceError, ServiceResult};
use crate::store::WorkspaceStore;
use crate::task::domain::TaskId;

/// Comment service.
#[derive(Clone)]
pub struct CommentService<S, C>
where
    S: WorkspaceStore,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    clock: Arc<C>,
}

impl<S, C> CommentService<S, C>
where
    S: WorkspaceStore,
    C: Clock + Send + Sync,
{
    /// Creates a comment service.
    #[must_use]
    pub const fn new(store: Arc<S>, clock: Arc<C>) -> Self {
        Self { store, clock }
    }

    /// Replaces a comment's content, keeping the old content in its edit
    /// history.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Forbidden`] for callers who may no longer
    /// comment on the task or did not write the comment, and
    /// [`ServiceError::ValidationFailed`] for blank content.
    pub async fn edit_comment(
        &self,
        ctx: &RequestContext,
        id: CommentId,
        content: &str,
    ) -> ServiceResult<Comment> {
        let mut comment = self.load_comment(id).await?;
        self.authorize_on_task(ctx, comment.task_id(), Capability::CommentOnTask)
            .await?;
        if comment.author() != ctx.user_id() {
            return Err(AccessDenied::new(
                DenialCode::Role,
                "not authorized: only the author may edit a comment",
            )
            .into());
        }
        comment.edit(content, &*self.clock)?;
        self.store.update_comment(&comment).await?;
        info!(comment_id = %id, correlation_id = %ctx.correlation_id(), "comment edited");
        Ok(comment)
    }

    /// Toggles the caller's reaction on a comment.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Forbidden`] for callers who may not read the
    /// comment's task.
    pub async fn react_to_comment(
        &self,
        ctx: &RequestContext,
        id: CommentId,
        kind: ReactionKind,
    ) -> ServiceResult<(Comment, ReactionOutcome)> {
        let mut comment = self.load_comment(id).await?;
        self.authorize_on_task(ctx, comment.task_id(), Capability::ReadTask)
            .await?;
        let outcome = comment.react(ctx.user_id(), kind, &*self.clock);
        self.store.update_comment(&comment).await?;
        info!(comment_id = %id, reaction = kind.as_str(), ?outcome, "comment reaction toggled");
        Ok((comment, outcome))
    }

    /// Returns a comment with its direct replies, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Forbidden`] for callers who may not read the
    /// comment's task.
    pub async fn thread(&self, ctx: &RequestContext, id: CommentId) -> ServiceResult<CommentThread> {
        let root = self.load_comment(id).await?;
        self.authorize_on_task(ctx, root.task_id(), Capability::ReadTask)
            .await?;
        let replies = self.store.list_replies(id).await?;
        Ok(CommentThread { root, replies })
    }

    /// Lists every comment on a task, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Forbidden`] for callers who may not read the
    /// task.
    pub async fn list_task_comments(
        &self,
        ctx: &RequestContext,
        task_id: TaskId,
    ) -> ServiceResult<Vec<Comment>> {
        self.authorize_on_task(ctx, task_id, Capability::ReadTask)
            .await?;
        Ok(self.store.list_task_comments(task_id).await?)
    }

    async fn authorize_on_task(
        &self,
        ctx: &RequestContext,
        task_id: TaskId,
        capability: Capability,
    ) -> ServiceResult<()> {
        let task = self
            .store
            .find_task(task_id)
            .await?
            .ok_or(ServiceError::NotFound(EntityRef::Task(task_id)))?;
        let project = self
            .store
            .find_project(task.project_id())
            .await?
            .ok_or(ServiceError::NotFound(EntityRef::Project(task.project_id())))?;
        authorize(
            ctx.actor(),
            Resource::Task {
                project: &project,
                task: &task,
            },
            capability,
        )?;
        Ok(())
    }

    async fn load_comment(&self, id: CommentId) -> ServiceResult<Comment> {
        self.store
            .find_comment(id)
            .await?
            .ok_or(ServiceError::NotFound(EntityRef::Comment(id)))
    }
}
