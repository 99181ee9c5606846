//! Comment entity and threads.

use super::{CommentDomainError, CommentId, Reaction, ReactionKind, ReactionOutcome};
use crate::identity::domain::UserId;
use crate::task::domain::TaskId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Previous content of an edited comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentEdit {
    /// Content before the edit.
    pub content: String,
    /// When the edit happened.
    pub edited_at: DateTime<Utc>,
}

/// Validated fields for a new comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    task_id: TaskId,
    author: UserId,
    content: String,
    parent: Option<CommentId>,
    mentions: Vec<UserId>,
}

impl NewComment {
    /// Creates a top-level comment on `task_id`.
    ///
    /// # Errors
    ///
    /// Returns [`CommentDomainError::EmptyContent`] for blank content.
    pub fn new(
        task_id: TaskId,
        author: UserId,
        content: impl Into<String>,
    ) -> Result<Self, CommentDomainError> {
        Ok(Self {
            task_id,
            author,
            content: non_blank(content.into())?,
            parent: None,
            mentions: Vec::new(),
        })
    }

    /// Makes the comment a reply to `parent`.
    ///
    /// # Errors
    ///
    /// Returns [`CommentDomainError::ParentOnOtherTask`] when the parent is
    /// attached to a different task.
    pub fn replying_to(mut self, parent: &Comment) -> Result<Self, CommentDomainError> {
        if parent.task_id != self.task_id {
            return Err(CommentDomainError::ParentOnOtherTask {
                parent: parent.id,
                task: self.task_id,
            });
        }
        self.parent = Some(parent.id);
        Ok(self)
    }

    /// Sets the mentioned users.
    #[must_use]
    pub fn with_mentions(mut self, mentions: impl IntoIterator<Item = UserId>) -> Self {
        let mut unique: Vec<UserId> = Vec::new();
        for user in mentions {
            if !unique.contains(&user) {
                unique.push(user);
            }
        }
        self.mentions = unique;
        self
    }

    /// Returns the parent comment, if this is a reply.
    #[must_use]
    pub const fn parent(&self) -> Option<CommentId> {
        self.parent
    }
}

/// A comment on a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    id: CommentId,
    task_id: TaskId,
    author: UserId,
    content: String,
    parent: Option<CommentId>,
    mentions: Vec<UserId>,
    reactions: Vec<Reaction>,
    edit_history: Vec<CommentEdit>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedCommentData {
    /// Persisted comment identifier.
    pub id: CommentId,
    /// Persisted task back-reference.
    pub task_id: TaskId,
    /// Persisted author.
    pub author: UserId,
    /// Persisted content.
    pub content: String,
    /// Persisted parent comment.
    pub parent: Option<CommentId>,
    /// Persisted mentions.
    pub mentions: Vec<UserId>,
    /// Persisted reactions.
    pub reactions: Vec<Reaction>,
    /// Persisted edit history, oldest first.
    pub edit_history: Vec<CommentEdit>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Comment {
    /// Creates a comment.
    #[must_use]
    pub fn new(fields: NewComment, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id: CommentId::new(),
            task_id: fields.task_id,
            author: fields.author,
            content: fields.content,
            parent: fields.parent,
            mentions: fields.mentions,
            reactions: Vec::new(),
            edit_history: Vec::new(),
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a comment from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedCommentData) -> Self {
        Self {
            id: data.id,
            task_id: data.task_id,
            author: data.author,
            content: data.content,
            parent: data.parent,
            mentions: data.mentions,
            reactions: data.reactions,
            edit_history: data.edit_history,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the comment identifier.
    #[must_use]
    pub const fn id(&self) -> CommentId {
        self.id
    }

    /// Returns the task the comment belongs to.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the author.
    #[must_use]
    pub const fn author(&self) -> UserId {
        self.author
    }

    /// Returns the current content.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns the parent comment, if this is a reply.
    #[must_use]
    pub const fn parent(&self) -> Option<CommentId> {
        self.parent
    }

    /// Returns the mentioned users.
    #[must_use]
    pub fn mentions(&self) -> &[UserId] {
        &self.mentions
    }

    /// Returns the reactions.
    #[must_use]
    pub fn reactions(&self) -> &[Reaction] {
        &self.reactions
    }

    /// Returns the reaction left by `user`, if any.
    #[must_use]
    pub fn reaction_of(&self, user: UserId) -> Option<ReactionKind> {
        self.reactions
            .iter()
            .find(|reaction| reaction.user == user)
            .map(|reaction| reaction.kind)
    }

    /// Returns `true` once the comment has been edited.
    #[must_use]
    pub fn is_edited(&self) -> bool {
        !self.edit_history.is_empty()
    }

    /// Returns previous contents, oldest first.
    #[must_use]
    pub fn edit_history(&self) -> &[CommentEdit] {
        &self.edit_history
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest modification timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Toggles `user`'s reaction.
    ///
    /// A user holds at most one reaction: a new kind replaces the old one,
    /// repeating the same kind removes it.
    pub fn react(&mut self, user: UserId, kind: ReactionKind, clock: &impl Clock) -> ReactionOutcome {
        let outcome = match self.reactions.iter_mut().find(|reaction| reaction.user == user) {
            Some(existing) if existing.kind == kind => ReactionOutcome::Removed,
            Some(existing) => {
                let previous = existing.kind;
                existing.kind = kind;
                ReactionOutcome::Changed { previous }
            }
            None => {
                self.reactions.push(Reaction { user, kind });
                ReactionOutcome::Added
            }
        };
        if outcome == ReactionOutcome::Removed {
            self.reactions.retain(|reaction| reaction.user != user);
        }
        self.touch(clock);
        outcome
    }

    /// Replaces the content and records the previous one.
    ///
    /// # Errors
    ///
    /// Returns [`CommentDomainError::EmptyContent`] for blank content.
    pub fn edit(
        &mut self,
        content: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<(), CommentDomainError> {
        let next = non_blank(content.into())?;
        let timestamp = clock.utc();
        let previous = std::mem::replace(&mut self.content, next);
        self.edit_history.push(CommentEdit {
            content: previous,
            edited_at: timestamp,
        });
        self.updated_at = timestamp;
        Ok(())
    }

    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}

/// A comment with its direct replies, oldest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommentThread {
    /// The addressed comment.
    pub root: Comment,
    /// Direct replies to the root.
    pub replies: Vec<Comment>,
}

fn non_blank(value: String) -> Result<String, CommentDomainError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CommentDomainError::EmptyContent);
    }
    Ok(trimmed.to_owned())
}
