//! Domain model for comments.

mod comment;
mod error;
mod ids;
mod reaction;

pub use comment::{Comment, CommentEdit, CommentThread, NewComment, PersistedCommentData};
pub use error::{CommentDomainError, ParseReactionKindError};
pub use ids::CommentId;
pub use reaction::{Reaction, ReactionKind, ReactionOutcome};
