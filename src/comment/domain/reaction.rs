//! Comment reactions.

use super::ParseReactionKindError;
use crate::identity::domain::UserId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of reaction a user can leave on a comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReactionKind {
    /// Thumbs up.
    Like,
    /// Heart.
    Heart,
    /// Laughing face.
    Laugh,
    /// Surprised face.
    Surprised,
    /// Sad face.
    Sad,
    /// Angry face.
    Angry,
}

impl ReactionKind {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Like => "like",
            Self::Heart => "heart",
            Self::Laugh => "laugh",
            Self::Surprised => "surprised",
            Self::Sad => "sad",
            Self::Angry => "angry",
        }
    }
}

impl fmt::Display for ReactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ReactionKind {
    type Error = ParseReactionKindError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "like" => Ok(Self::Like),
            "heart" => Ok(Self::Heart),
            "laugh" => Ok(Self::Laugh),
            "surprised" => Ok(Self::Surprised),
            "sad" => Ok(Self::Sad),
            "angry" => Ok(Self::Angry),
            _ => Err(ParseReactionKindError(value.to_owned())),
        }
    }
}

/// One user's reaction on a comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reaction {
    /// Reacting user.
    pub user: UserId,
    /// Reaction kind.
    pub kind: ReactionKind,
}

/// Effect of a reaction toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReactionOutcome {
    /// The user had not reacted before.
    Added,
    /// The user's previous reaction was replaced.
    Changed {
        /// Reaction kind that was replaced.
        previous: ReactionKind,
    },
    /// The user repeated their reaction, which removed it.
    Removed,
}
