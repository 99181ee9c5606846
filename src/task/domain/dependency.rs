//! Typed dependency edges between tasks.

use super::{ParseDependencyKindError, TaskId};
use serde::{Deserialize, Serialize};

/// Direction of a dependency edge.
///
/// Edges are recorded only; nothing blocks on them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DependencyKind {
    /// This task blocks the other one.
    Blocks,
    /// This task is blocked by the other one.
    BlockedBy,
}

impl DependencyKind {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Blocks => "blocks",
            Self::BlockedBy => "blocked_by",
        }
    }
}

impl TryFrom<&str> for DependencyKind {
    type Error = ParseDependencyKindError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase().replace(' ', "_");
        match normalized.as_str() {
            "blocks" => Ok(Self::Blocks),
            "blocked_by" => Ok(Self::BlockedBy),
            _ => Err(ParseDependencyKindError(value.to_owned())),
        }
    }
}

/// Edge from the owning task to another task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskDependency {
    /// The other task.
    pub task: TaskId,
    /// Edge direction.
    pub kind: DependencyKind,
}

impl TaskDependency {
    /// Creates a dependency edge.
    #[must_use]
    pub const fn new(task: TaskId, kind: DependencyKind) -> Self {
        Self { task, kind }
    }
}
