//! Role of a user within a single project.

use super::ParseMemberRoleError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Project-scoped member role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberRole {
    /// Full control: project updates, deletion, member management.
    Administrator,
    /// Creates and works on tasks.
    #[default]
    Member,
    /// Read-only access.
    Viewer,
}

impl MemberRole {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Administrator => "administrator",
            Self::Member => "member",
            Self::Viewer => "viewer",
        }
    }

    const fn rank(self) -> u8 {
        match self {
            Self::Viewer => 0,
            Self::Member => 1,
            Self::Administrator => 2,
        }
    }

    /// Returns `true` when this role includes everything `required` allows.
    #[must_use]
    pub const fn grants(self, required: Self) -> bool {
        self.rank() >= required.rank()
    }
}

impl fmt::Display for MemberRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for MemberRole {
    type Error = ParseMemberRoleError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "administrator" => Ok(Self::Administrator),
            "member" => Ok(Self::Member),
            "viewer" => Ok(Self::Viewer),
            _ => Err(ParseMemberRoleError(value.to_owned())),
        }
    }
}
