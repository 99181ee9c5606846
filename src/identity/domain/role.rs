//! System-wide user role.

use super::ParseSystemRoleError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Global role of a user, independent of any project membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SystemRole {
    /// Bypasses every project- and task-level check.
    Administrator,
    /// Regular account.
    #[default]
    Member,
    /// Read-mostly account.
    Viewer,
}

impl SystemRole {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Administrator => "administrator",
            Self::Member => "member",
            Self::Viewer => "viewer",
        }
    }

    /// Returns `true` for the system administrator role.
    #[must_use]
    pub const fn is_administrator(self) -> bool {
        matches!(self, Self::Administrator)
    }
}

impl fmt::Display for SystemRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for SystemRole {
    type Error = ParseSystemRoleError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "administrator" => Ok(Self::Administrator),
            "member" => Ok(Self::Member),
            "viewer" => Ok(Self::Viewer),
            _ => Err(ParseSystemRoleError(value.to_owned())),
        }
    }
}
