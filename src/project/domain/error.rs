//! Error types for project domain validation and parsing.

use super::ProjectId;
use crate::identity::domain::UserId;
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors returned while constructing or mutating projects.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProjectDomainError {
    /// The project name is empty after trimming.
    #[error("project name must not be empty")]
    EmptyName,

    /// The project description is empty after trimming.
    #[error("project description must not be empty")]
    EmptyDescription,

    /// The end date lies before the start date.
    #[error("end date {end} is before start date {start}")]
    InvalidDateRange {
        /// Project start date.
        start: DateTime<Utc>,
        /// Rejected end date.
        end: DateTime<Utc>,
    },

    /// The user already belongs to the project.
    #[error("user {user} is already a member of project {project}")]
    AlreadyMember {
        /// Project addressed.
        project: ProjectId,
        /// User that was to be added.
        user: UserId,
    },

    /// The user does not belong to the project.
    #[error("user {user} is not a member of project {project}")]
    NotMember {
        /// Project addressed.
        project: ProjectId,
        /// User that was expected in the member list.
        user: UserId,
    },

    /// The project owner cannot leave the member list.
    #[error("project owner {0} cannot be removed from the members")]
    OwnerProtected(UserId),
}

/// Error returned while parsing project member roles.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown project member role: {0}")]
pub struct ParseMemberRoleError(pub String);

/// Error returned while parsing project statuses.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown project status: {0}")]
pub struct ParseProjectStatusError(pub String);
