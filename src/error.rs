//! Service-level error taxonomy shared by every inbound operation.
//!
//! Domain and port errors from each bounded context are folded into
//! [`ServiceError`], whose [`ServiceError::code`] yields a stable,
//! transport-independent error code.

use crate::access::{AccessDenied, DenialCode};
use crate::comment::domain::{CommentDomainError, CommentId};
use crate::identity::domain::{IdentityDomainError, NotificationId, UserId};
use crate::identity::ports::{CredentialError, TokenError, UserRepositoryError};
use crate::project::domain::{ProjectDomainError, ProjectId};
use crate::store::StoreError;
use crate::task::domain::{AttachmentId, TaskDomainError, TaskId};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Reference to an entity that an operation addressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityRef {
    /// A user account.
    User(UserId),
    /// A project.
    Project(ProjectId),
    /// A task.
    Task(TaskId),
    /// A comment.
    Comment(CommentId),
    /// An attachment owned by a task.
    Attachment(AttachmentId),
    /// A persisted notification owned by a user.
    Notification(NotificationId),
    /// A membership entry of a project.
    Member {
        /// Project whose member list was addressed.
        project: ProjectId,
        /// User that was expected in the member list.
        user: UserId,
    },
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User(id) => write!(f, "user {id}"),
            Self::Project(id) => write!(f, "project {id}"),
            Self::Task(id) => write!(f, "task {id}"),
            Self::Comment(id) => write!(f, "comment {id}"),
            Self::Attachment(id) => write!(f, "attachment {id}"),
            Self::Notification(id) => write!(f, "notification {id}"),
            Self::Member { project, user } => write!(f, "member {user} of project {project}"),
        }
    }
}

/// Errors returned by inbound operations.
#[derive(Debug, Clone, Error)]
pub enum ServiceError {
    /// The addressed entity does not exist.
    #[error("{0} not found")]
    NotFound(EntityRef),

    /// The caller is not allowed to perform the operation.
    #[error(transparent)]
    Forbidden(#[from] AccessDenied),

    /// A unique field is already taken or the entry already exists.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Input failed schema or invariant validation.
    #[error("validation failed: {0}")]
    ValidationFailed(String),

    /// The operation would break an internal invariant.
    #[error("invariant violation: {0}")]
    InvariantViolation(String),

    /// Credentials or session token were rejected.
    #[error("authentication failed: {0}")]
    Unauthenticated(String),

    /// Infrastructure failure in a port implementation.
    #[error("internal error: {0}")]
    Internal(Arc<dyn std::error::Error + Send + Sync>),
}

/// Result type for inbound operations.
pub type ServiceResult<T> = Result<T, ServiceError>;

impl ServiceError {
    /// Wraps an infrastructure error.
    pub fn internal(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Internal(Arc::new(err))
    }

    /// Returns the stable error code for this failure.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "NOT_FOUND",
            Self::Forbidden(denied) => denied.code().as_str(),
            Self::Conflict(_) => "CONFLICT",
            Self::ValidationFailed(_) => "VALIDATION_FAILED",
            Self::InvariantViolation(_) => "INVARIANT_VIOLATION",
            Self::Unauthenticated(_) => "UNAUTHENTICATED",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Returns the denial code when the error is an authorization denial.
    #[must_use]
    pub const fn denial(&self) -> Option<DenialCode> {
        match self {
            Self::Forbidden(denied) => Some(denied.code()),
            _ => None,
        }
    }
}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(entity) => Self::NotFound(entity),
            StoreError::Duplicate(entity) => Self::Conflict(format!("{entity} already exists")),
            StoreError::Persistence(inner) => Self::Internal(inner),
        }
    }
}

impl From<UserRepositoryError> for ServiceError {
    fn from(err: UserRepositoryError) -> Self {
        match err {
            UserRepositoryError::DuplicateUser(id) => {
                Self::Conflict(format!("user {id} already exists"))
            }
            UserRepositoryError::DuplicateEmail(email) => {
                Self::Conflict(format!("email {email} is already registered"))
            }
            UserRepositoryError::NotFound(id) => Self::NotFound(EntityRef::User(id)),
            UserRepositoryError::Persistence(inner) => Self::Internal(inner),
        }
    }
}

impl From<IdentityDomainError> for ServiceError {
    fn from(err: IdentityDomainError) -> Self {
        match err {
            IdentityDomainError::NotificationNotFound(id) => {
                Self::NotFound(EntityRef::Notification(id))
            }
            other => Self::ValidationFailed(other.to_string()),
        }
    }
}

impl From<CredentialError> for ServiceError {
    fn from(err: CredentialError) -> Self {
        Self::internal(err)
    }
}

impl From<TokenError> for ServiceError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Signing(_) => Self::internal(err),
            TokenError::Invalid | TokenError::Expired => Self::Unauthenticated(err.to_string()),
        }
    }
}

impl From<ProjectDomainError> for ServiceError {
    fn from(err: ProjectDomainError) -> Self {
        match err {
            ProjectDomainError::AlreadyMember { .. } => Self::Conflict(err.to_string()),
            ProjectDomainError::NotMember { project, user } => {
                Self::NotFound(EntityRef::Member { project, user })
            }
            ProjectDomainError::OwnerProtected(_) => Self::InvariantViolation(err.to_string()),
            ProjectDomainError::EmptyName
            | ProjectDomainError::EmptyDescription
            | ProjectDomainError::InvalidDateRange { .. } => Self::ValidationFailed(err.to_string()),
        }
    }
}

impl From<TaskDomainError> for ServiceError {
    fn from(err: TaskDomainError) -> Self {
        match err {
            TaskDomainError::AttachmentNotFound(id) => Self::NotFound(EntityRef::Attachment(id)),
            other => Self::ValidationFailed(other.to_string()),
        }
    }
}

impl From<CommentDomainError> for ServiceError {
    fn from(err: CommentDomainError) -> Self {
        Self::ValidationFailed(err.to_string())
    }
}
