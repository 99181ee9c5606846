//! Request-scoped caller identity.

use crate::identity::domain::{SystemRole, User, UserId};
use uuid::Uuid;

/// The authenticated user an operation runs on behalf of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Actor {
    user_id: UserId,
    role: SystemRole,
}

impl Actor {
    /// Creates an actor from a user identifier and system role.
    #[must_use]
    pub const fn new(user_id: UserId, role: SystemRole) -> Self {
        Self { user_id, role }
    }

    /// Returns the acting user's identifier.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the acting user's system role.
    #[must_use]
    pub const fn role(&self) -> SystemRole {
        self.role
    }

    /// Returns `true` when the actor bypasses project and task checks.
    #[must_use]
    pub const fn is_system_administrator(&self) -> bool {
        self.role.is_administrator()
    }
}

impl From<&User> for Actor {
    fn from(user: &User) -> Self {
        Self::new(user.id(), user.role())
    }
}

/// Context passed explicitly into every inbound operation.
///
/// Bound by the inbound layer once authentication has resolved the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestContext {
    actor: Actor,
    correlation_id: Uuid,
}

impl RequestContext {
    /// Creates a context with a fresh correlation identifier.
    #[must_use]
    pub fn new(actor: Actor) -> Self {
        Self {
            actor,
            correlation_id: Uuid::new_v4(),
        }
    }

    /// Sets the correlation identifier, e.g. one propagated from a request
    /// header.
    #[must_use]
    pub const fn with_correlation_id(mut self, correlation_id: Uuid) -> Self {
        self.correlation_id = correlation_id;
        self
    }

    /// Returns the calling actor.
    #[must_use]
    pub const fn actor(&self) -> &Actor {
        &self.actor
    }

    /// Returns the calling user's identifier.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.actor.user_id
    }

    /// Returns the correlation identifier used in log fields.
    #[must_use]
    pub const fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}
