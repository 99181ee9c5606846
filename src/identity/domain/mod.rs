//! Domain model for user accounts.
//!
//! Users carry exactly one credential (a password digest or a federated
//! identity), a system-wide role, and their persisted notification list.

mod credential;
mod email;
mod error;
mod ids;
mod notification;
mod role;
mod user;

pub use credential::{Credential, ExternalIdentity, PasswordDigest};
pub use email::EmailAddress;
pub use error::{IdentityDomainError, ParseSystemRoleError};
pub use ids::{NotificationId, UserId};
pub use notification::{NotificationKind, NotificationRecord};
pub use role::SystemRole;
pub use user::{NewUser, PersistedUserData, User};
