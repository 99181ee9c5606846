//! User aggregate root.

use super::{
    Credential, EmailAddress, IdentityDomainError, NotificationId, NotificationRecord, SystemRole,
    UserId,
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Validated fields for a new user account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    name: String,
    email: EmailAddress,
    credential: Credential,
    role: SystemRole,
    avatar: Option<String>,
}

impl NewUser {
    /// Creates new-user fields with the default `Member` role.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityDomainError::EmptyName`] when the name is blank.
    pub fn new(
        name: impl Into<String>,
        email: EmailAddress,
        credential: Credential,
    ) -> Result<Self, IdentityDomainError> {
        Ok(Self {
            name: normalize_name(name.into())?,
            email,
            credential,
            role: SystemRole::default(),
            avatar: None,
        })
    }

    /// Sets the system role.
    #[must_use]
    pub const fn with_role(mut self, role: SystemRole) -> Self {
        self.role = role;
        self
    }

    /// Sets the avatar URL.
    #[must_use]
    pub fn with_avatar(mut self, avatar: impl Into<String>) -> Self {
        self.avatar = Some(avatar.into());
        self
    }
}

/// User aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    name: String,
    email: EmailAddress,
    credential: Credential,
    role: SystemRole,
    avatar: Option<String>,
    notifications: Vec<NotificationRecord>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted user aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedUserData {
    /// Persisted user identifier.
    pub id: UserId,
    /// Persisted display name.
    pub name: String,
    /// Persisted email address.
    pub email: EmailAddress,
    /// Persisted credential.
    pub credential: Credential,
    /// Persisted system role.
    pub role: SystemRole,
    /// Persisted avatar URL, if any.
    pub avatar: Option<String>,
    /// Persisted notifications, oldest first.
    pub notifications: Vec<NotificationRecord>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a new user account.
    #[must_use]
    pub fn new(fields: NewUser, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id: UserId::new(),
            name: fields.name,
            email: fields.email,
            credential: fields.credential,
            role: fields.role,
            avatar: fields.avatar,
            notifications: Vec::new(),
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a user from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedUserData) -> Self {
        Self {
            id: data.id,
            name: data.name,
            email: data.email,
            credential: data.credential,
            role: data.role,
            avatar: data.avatar,
            notifications: data.notifications,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the user identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the unique email address.
    #[must_use]
    pub const fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Returns the sign-in credential.
    #[must_use]
    pub const fn credential(&self) -> &Credential {
        &self.credential
    }

    /// Returns the system role.
    #[must_use]
    pub const fn role(&self) -> SystemRole {
        self.role
    }

    /// Returns the avatar URL, if any.
    #[must_use]
    pub fn avatar(&self) -> Option<&str> {
        self.avatar.as_deref()
    }

    /// Returns persisted notifications, oldest first.
    #[must_use]
    pub fn notifications(&self) -> &[NotificationRecord] {
        &self.notifications
    }

    /// Returns the number of unread notifications.
    #[must_use]
    pub fn unread_count(&self) -> usize {
        self.notifications.iter().filter(|n| !n.is_read()).count()
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

    /// Updates the display name and, optionally, the avatar.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityDomainError::EmptyName`] when the name is blank.
    pub fn update_profile(
        &mut self,
        name: Option<String>,
        avatar: Option<String>,
        clock: &impl Clock,
    ) -> Result<(), IdentityDomainError> {
        let normalized = name.map(normalize_name).transpose()?;
        if let Some(new_name) = normalized {
            self.name = new_name;
        }
        if let Some(new_avatar) = avatar {
            self.avatar = Some(new_avatar);
        }
        self.touch(clock);
        Ok(())
    }

    /// Appends a notification to the user's list.
    pub fn push_notification(&mut self, record: NotificationRecord) {
        self.notifications.push(record);
    }

    /// Marks one of the user's notifications as read.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityDomainError::NotificationNotFound`] when the user
    /// has no notification with the given identifier.
    pub fn mark_notification_read(
        &mut self,
        id: NotificationId,
        clock: &impl Clock,
    ) -> Result<(), IdentityDomainError> {
        self.mark_notification_read_at(id, clock.utc())
    }

    /// Marks one of the user's notifications as read at `at`.
    ///
    /// Repositories use this to apply the change under their own lock.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityDomainError::NotificationNotFound`] when the user
    /// has no notification with the given identifier.
    pub fn mark_notification_read_at(
        &mut self,
        id: NotificationId,
        at: DateTime<Utc>,
    ) -> Result<(), IdentityDomainError> {
        let record = self
            .notifications
            .iter_mut()
            .find(|n| n.id() == id)
            .ok_or(IdentityDomainError::NotificationNotFound(id))?;
        record.mark_read();
        self.updated_at = at;
        Ok(())
    }

    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}

fn normalize_name(name: String) -> Result<String, IdentityDomainError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(IdentityDomainError::EmptyName);
    }
    Ok(trimmed.to_owned())
}
