//! In-memory user repository for tests and the demo binary.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::identity::{
    domain::{EmailAddress, NotificationId, NotificationRecord, User, UserId},
    ports::{UserRepository, UserRepositoryError, UserRepositoryResult},
};

/// Thread-safe in-memory user repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserRepository {
    state: Arc<RwLock<InMemoryUserState>>,
}

#[derive(Debug, Default)]
struct InMemoryUserState {
    users: HashMap<UserId, User>,
    email_index: HashMap<EmailAddress, UserId>,
}

impl InMemoryUserRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn store(&self, user: &User) -> UserRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            UserRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;

        if state.users.contains_key(&user.id()) {
            return Err(UserRepositoryError::DuplicateUser(user.id()));
        }
        if state.email_index.contains_key(user.email()) {
            return Err(UserRepositoryError::DuplicateEmail(user.email().clone()));
        }

        state.email_index.insert(user.email().clone(), user.id());
        state.users.insert(user.id(), user.clone());
        Ok(())
    }

    async fn update(&self, user: &User) -> UserRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            UserRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;

        let old_email = state
            .users
            .get(&user.id())
            .ok_or(UserRepositoryError::NotFound(user.id()))?
            .email()
            .clone();

        if *user.email() != old_email {
            if let Some(&indexed_id) = state.email_index.get(user.email())
                && indexed_id != user.id()
            {
                return Err(UserRepositoryError::DuplicateEmail(user.email().clone()));
            }
            state.email_index.remove(&old_email);
            state.email_index.insert(user.email().clone(), user.id());
        }

        state.users.insert(user.id(), user.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: UserId) -> UserRepositoryResult<Option<User>> {
        let state = self.state.read().map_err(|err| {
            UserRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &EmailAddress) -> UserRepositoryResult<Option<User>> {
        let state = self.state.read().map_err(|err| {
            UserRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state
            .email_index
            .get(email)
            .and_then(|id| state.users.get(id))
            .cloned())
    }

    async fn append_notification(
        &self,
        user_id: UserId,
        record: NotificationRecord,
    ) -> UserRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            UserRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let user = state
            .users
            .get_mut(&user_id)
            .ok_or(UserRepositoryError::NotFound(user_id))?;
        user.push_notification(record);
        Ok(())
    }

    async fn mark_notification_read(
        &self,
        user_id: UserId,
        id: NotificationId,
        at: DateTime<Utc>,
    ) -> UserRepositoryResult<Option<NotificationRecord>> {
        let mut state = self.state.write().map_err(|err| {
            UserRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let user = state
            .users
            .get_mut(&user_id)
            .ok_or(UserRepositoryError::NotFound(user_id))?;
        if user.mark_notification_read_at(id, at).is_err() {
            return Ok(None);
        }
        Ok(user
            .notifications()
            .iter()
            .find(|record| record.id() == id)
            .cloned())
    }
}
