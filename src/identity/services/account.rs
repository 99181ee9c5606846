//! Registration, sign-in, session resolution, and profile management.

use mockable::Clock;
use std::sync::Arc;
use tracing::info;

use crate::access::{Actor, RequestContext};
use crate::error::{EntityRef, ServiceError, ServiceResult};
use crate::identity::{
    domain::{
        Credential, EmailAddress, ExternalIdentity, IdentityDomainError, NewUser, NotificationId,
        NotificationRecord, User, UserId,
    },
    ports::{PasswordHasher, SessionToken, TokenIssuer, UserRepository},
};

/// Minimum accepted length of a plain-text password, in characters.
pub const MIN_PASSWORD_LEN: usize = 6;

const INVALID_CREDENTIALS: &str = "invalid email or password";

/// Request payload for registering a password account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterRequest {
    name: String,
    email: String,
    password: String,
    avatar: Option<String>,
}

impl RegisterRequest {
    /// Creates a request with the required account fields.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: password.into(),
            avatar: None,
        }
    }

    /// Sets the avatar URL.
    #[must_use]
    pub fn with_avatar(mut self, avatar: impl Into<String>) -> Self {
        self.avatar = Some(avatar.into());
        self
    }
}

/// Account management service.
#[derive(Clone)]
pub struct AccountService<U, H, T, C>
where
    U: UserRepository,
    H: PasswordHasher,
    T: TokenIssuer,
    C: Clock + Send + Sync,
{
    users: Arc<U>,
    hasher: Arc<H>,
    tokens: Arc<T>,
    clock: Arc<C>,
}

impl<U, H, T, C> AccountService<U, H, T, C>
where
    U: UserRepository,
    H: PasswordHasher,
    T: TokenIssuer,
    C: Clock + Send + Sync,
{
    /// Creates an account service.
    #[must_use]
    pub const fn new(users: Arc<U>, hasher: Arc<H>, tokens: Arc<T>, clock: Arc<C>) -> Self {
        Self {
            users,
            hasher,
            tokens,
            clock,
        }
    }

    /// Registers a password account with the `Member` system role.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::ValidationFailed`] for a blank name, a
    /// malformed email, or a short password, and [`ServiceError::Conflict`]
    /// when the email is taken.
    pub async fn register(&self, request: RegisterRequest) -> ServiceResult<User> {
        let RegisterRequest {
            name,
            email,
            password,
            avatar,
        } = request;

        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(IdentityDomainError::PasswordTooShort {
                min: MIN_PASSWORD_LEN,
            }
            .into());
        }
        let address = EmailAddress::new(email)?;
        if self.users.find_by_email(&address).await?.is_some() {
            return Err(ServiceError::Conflict(format!(
                "email {address} is already registered"
            )));
        }

        let digest = self.hasher.hash(&password)?;
        let mut fields = NewUser::new(name, address, Credential::Password { digest })?;
        if let Some(url) = avatar {
            fields = fields.with_avatar(url);
        }
        let user = User::new(fields, &*self.clock);
        self.users.store(&user).await?;
        info!(user_id = %user.id(), "user registered");
        Ok(user)
    }

    /// Signs in with a provider-asserted identity, creating a federated
    /// account on first use.
    ///
    /// An existing account with the same email is signed in as is; its
    /// credential is left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::ValidationFailed`] for invalid identity
    /// fields and [`ServiceError::Internal`] when token signing fails.
    pub async fn sign_in_with_external_identity(
        &self,
        provider: &str,
        subject: &str,
        email: &str,
        name: &str,
    ) -> ServiceResult<(User, SessionToken)> {
        let identity = ExternalIdentity::new(provider, subject)?;
        let address = EmailAddress::new(email)?;
        let user = match self.users.find_by_email(&address).await? {
            Some(existing) => existing,
            None => {
                let fields = NewUser::new(name, address, Credential::External { identity })?;
                let created = User::new(fields, &*self.clock);
                self.users.store(&created).await?;
                info!(user_id = %created.id(), provider, "federated user created");
                created
            }
        };
        let token = self.tokens.issue(user.id(), self.clock.utc())?;
        info!(user_id = %user.id(), provider, "federated sign-in");
        Ok((user, token))
    }

    /// Verifies an email and password and issues a session token.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Unauthenticated`] with the same message for
    /// an unknown email, a wrong password, or a federated-only account.
    pub async fn login(&self, email: &str, password: &str) -> ServiceResult<(User, SessionToken)> {
        let invalid = || ServiceError::Unauthenticated(INVALID_CREDENTIALS.to_owned());
        let Ok(address) = EmailAddress::new(email) else {
            return Err(invalid());
        };
        let user = self
            .users
            .find_by_email(&address)
            .await?
            .ok_or_else(invalid)?;
        let digest = user.credential().password().ok_or_else(invalid)?;
        if !self.hasher.verify(password, digest)? {
            return Err(invalid());
        }
        let token = self.tokens.issue(user.id(), self.clock.utc())?;
        info!(user_id = %user.id(), "password login");
        Ok((user, token))
    }

    /// Resolves a session token into a request context.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Unauthenticated`] for invalid or expired
    /// tokens and for tokens whose user no longer exists.
    pub async fn authenticate(&self, token: &str) -> ServiceResult<RequestContext> {
        let user_id = self.tokens.verify(token)?;
        let user = self.users.find_by_id(user_id).await?.ok_or_else(|| {
            ServiceError::Unauthenticated("session user no longer exists".to_owned())
        })?;
        Ok(RequestContext::new(Actor::from(&user)))
    }

    /// Updates the caller's display name and avatar.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::ValidationFailed`] for a blank name and
    /// [`ServiceError::NotFound`] when the caller no longer exists.
    pub async fn update_profile(
        &self,
        ctx: &RequestContext,
        name: Option<String>,
        avatar: Option<String>,
    ) -> ServiceResult<User> {
        let mut user = self.load_user(ctx.user_id()).await?;
        user.update_profile(name, avatar, &*self.clock)?;
        self.users.update(&user).await?;
        info!(user_id = %user.id(), "profile updated");
        Ok(user)
    }

    /// Returns the caller's notifications, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::NotFound`] when the caller no longer exists.
    pub async fn notifications(&self, ctx: &RequestContext) -> ServiceResult<Vec<NotificationRecord>> {
        let user = self.load_user(ctx.user_id()).await?;
        let mut records = user.notifications().to_vec();
        records.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        Ok(records)
    }

    /// Marks one of the caller's notifications as read.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::NotFound`] when the caller has no such
    /// notification.
    pub async fn mark_notification_read(
        &self,
        ctx: &RequestContext,
        id: NotificationId,
    ) -> ServiceResult<NotificationRecord> {
        self.users
            .mark_notification_read(ctx.user_id(), id, self.clock.utc())
            .await?
            .ok_or(ServiceError::NotFound(EntityRef::Notification(id)))
    }

    async fn load_user(&self, id: UserId) -> ServiceResult<User> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or(ServiceError::NotFound(EntityRef::User(id)))
    }
}
