//! Shared wiring for in-memory integration tests.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use mockable::DefaultClock;
use rstest::fixture;
use tasklane::access::RequestContext;
use tasklane::comment::services::CommentService;
use tasklane::config::TasklaneConfig;
use tasklane::identity::{
    adapters::{Argon2PasswordHasher, InMemoryUserRepository, JwtTokenIssuer},
    domain::User,
    services::{AccountService, RegisterRequest},
};
use tasklane::notification::{
    adapters::{BroadcastPushChannel, InlineDispatcher, OutboxEmailSender, UserInbox},
    domain::NotificationTemplates,
    services::{FanOutService, FanOutSettings},
};
use tasklane::project::services::ProjectService;
use tasklane::store::InMemoryWorkspaceStore;
use tasklane::task::services::TaskLifecycleService;

/// Password used for every account registered by [`Workspace::sign_up`].
pub const PASSWORD: &str = "correct horse";

/// Sender address configured for notification emails.
pub const EMAIL_FROM: &str = "noreply@tasklane.test";

type Users = InMemoryUserRepository;
type Store = InMemoryWorkspaceStore;

/// Notification fan-out over the in-memory channels.
pub type Fanout =
    FanOutService<Users, UserInbox<Users>, BroadcastPushChannel, OutboxEmailSender, DefaultClock>;

/// Dispatcher delivering synchronously so assertions can follow a mutation.
pub type Dispatcher = InlineDispatcher<Fanout>;

/// Every service wired over shared in-memory adapters.
pub struct Workspace {
    pub push: Arc<BroadcastPushChannel>,
    pub outbox: Arc<OutboxEmailSender>,
    pub accounts: AccountService<Users, Argon2PasswordHasher, JwtTokenIssuer, DefaultClock>,
    pub projects: ProjectService<Store, Users, Dispatcher, DefaultClock>,
    pub tasks: TaskLifecycleService<Store, Users, Dispatcher, DefaultClock>,
    pub comments: CommentService<Store, DefaultClock>,
}

impl Workspace {
    /// Wires the services from `config`.
    ///
    /// # Errors
    ///
    /// Returns an error when the notification templates fail to compile.
    pub fn new(config: &TasklaneConfig) -> Result<Self, eyre::Report> {
        let clock = Arc::new(DefaultClock);
        let users = Arc::new(Users::new());
        let store = Arc::new(Store::new());
        let push = Arc::new(BroadcastPushChannel::from_config(config));
        let outbox = Arc::new(OutboxEmailSender::new());
        let fanout = Fanout::new(
            Arc::clone(&users),
            Arc::new(UserInbox::new(Arc::clone(&users))),
            Arc::clone(&push),
            Arc::clone(&outbox),
            Arc::clone(&clock),
            Arc::new(NotificationTemplates::builtin()?),
            FanOutSettings::from_config(config),
        );
        let dispatcher = Arc::new(InlineDispatcher::new(Arc::new(fanout)));

        Ok(Self {
            accounts: AccountService::new(
                Arc::clone(&users),
                Arc::new(Argon2PasswordHasher::new()),
                Arc::new(JwtTokenIssuer::from_config(config)),
                Arc::clone(&clock),
            ),
            projects: ProjectService::new(
                Arc::clone(&store),
                Arc::clone(&users),
                Arc::clone(&dispatcher),
                Arc::clone(&clock),
            ),
            tasks: TaskLifecycleService::new(
                Arc::clone(&store),
                Arc::clone(&users),
                dispatcher,
                Arc::clone(&clock),
            )
            .with_reminder_window(config.reminder_window_days),
            comments: CommentService::new(store, clock),
            push,
            outbox,
        })
    }

    /// Registers, logs in, and authenticates a user named `name`.
    ///
    /// # Errors
    ///
    /// Returns an error when any account step fails.
    pub async fn sign_up(&self, name: &str) -> Result<(User, RequestContext), eyre::Report> {
        let email = format!("{}@tasklane.test", name.to_ascii_lowercase());
        let user = self
            .accounts
            .register(RegisterRequest::new(name, email.as_str(), PASSWORD))
            .await?;
        let (_, token) = self.accounts.login(&email, PASSWORD).await?;
        let ctx = self.accounts.authenticate(&token.value).await?;
        Ok((user, ctx))
    }
}

/// Provides a workspace with email notifications enabled.
#[fixture]
pub fn workspace() -> Workspace {
    let config = TasklaneConfig {
        email_from: Some(EMAIL_FROM.to_owned()),
        ..TasklaneConfig::default()
    };
    Workspace::new(&config).expect("workspace wiring should succeed")
}

/// A deadline `days` whole days from now, less an hour.
#[must_use]
pub fn days_from_now(days: i64) -> DateTime<Utc> {
    Utc::now() + Duration::days(days) - Duration::hours(1)
}
