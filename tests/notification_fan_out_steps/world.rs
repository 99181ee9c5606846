//! Shared world state for notification fan-out BDD scenarios.

use std::collections::HashMap;
use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use tasklane::access::RequestContext;
use tasklane::config::TasklaneConfig;
use tasklane::identity::{
    adapters::{Argon2PasswordHasher, InMemoryUserRepository, JwtTokenIssuer},
    domain::{NotificationRecord, User},
    services::{AccountService, RegisterRequest},
};
use tasklane::notification::{
    adapters::{BroadcastPushChannel, InlineDispatcher, OutboxEmailSender, UserInbox},
    domain::NotificationTemplates,
    services::{FanOutService, FanOutSettings},
};
use tasklane::project::{domain::Project, services::ProjectService};
use tasklane::store::InMemoryWorkspaceStore;
use tasklane::task::{domain::Task, services::TaskLifecycleService};

type Users = InMemoryUserRepository;
type Store = InMemoryWorkspaceStore;
type Dispatcher = InlineDispatcher<
    FanOutService<Users, UserInbox<Users>, BroadcastPushChannel, OutboxEmailSender, DefaultClock>,
>;

const PASSWORD: &str = "scenario password";

/// Scenario world for notification fan-out behaviour tests.
pub struct FanOutWorld {
    /// Account service used to sign users up and read their inboxes.
    pub accounts: AccountService<Users, Argon2PasswordHasher, JwtTokenIssuer, DefaultClock>,
    /// Project service under test.
    pub projects: ProjectService<Store, Users, Dispatcher, DefaultClock>,
    /// Task service under test.
    pub tasks: TaskLifecycleService<Store, Users, Dispatcher, DefaultClock>,
    /// Captured outgoing email.
    pub outbox: Arc<OutboxEmailSender>,
    /// Signed-up users by display name.
    pub people: HashMap<String, (User, RequestContext)>,
    /// Name of the project owner.
    pub owner: Option<String>,
    /// Project created by the background.
    pub project: Option<Project>,
    /// Tasks created so far, by title.
    pub tasks_by_title: HashMap<String, Task>,
    /// Result of the last reminder sweep.
    pub reminders_sent: Option<usize>,
}

impl FanOutWorld {
    /// Wires every service over fresh in-memory adapters with email on.
    ///
    /// # Errors
    ///
    /// Returns an error when the notification templates fail to compile.
    pub fn new() -> Result<Self, eyre::Report> {
        let config = TasklaneConfig {
            email_from: Some("noreply@tasklane.test".to_owned()),
            ..TasklaneConfig::default()
        };
        let clock = Arc::new(DefaultClock);
        let users = Arc::new(Users::new());
        let store = Arc::new(Store::new());
        let outbox = Arc::new(OutboxEmailSender::new());
        let fanout = FanOutService::new(
            Arc::clone(&users),
            Arc::new(UserInbox::new(Arc::clone(&users))),
            Arc::new(BroadcastPushChannel::from_config(&config)),
            Arc::clone(&outbox),
            Arc::clone(&clock),
            Arc::new(NotificationTemplates::builtin()?),
            FanOutSettings::from_config(&config),
        );
        let dispatcher = Arc::new(InlineDispatcher::new(Arc::new(fanout)));

        Ok(Self {
            accounts: AccountService::new(
                Arc::clone(&users),
                Arc::new(Argon2PasswordHasher::new()),
                Arc::new(JwtTokenIssuer::from_config(&config)),
                Arc::clone(&clock),
            ),
            projects: ProjectService::new(
                Arc::clone(&store),
                Arc::clone(&users),
                Arc::clone(&dispatcher),
                Arc::clone(&clock),
            ),
            tasks: TaskLifecycleService::new(store, users, dispatcher, clock)
                .with_reminder_window(config.reminder_window_days),
            outbox,
            people: HashMap::new(),
            owner: None,
            project: None,
            tasks_by_title: HashMap::new(),
            reminders_sent: None,
        })
    }

    /// Registers `name` and keeps their authenticated context.
    ///
    /// # Errors
    ///
    /// Returns an error when registration, login, or authentication fails.
    pub fn sign_up(&mut self, name: &str) -> Result<(), eyre::Report> {
        let email = format!("{}@tasklane.test", name.to_ascii_lowercase());
        let user = run_async(
            self.accounts
                .register(RegisterRequest::new(name, email.as_str(), PASSWORD)),
        )?;
        let (_, token) = run_async(self.accounts.login(&email, PASSWORD))?;
        let ctx = run_async(self.accounts.authenticate(&token.value))?;
        self.people.insert(name.to_owned(), (user, ctx));
        Ok(())
    }

    /// Returns the signed-up user called `name`.
    ///
    /// # Errors
    ///
    /// Returns an error when nobody by that name signed up.
    pub fn person(&self, name: &str) -> Result<&(User, RequestContext), eyre::Report> {
        self.people
            .get(name)
            .ok_or_else(|| eyre::eyre!("no user named '{name}' in scenario world"))
    }

    /// Returns the project owner.
    ///
    /// # Errors
    ///
    /// Returns an error before the project exists.
    pub fn owner(&self) -> Result<&(User, RequestContext), eyre::Report> {
        let name = self
            .owner
            .as_deref()
            .ok_or_else(|| eyre::eyre!("no project owner in scenario world"))?;
        self.person(name)
    }

    /// Returns the background project.
    ///
    /// # Errors
    ///
    /// Returns an error before the project exists.
    pub fn project(&self) -> Result<&Project, eyre::Report> {
        self.project
            .as_ref()
            .ok_or_else(|| eyre::eyre!("no project in scenario world"))
    }

    /// Returns the task titled `title`.
    ///
    /// # Errors
    ///
    /// Returns an error when no such task was created.
    pub fn task(&self, title: &str) -> Result<&Task, eyre::Report> {
        self.tasks_by_title
            .get(title)
            .ok_or_else(|| eyre::eyre!("no task titled '{title}' in scenario world"))
    }

    /// Returns the notifications of the user called `name`.
    ///
    /// # Errors
    ///
    /// Returns an error when the user is unknown or the lookup fails.
    pub fn notifications_of(&self, name: &str) -> Result<Vec<NotificationRecord>, eyre::Report> {
        let (_, ctx) = self.person(name)?;
        Ok(run_async(self.accounts.notifications(ctx))?)
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> FanOutWorld {
    FanOutWorld::new().expect("scenario world wiring should succeed")
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
