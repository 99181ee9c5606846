//! Shared fixtures for unit tests.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use mockable::DefaultClock;
use std::sync::{Arc, Mutex};

use crate::access::{Actor, RequestContext};
use crate::comment::services::CommentService;
use crate::identity::{
    adapters::InMemoryUserRepository,
    domain::{Credential, EmailAddress, NewUser, PasswordDigest, SystemRole, User},
    ports::UserRepository,
};
use crate::notification::{domain::LifecycleEvent, ports::EventDispatcher};
use crate::project::services::ProjectService;
use crate::store::InMemoryWorkspaceStore;
use crate::task::services::TaskLifecycleService;

/// Dispatcher that keeps every event it receives.
#[derive(Debug, Default)]
pub(crate) struct RecordingDispatcher {
    events: Mutex<Vec<LifecycleEvent>>,
}

impl RecordingDispatcher {
    pub(crate) fn events(&self) -> Vec<LifecycleEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    pub(crate) fn clear(&self) {
        if let Ok(mut events) = self.events.lock() {
            events.clear();
        }
    }
}

#[async_trait]
impl EventDispatcher for RecordingDispatcher {
    async fn dispatch(&self, events: Vec<LifecycleEvent>) {
        if let Ok(mut recorded) = self.events.lock() {
            recorded.extend(events);
        }
    }
}

pub(crate) type TestProjectService = ProjectService<
    InMemoryWorkspaceStore,
    InMemoryUserRepository,
    RecordingDispatcher,
    DefaultClock,
>;
pub(crate) type TestTaskService = TaskLifecycleService<
    InMemoryWorkspaceStore,
    InMemoryUserRepository,
    RecordingDispatcher,
    DefaultClock,
>;
pub(crate) type TestCommentService = CommentService<InMemoryWorkspaceStore, DefaultClock>;

/// In-memory wiring of the workspace services.
pub(crate) struct Harness {
    pub(crate) store: Arc<InMemoryWorkspaceStore>,
    pub(crate) users: Arc<InMemoryUserRepository>,
    pub(crate) dispatcher: Arc<RecordingDispatcher>,
    pub(crate) projects: TestProjectService,
    pub(crate) tasks: TestTaskService,
    pub(crate) comments: TestCommentService,
}

impl Harness {
    pub(crate) fn new() -> Self {
        let store = Arc::new(InMemoryWorkspaceStore::new());
        let users = Arc::new(InMemoryUserRepository::new());
        let dispatcher = Arc::new(RecordingDispatcher::default());
        let clock = Arc::new(DefaultClock);
        Self {
            projects: ProjectService::new(
                Arc::clone(&store),
                Arc::clone(&users),
                Arc::clone(&dispatcher),
                Arc::clone(&clock),
            ),
            tasks: TaskLifecycleService::new(
                Arc::clone(&store),
                Arc::clone(&users),
                Arc::clone(&dispatcher),
                Arc::clone(&clock),
            ),
            comments: CommentService::new(Arc::clone(&store), clock),
            store,
            users,
            dispatcher,
        }
    }

    /// Stores a user with the given system role and returns their context.
    pub(crate) async fn user(&self, name: &str, role: SystemRole) -> (User, RequestContext) {
        let user = stored_user(&*self.users, name, role).await;
        let ctx = RequestContext::new(Actor::from(&user));
        (user, ctx)
    }
}

/// Builds and stores a password user with an unusable digest.
pub(crate) async fn stored_user(
    users: &impl UserRepository,
    name: &str,
    role: SystemRole,
) -> User {
    let email = EmailAddress::new(format!("{}@tasklane.test", name.to_ascii_lowercase()))
        .expect("test email should be valid");
    let fields = NewUser::new(
        name,
        email,
        Credential::Password {
            digest: PasswordDigest::new("unused"),
        },
    )
    .expect("test user fields should be valid")
    .with_role(role);
    let user = User::new(fields, &DefaultClock);
    users.store(&user).await.expect("test user should store");
    user
}

/// A deadline `days` whole days from now, plus an hour of slack.
pub(crate) fn days_from_now(days: i64) -> DateTime<Utc> {
    Utc::now() + Duration::days(days) - Duration::hours(1)
}
