//! Runs a scripted collaboration session against the in-memory adapters.
//!
//! Usage:
//!
//! ```text
//! RUST_LOG=tasklane=debug TASKLANE_EMAIL_FROM=noreply@example.com tasklane-demo
//! ```
//!
//! Three users sign up, form a project, and work one task through its
//! lifecycle. Notifications are delivered by the background dispatcher and
//! everything observable is reported through `tracing`.

use std::sync::Arc;

use anyhow::Context;
use chrono::{Duration, Utc};
use mockable::DefaultClock;
use tasklane::access::RequestContext;
use tasklane::config::TasklaneConfig;
use tasklane::identity::{
    adapters::{Argon2PasswordHasher, InMemoryUserRepository, JwtTokenIssuer},
    domain::User,
    services::{AccountService, RegisterRequest},
};
use tasklane::notification::{
    adapters::{BackgroundDispatcher, BroadcastPushChannel, OutboxEmailSender, UserInbox},
    domain::NotificationTemplates,
    ports::PushTopic,
    services::{FanOutService, FanOutSettings},
};
use tasklane::project::{
    domain::MemberRole,
    services::{CreateProjectRequest, ProjectService},
};
use tasklane::store::InMemoryWorkspaceStore;
use tasklane::task::{
    domain::{Priority, TaskChanges, TaskStatus},
    services::{AddCommentRequest, CreateTaskRequest, TaskLifecycleService},
};
use tokio::task::JoinHandle;
use tracing::info;

type Users = InMemoryUserRepository;
type Accounts = AccountService<Users, Argon2PasswordHasher, JwtTokenIssuer, DefaultClock>;
type Projects =
    ProjectService<InMemoryWorkspaceStore, Users, BackgroundDispatcher, DefaultClock>;
type Tasks =
    TaskLifecycleService<InMemoryWorkspaceStore, Users, BackgroundDispatcher, DefaultClock>;

const DEMO_PASSWORD: &str = "demo-password";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = TasklaneConfig::from_env();
    tasklane::telemetry::init_tracing("tasklane=info,tasklane_demo=info")
        .context("install tracing subscriber")?;

    let clock = Arc::new(DefaultClock);
    let users = Arc::new(Users::new());
    let store = Arc::new(InMemoryWorkspaceStore::new());
    let push = Arc::new(BroadcastPushChannel::from_config(&config));
    let outbox = Arc::new(OutboxEmailSender::new());
    let templates = NotificationTemplates::builtin().context("compile notification templates")?;
    let fanout = FanOutService::new(
        Arc::clone(&users),
        Arc::new(UserInbox::new(Arc::clone(&users))),
        Arc::clone(&push),
        Arc::clone(&outbox),
        Arc::clone(&clock),
        Arc::new(templates),
        FanOutSettings::from_config(&config),
    );
    let (queue, worker) = BackgroundDispatcher::spawn(Arc::new(fanout));
    let dispatcher = Arc::new(queue);

    let accounts = AccountService::new(
        Arc::clone(&users),
        Arc::new(Argon2PasswordHasher::new()),
        Arc::new(JwtTokenIssuer::from_config(&config)),
        Arc::clone(&clock),
    );
    let projects = ProjectService::new(
        Arc::clone(&store),
        Arc::clone(&users),
        Arc::clone(&dispatcher),
        Arc::clone(&clock),
    );
    let tasks = TaskLifecycleService::new(store, users, dispatcher, clock)
        .with_reminder_window(config.reminder_window_days);

    let session = run_session(&accounts, &projects, &tasks, &push).await?;

    // Dropping the services releases the last dispatcher handle so the
    // worker can drain and exit.
    drop(projects);
    drop(tasks);
    worker.await.context("notification worker panicked")?;
    session.feed.abort();

    for (name, ctx) in &session.people {
        for record in accounts.notifications(ctx).await? {
            info!(user = %name, kind = %record.kind(), message = record.message(), "inbox");
        }
    }
    let emails = outbox.sent()?;
    info!(
        emails = emails.len(),
        email_enabled = config.email_enabled(),
        "demo finished"
    );
    Ok(())
}

struct Session {
    people: Vec<(String, RequestContext)>,
    feed: JoinHandle<()>,
}

async fn sign_up(accounts: &Accounts, name: &str) -> anyhow::Result<(User, RequestContext)> {
    let email = format!("{}@tasklane.demo", name.to_ascii_lowercase());
    let user = accounts
        .register(RegisterRequest::new(name, email.as_str(), DEMO_PASSWORD))
        .await
        .with_context(|| format!("register {name}"))?;
    let (_, token) = accounts.login(&email, DEMO_PASSWORD).await?;
    let ctx = accounts.authenticate(&token.value).await?;
    Ok((user, ctx))
}

async fn run_session(
    accounts: &Accounts,
    projects: &Projects,
    tasks: &Tasks,
    push: &BroadcastPushChannel,
) -> anyhow::Result<Session> {
    let (_, olga) = sign_up(accounts, "Olga").await?;
    let (ada, ada_ctx) = sign_up(accounts, "Ada").await?;
    let (bob, bob_ctx) = sign_up(accounts, "Bob").await?;

    let project = projects
        .create_project(
            &olga,
            CreateProjectRequest::new("Atlas", "Launch site readiness")
                .with_tags(["launch".to_owned()]),
        )
        .await?;
    let mut project_feed = push.subscribe(PushTopic::Project(project.id())).await;
    let feed = tokio::spawn(async move {
        while let Ok(event) = project_feed.recv().await {
            info!(kind = %event.kind, message = %event.message, "project feed");
        }
    });

    for member in [&ada, &bob] {
        projects
            .add_member(&olga, project.id(), member.id(), MemberRole::Member)
            .await?;
    }

    let task = tasks
        .create_task(
            &olga,
            CreateTaskRequest::new(
                project.id(),
                "Fuel check",
                "Verify tank pressure before rollout",
                [ada.id(), bob.id()],
                Utc::now() + Duration::hours(30),
            )
            .with_priority(Priority::High),
        )
        .await?;
    tasks
        .update_task(
            &ada_ctx,
            task.id(),
            TaskChanges::new().with_status(TaskStatus::InProgress),
        )
        .await?;
    tasks
        .add_comment(&bob_ctx, task.id(), AddCommentRequest::new("Pressure nominal"))
        .await?;
    let reminded = tasks.dispatch_deadline_reminders().await?;
    tasks
        .update_task(
            &ada_ctx,
            task.id(),
            TaskChanges::new().with_status(TaskStatus::Completed),
        )
        .await?;

    let stats = projects.project_stats(&olga, project.id()).await?;
    info!(
        total = stats.total,
        completed = stats.completed,
        progress = stats.progress.value(),
        reminded,
        "project stats"
    );
    Ok(Session {
        people: vec![
            ("Olga".to_owned(), olga),
            ("Ada".to_owned(), ada_ctx),
            ("Bob".to_owned(), bob_ctx),
        ],
        feed,
    })
}
