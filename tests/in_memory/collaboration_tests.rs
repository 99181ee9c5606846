//! Notification delivery across the inbox, push, and email channels.

use super::helpers::{EMAIL_FROM, Workspace, days_from_now, workspace};
use rstest::rstest;
use tasklane::access::RequestContext;
use tasklane::identity::domain::{NotificationKind, User};
use tasklane::notification::ports::PushTopic;
use tasklane::project::domain::{MemberRole, Project};
use tasklane::project::services::CreateProjectRequest;
use tasklane::task::domain::{Task, TaskChanges, TaskStatus};
use tasklane::task::services::{AddCommentRequest, CreateTaskRequest};
use tokio::sync::broadcast::error::TryRecvError;

struct Crew {
    owner: (User, RequestContext),
    ada: (User, RequestContext),
    bob: (User, RequestContext),
    project: Project,
}

async fn assemble_crew(workspace: &Workspace) -> Result<Crew, eyre::Report> {
    let owner = workspace.sign_up("Owner").await?;
    let ada = workspace.sign_up("Ada").await?;
    let bob = workspace.sign_up("Bob").await?;
    let created = workspace
        .projects
        .create_project(&owner.1, CreateProjectRequest::new("Atlas", "Launch site"))
        .await?;
    for member in [&ada.0, &bob.0] {
        workspace
            .projects
            .add_member(&owner.1, created.id(), member.id(), MemberRole::Member)
            .await?;
    }
    let project = workspace.projects.get_project(&owner.1, created.id()).await?;
    Ok(Crew {
        owner,
        ada,
        bob,
        project,
    })
}

async fn shared_task(workspace: &Workspace, crew: &Crew) -> Result<Task, eyre::Report> {
    let task = workspace
        .tasks
        .create_task(
            &crew.owner.1,
            CreateTaskRequest::new(
                crew.project.id(),
                "Fuel check",
                "Verify tank pressure",
                [crew.ada.0.id(), crew.bob.0.id()],
                days_from_now(10),
            ),
        )
        .await?;
    Ok(task)
}

async fn kinds_for(
    workspace: &Workspace,
    ctx: &RequestContext,
) -> Result<Vec<NotificationKind>, eyre::Report> {
    let records = workspace.accounts.notifications(ctx).await?;
    Ok(records.iter().map(|record| record.kind()).collect())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn status_change_reaches_other_assignees_on_every_channel(
    workspace: Workspace,
) -> Result<(), eyre::Report> {
    let crew = assemble_crew(&workspace).await?;
    let task = shared_task(&workspace, &crew).await?;
    let mut ada_topic = workspace.push.subscribe(PushTopic::User(crew.ada.0.id())).await;
    let mut bob_topic = workspace.push.subscribe(PushTopic::User(crew.bob.0.id())).await;
    let mut project_topic = workspace
        .push
        .subscribe(PushTopic::Project(crew.project.id()))
        .await;
    let emails_before = workspace.outbox.sent()?.len();

    workspace
        .tasks
        .update_task(
            &crew.ada.1,
            task.id(),
            TaskChanges::new().with_status(TaskStatus::InProgress),
        )
        .await?;

    let bob_kinds = kinds_for(&workspace, &crew.bob.1).await?;
    eyre::ensure!(
        bob_kinds.contains(&NotificationKind::TaskStatusChanged),
        "bob should be told about the status change, got {bob_kinds:?}"
    );
    let ada_kinds = kinds_for(&workspace, &crew.ada.1).await?;
    eyre::ensure!(
        !ada_kinds.contains(&NotificationKind::TaskStatusChanged),
        "the changer is not notified"
    );

    let pushed = bob_topic.try_recv()?;
    eyre::ensure!(
        pushed.message == r#"Status of task "Fuel check" changed from Pending to In Progress"#,
        "unexpected push message {}",
        pushed.message
    );
    eyre::ensure!(pushed.task_id == Some(task.id()), "push names the task");
    eyre::ensure!(
        matches!(ada_topic.try_recv(), Err(TryRecvError::Empty)),
        "ada's topic stays quiet"
    );
    eyre::ensure!(
        project_topic.try_recv()?.kind == NotificationKind::TaskStatusChanged,
        "project watchers see the change"
    );

    let sent = workspace.outbox.sent()?;
    let new_emails: Vec<_> = sent.iter().skip(emails_before).collect();
    eyre::ensure!(new_emails.len() == 1, "one email, got {}", new_emails.len());
    eyre::ensure!(
        new_emails
            .iter()
            .all(|email| email.to == "bob@tasklane.test" && email.from == EMAIL_FROM),
        "email goes to bob from the configured sender"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn recipients_mark_notifications_read(workspace: Workspace) -> Result<(), eyre::Report> {
    let crew = assemble_crew(&workspace).await?;
    shared_task(&workspace, &crew).await?;

    let records = workspace.accounts.notifications(&crew.bob.1).await?;
    eyre::ensure!(records.len() == 2, "membership and assignment notices");
    let assigned = records
        .iter()
        .find(|record| record.kind() == NotificationKind::TaskAssigned)
        .ok_or_else(|| eyre::eyre!("bob should be told about the assignment"))?;
    eyre::ensure!(!assigned.is_read(), "fresh notifications are unread");

    let marked = workspace
        .accounts
        .mark_notification_read(&crew.bob.1, assigned.id())
        .await?;
    eyre::ensure!(marked.is_read(), "record should be read");

    let err = workspace
        .accounts
        .mark_notification_read(&crew.ada.1, assigned.id())
        .await
        .expect_err("notifications belong to one user");
    eyre::ensure!(err.code() == "NOT_FOUND", "unexpected error {err}");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn comments_notify_assignees_and_creator_but_not_commenter(
    workspace: Workspace,
) -> Result<(), eyre::Report> {
    let crew = assemble_crew(&workspace).await?;
    let task = shared_task(&workspace, &crew).await?;

    workspace
        .tasks
        .add_comment(&crew.bob.1, task.id(), AddCommentRequest::new("Pressure nominal"))
        .await?;

    for (who, ctx) in [("owner", &crew.owner.1), ("ada", &crew.ada.1)] {
        let kinds = kinds_for(&workspace, ctx).await?;
        eyre::ensure!(
            kinds.contains(&NotificationKind::TaskComment),
            "{who} should be told about the comment, got {kinds:?}"
        );
    }
    let bob_kinds = kinds_for(&workspace, &crew.bob.1).await?;
    eyre::ensure!(
        !bob_kinds.contains(&NotificationKind::TaskComment),
        "commenters are not notified of their own comment"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn new_member_is_pushed_a_welcome(workspace: Workspace) -> Result<(), eyre::Report> {
    let crew = assemble_crew(&workspace).await?;
    let (carol, _) = workspace.sign_up("Carol").await?;
    let mut carol_topic = workspace.push.subscribe(PushTopic::User(carol.id())).await;

    workspace
        .projects
        .add_member(&crew.owner.1, crew.project.id(), carol.id(), MemberRole::Viewer)
        .await?;

    let pushed = carol_topic.try_recv()?;
    eyre::ensure!(
        pushed.kind == NotificationKind::ProjectMemberAdded,
        "unexpected kind {:?}",
        pushed.kind
    );
    eyre::ensure!(
        pushed.message == r#"You were added to project "Atlas" by Owner"#,
        "unexpected message {}",
        pushed.message
    );
    eyre::ensure!(pushed.task_id.is_none(), "membership events carry no task");
    Ok(())
}
