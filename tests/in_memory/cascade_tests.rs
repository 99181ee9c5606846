//! Progress aggregation and cascading deletes through the public services.

use super::helpers::{Workspace, days_from_now, workspace};
use rstest::rstest;
use tasklane::comment::domain::ReactionKind;
use tasklane::project::services::CreateProjectRequest;
use tasklane::store::CascadeSummary;
use tasklane::task::domain::{TaskChanges, TaskStatus};
use tasklane::task::services::{AddCommentRequest, CreateTaskRequest};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn progress_follows_task_completion(workspace: Workspace) -> Result<(), eyre::Report> {
    let (owner, ctx) = workspace.sign_up("Owner").await?;
    let project = workspace
        .projects
        .create_project(&ctx, CreateProjectRequest::new("Atlas", "Launch site"))
        .await?;
    let mut ids = Vec::new();
    for title in ["Survey", "Pour", "Inspect"] {
        let task = workspace
            .tasks
            .create_task(
                &ctx,
                CreateTaskRequest::new(project.id(), title, "Site work", [owner.id()], days_from_now(7)),
            )
            .await?;
        ids.push(task.id());
    }

    for id in ids.iter().take(2) {
        workspace
            .tasks
            .update_task(&ctx, *id, TaskChanges::new().with_status(TaskStatus::Completed))
            .await?;
    }
    let stats = workspace.projects.project_stats(&ctx, project.id()).await?;
    eyre::ensure!(stats.total == 3, "three tasks, got {}", stats.total);
    eyre::ensure!(stats.progress.value() == 67, "progress {}", stats.progress.value());

    let last = ids.last().copied().ok_or_else(|| eyre::eyre!("tasks created"))?;
    workspace.tasks.delete_task(&ctx, last).await?;
    let reloaded = workspace.projects.get_project(&ctx, project.id()).await?;
    eyre::ensure!(
        reloaded.progress().value() == 100,
        "deleting the open task completes the project, got {}",
        reloaded.progress().value()
    );
    eyre::ensure!(reloaded.task_ids().len() == 2, "task list shrinks");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_a_project_removes_its_tasks_and_comments(
    workspace: Workspace,
) -> Result<(), eyre::Report> {
    let (owner, ctx) = workspace.sign_up("Owner").await?;
    let project = workspace
        .projects
        .create_project(&ctx, CreateProjectRequest::new("Atlas", "Launch site"))
        .await?;
    let task = workspace
        .tasks
        .create_task(
            &ctx,
            CreateTaskRequest::new(project.id(), "Survey", "Site work", [owner.id()], days_from_now(7)),
        )
        .await?;
    let root = workspace
        .tasks
        .add_comment(&ctx, task.id(), AddCommentRequest::new("Started"))
        .await?;
    workspace
        .tasks
        .add_comment(&ctx, task.id(), AddCommentRequest::new("Done").replying_to(root.id()))
        .await?;
    workspace
        .comments
        .react_to_comment(&ctx, root.id(), ReactionKind::Like)
        .await?;

    let summary = workspace.projects.delete_project(&ctx, project.id()).await?;

    eyre::ensure!(
        summary == CascadeSummary { tasks: 1, comments: 2 },
        "unexpected summary {summary:?}"
    );
    let task_err = workspace
        .tasks
        .get_task(&ctx, task.id())
        .await
        .expect_err("task removed");
    eyre::ensure!(task_err.code() == "NOT_FOUND", "unexpected error {task_err}");
    let thread_err = workspace
        .comments
        .thread(&ctx, root.id())
        .await
        .expect_err("comments removed");
    eyre::ensure!(thread_err.code() == "NOT_FOUND", "unexpected error {thread_err}");
    Ok(())
}
