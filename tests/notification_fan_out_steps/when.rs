//! When steps for notification fan-out BDD scenarios.

use super::world::{FanOutWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::when;
use tasklane::task::domain::{TaskChanges, TaskStatus};
use tasklane::task::services::AddCommentRequest;

#[when(r#""{name}" moves "{title}" to "{status}""#)]
fn move_task(
    world: &mut FanOutWorld,
    name: String,
    title: String,
    status: String,
) -> Result<(), eyre::Report> {
    let next = TaskStatus::try_from(status.as_str())?;
    let (_, ctx) = world.person(&name)?;
    let task = world.task(&title)?;
    let updated = run_async(world.tasks.update_task(
        ctx,
        task.id(),
        TaskChanges::new().with_status(next),
    ))
    .wrap_err_with(|| format!("{name} moves {title}"))?;
    world.tasks_by_title.insert(title, updated);
    Ok(())
}

#[when(r#""{name}" comments "{content}" on "{title}""#)]
fn comment_on_task(
    world: &mut FanOutWorld,
    name: String,
    content: String,
    title: String,
) -> Result<(), eyre::Report> {
    let (_, ctx) = world.person(&name)?;
    let task = world.task(&title)?;
    run_async(
        world
            .tasks
            .add_comment(ctx, task.id(), AddCommentRequest::new(content)),
    )
    .wrap_err_with(|| format!("{name} comments on {title}"))?;
    Ok(())
}

#[when("deadline reminders are dispatched")]
fn dispatch_reminders(world: &mut FanOutWorld) -> Result<(), eyre::Report> {
    let sent = run_async(world.tasks.dispatch_deadline_reminders())
        .wrap_err("dispatch deadline reminders")?;
    world.reminders_sent = Some(sent);
    Ok(())
}
