//! Given steps for notification fan-out BDD scenarios.

use super::world::{FanOutWorld, run_async};
use chrono::{Duration, Utc};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use tasklane::project::{domain::MemberRole, services::CreateProjectRequest};
use tasklane::task::services::CreateTaskRequest;

#[given(r#"a project "{project}" owned by "{owner}" with members "{first}" and "{second}""#)]
fn project_with_members(
    world: &mut FanOutWorld,
    project: String,
    owner: String,
    first: String,
    second: String,
) -> Result<(), eyre::Report> {
    for name in [&owner, &first, &second] {
        world.sign_up(name).wrap_err_with(|| format!("sign up {name}"))?;
    }
    let (_, owner_ctx) = world.person(&owner)?;
    let created = run_async(
        world
            .projects
            .create_project(owner_ctx, CreateProjectRequest::new(project.as_str(), "Scenario project")),
    )
    .wrap_err("create scenario project")?;
    for name in [&first, &second] {
        let (member, _) = world.person(name)?;
        run_async(world.projects.add_member(
            owner_ctx,
            created.id(),
            member.id(),
            MemberRole::Member,
        ))
        .wrap_err_with(|| format!("add {name} to the project"))?;
    }
    let reloaded = run_async(world.projects.get_project(owner_ctx, created.id()))
        .wrap_err("reload scenario project")?;
    world.project = Some(reloaded);
    world.owner = Some(owner);
    Ok(())
}

#[given(r#"a task "{title}" assigned to "{first}" and "{second}" due in {days:i64} days"#)]
fn task_assigned_to(
    world: &mut FanOutWorld,
    title: String,
    first: String,
    second: String,
    days: i64,
) -> Result<(), eyre::Report> {
    let project = world.project()?;
    let (_, owner_ctx) = world.owner()?;
    let assignees = [world.person(&first)?.0.id(), world.person(&second)?.0.id()];
    let deadline = Utc::now() + Duration::days(days) - Duration::hours(1);
    let task = run_async(world.tasks.create_task(
        owner_ctx,
        CreateTaskRequest::new(project.id(), title.as_str(), "Scenario task", assignees, deadline),
    ))
    .wrap_err_with(|| format!("create task {title}"))?;
    world.tasks_by_title.insert(title, task);
    Ok(())
}
