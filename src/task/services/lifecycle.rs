//! Task lifecycle manager.
//!
//! Every mutation follows the same sequence: authorize the caller, apply
//! the change to the aggregate, recompute derived project state, commit
//! through the [`WorkspaceStore`], and only then hand lifecycle events to
//! the dispatcher.

use chrono::{DateTime, Duration, Utc};
use futures::future::try_join_all;
use mockable::Clock;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::info;

use crate::access::{Capability, RequestContext, Resource, authorize};
use crate::comment::domain::{Comment, CommentId, NewComment};
use crate::config::DEFAULT_REMINDER_WINDOW_DAYS;
use crate::error::{EntityRef, ServiceError, ServiceResult};
use crate::identity::{domain::UserId, ports::UserRepository};
use crate::notification::{
    domain::{LifecycleEvent, TaskSnapshot},
    ports::EventDispatcher,
};
use crate::project::domain::{Progress, Project, ProjectId};
use crate::store::WorkspaceStore;
use crate::task::domain::{
    Attachment, AttachmentId, Hours, NewAttachment, NewTask, Priority, Task, TaskChanges,
    TaskDependency, TaskId, TaskStats, TaskStatus, days_until,
};

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateTaskRequest {
    project_id: ProjectId,
    title: String,
    description: String,
    assignees: Vec<UserId>,
    deadline: DateTime<Utc>,
    priority: Priority,
    estimated_hours: Option<Hours>,
    tags: Vec<String>,
    dependencies: Vec<TaskDependency>,
}

impl CreateTaskRequest {
    /// Creates a request with the required task fields.
    #[must_use]
    pub fn new(
        project_id: ProjectId,
        title: impl Into<String>,
        description: impl Into<String>,
        assignees: impl IntoIterator<Item = UserId>,
        deadline: DateTime<Utc>,
    ) -> Self {
        Self {
            project_id,
            title: title.into(),
            description: description.into(),
            assignees: assignees.into_iter().collect(),
            deadline,
            priority: Priority::default(),
            estimated_hours: None,
            tags: Vec::new(),
            dependencies: Vec::new(),
        }
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the estimated effort.
    #[must_use]
    pub const fn with_estimated_hours(mut self, hours: Hours) -> Self {
        self.estimated_hours = Some(hours);
        self
    }

    /// Sets the tags.
    #[must_use]
    pub fn with_tags(mut self, tags: impl IntoIterator<Item = String>) -> Self {
        self.tags = tags.into_iter().collect();
        self
    }

    /// Sets the dependency edges.
    #[must_use]
    pub fn with_dependencies(mut self, dependencies: impl IntoIterator<Item = TaskDependency>) -> Self {
        self.dependencies = dependencies.into_iter().collect();
        self
    }
}

/// Request payload for commenting on a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddCommentRequest {
    content: String,
    parent: Option<CommentId>,
    mentions: Vec<UserId>,
}

impl AddCommentRequest {
    /// Creates a top-level comment request.
    #[must_use]
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            parent: None,
            mentions: Vec::new(),
        }
    }

    /// Makes the comment a reply to `parent`.
    #[must_use]
    pub const fn replying_to(mut self, parent: CommentId) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Sets the mentioned users.
    #[must_use]
    pub fn with_mentions(mut self, mentions: impl IntoIterator<Item = UserId>) -> Self {
        self.mentions = mentions.into_iter().collect();
        self
    }
}

#[derive(Debug, Clone, Copy)]
enum ProgressChange<'a> {
    Upsert(&'a Task),
    Remove(TaskId),
}

impl ProgressChange<'_> {
    fn replaces(self, id: TaskId) -> bool {
        match self {
            Self::Upsert(task) => task.id() == id,
            Self::Remove(removed) => removed == id,
        }
    }
}

/// Task lifecycle service.
#[derive(Clone)]
pub struct TaskLifecycleService<S, U, D, C>
where
    S: WorkspaceStore,
    U: UserRepository,
    D: EventDispatcher,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    users: Arc<U>,
    dispatcher: Arc<D>,
    clock: Arc<C>,
    reminder_window_days: i64,
}

impl<S, U, D, C> TaskLifecycleService<S, U, D, C>
where
    S: WorkspaceStore,
    U: UserRepository,
    D: EventDispatcher,
    C: Clock + Send + Sync,
{
    /// Creates a task lifecycle service with the default reminder window.
    #[must_use]
    pub const fn new(store: Arc<S>, users: Arc<U>, dispatcher: Arc<D>, clock: Arc<C>) -> Self {
        Self {
            store,
            users,
            dispatcher,
            clock,
            reminder_window_days: DEFAULT_REMINDER_WINDOW_DAYS,
        }
    }

    /// Sets how many days ahead deadline reminders look.
    #[must_use]
    pub const fn with_reminder_window(mut self, days: i64) -> Self {
        self.reminder_window_days = days;
        self
    }

    /// Creates a task at the end of the project order and notifies its
    /// assignees.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Forbidden`] for callers below the `Member`
    /// role, [`ServiceError::NotFound`] for unknown assignees, and
    /// [`ServiceError::ValidationFailed`] for invalid fields.
    pub async fn create_task(
        &self,
        ctx: &RequestContext,
        request: CreateTaskRequest,
    ) -> ServiceResult<Task> {
        let CreateTaskRequest {
            project_id,
            title,
            description,
            assignees,
            deadline,
            priority,
            estimated_hours,
            tags,
            dependencies,
        } = request;

        let mut project = self.load_project(project_id).await?;
        authorize(ctx.actor(), Resource::Project(&project), Capability::CreateTask)?;

        let order = self.next_order(project_id).await?;
        let mut fields = NewTask::new(
            project_id,
            title,
            description,
            assignees,
            ctx.user_id(),
            deadline,
        )?
        .with_priority(priority)
        .with_tags(tags)
        .with_dependencies(dependencies)
        .with_order(order);
        if let Some(hours) = estimated_hours {
            fields = fields.with_estimated_hours(hours);
        }
        self.ensure_users_exist(fields.assignees()).await?;

        let task = Task::new(fields, &*self.clock);
        project.attach_task(task.id(), &*self.clock);
        let progress = self
            .progress_after(project_id, ProgressChange::Upsert(&task))
            .await?;
        project.record_progress(progress, &*self.clock);
        self.store.insert_task(&task, &project).await?;
        info!(
            task_id = %task.id(),
            project_id = %project_id,
            correlation_id = %ctx.correlation_id(),
            "task created"
        );

        let snapshot = TaskSnapshot::from(&task);
        let events = task
            .assignees()
            .iter()
            .map(|assignee| LifecycleEvent::TaskAssigned {
                task: snapshot.clone(),
                assignee: *assignee,
            })
            .collect();
        self.dispatcher.dispatch(events).await;
        Ok(task)
    }

    /// Returns a task the caller may read.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::NotFound`] for unknown tasks and
    /// [`ServiceError::Forbidden`] for callers who are neither assigned nor
    /// project administrators.
    pub async fn get_task(&self, ctx: &RequestContext, id: TaskId) -> ServiceResult<Task> {
        let (task, project) = self.load_task_with_project(id).await?;
        authorize(
            ctx.actor(),
            Resource::Task {
                project: &project,
                task: &task,
            },
            Capability::ReadTask,
        )?;
        Ok(task)
    }

    /// Lists a project's tasks in ascending order.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Forbidden`] for non-members.
    pub async fn list_tasks(
        &self,
        ctx: &RequestContext,
        project_id: ProjectId,
    ) -> ServiceResult<Vec<Task>> {
        let project = self.load_project(project_id).await?;
        authorize(ctx.actor(), Resource::Project(&project), Capability::ViewTasks)?;
        Ok(self.store.list_project_tasks(project_id).await?)
    }

    /// Applies a partial update.
    ///
    /// A status change recomputes the project's progress in the same
    /// commit and notifies the other assignees; newly added assignees are
    /// notified of their assignment.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Forbidden`] for callers who are neither
    /// assigned nor project administrators, [`ServiceError::NotFound`] for
    /// unknown assignees, and [`ServiceError::ValidationFailed`] for invalid
    /// changes.
    pub async fn update_task(
        &self,
        ctx: &RequestContext,
        id: TaskId,
        changes: TaskChanges,
    ) -> ServiceResult<Task> {
        let (mut task, mut project) = self.load_task_with_project(id).await?;
        authorize(
            ctx.actor(),
            Resource::Task {
                project: &project,
                task: &task,
            },
            Capability::UpdateTask,
        )?;
        if let Some(assignees) = changes.assignees() {
            self.ensure_users_exist(assignees).await?;
        }

        let outcome = task.apply_changes(changes, &*self.clock)?;
        if outcome.status_changed {
            let progress = self
                .progress_after(project.id(), ProgressChange::Upsert(&task))
                .await?;
            project.record_progress(progress, &*self.clock);
            self.store.update_task_and_project(&task, &project).await?;
            info!(
                task_id = %id,
                from = outcome.previous_status.as_str(),
                to = task.status().as_str(),
                progress = progress.value(),
                correlation_id = %ctx.correlation_id(),
                "task status changed"
            );
        } else {
            self.store.update_task(&task).await?;
            info!(task_id = %id, correlation_id = %ctx.correlation_id(), "task updated");
        }

        let snapshot = TaskSnapshot::from(&task);
        let mut events: Vec<LifecycleEvent> = outcome
            .newly_assigned
            .iter()
            .map(|assignee| LifecycleEvent::TaskAssigned {
                task: snapshot.clone(),
                assignee: *assignee,
            })
            .collect();
        if outcome.status_changed {
            events.push(LifecycleEvent::TaskStatusChanged {
                task: snapshot,
                previous: outcome.previous_status,
                changed_by: ctx.user_id(),
            });
        }
        self.dispatcher.dispatch(events).await;
        Ok(task)
    }

    /// Deletes a task with its comments and drops it from the project.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Forbidden`] for callers who are neither
    /// assigned nor project administrators.
    pub async fn delete_task(&self, ctx: &RequestContext, id: TaskId) -> ServiceResult<()> {
        let (task, mut project) = self.load_task_with_project(id).await?;
        authorize(
            ctx.actor(),
            Resource::Task {
                project: &project,
                task: &task,
            },
            Capability::DeleteTask,
        )?;

        project.detach_task(id, &*self.clock);
        let progress = self
            .progress_after(project.id(), ProgressChange::Remove(id))
            .await?;
        project.record_progress(progress, &*self.clock);
        let comments = self.store.delete_task_cascade(id, &project).await?;
        info!(
            task_id = %id,
            project_id = %project.id(),
            comments,
            correlation_id = %ctx.correlation_id(),
            "task deleted"
        );
        Ok(())
    }

    /// Assigns each listed task the 0-based position it has in `ordered`.
    ///
    /// Returns the project's tasks in their new order.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::ValidationFailed`] when an id is repeated or
    /// does not belong to the project.
    pub async fn reorder_tasks(
        &self,
        ctx: &RequestContext,
        project_id: ProjectId,
        ordered: &[TaskId],
    ) -> ServiceResult<Vec<Task>> {
        let project = self.load_project(project_id).await?;
        authorize(ctx.actor(), Resource::Project(&project), Capability::ReorderTasks)?;

        let mut seen = HashSet::with_capacity(ordered.len());
        for id in ordered {
            if !project.contains_task(*id) {
                return Err(ServiceError::ValidationFailed(format!(
                    "task {id} does not belong to project {project_id}"
                )));
            }
            if !seen.insert(*id) {
                return Err(ServiceError::ValidationFailed(format!(
                    "task {id} appears more than once"
                )));
            }
        }
        let positions = ordered
            .iter()
            .enumerate()
            .map(|(position, id)| u32::try_from(position).map(|order| (*id, order)))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| ServiceError::ValidationFailed("too many tasks to reorder".to_owned()))?;

        let at = self.clock.utc();
        try_join_all(
            positions
                .into_iter()
                .map(|(id, order)| self.store.assign_task_order(id, order, at)),
        )
        .await?;
        info!(
            project_id = %project_id,
            tasks = ordered.len(),
            correlation_id = %ctx.correlation_id(),
            "tasks reordered"
        );
        Ok(self.store.list_project_tasks(project_id).await?)
    }

    /// Posts a comment, optionally as a reply, and notifies the task's
    /// followers.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::NotFound`] for an unknown parent and
    /// [`ServiceError::ValidationFailed`] for blank content or a parent on
    /// another task.
    pub async fn add_comment(
        &self,
        ctx: &RequestContext,
        task_id: TaskId,
        request: AddCommentRequest,
    ) -> ServiceResult<Comment> {
        let AddCommentRequest {
            content,
            parent,
            mentions,
        } = request;

        let (task, project) = self.load_task_with_project(task_id).await?;
        authorize(
            ctx.actor(),
            Resource::Task {
                project: &project,
                task: &task,
            },
            Capability::CommentOnTask,
        )?;
        let commenter = self
            .users
            .find_by_id(ctx.user_id())
            .await?
            .ok_or(ServiceError::NotFound(EntityRef::User(ctx.user_id())))?;

        let mut fields = NewComment::new(task_id, ctx.user_id(), content)?.with_mentions(mentions);
        if let Some(parent_id) = parent {
            let parent_comment = self
                .store
                .find_comment(parent_id)
                .await?
                .ok_or(ServiceError::NotFound(EntityRef::Comment(parent_id)))?;
            fields = fields.replying_to(&parent_comment)?;
        }
        let comment = Comment::new(fields, &*self.clock);
        self.store.store_comment(&comment).await?;
        info!(
            comment_id = %comment.id(),
            task_id = %task_id,
            correlation_id = %ctx.correlation_id(),
            "comment added"
        );

        self.dispatcher
            .dispatch(vec![LifecycleEvent::TaskCommented {
                task: TaskSnapshot::from(&task),
                comment_id: comment.id(),
                commenter: ctx.user_id(),
                commenter_name: commenter.name().to_owned(),
            }])
            .await;
        Ok(comment)
    }

    /// Computes statistics for a task.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Forbidden`] for callers who may not read the
    /// task.
    pub async fn task_stats(&self, ctx: &RequestContext, id: TaskId) -> ServiceResult<TaskStats> {
        let task = self.get_task(ctx, id).await?;
        let comments = self.store.count_task_comments(id).await?;
        Ok(TaskStats::compute(&task, comments, self.clock.utc()))
    }

    /// Attaches a file to a task.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Forbidden`] for callers who may not update
    /// the task.
    pub async fn add_attachment(
        &self,
        ctx: &RequestContext,
        task_id: TaskId,
        fields: NewAttachment,
    ) -> ServiceResult<Attachment> {
        let mut task = self.authorized_for_update(ctx, task_id).await?;
        let attachment = task.add_attachment(fields, ctx.user_id(), &*self.clock);
        self.store.update_task(&task).await?;
        info!(task_id = %task_id, attachment_id = %attachment.id(), "attachment added");
        Ok(attachment)
    }

    /// Removes an attachment from a task.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::NotFound`] when the task has no such
    /// attachment.
    pub async fn remove_attachment(
        &self,
        ctx: &RequestContext,
        task_id: TaskId,
        attachment_id: AttachmentId,
    ) -> ServiceResult<Attachment> {
        let mut task = self.authorized_for_update(ctx, task_id).await?;
        let removed = task.remove_attachment(attachment_id, &*self.clock)?;
        self.store.update_task(&task).await?;
        info!(task_id = %task_id, attachment_id = %attachment_id, "attachment removed");
        Ok(removed)
    }

    /// Emits a deadline reminder for every open task due within the
    /// reminder window. Returns the number of tasks reminded.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::ValidationFailed`] for an out-of-range
    /// window and [`ServiceError::Internal`] when the store fails.
    pub async fn dispatch_deadline_reminders(&self) -> ServiceResult<usize> {
        let now = self.clock.utc();
        let window = Duration::try_days(self.reminder_window_days).ok_or_else(|| {
            ServiceError::ValidationFailed(format!(
                "reminder window of {} days is out of range",
                self.reminder_window_days
            ))
        })?;
        let until = now.checked_add_signed(window).unwrap_or(DateTime::<Utc>::MAX_UTC);
        let due = self.store.list_open_tasks_due_between(now, until).await?;

        let events: Vec<LifecycleEvent> = due
            .iter()
            .map(|task| LifecycleEvent::DeadlineApproaching {
                task: TaskSnapshot::from(task),
                days_remaining: days_until(task.deadline(), now),
            })
            .collect();
        let reminded = events.len();
        self.dispatcher.dispatch(events).await;
        info!(reminded, window_days = self.reminder_window_days, "deadline reminders dispatched");
        Ok(reminded)
    }

    async fn authorized_for_update(&self, ctx: &RequestContext, id: TaskId) -> ServiceResult<Task> {
        let (task, project) = self.load_task_with_project(id).await?;
        authorize(
            ctx.actor(),
            Resource::Task {
                project: &project,
                task: &task,
            },
            Capability::UpdateTask,
        )?;
        Ok(task)
    }

    async fn next_order(&self, project: ProjectId) -> ServiceResult<u32> {
        let stored = self.store.list_project_tasks(project).await?;
        stored
            .iter()
            .map(Task::order)
            .max()
            .map_or(Some(0), |last| last.checked_add(1))
            .ok_or_else(|| ServiceError::InvariantViolation("task order exceeds u32".to_owned()))
    }

    async fn progress_after(
        &self,
        project: ProjectId,
        change: ProgressChange<'_>,
    ) -> ServiceResult<Progress> {
        let stored = self.store.list_project_tasks(project).await?;
        let mut statuses: Vec<TaskStatus> = stored
            .iter()
            .filter(|task| !change.replaces(task.id()))
            .map(Task::status)
            .collect();
        if let ProgressChange::Upsert(task) = change {
            statuses.push(task.status());
        }
        let completed = statuses
            .iter()
            .filter(|status| **status == TaskStatus::Completed)
            .count();
        Ok(Progress::from_counts(completed, statuses.len()))
    }

    async fn ensure_users_exist(&self, users: &[UserId]) -> ServiceResult<()> {
        for user in users {
            if self.users.find_by_id(*user).await?.is_none() {
                return Err(ServiceError::NotFound(EntityRef::User(*user)));
            }
        }
        Ok(())
    }

    async fn load_project(&self, id: ProjectId) -> ServiceResult<Project> {
        self.store
            .find_project(id)
            .await?
            .ok_or(ServiceError::NotFound(EntityRef::Project(id)))
    }

    async fn load_task_with_project(&self, id: TaskId) -> ServiceResult<(Task, Project)> {
        let task = self
            .store
            .find_task(id)
            .await?
            .ok_or(ServiceError::NotFound(EntityRef::Task(id)))?;
        let project = self.load_project(task.project_id()).await?;
        Ok((task, project))
    }
}
