//! In-memory workspace store for tests and the demo binary.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::{CascadeSummary, StoreError, StoreResult, WorkspaceStore};
use crate::comment::{
    domain::{Comment, CommentId},
    ports::CommentRepository,
};
use crate::error::EntityRef;
use crate::identity::domain::UserId;
use crate::project::{
    domain::{Project, ProjectId},
    ports::ProjectRepository,
};
use crate::task::{
    domain::{Task, TaskId, TaskStatus},
    ports::TaskRepository,
};

/// Thread-safe document store holding every project, task, and comment
/// behind a single lock, so multi-entity writes are atomic.
#[derive(Debug, Clone, Default)]
pub struct InMemoryWorkspaceStore {
    state: Arc<RwLock<WorkspaceState>>,
}

#[derive(Debug, Default)]
struct WorkspaceState {
    projects: HashMap<ProjectId, Project>,
    tasks: HashMap<TaskId, Task>,
    comments: HashMap<CommentId, Comment>,
}

impl WorkspaceState {
    fn require_project(&self, id: ProjectId) -> StoreResult<()> {
        if self.projects.contains_key(&id) {
            Ok(())
        } else {
            Err(StoreError::NotFound(EntityRef::Project(id)))
        }
    }

    fn require_task(&self, id: TaskId) -> StoreResult<()> {
        if self.tasks.contains_key(&id) {
            Ok(())
        } else {
            Err(StoreError::NotFound(EntityRef::Task(id)))
        }
    }

    fn remove_comments_of(&mut self, task: TaskId) -> usize {
        let before = self.comments.len();
        self.comments.retain(|_, comment| comment.task_id() != task);
        before.saturating_sub(self.comments.len())
    }
}

impl InMemoryWorkspaceStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, WorkspaceState>> {
        self.state
            .read()
            .map_err(|err| StoreError::persistence(std::io::Error::other(err.to_string())))
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, WorkspaceState>> {
        self.state
            .write()
            .map_err(|err| StoreError::persistence(std::io::Error::other(err.to_string())))
    }
}

#[async_trait]
impl ProjectRepository for InMemoryWorkspaceStore {
    async fn store_project(&self, project: &Project) -> StoreResult<()> {
        let mut state = self.write()?;
        if state.projects.contains_key(&project.id()) {
            return Err(StoreError::Duplicate(EntityRef::Project(project.id())));
        }
        state.projects.insert(project.id(), project.clone());
        Ok(())
    }

    async fn update_project(&self, project: &Project) -> StoreResult<()> {
        let mut state = self.write()?;
        state.require_project(project.id())?;
        state.projects.insert(project.id(), project.clone());
        Ok(())
    }

    async fn find_project(&self, id: ProjectId) -> StoreResult<Option<Project>> {
        let state = self.read()?;
        Ok(state.projects.get(&id).cloned())
    }

    async fn list_projects_for_member(&self, user: UserId) -> StoreResult<Vec<Project>> {
        let state = self.read()?;
        let mut projects: Vec<Project> = state
            .projects
            .values()
            .filter(|project| project.is_member(user))
            .cloned()
            .collect();
        projects.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        Ok(projects)
    }
}

#[async_trait]
impl TaskRepository for InMemoryWorkspaceStore {
    async fn update_task(&self, task: &Task) -> StoreResult<()> {
        let mut state = self.write()?;
        state.require_task(task.id())?;
        state.tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn find_task(&self, id: TaskId) -> StoreResult<Option<Task>> {
        let state = self.read()?;
        Ok(state.tasks.get(&id).cloned())
    }

    async fn list_project_tasks(&self, project: ProjectId) -> StoreResult<Vec<Task>> {
        let state = self.read()?;
        let mut tasks: Vec<Task> = state
            .tasks
            .values()
            .filter(|task| task.project_id() == project)
            .cloned()
            .collect();
        tasks.sort_by_key(|task| (task.order(), task.created_at()));
        Ok(tasks)
    }

    async fn list_open_tasks_due_between(
        &self,
        from: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> StoreResult<Vec<Task>> {
        let state = self.read()?;
        let mut tasks: Vec<Task> = state
            .tasks
            .values()
            .filter(|task| task.status() != TaskStatus::Completed)
            .filter(|task| task.deadline() >= from && task.deadline() <= until)
            .cloned()
            .collect();
        tasks.sort_by_key(Task::deadline);
        Ok(tasks)
    }

    async fn assign_task_order(
        &self,
        id: TaskId,
        order: u32,
        at: DateTime<Utc>,
    ) -> StoreResult<()> {
        let mut state = self.write()?;
        let task = state
            .tasks
            .get_mut(&id)
            .ok_or(StoreError::NotFound(EntityRef::Task(id)))?;
        task.set_order(order, at);
        Ok(())
    }
}

#[async_trait]
impl CommentRepository for InMemoryWorkspaceStore {
    async fn store_comment(&self, comment: &Comment) -> StoreResult<()> {
        let mut state = self.write()?;
        state.require_task(comment.task_id())?;
        if state.comments.contains_key(&comment.id()) {
            return Err(StoreError::Duplicate(EntityRef::Comment(comment.id())));
        }
        state.comments.insert(comment.id(), comment.clone());
        Ok(())
    }

    async fn update_comment(&self, comment: &Comment) -> StoreResult<()> {
        let mut state = self.write()?;
        if !state.comments.contains_key(&comment.id()) {
            return Err(StoreError::NotFound(EntityRef::Comment(comment.id())));
        }
        state.comments.insert(comment.id(), comment.clone());
        Ok(())
    }

    async fn find_comment(&self, id: CommentId) -> StoreResult<Option<Comment>> {
        let state = self.read()?;
        Ok(state.comments.get(&id).cloned())
    }

    async fn list_task_comments(&self, task: TaskId) -> StoreResult<Vec<Comment>> {
        let state = self.read()?;
        let mut comments: Vec<Comment> = state
            .comments
            .values()
            .filter(|comment| comment.task_id() == task)
            .cloned()
            .collect();
        comments.sort_by_key(Comment::created_at);
        Ok(comments)
    }

    async fn list_replies(&self, parent: CommentId) -> StoreResult<Vec<Comment>> {
        let state = self.read()?;
        let mut replies: Vec<Comment> = state
            .comments
            .values()
            .filter(|comment| comment.parent() == Some(parent))
            .cloned()
            .collect();
        replies.sort_by_key(Comment::created_at);
        Ok(replies)
    }

    async fn count_task_comments(&self, task: TaskId) -> StoreResult<usize> {
        let state = self.read()?;
        Ok(state
            .comments
            .values()
            .filter(|comment| comment.task_id() == task)
            .count())
    }
}

#[async_trait]
impl WorkspaceStore for InMemoryWorkspaceStore {
    async fn insert_task(&self, task: &Task, project: &Project) -> StoreResult<()> {
        let mut state = self.write()?;
        state.require_project(project.id())?;
        if state.tasks.contains_key(&task.id()) {
            return Err(StoreError::Duplicate(EntityRef::Task(task.id())));
        }
        state.tasks.insert(task.id(), task.clone());
        state.projects.insert(project.id(), project.clone());
        Ok(())
    }

    async fn update_task_and_project(&self, task: &Task, project: &Project) -> StoreResult<()> {
        let mut state = self.write()?;
        state.require_task(task.id())?;
        state.require_project(project.id())?;
        state.tasks.insert(task.id(), task.clone());
        state.projects.insert(project.id(), project.clone());
        Ok(())
    }

    async fn delete_task_cascade(&self, task: TaskId, project: &Project) -> StoreResult<usize> {
        let mut state = self.write()?;
        state.require_task(task)?;
        state.require_project(project.id())?;
        let removed_comments = state.remove_comments_of(task);
        state.tasks.remove(&task);
        state.projects.insert(project.id(), project.clone());
        Ok(removed_comments)
    }

    async fn delete_project_cascade(&self, project: ProjectId) -> StoreResult<CascadeSummary> {
        let mut state = self.write()?;
        state.require_project(project)?;

        let task_ids: Vec<TaskId> = state
            .tasks
            .values()
            .filter(|task| task.project_id() == project)
            .map(Task::id)
            .collect();
        let mut summary = CascadeSummary::default();
        for task in &task_ids {
            summary.comments = summary
                .comments
                .saturating_add(state.remove_comments_of(*task));
            state.tasks.remove(task);
        }
        summary.tasks = task_ids.len();
        state.projects.remove(&project);
        Ok(summary)
    }
}
