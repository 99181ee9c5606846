//! Unit-of-work port spanning projects, tasks, and comments.

use super::StoreResult;
use crate::comment::ports::CommentRepository;
use crate::project::domain::{Project, ProjectId};
use crate::project::ports::ProjectRepository;
use crate::task::domain::{Task, TaskId};
use crate::task::ports::TaskRepository;
use async_trait::async_trait;

/// Entities removed by a project cascade.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CascadeSummary {
    /// Tasks removed.
    pub tasks: usize,
    /// Comments removed.
    pub comments: usize,
}

/// Persistence port for the whole workspace.
///
/// Every method here commits all of its writes or none of them.
#[async_trait]
pub trait WorkspaceStore: ProjectRepository + TaskRepository + CommentRepository {
    /// Inserts a new task together with its owning project, whose task list
    /// already references the task.
    ///
    /// # Errors
    ///
    /// Returns [`super::StoreError::NotFound`] when the project does not
    /// exist or [`super::StoreError::Duplicate`] when the task does.
    async fn insert_task(&self, task: &Task, project: &Project) -> StoreResult<()>;

    /// Writes a task and its owning project together, e.g. after a status
    /// change recomputed the project's progress.
    ///
    /// # Errors
    ///
    /// Returns [`super::StoreError::NotFound`] when either does not exist.
    async fn update_task_and_project(&self, task: &Task, project: &Project) -> StoreResult<()>;

    /// Deletes a task and all its comments, and writes the owning project
    /// whose task list no longer references it. Returns the number of
    /// comments removed.
    ///
    /// # Errors
    ///
    /// Returns [`super::StoreError::NotFound`] when the task or the project
    /// does not exist.
    async fn delete_task_cascade(&self, task: TaskId, project: &Project) -> StoreResult<usize>;

    /// Deletes a project with all its tasks and their comments.
    ///
    /// # Errors
    ///
    /// Returns [`super::StoreError::NotFound`] when the project does not
    /// exist.
    async fn delete_project_cascade(&self, project: ProjectId) -> StoreResult<CascadeSummary>;
}
