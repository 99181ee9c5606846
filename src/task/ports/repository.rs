//! Repository port for task persistence.

use crate::project::domain::ProjectId;
use crate::store::StoreResult;
use crate::task::domain::{Task, TaskId};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Task persistence contract.
///
/// Task creation and deletion change the owning project as well and live
/// on [`crate::store::WorkspaceStore`].
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Persists changes to an existing task.
    ///
    /// # Errors
    ///
    /// Returns [`crate::store::StoreError::NotFound`] when the task does not
    /// exist.
    async fn update_task(&self, task: &Task) -> StoreResult<()>;

    /// Finds a task by identifier.
    async fn find_task(&self, id: TaskId) -> StoreResult<Option<Task>>;

    /// Lists the tasks of a project in ascending `order`.
    async fn list_project_tasks(&self, project: ProjectId) -> StoreResult<Vec<Task>>;

    /// Lists non-completed tasks whose deadline lies in `[from, until]`.
    async fn list_open_tasks_due_between(
        &self,
        from: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> StoreResult<Vec<Task>>;

    /// Writes only the `order` field of one task.
    ///
    /// Assignments for distinct tasks touch disjoint data and may run
    /// concurrently in any order.
    ///
    /// # Errors
    ///
    /// Returns [`crate::store::StoreError::NotFound`] when the task does not
    /// exist.
    async fn assign_task_order(
        &self,
        id: TaskId,
        order: u32,
        at: DateTime<Utc>,
    ) -> StoreResult<()>;
}
