//! Repository port for project persistence.

use crate::identity::domain::UserId;
use crate::project::domain::{Project, ProjectId};
use crate::store::StoreResult;
use async_trait::async_trait;

/// Project persistence contract.
///
/// Cross-aggregate writes (task insertion, cascading deletes) live on
/// [`crate::store::WorkspaceStore`].
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// Stores a new project.
    ///
    /// # Errors
    ///
    /// Returns [`crate::store::StoreError::Duplicate`] when the identifier
    /// already exists.
    async fn store_project(&self, project: &Project) -> StoreResult<()>;

    /// Persists changes to an existing project.
    ///
    /// # Errors
    ///
    /// Returns [`crate::store::StoreError::NotFound`] when the project does
    /// not exist.
    async fn update_project(&self, project: &Project) -> StoreResult<()>;

    /// Finds a project by identifier.
    async fn find_project(&self, id: ProjectId) -> StoreResult<Option<Project>>;

    /// Lists the projects `user` belongs to, newest first.
    async fn list_projects_for_member(&self, user: UserId) -> StoreResult<Vec<Project>>;
}
