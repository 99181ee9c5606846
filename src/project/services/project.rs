//! Project lifecycle and membership operations.

use chrono::{DateTime, Utc};
use mockable::Clock;
use std::sync::Arc;
use tracing::info;

use crate::access::{
    Capability, RequestContext, Resource, authorize, authorize_project_creation,
};
use crate::error::{EntityRef, ServiceError, ServiceResult};
use crate::identity::{domain::UserId, ports::UserRepository};
use crate::notification::{
    domain::{LifecycleEvent, ProjectSnapshot},
    ports::EventDispatcher,
};
use crate::project::domain::{
    MemberRole, NewProject, Project, ProjectChanges, ProjectId, ProjectStats,
};
use crate::store::{CascadeSummary, WorkspaceStore};

/// Request payload for creating a project owned by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateProjectRequest {
    name: String,
    description: String,
    start_date: Option<DateTime<Utc>>,
    end_date: Option<DateTime<Utc>>,
    tags: Vec<String>,
}

impl CreateProjectRequest {
    /// Creates a request with the required project fields.
    #[must_use]
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            start_date: None,
            end_date: None,
            tags: Vec::new(),
        }
    }

    /// Sets the start date; creation time is used otherwise.
    #[must_use]
    pub const fn with_start_date(mut self, start: DateTime<Utc>) -> Self {
        self.start_date = Some(start);
        self
    }

    /// Sets the end date.
    #[must_use]
    pub const fn with_end_date(mut self, end: DateTime<Utc>) -> Self {
        self.end_date = Some(end);
        self
    }

    /// Sets the tags.
    #[must_use]
    pub fn with_tags(mut self, tags: impl IntoIterator<Item = String>) -> Self {
        self.tags = tags.into_iter().collect();
        self
    }
}

/// Project lifecycle and membership service.
#[derive(Clone)]
pub struct ProjectService<S, U, D, C>
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
}

impl<S, U, D, C> ProjectService<S, U, D, C>
where
    S: WorkspaceStore,
    U: UserRepository,
    D: EventDispatcher,
    C: Clock + Send + Sync,
{
    /// Creates a project service.
    #[must_use]
    pub const fn new(store: Arc<S>, users: Arc<U>, dispatcher: Arc<D>, clock: Arc<C>) -> Self {
        Self {
            store,
            users,
            dispatcher,
            clock,
        }
    }

    /// Creates a project owned by the caller, who becomes its first
    /// administrator.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Forbidden`] for system viewers and
    /// [`ServiceError::ValidationFailed`] for blank fields or an end date
    /// before the start date.
    pub async fn create_project(
        &self,
        ctx: &RequestContext,
        request: CreateProjectRequest,
    ) -> ServiceResult<Project> {
        authorize_project_creation(ctx.actor())?;
        let CreateProjectRequest {
            name,
            description,
            start_date,
            end_date,
            tags,
        } = request;

        let mut fields = NewProject::new(name, description, ctx.user_id())?.with_tags(tags);
        if let Some(start) = start_date {
            fields = fields.with_start_date(start);
        }
        if let Some(end) = end_date {
            fields = fields.with_end_date(end);
        }
        let project = Project::new(fields, &*self.clock)?;
        self.store.store_project(&project).await?;
        info!(
            project_id = %project.id(),
            owner = %project.owner(),
            correlation_id = %ctx.correlation_id(),
            "project created"
        );
        Ok(project)
    }

    /// Returns a project the caller can see.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::NotFound`] for unknown projects and
    /// [`ServiceError::Forbidden`] for non-members.
    pub async fn get_project(&self, ctx: &RequestContext, id: ProjectId) -> ServiceResult<Project> {
        let project = self.load_project(id).await?;
        authorize(ctx.actor(), Resource::Project(&project), Capability::ViewProject)?;
        Ok(project)
    }

    /// Lists the projects the caller belongs to, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Internal`] when the store fails.
    pub async fn list_projects(&self, ctx: &RequestContext) -> ServiceResult<Vec<Project>> {
        Ok(self.store.list_projects_for_member(ctx.user_id()).await?)
    }

    /// Applies a partial update.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Forbidden`] unless the caller administers the
    /// project, and [`ServiceError::ValidationFailed`] for invalid changes.
    pub async fn update_project(
        &self,
        ctx: &RequestContext,
        id: ProjectId,
        changes: ProjectChanges,
    ) -> ServiceResult<Project> {
        let mut project = self.load_project(id).await?;
        authorize(ctx.actor(), Resource::Project(&project), Capability::UpdateProject)?;
        project.apply_changes(changes, &*self.clock)?;
        self.store.update_project(&project).await?;
        info!(project_id = %id, correlation_id = %ctx.correlation_id(), "project updated");
        Ok(project)
    }

    /// Deletes a project with all its tasks and their comments.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Forbidden`] unless the caller administers the
    /// project.
    pub async fn delete_project(
        &self,
        ctx: &RequestContext,
        id: ProjectId,
    ) -> ServiceResult<CascadeSummary> {
        let project = self.load_project(id).await?;
        authorize(ctx.actor(), Resource::Project(&project), Capability::DeleteProject)?;
        let summary = self.store.delete_project_cascade(id).await?;
        info!(
            project_id = %id,
            tasks = summary.tasks,
            comments = summary.comments,
            correlation_id = %ctx.correlation_id(),
            "project deleted"
        );
        Ok(summary)
    }

    /// Adds an existing user to the project and notifies them.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::NotFound`] for an unknown user and
    /// [`ServiceError::Conflict`] when they are already a member.
    pub async fn add_member(
        &self,
        ctx: &RequestContext,
        id: ProjectId,
        user: UserId,
        role: MemberRole,
    ) -> ServiceResult<Project> {
        let mut project = self.load_project(id).await?;
        authorize(
            ctx.actor(),
            Resource::Membership {
                project: &project,
                member: user,
            },
            Capability::AddMember,
        )?;
        if self.users.find_by_id(user).await?.is_none() {
            return Err(ServiceError::NotFound(EntityRef::User(user)));
        }
        let adder = self
            .users
            .find_by_id(ctx.user_id())
            .await?
            .ok_or(ServiceError::NotFound(EntityRef::User(ctx.user_id())))?;
        project.add_member(user, role, &*self.clock)?;
        self.store.update_project(&project).await?;
        info!(project_id = %id, member = %user, role = role.as_str(), "member added");

        self.dispatcher
            .dispatch(vec![LifecycleEvent::ProjectMemberAdded {
                project: ProjectSnapshot::from(&project),
                member: user,
                added_by: ctx.user_id(),
                added_by_name: adder.name().to_owned(),
            }])
            .await;
        Ok(project)
    }

    /// Removes a member. The owner can never be removed.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Forbidden`] for the owner or a caller who
    /// does not administer the project, and [`ServiceError::NotFound`] for
    /// non-members.
    pub async fn remove_member(
        &self,
        ctx: &RequestContext,
        id: ProjectId,
        user: UserId,
    ) -> ServiceResult<Project> {
        let mut project = self.load_project(id).await?;
        authorize(
            ctx.actor(),
            Resource::Membership {
                project: &project,
                member: user,
            },
            Capability::RemoveMember,
        )?;
        project.remove_member(user, &*self.clock)?;
        self.store.update_project(&project).await?;
        info!(project_id = %id, member = %user, "member removed");
        Ok(project)
    }

    /// Changes a member's role.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Forbidden`] unless the caller administers the
    /// project, and [`ServiceError::NotFound`] for non-members.
    pub async fn update_member_role(
        &self,
        ctx: &RequestContext,
        id: ProjectId,
        user: UserId,
        role: MemberRole,
    ) -> ServiceResult<Project> {
        let mut project = self.load_project(id).await?;
        authorize(
            ctx.actor(),
            Resource::Membership {
                project: &project,
                member: user,
            },
            Capability::ChangeMemberRole,
        )?;
        project.change_member_role(user, role, &*self.clock)?;
        self.store.update_project(&project).await?;
        info!(project_id = %id, member = %user, role = role.as_str(), "member role changed");
        Ok(project)
    }

    /// Computes aggregated statistics for a project.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Forbidden`] for non-members.
    pub async fn project_stats(
        &self,
        ctx: &RequestContext,
        id: ProjectId,
    ) -> ServiceResult<ProjectStats> {
        let project = self.load_project(id).await?;
        authorize(ctx.actor(), Resource::Project(&project), Capability::ViewStats)?;
        let tasks = self.store.list_project_tasks(id).await?;
        Ok(ProjectStats::compute(&project, &tasks, self.clock.utc()))
    }

    async fn load_project(&self, id: ProjectId) -> ServiceResult<Project> {
        self.store
            .find_project(id)
            .await?
            .ok_or(ServiceError::NotFound(EntityRef::Project(id)))
    }
}
