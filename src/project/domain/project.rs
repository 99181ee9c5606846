//! Project aggregate root.

use super::{MemberRole, Progress, ProjectDomainError, ProjectId, ProjectStatus};
use crate::identity::domain::UserId;
use crate::task::domain::TaskId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// A user's membership entry in a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectMember {
    user: UserId,
    role: MemberRole,
}

impl ProjectMember {
    /// Creates a membership entry.
    #[must_use]
    pub const fn new(user: UserId, role: MemberRole) -> Self {
        Self { user, role }
    }

    /// Returns the member's user identifier.
    #[must_use]
    pub const fn user(&self) -> UserId {
        self.user
    }

    /// Returns the member's project role.
    #[must_use]
    pub const fn role(&self) -> MemberRole {
        self.role
    }
}

/// Validated fields for a new project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProject {
    name: String,
    description: String,
    owner: UserId,
    start_date: Option<DateTime<Utc>>,
    end_date: Option<DateTime<Utc>>,
    tags: Vec<String>,
}

impl NewProject {
    /// Creates new-project fields owned by `owner`.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::EmptyName`] or
    /// [`ProjectDomainError::EmptyDescription`] for blank text.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        owner: UserId,
    ) -> Result<Self, ProjectDomainError> {
        Ok(Self {
            name: non_blank(name.into(), ProjectDomainError::EmptyName)?,
            description: non_blank(description.into(), ProjectDomainError::EmptyDescription)?,
            owner,
            start_date: None,
            end_date: None,
            tags: Vec::new(),
        })
    }

    /// Sets the start date. Defaults to the creation time.
    #[must_use]
    pub const fn with_start_date(mut self, start: DateTime<Utc>) -> Self {
        self.start_date = Some(start);
        self
    }

    /// Sets the planned end date.
    #[must_use]
    pub const fn with_end_date(mut self, end: DateTime<Utc>) -> Self {
        self.end_date = Some(end);
        self
    }

    /// Sets the project tags.
    #[must_use]
    pub fn with_tags(mut self, tags: impl IntoIterator<Item = String>) -> Self {
        self.tags = normalize_tags(tags);
        self
    }
}

/// Partial update of project fields.
///
/// Unset fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectChanges {
    name: Option<String>,
    description: Option<String>,
    status: Option<ProjectStatus>,
    start_date: Option<DateTime<Utc>>,
    end_date: Option<Option<DateTime<Utc>>>,
    tags: Option<Vec<String>>,
}

impl ProjectChanges {
    /// Creates an empty change set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Renames the project.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Replaces the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the project status.
    #[must_use]
    pub const fn with_status(mut self, status: ProjectStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Moves the start date.
    #[must_use]
    pub const fn with_start_date(mut self, start: DateTime<Utc>) -> Self {
        self.start_date = Some(start);
        self
    }

    /// Sets or clears the end date.
    #[must_use]
    pub const fn with_end_date(mut self, end: Option<DateTime<Utc>>) -> Self {
        self.end_date = Some(end);
        self
    }

    /// Replaces the tags.
    #[must_use]
    pub fn with_tags(mut self, tags: impl IntoIterator<Item = String>) -> Self {
        self.tags = Some(normalize_tags(tags));
        self
    }
}

/// Project aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    id: ProjectId,
    name: String,
    description: String,
    owner: UserId,
    members: Vec<ProjectMember>,
    task_ids: Vec<TaskId>,
    status: ProjectStatus,
    progress: Progress,
    start_date: DateTime<Utc>,
    end_date: Option<DateTime<Utc>>,
    tags: Vec<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted project aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedProjectData {
    /// Persisted project identifier.
    pub id: ProjectId,
    /// Persisted name.
    pub name: String,
    /// Persisted description.
    pub description: String,
    /// Persisted owner.
    pub owner: UserId,
    /// Persisted member entries.
    pub members: Vec<ProjectMember>,
    /// Persisted task identifiers, in project order.
    pub task_ids: Vec<TaskId>,
    /// Persisted status.
    pub status: ProjectStatus,
    /// Persisted progress.
    pub progress: Progress,
    /// Persisted start date.
    pub start_date: DateTime<Utc>,
    /// Persisted end date.
    pub end_date: Option<DateTime<Utc>>,
    /// Persisted tags.
    pub tags: Vec<String>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Project {
    /// Creates a project whose owner is its first `Administrator` member.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::InvalidDateRange`] when the end date
    /// lies before the start date.
    pub fn new(fields: NewProject, clock: &impl Clock) -> Result<Self, ProjectDomainError> {
        let timestamp = clock.utc();
        let start_date = fields.start_date.unwrap_or(timestamp);
        check_date_range(start_date, fields.end_date)?;

        Ok(Self {
            id: ProjectId::new(),
            name: fields.name,
            description: fields.description,
            owner: fields.owner,
            members: vec![ProjectMember::new(fields.owner, MemberRole::Administrator)],
            task_ids: Vec::new(),
            status: ProjectStatus::default(),
            progress: Progress::ZERO,
            start_date,
            end_date: fields.end_date,
            tags: fields.tags,
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Reconstructs a project from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedProjectData) -> Self {
        Self {
            id: data.id,
            name: data.name,
            description: data.description,
            owner: data.owner,
            members: data.members,
            task_ids: data.task_ids,
            status: data.status,
            progress: data.progress,
            start_date: data.start_date,
            end_date: data.end_date,
            tags: data.tags,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the project identifier.
    #[must_use]
    pub const fn id(&self) -> ProjectId {
        self.id
    }

    /// Returns the project name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the project description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the owning user.
    #[must_use]
    pub const fn owner(&self) -> UserId {
        self.owner
    }

    /// Returns the explicit member entries.
    #[must_use]
    pub fn members(&self) -> &[ProjectMember] {
        &self.members
    }

    /// Returns the task identifiers in project order.
    #[must_use]
    pub fn task_ids(&self) -> &[TaskId] {
        &self.task_ids
    }

    /// Returns the project status.
    #[must_use]
    pub const fn status(&self) -> ProjectStatus {
        self.status
    }

    /// Returns the derived completion percentage.
    #[must_use]
    pub const fn progress(&self) -> Progress {
        self.progress
    }

    /// Returns the start date.
    #[must_use]
    pub const fn start_date(&self) -> DateTime<Utc> {
        self.start_date
    }

    /// Returns the planned end date, if any.
    #[must_use]
    pub const fn end_date(&self) -> Option<DateTime<Utc>> {
        self.end_date
    }

    /// Returns the project tags.
    #[must_use]
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest modification timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns the project role of `user`, or `None` for non-members.
    ///
    /// The owner is always a member; without an explicit entry the owner
    /// holds the `Administrator` role.
    #[must_use]
    pub fn role_of(&self, user: UserId) -> Option<MemberRole> {
        self.members
            .iter()
            .find(|member| member.user == user)
            .map(ProjectMember::role)
            .or_else(|| (user == self.owner).then_some(MemberRole::Administrator))
    }

    /// Returns `true` when `user` belongs to the project.
    #[must_use]
    pub fn is_member(&self, user: UserId) -> bool {
        self.role_of(user).is_some()
    }

    /// Returns the identifiers of all members, owner included.
    #[must_use]
    pub fn member_ids(&self) -> Vec<UserId> {
        let mut ids: Vec<UserId> = self.members.iter().map(ProjectMember::user).collect();
        if !ids.contains(&self.owner) {
            ids.insert(0, self.owner);
        }
        ids
    }

    /// Returns the number of members, owner included.
    #[must_use]
    pub fn member_count(&self) -> usize {
        self.member_ids().len()
    }

    /// Returns `true` when the task belongs to this project.
    #[must_use]
    pub fn contains_task(&self, task: TaskId) -> bool {
        self.task_ids.contains(&task)
    }

    /// Applies a partial update.
    ///
    /// Nothing changes when validation fails.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError`] for blank text or an end date before
    /// the start date.
    pub fn apply_changes(
        &mut self,
        changes: ProjectChanges,
        clock: &impl Clock,
    ) -> Result<(), ProjectDomainError> {
        let ProjectChanges {
            name,
            description,
            status,
            start_date,
            end_date,
            tags,
        } = changes;

        let new_name = name
            .map(|value| non_blank(value, ProjectDomainError::EmptyName))
            .transpose()?;
        let new_description = description
            .map(|value| non_blank(value, ProjectDomainError::EmptyDescription))
            .transpose()?;
        let next_start = start_date.unwrap_or(self.start_date);
        let next_end = end_date.unwrap_or(self.end_date);
        check_date_range(next_start, next_end)?;

        if let Some(value) = new_name {
            self.name = value;
        }
        if let Some(value) = new_description {
            self.description = value;
        }
        if let Some(value) = status {
            self.status = value;
        }
        if let Some(value) = tags {
            self.tags = value;
        }
        self.start_date = next_start;
        self.end_date = next_end;
        self.touch(clock);
        Ok(())
    }

    /// Adds a member with the given role.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::AlreadyMember`] when the user already
    /// belongs to the project.
    pub fn add_member(
        &mut self,
        user: UserId,
        role: MemberRole,
        clock: &impl Clock,
    ) -> Result<(), ProjectDomainError> {
        if self.is_member(user) {
            return Err(ProjectDomainError::AlreadyMember {
                project: self.id,
                user,
            });
        }
        self.members.push(ProjectMember::new(user, role));
        self.touch(clock);
        Ok(())
    }

    /// Removes a member.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::OwnerProtected`] for the owner or
    /// [`ProjectDomainError::NotMember`] for users outside the project.
    pub fn remove_member(
        &mut self,
        user: UserId,
        clock: &impl Clock,
    ) -> Result<(), ProjectDomainError> {
        if user == self.owner {
            return Err(ProjectDomainError::OwnerProtected(user));
        }
        let position = self
            .members
            .iter()
            .position(|member| member.user == user)
            .ok_or(ProjectDomainError::NotMember {
                project: self.id,
                user,
            })?;
        self.members.remove(position);
        self.touch(clock);
        Ok(())
    }

    /// Changes a member's role.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::NotMember`] for users outside the
    /// project.
    pub fn change_member_role(
        &mut self,
        user: UserId,
        role: MemberRole,
        clock: &impl Clock,
    ) -> Result<(), ProjectDomainError> {
        if let Some(member) = self.members.iter_mut().find(|member| member.user == user) {
            member.role = role;
        } else if user == self.owner {
            self.members.push(ProjectMember::new(user, role));
        } else {
            return Err(ProjectDomainError::NotMember {
                project: self.id,
                user,
            });
        }
        self.touch(clock);
        Ok(())
    }

    /// Appends a task reference at the end of the project order.
    pub fn attach_task(&mut self, task: TaskId, clock: &impl Clock) {
        if !self.contains_task(task) {
            self.task_ids.push(task);
        }
        self.touch(clock);
    }

    /// Drops a task reference. Returns `false` when it was not present.
    pub fn detach_task(&mut self, task: TaskId, clock: &impl Clock) -> bool {
        let before = self.task_ids.len();
        self.task_ids.retain(|id| *id != task);
        let removed = self.task_ids.len() != before;
        if removed {
            self.touch(clock);
        }
        removed
    }

    /// Stores a freshly computed progress value.
    pub fn record_progress(&mut self, progress: Progress, clock: &impl Clock) {
        self.progress = progress;
        self.touch(clock);
    }

    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}

fn non_blank(value: String, error: ProjectDomainError) -> Result<String, ProjectDomainError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(error);
    }
    Ok(trimmed.to_owned())
}

fn normalize_tags(tags: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut normalized: Vec<String> = Vec::new();
    for tag in tags {
        let trimmed = tag.trim();
        if !trimmed.is_empty() && !normalized.iter().any(|existing| existing == trimmed) {
            normalized.push(trimmed.to_owned());
        }
    }
    normalized
}

fn check_date_range(
    start: DateTime<Utc>,
    end: Option<DateTime<Utc>>,
) -> Result<(), ProjectDomainError> {
    match end {
        Some(end_date) if end_date < start => {
            Err(ProjectDomainError::InvalidDateRange {
                start,
                end: end_date,
            })
        }
        _ => Ok(()),
    }
}
