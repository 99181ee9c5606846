//! Task aggregate root.

use super::{
    Attachment, AttachmentId, DeadlineStatus, Hours, NewAttachment, Priority, StatusTimeline,
    TaskDependency, TaskDomainError, TaskId, TaskStatus, TimeTracking, apply_status_change,
};
use crate::identity::domain::UserId;
use crate::project::domain::ProjectId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Validated fields for a new task.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTask {
    project_id: ProjectId,
    title: String,
    description: String,
    assignees: Vec<UserId>,
    created_by: UserId,
    priority: Priority,
    deadline: DateTime<Utc>,
    estimated_hours: Option<Hours>,
    tags: Vec<String>,
    dependencies: Vec<TaskDependency>,
    order: u32,
}

impl NewTask {
    /// Creates new-task fields.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`],
    /// [`TaskDomainError::EmptyDescription`], or
    /// [`TaskDomainError::NoAssignees`] when required fields are missing.
    pub fn new(
        project_id: ProjectId,
        title: impl Into<String>,
        description: impl Into<String>,
        assignees: impl IntoIterator<Item = UserId>,
        created_by: UserId,
        deadline: DateTime<Utc>,
    ) -> Result<Self, TaskDomainError> {
        Ok(Self {
            project_id,
            title: non_blank(title.into(), TaskDomainError::EmptyTitle)?,
            description: non_blank(description.into(), TaskDomainError::EmptyDescription)?,
            assignees: assignee_set(assignees)?,
            created_by,
            priority: Priority::default(),
            deadline,
            estimated_hours: None,
            tags: Vec::new(),
            dependencies: Vec::new(),
            order: 0,
        })
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
        self.tags = normalize_tags(tags);
        self
    }

    /// Sets the dependency edges.
    #[must_use]
    pub fn with_dependencies(mut self, dependencies: impl IntoIterator<Item = TaskDependency>) -> Self {
        self.dependencies = dependencies.into_iter().collect();
        self
    }

    /// Sets the position within the project.
    #[must_use]
    pub const fn with_order(mut self, order: u32) -> Self {
        self.order = order;
        self
    }

    /// Returns the assignees.
    #[must_use]
    pub fn assignees(&self) -> &[UserId] {
        &self.assignees
    }
}

/// Partial update of task fields.
///
/// Unset fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskChanges {
    title: Option<String>,
    description: Option<String>,
    status: Option<TaskStatus>,
    priority: Option<Priority>,
    deadline: Option<DateTime<Utc>>,
    assignees: Option<Vec<UserId>>,
    estimated_hours: Option<Hours>,
    actual_hours: Option<Hours>,
    tags: Option<Vec<String>>,
    dependencies: Option<Vec<TaskDependency>>,
}

impl TaskChanges {
    /// Creates an empty change set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Replaces the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Writes a status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Moves the deadline.
    #[must_use]
    pub const fn with_deadline(mut self, deadline: DateTime<Utc>) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Replaces the assignee set.
    #[must_use]
    pub fn with_assignees(mut self, assignees: impl IntoIterator<Item = UserId>) -> Self {
        self.assignees = Some(assignees.into_iter().collect());
        self
    }

    /// Sets the estimated effort.
    #[must_use]
    pub const fn with_estimated_hours(mut self, hours: Hours) -> Self {
        self.estimated_hours = Some(hours);
        self
    }

    /// Sets the actual effort.
    #[must_use]
    pub const fn with_actual_hours(mut self, hours: Hours) -> Self {
        self.actual_hours = Some(hours);
        self
    }

    /// Replaces the tags.
    #[must_use]
    pub fn with_tags(mut self, tags: impl IntoIterator<Item = String>) -> Self {
        self.tags = Some(normalize_tags(tags));
        self
    }

    /// Replaces the dependency edges.
    #[must_use]
    pub fn with_dependencies(mut self, dependencies: impl IntoIterator<Item = TaskDependency>) -> Self {
        self.dependencies = Some(dependencies.into_iter().collect());
        self
    }

    /// Returns the requested assignee set, if the change replaces it.
    #[must_use]
    pub fn assignees(&self) -> Option<&[UserId]> {
        self.assignees.as_deref()
    }

    /// Returns the requested status, if any.
    #[must_use]
    pub const fn status(&self) -> Option<TaskStatus> {
        self.status
    }
}

/// What an applied [`TaskChanges`] did, for progress and notifications.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskUpdateOutcome {
    /// Status before the update.
    pub previous_status: TaskStatus,
    /// `true` when the status actually changed.
    pub status_changed: bool,
    /// Assignees that were not assigned before the update.
    pub newly_assigned: Vec<UserId>,
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    project_id: ProjectId,
    title: String,
    description: String,
    assignees: Vec<UserId>,
    created_by: UserId,
    status: TaskStatus,
    priority: Priority,
    deadline: DateTime<Utc>,
    start_date: Option<DateTime<Utc>>,
    completed_date: Option<DateTime<Utc>>,
    estimated_hours: Option<Hours>,
    actual_hours: Option<Hours>,
    attachments: Vec<Attachment>,
    dependencies: Vec<TaskDependency>,
    tags: Vec<String>,
    order: u32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted owning project.
    pub project_id: ProjectId,
    /// Persisted title.
    pub title: String,
    /// Persisted description.
    pub description: String,
    /// Persisted assignees.
    pub assignees: Vec<UserId>,
    /// Persisted creator.
    pub created_by: UserId,
    /// Persisted status.
    pub status: TaskStatus,
    /// Persisted priority.
    pub priority: Priority,
    /// Persisted deadline.
    pub deadline: DateTime<Utc>,
    /// Persisted start date.
    pub start_date: Option<DateTime<Utc>>,
    /// Persisted completion date.
    pub completed_date: Option<DateTime<Utc>>,
    /// Persisted estimate.
    pub estimated_hours: Option<Hours>,
    /// Persisted actual effort.
    pub actual_hours: Option<Hours>,
    /// Persisted attachments.
    pub attachments: Vec<Attachment>,
    /// Persisted dependency edges.
    pub dependencies: Vec<TaskDependency>,
    /// Persisted tags.
    pub tags: Vec<String>,
    /// Persisted position within the project.
    pub order: u32,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a task in the `Pending` status.
    #[must_use]
    pub fn new(fields: NewTask, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        let timeline = StatusTimeline::pending();
        Self {
            id: TaskId::new(),
            project_id: fields.project_id,
            title: fields.title,
            description: fields.description,
            assignees: fields.assignees,
            created_by: fields.created_by,
            status: timeline.status,
            priority: fields.priority,
            deadline: fields.deadline,
            start_date: timeline.start_date,
            completed_date: timeline.completed_date,
            estimated_hours: fields.estimated_hours,
            actual_hours: None,
            attachments: Vec::new(),
            dependencies: fields.dependencies,
            tags: fields.tags,
            order: fields.order,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            project_id: data.project_id,
            title: data.title,
            description: data.description,
            assignees: data.assignees,
            created_by: data.created_by,
            status: data.status,
            priority: data.priority,
            deadline: data.deadline,
            start_date: data.start_date,
            completed_date: data.completed_date,
            estimated_hours: data.estimated_hours,
            actual_hours: data.actual_hours,
            attachments: data.attachments,
            dependencies: data.dependencies,
            tags: data.tags,
            order: data.order,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the owning project.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the assignees.
    #[must_use]
    pub fn assignees(&self) -> &[UserId] {
        &self.assignees
    }

    /// Returns `true` when `user` is assigned to the task.
    #[must_use]
    pub fn is_assigned(&self, user: UserId) -> bool {
        self.assignees.contains(&user)
    }

    /// Returns the creating user.
    #[must_use]
    pub const fn created_by(&self) -> UserId {
        self.created_by
    }

    /// Returns the current status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    /// Returns the deadline.
    #[must_use]
    pub const fn deadline(&self) -> DateTime<Utc> {
        self.deadline
    }

    /// Returns the date work first started, if ever.
    #[must_use]
    pub const fn start_date(&self) -> Option<DateTime<Utc>> {
        self.start_date
    }

    /// Returns the completion date while the task is completed.
    #[must_use]
    pub const fn completed_date(&self) -> Option<DateTime<Utc>> {
        self.completed_date
    }

    /// Returns the estimated effort.
    #[must_use]
    pub const fn estimated_hours(&self) -> Option<Hours> {
        self.estimated_hours
    }

    /// Returns the actual effort.
    #[must_use]
    pub const fn actual_hours(&self) -> Option<Hours> {
        self.actual_hours
    }

    /// Returns the attachments.
    #[must_use]
    pub fn attachments(&self) -> &[Attachment] {
        &self.attachments
    }

    /// Returns the dependency edges.
    #[must_use]
    pub fn dependencies(&self) -> &[TaskDependency] {
        &self.dependencies
    }

    /// Returns the tags.
    #[must_use]
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Returns the position within the project.
    #[must_use]
    pub const fn order(&self) -> u32 {
        self.order
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

    /// Returns the deadline bucket at `now`.
    #[must_use]
    pub fn deadline_status(&self, now: DateTime<Utc>) -> DeadlineStatus {
        DeadlineStatus::derive(self.status, self.deadline, now)
    }

    /// Returns estimated against actual effort.
    #[must_use]
    pub fn time_tracking(&self) -> TimeTracking {
        TimeTracking::from_hours(self.estimated_hours, self.actual_hours)
    }

    const fn timeline(&self) -> StatusTimeline {
        StatusTimeline {
            status: self.status,
            start_date: self.start_date,
            completed_date: self.completed_date,
        }
    }

    /// Applies a partial update, including status side effects.
    ///
    /// Every field is validated before anything changes, so a rejected
    /// update leaves the task untouched.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError`] for blank text, an empty assignee set,
    /// or a dependency on the task itself.
    pub fn apply_changes(
        &mut self,
        changes: TaskChanges,
        clock: &impl Clock,
    ) -> Result<TaskUpdateOutcome, TaskDomainError> {
        let TaskChanges {
            title,
            description,
            status,
            priority,
            deadline,
            assignees,
            estimated_hours,
            actual_hours,
            tags,
            dependencies,
        } = changes;

        let new_title = title
            .map(|value| non_blank(value, TaskDomainError::EmptyTitle))
            .transpose()?;
        let new_description = description
            .map(|value| non_blank(value, TaskDomainError::EmptyDescription))
            .transpose()?;
        let new_assignees = assignees.map(assignee_set).transpose()?;
        if let Some(edges) = dependencies.as_ref()
            && edges.iter().any(|edge| edge.task == self.id)
        {
            return Err(TaskDomainError::SelfDependency(self.id));
        }

        let now = clock.utc();
        let previous_status = self.status;
        let newly_assigned = new_assignees
            .as_ref()
            .map(|next| {
                next.iter()
                    .copied()
                    .filter(|user| !self.assignees.contains(user))
                    .collect()
            })
            .unwrap_or_default();

        if let Some(value) = new_title {
            self.title = value;
        }
        if let Some(value) = new_description {
            self.description = value;
        }
        if let Some(value) = new_assignees {
            self.assignees = value;
        }
        if let Some(value) = priority {
            self.priority = value;
        }
        if let Some(value) = deadline {
            self.deadline = value;
        }
        if let Some(value) = estimated_hours {
            self.estimated_hours = Some(value);
        }
        if let Some(value) = actual_hours {
            self.actual_hours = Some(value);
        }
        if let Some(value) = tags {
            self.tags = value;
        }
        if let Some(value) = dependencies {
            self.dependencies = value;
        }
        if let Some(target) = status {
            let timeline = apply_status_change(self.timeline(), target, now);
            self.status = timeline.status;
            self.start_date = timeline.start_date;
            self.completed_date = timeline.completed_date;
        }
        self.updated_at = now;

        Ok(TaskUpdateOutcome {
            previous_status,
            status_changed: previous_status != self.status,
            newly_assigned,
        })
    }

    /// Attaches a file uploaded by `uploaded_by`.
    pub fn add_attachment(
        &mut self,
        fields: NewAttachment,
        uploaded_by: UserId,
        clock: &impl Clock,
    ) -> Attachment {
        let timestamp = clock.utc();
        let attachment = Attachment::new(fields, uploaded_by, timestamp);
        self.attachments.push(attachment.clone());
        self.updated_at = timestamp;
        attachment
    }

    /// Removes an attachment and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::AttachmentNotFound`] when the task has no
    /// attachment with the given identifier.
    pub fn remove_attachment(
        &mut self,
        id: AttachmentId,
        clock: &impl Clock,
    ) -> Result<Attachment, TaskDomainError> {
        let position = self
            .attachments
            .iter()
            .position(|attachment| attachment.id() == id)
            .ok_or(TaskDomainError::AttachmentNotFound(id))?;
        let removed = self.attachments.remove(position);
        self.touch(clock);
        Ok(removed)
    }

    /// Sets the position within the project.
    ///
    /// Takes the timestamp directly so stores can apply the write as a
    /// single-field update.
    pub const fn set_order(&mut self, order: u32, at: DateTime<Utc>) {
        self.order = order;
        self.updated_at = at;
    }

    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}

fn non_blank(value: String, error: TaskDomainError) -> Result<String, TaskDomainError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(error);
    }
    Ok(trimmed.to_owned())
}

fn assignee_set(assignees: impl IntoIterator<Item = UserId>) -> Result<Vec<UserId>, TaskDomainError> {
    let mut unique: Vec<UserId> = Vec::new();
    for user in assignees {
        if !unique.contains(&user) {
            unique.push(user);
        }
    }
    if unique.is_empty() {
        return Err(TaskDomainError::NoAssignees);
    }
    Ok(unique)
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
