//! Capability checks against project roles and task assignment.

use super::Actor;
use crate::identity::domain::{SystemRole, UserId};
use crate::project::domain::{MemberRole, Project};
use crate::task::domain::Task;
use std::fmt;
use thiserror::Error;

/// What an authorization check is evaluated against.
#[derive(Debug, Clone, Copy)]
pub enum Resource<'a> {
    /// A project as a whole.
    Project(&'a Project),
    /// A task inside its owning project.
    Task {
        /// Project owning the task.
        project: &'a Project,
        /// The task addressed.
        task: &'a Task,
    },
    /// One entry of a project's member list.
    Membership {
        /// Project whose member list is addressed.
        project: &'a Project,
        /// User whose membership is addressed.
        member: UserId,
    },
}

impl<'a> Resource<'a> {
    /// Returns the project the resource lives in.
    #[must_use]
    pub const fn project(&self) -> &'a Project {
        match *self {
            Self::Project(project)
            | Self::Task { project, .. }
            | Self::Membership { project, .. } => project,
        }
    }

    const fn task(&self) -> Option<&'a Task> {
        match *self {
            Self::Task { task, .. } => Some(task),
            Self::Project(_) | Self::Membership { .. } => None,
        }
    }
}

/// Operation-level permission checked by [`authorize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Read project details.
    ViewProject,
    /// List the tasks of a project.
    ViewTasks,
    /// Read aggregated project statistics.
    ViewStats,
    /// Create a task in a project.
    CreateTask,
    /// Reorder the tasks of a project.
    ReorderTasks,
    /// Update project fields.
    UpdateProject,
    /// Delete a project with its tasks and comments.
    DeleteProject,
    /// Add a member to a project.
    AddMember,
    /// Remove a member from a project.
    RemoveMember,
    /// Change the role of a project member.
    ChangeMemberRole,
    /// Read a task, its comments, and its statistics.
    ReadTask,
    /// Update a task or its attachments.
    UpdateTask,
    /// Delete a task.
    DeleteTask,
    /// Comment on or react to a task's comments.
    CommentOnTask,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Requirement {
    Role(MemberRole),
    Assignment,
}

impl Capability {
    const fn requirement(self) -> Requirement {
        match self {
            Self::ViewProject | Self::ViewTasks | Self::ViewStats => {
                Requirement::Role(MemberRole::Viewer)
            }
            Self::CreateTask | Self::ReorderTasks => Requirement::Role(MemberRole::Member),
            Self::UpdateProject
            | Self::DeleteProject
            | Self::AddMember
            | Self::RemoveMember
            | Self::ChangeMemberRole => Requirement::Role(MemberRole::Administrator),
            Self::ReadTask | Self::UpdateTask | Self::DeleteTask | Self::CommentOnTask => {
                Requirement::Assignment
            }
        }
    }

    /// Returns a stable name for logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ViewProject => "view_project",
            Self::ViewTasks => "view_tasks",
            Self::ViewStats => "view_stats",
            Self::CreateTask => "create_task",
            Self::ReorderTasks => "reorder_tasks",
            Self::UpdateProject => "update_project",
            Self::DeleteProject => "delete_project",
            Self::AddMember => "add_member",
            Self::RemoveMember => "remove_member",
            Self::ChangeMemberRole => "change_member_role",
            Self::ReadTask => "read_task",
            Self::UpdateTask => "update_task",
            Self::DeleteTask => "delete_task",
            Self::CommentOnTask => "comment_on_task",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Transport-independent reason code of a denial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DenialCode {
    /// The caller is not a member of the project.
    NotMember,
    /// The caller's project role is too low.
    Role,
    /// The caller is not assigned to the task.
    NotAssignee,
    /// The operation would remove the project owner.
    OwnerProtected,
}

impl DenialCode {
    /// Returns the stable error code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotMember => "FORBIDDEN_NOT_MEMBER",
            Self::Role => "FORBIDDEN_ROLE",
            Self::NotAssignee => "FORBIDDEN_NOT_ASSIGNEE",
            Self::OwnerProtected => "FORBIDDEN_OWNER_PROTECTED",
        }
    }
}

impl fmt::Display for DenialCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured authorization denial.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{reason}")]
pub struct AccessDenied {
    code: DenialCode,
    reason: String,
}

impl AccessDenied {
    /// Creates a denial with a reason code and message.
    #[must_use]
    pub fn new(code: DenialCode, reason: impl Into<String>) -> Self {
        Self {
            code,
            reason: reason.into(),
        }
    }

    /// Denial for a caller outside the project.
    #[must_use]
    pub fn not_member() -> Self {
        Self::new(DenialCode::NotMember, "not authorized: not a project member")
    }

    /// Denial for a caller whose project role is below `required`.
    #[must_use]
    pub fn role(required: MemberRole) -> Self {
        Self::new(
            DenialCode::Role,
            format!("not authorized: requires the {required} project role"),
        )
    }

    /// Denial for a caller not assigned to the task.
    #[must_use]
    pub fn not_assignee() -> Self {
        Self::new(
            DenialCode::NotAssignee,
            "not authorized: not assigned to this task",
        )
    }

    /// Denial for removing the project owner.
    #[must_use]
    pub fn owner_protected() -> Self {
        Self::new(
            DenialCode::OwnerProtected,
            "not authorized: the project owner cannot be removed",
        )
    }

    /// Returns the reason code.
    #[must_use]
    pub const fn code(&self) -> DenialCode {
        self.code
    }

    /// Returns the human-readable reason.
    #[must_use]
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

/// Decides whether `actor` may exercise `capability` on `resource`.
///
/// Removing the project owner is denied before any role is considered,
/// system administrators included. Otherwise system administrators are
/// always allowed. Task capabilities are granted to the task's assignees
/// and to project administrators; all other capabilities need a minimum
/// project role.
///
/// # Errors
///
/// Returns [`AccessDenied`] carrying the [`DenialCode`] of the first failed
/// check.
pub fn authorize(
    actor: &Actor,
    resource: Resource<'_>,
    capability: Capability,
) -> Result<(), AccessDenied> {
    if let Resource::Membership { project, member } = resource
        && capability == Capability::RemoveMember
        && member == project.owner()
    {
        return Err(AccessDenied::owner_protected());
    }

    if actor.is_system_administrator() {
        return Ok(());
    }

    let role = resource.project().role_of(actor.user_id());
    match capability.requirement() {
        Requirement::Role(required) => {
            let held = role.ok_or_else(AccessDenied::not_member)?;
            if held.grants(required) {
                Ok(())
            } else {
                Err(AccessDenied::role(required))
            }
        }
        Requirement::Assignment => {
            let assigned = resource
                .task()
                .is_some_and(|task| task.is_assigned(actor.user_id()));
            match role {
                _ if assigned => Ok(()),
                Some(MemberRole::Administrator) => Ok(()),
                Some(_) => Err(AccessDenied::not_assignee()),
                None => Err(AccessDenied::not_member()),
            }
        }
    }
}

/// Decides whether `actor` may create a new project.
///
/// System viewers are read-only and cannot create projects.
///
/// # Errors
///
/// Returns [`AccessDenied`] with [`DenialCode::Role`] for system viewers.
pub fn authorize_project_creation(actor: &Actor) -> Result<(), AccessDenied> {
    match actor.role() {
        SystemRole::Administrator | SystemRole::Member => Ok(()),
        SystemRole::Viewer => Err(AccessDenied::new(
            DenialCode::Role,
            "not authorized: viewers cannot create projects",
        )),
    }
}
