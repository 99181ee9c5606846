//! Domain model for projects.

mod error;
mod ids;
mod progress;
mod project;
mod role;
mod stats;
mod status;

pub use error::{ParseMemberRoleError, ParseProjectStatusError, ProjectDomainError};
pub use ids::ProjectId;
pub use progress::Progress;
pub use project::{NewProject, PersistedProjectData, Project, ProjectChanges, ProjectMember};
pub use role::MemberRole;
pub use stats::ProjectStats;
pub use status::ProjectStatus;
