//! Domain model for tasks.
//!
//! Status side effects are computed by [`apply_status_change`], a pure
//! function over a [`StatusTimeline`], so the aggregate and the tests share
//! one definition of the transition rules.

mod attachment;
mod deadline;
mod dependency;
mod error;
mod hours;
mod ids;
mod stats;
mod status;
mod task;
mod transition;

pub use attachment::{Attachment, NewAttachment};
pub use deadline::DeadlineStatus;
pub(crate) use deadline::days_until;
pub use dependency::{DependencyKind, TaskDependency};
pub use error::{
    ParseDependencyKindError, ParsePriorityError, ParseTaskStatusError, TaskDomainError,
};
pub use hours::{Hours, TimeTracking};
pub use ids::{AttachmentId, TaskId};
pub use stats::TaskStats;
pub use status::{Priority, TaskStatus};
pub use task::{NewTask, PersistedTaskData, Task, TaskChanges, TaskUpdateOutcome};
pub use transition::{StatusTimeline, apply_status_change};
