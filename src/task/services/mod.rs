//! Task lifecycle orchestration.

mod lifecycle;

pub use lifecycle::{AddCommentRequest, CreateTaskRequest, TaskLifecycleService};
