//! Per-task statistics.

use super::{DeadlineStatus, Task, TimeTracking};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Derived figures about one task.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskStats {
    /// Estimated against actual hours.
    pub time_tracking: TimeTracking,
    /// Deadline bucket at computation time.
    pub deadline_status: DeadlineStatus,
    /// Number of comments on the task.
    pub comment_count: usize,
    /// Number of attachments.
    pub attachment_count: usize,
    /// Number of assignees.
    pub assignee_count: usize,
}

impl TaskStats {
    /// Computes statistics for `task` as of `now`.
    #[must_use]
    pub fn compute(task: &Task, comment_count: usize, now: DateTime<Utc>) -> Self {
        Self {
            time_tracking: task.time_tracking(),
            deadline_status: task.deadline_status(now),
            comment_count,
            attachment_count: task.attachments().len(),
            assignee_count: task.assignees().len(),
        }
    }
}
