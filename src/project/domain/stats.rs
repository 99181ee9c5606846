//! Aggregated project statistics.

use super::{Progress, Project};
use crate::task::domain::{DeadlineStatus, Task, TaskStatus};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Task counts and progress of one project at a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectStats {
    /// Number of tasks in the project.
    pub total: usize,
    /// Tasks with status `Completed`.
    pub completed: usize,
    /// Tasks with status `InProgress`.
    pub in_progress: usize,
    /// Tasks with status `Pending`.
    pub pending: usize,
    /// Tasks with status `InReview`.
    pub in_review: usize,
    /// Non-completed tasks whose deadline has passed.
    pub overdue: usize,
    /// Completion percentage.
    pub progress: Progress,
    /// Members, owner included.
    pub member_count: usize,
}

impl ProjectStats {
    /// Computes statistics from the project's tasks as of `now`.
    #[must_use]
    pub fn compute(project: &Project, tasks: &[Task], now: DateTime<Utc>) -> Self {
        let count = |status: TaskStatus| tasks.iter().filter(|t| t.status() == status).count();
        let completed = count(TaskStatus::Completed);
        let overdue = tasks
            .iter()
            .filter(|t| t.deadline_status(now) == DeadlineStatus::Overdue)
            .count();

        Self {
            total: tasks.len(),
            completed,
            in_progress: count(TaskStatus::InProgress),
            pending: count(TaskStatus::Pending),
            in_review: count(TaskStatus::InReview),
            overdue,
            progress: Progress::from_counts(completed, tasks.len()),
            member_count: project.member_count(),
        }
    }
}
