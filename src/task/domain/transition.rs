//! Pure status transition rules.

use super::TaskStatus;
use chrono::{DateTime, Utc};

/// The status-dependent fields of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusTimeline {
    /// Current status.
    pub status: TaskStatus,
    /// Set on the first entry into `InProgress`, never cleared.
    pub start_date: Option<DateTime<Utc>>,
    /// Set while, and only while, the status is `Completed`.
    pub completed_date: Option<DateTime<Utc>>,
}

impl StatusTimeline {
    /// Timeline of a freshly created task.
    #[must_use]
    pub const fn pending() -> Self {
        Self {
            status: TaskStatus::Pending,
            start_date: None,
            completed_date: None,
        }
    }
}

/// Moves `timeline` to `target` and applies the date side effects.
///
/// Writing the current status again leaves the timeline untouched.
#[must_use]
pub fn apply_status_change(
    timeline: StatusTimeline,
    target: TaskStatus,
    now: DateTime<Utc>,
) -> StatusTimeline {
    if timeline.status == target {
        return timeline;
    }

    let start_date = match (target, timeline.start_date) {
        (TaskStatus::InProgress, None) => Some(now),
        (_, existing) => existing,
    };
    let completed_date = match target {
        TaskStatus::Completed => Some(now),
        TaskStatus::Pending | TaskStatus::InProgress | TaskStatus::InReview => None,
    };

    StatusTimeline {
        status: target,
        start_date,
        completed_date,
    }
}
