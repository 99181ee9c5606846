//! Deadline status derivation.

use super::TaskStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

const MILLIS_PER_DAY: u64 = 86_400_000;
const URGENT_DAYS: u64 = 2;
const WARNING_DAYS: u64 = 5;

/// Bucket describing how close a task is to its deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeadlineStatus {
    /// The task is completed.
    Completed,
    /// The deadline has passed.
    Overdue,
    /// Two days or less remain.
    Urgent,
    /// Five days or less remain.
    Warning,
    /// More than five days remain.
    Ok,
}

impl DeadlineStatus {
    /// Derives the bucket for a task with `status` and `deadline` at `now`.
    ///
    /// Days remaining are rounded up, so a deadline 25 hours away counts
    /// as two days.
    #[must_use]
    pub fn derive(status: TaskStatus, deadline: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        if status == TaskStatus::Completed {
            return Self::Completed;
        }
        if deadline < now {
            return Self::Overdue;
        }

        match days_until(deadline, now) {
            days if days <= URGENT_DAYS => Self::Urgent,
            days if days <= WARNING_DAYS => Self::Warning,
            _ => Self::Ok,
        }
    }

    /// Returns the canonical representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::Overdue => "overdue",
            Self::Urgent => "urgent",
            Self::Warning => "warning",
            Self::Ok => "ok",
        }
    }
}

impl fmt::Display for DeadlineStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whole days from `now` until `deadline`, rounded up. Zero when the
/// deadline is not in the future.
#[must_use]
pub(crate) fn days_until(deadline: DateTime<Utc>, now: DateTime<Utc>) -> u64 {
    let millis = deadline
        .signed_duration_since(now)
        .num_milliseconds()
        .max(0);
    u64::try_from(millis).unwrap_or(0).div_ceil(MILLIS_PER_DAY)
}
