//! Unit tests for the notification module.

mod templates_tests;

use crate::identity::domain::UserId;
use crate::notification::domain::TaskSnapshot;
use crate::project::domain::ProjectId;
use crate::task::domain::{Priority, TaskId, TaskStatus};
use chrono::{TimeZone, Utc};

/// Snapshot of a pending task titled "Ship <release>".
fn snapshot(assignees: &[UserId], created_by: UserId) -> TaskSnapshot {
    TaskSnapshot {
        id: TaskId::new(),
        project_id: ProjectId::new(),
        title: "Ship <release>".to_owned(),
        description: "Cut the tag & publish".to_owned(),
        status: TaskStatus::Pending,
        priority: Priority::High,
        deadline: Utc
            .with_ymd_and_hms(2026, 11, 2, 17, 0, 0)
            .single()
            .expect("valid timestamp"),
        assignees: assignees.to_vec(),
        created_by,
    }
}
