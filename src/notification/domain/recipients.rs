//! Affected-user computation.

use super::LifecycleEvent;
use crate::identity::domain::UserId;

/// Returns the users an event concerns, without duplicates, in a stable
/// order.
///
/// | Event | Recipients | Excluded |
/// |---|---|---|
/// | task assigned | the newly assigned user | |
/// | status changed | all current assignees | the user who changed it |
/// | commented | assignees and the task creator | the commenter |
/// | deadline approaching | all assignees | |
/// | member added | the added user | |
#[must_use]
pub fn recipients(event: &LifecycleEvent) -> Vec<UserId> {
    let (candidates, excluded): (Vec<UserId>, Option<UserId>) = match event {
        LifecycleEvent::TaskAssigned { assignee, .. } => (vec![*assignee], None),
        LifecycleEvent::TaskStatusChanged {
            task, changed_by, ..
        } => (task.assignees.clone(), Some(*changed_by)),
        LifecycleEvent::TaskCommented {
            task, commenter, ..
        } => {
            let mut users = task.assignees.clone();
            users.push(task.created_by);
            (users, Some(*commenter))
        }
        LifecycleEvent::DeadlineApproaching { task, .. } => (task.assignees.clone(), None),
        LifecycleEvent::ProjectMemberAdded { member, .. } => (vec![*member], None),
    };

    let mut unique: Vec<UserId> = Vec::with_capacity(candidates.len());
    for user in candidates {
        if Some(user) != excluded && !unique.contains(&user) {
            unique.push(user);
        }
    }
    unique
}
