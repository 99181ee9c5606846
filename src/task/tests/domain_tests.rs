//! Unit tests for the task aggregate.

use crate::identity::domain::UserId;
use crate::project::domain::ProjectId;
use crate::task::domain::{
    DependencyKind, Hours, NewAttachment, NewTask, Priority, Task, TaskChanges, TaskDependency,
    TaskDomainError, TaskStatus,
};
use crate::test_support::days_from_now;
use mockable::DefaultClock;
use rstest::{fixture, rstest};

struct Pair {
    first: UserId,
    second: UserId,
}

#[fixture]
fn pair() -> Pair {
    Pair {
        first: UserId::new(),
        second: UserId::new(),
    }
}

fn task_for(assignees: &[UserId]) -> Task {
    let fields = NewTask::new(
        ProjectId::new(),
        "Write report",
        "Quarterly figures",
        assignees.iter().copied(),
        UserId::new(),
        days_from_now(7),
    )
    .expect("valid task fields");
    Task::new(fields, &DefaultClock)
}

#[rstest]
fn new_tasks_start_pending_with_medium_priority(pair: Pair) {
    let task = task_for(&[pair.first]);

    assert_eq!(task.status(), TaskStatus::Pending);
    assert_eq!(task.priority(), Priority::Medium);
    assert_eq!(task.start_date(), None);
    assert_eq!(task.completed_date(), None);
    assert_eq!(task.order(), 0);
}

#[rstest]
#[case("  ", "details", TaskDomainError::EmptyTitle)]
#[case("title", "", TaskDomainError::EmptyDescription)]
fn blank_text_is_rejected(
    pair: Pair,
    #[case] title: &str,
    #[case] description: &str,
    #[case] expected: TaskDomainError,
) {
    let result = NewTask::new(
        ProjectId::new(),
        title,
        description,
        [pair.first],
        pair.first,
        days_from_now(1),
    );
    assert_eq!(result, Err(expected));
}

#[rstest]
fn assignees_are_required_and_deduplicated(pair: Pair) {
    let empty = NewTask::new(
        ProjectId::new(),
        "t",
        "d",
        Vec::<UserId>::new(),
        pair.first,
        days_from_now(1),
    );
    let repeated = task_for(&[pair.first, pair.second, pair.first]);

    assert_eq!(empty, Err(TaskDomainError::NoAssignees));
    assert_eq!(repeated.assignees(), [pair.first, pair.second]);
}

#[rstest]
fn update_reports_newly_assigned_users(pair: Pair) {
    let mut task = task_for(&[pair.first]);

    let outcome = task
        .apply_changes(
            TaskChanges::new().with_assignees([pair.first, pair.second]),
            &DefaultClock,
        )
        .expect("valid change");

    assert_eq!(outcome.newly_assigned, vec![pair.second]);
    assert!(!outcome.status_changed);
    assert!(task.is_assigned(pair.second));
}

#[rstest]
fn status_update_applies_date_side_effects(pair: Pair) {
    let mut task = task_for(&[pair.first]);

    let started = task
        .apply_changes(
            TaskChanges::new().with_status(TaskStatus::InProgress),
            &DefaultClock,
        )
        .expect("start");
    let start_date = task.start_date();
    task.apply_changes(
        TaskChanges::new().with_status(TaskStatus::Completed),
        &DefaultClock,
    )
    .expect("complete");

    assert!(started.status_changed);
    assert_eq!(started.previous_status, TaskStatus::Pending);
    assert!(start_date.is_some());
    assert_eq!(task.start_date(), start_date);
    assert!(task.completed_date().is_some());
}

#[rstest]
fn rejected_update_leaves_task_untouched(pair: Pair) {
    let mut task = task_for(&[pair.first]);
    let before = task.clone();

    let result = task.apply_changes(
        TaskChanges::new()
            .with_title("New title")
            .with_status(TaskStatus::Completed)
            .with_assignees(Vec::<UserId>::new()),
        &DefaultClock,
    );

    assert_eq!(result, Err(TaskDomainError::NoAssignees));
    assert_eq!(task, before);
}

#[rstest]
fn self_dependency_is_rejected(pair: Pair) {
    let mut task = task_for(&[pair.first]);
    let own_id = task.id();

    let result = task.apply_changes(
        TaskChanges::new().with_dependencies([TaskDependency::new(own_id, DependencyKind::Blocks)]),
        &DefaultClock,
    );

    assert_eq!(result, Err(TaskDomainError::SelfDependency(own_id)));
    assert!(task.dependencies().is_empty());
}

#[rstest]
#[case("blocks", DependencyKind::Blocks)]
#[case("Blocked By", DependencyKind::BlockedBy)]
#[case("blocked_by", DependencyKind::BlockedBy)]
fn dependency_kinds_parse(#[case] input: &str, #[case] expected: DependencyKind) {
    assert_eq!(DependencyKind::try_from(input), Ok(expected));
}

#[rstest]
#[case(-1.0)]
#[case(f64::NAN)]
#[case(f64::INFINITY)]
fn invalid_hours_are_rejected(#[case] value: f64) {
    assert!(matches!(
        Hours::new(value),
        Err(TaskDomainError::InvalidHours(_))
    ));
}

#[rstest]
fn time_tracking_reports_overrun(pair: Pair) {
    let mut task = task_for(&[pair.first]);
    task.apply_changes(
        TaskChanges::new()
            .with_estimated_hours(Hours::new(4.0).expect("hours"))
            .with_actual_hours(Hours::new(6.5).expect("hours")),
        &DefaultClock,
    )
    .expect("valid change");

    let tracking = task.time_tracking();

    assert_eq!(tracking.estimated, 4.0);
    assert_eq!(tracking.actual, 6.5);
    assert_eq!(tracking.difference, -2.5);
}

#[rstest]
fn attachments_are_added_and_removed_by_id(pair: Pair) {
    let mut task = task_for(&[pair.first]);
    let fields = NewAttachment::new("abc123.pdf", "plan.pdf", "application/pdf", 2048)
        .expect("valid attachment");

    let attachment = task.add_attachment(fields, pair.first, &DefaultClock);
    let removed = task
        .remove_attachment(attachment.id(), &DefaultClock)
        .expect("attachment exists");
    let missing = task.remove_attachment(attachment.id(), &DefaultClock);

    assert_eq!(removed, attachment);
    assert_eq!(removed.uploaded_by(), pair.first);
    assert!(task.attachments().is_empty());
    assert_eq!(
        missing,
        Err(TaskDomainError::AttachmentNotFound(attachment.id()))
    );
}

#[rstest]
fn incomplete_attachment_metadata_is_rejected() {
    assert_eq!(
        NewAttachment::new("stored.bin", " ", "application/octet-stream", 1),
        Err(TaskDomainError::IncompleteAttachment)
    );
}
