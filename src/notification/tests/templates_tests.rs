//! Unit tests for notification message rendering.

use super::snapshot;
use crate::comment::domain::CommentId;
use crate::identity::domain::UserId;
use crate::notification::domain::{LifecycleEvent, NotificationTemplates, ProjectSnapshot};
use crate::project::domain::ProjectId;
use crate::task::domain::TaskStatus;
use rstest::{fixture, rstest};

#[fixture]
fn templates() -> NotificationTemplates {
    NotificationTemplates::builtin().expect("built-in templates compile")
}

fn status_changed() -> LifecycleEvent {
    let user = UserId::new();
    let mut task = snapshot(&[user], user);
    task.status = TaskStatus::InProgress;
    LifecycleEvent::TaskStatusChanged {
        task,
        previous: TaskStatus::Pending,
        changed_by: user,
    }
}

#[rstest]
fn assignment_message_names_the_task(templates: NotificationTemplates) {
    let user = UserId::new();
    let event = LifecycleEvent::TaskAssigned {
        task: snapshot(&[user], user),
        assignee: user,
    };

    let message = templates.message(&event).expect("render");

    assert_eq!(message, "You were assigned to task: Ship <release>");
}

#[rstest]
fn status_message_uses_labels(templates: NotificationTemplates) {
    let message = templates.message(&status_changed()).expect("render");

    assert_eq!(
        message,
        r#"Status of task "Ship <release>" changed from Pending to In Progress"#
    );
}

#[rstest]
fn comment_message_names_the_commenter(templates: NotificationTemplates) {
    let user = UserId::new();
    let event = LifecycleEvent::TaskCommented {
        task: snapshot(&[user], user),
        comment_id: CommentId::new(),
        commenter: user,
        commenter_name: "Grace".to_owned(),
    };

    let message = templates.message(&event).expect("render");

    assert_eq!(message, r#"New comment on task "Ship <release>" by Grace"#);
}

#[rstest]
#[case(1, r#"Task "Ship <release>" is due in 1 day"#)]
#[case(3, r#"Task "Ship <release>" is due in 3 days"#)]
fn deadline_message_pluralizes_days(
    templates: NotificationTemplates,
    #[case] days_remaining: u64,
    #[case] expected: &str,
) {
    let user = UserId::new();
    let event = LifecycleEvent::DeadlineApproaching {
        task: snapshot(&[user], user),
        days_remaining,
    };

    assert_eq!(templates.message(&event).expect("render"), expected);
}

#[rstest]
fn member_added_message_names_the_project_and_adder(templates: NotificationTemplates) {
    let event = LifecycleEvent::ProjectMemberAdded {
        project: ProjectSnapshot {
            id: ProjectId::new(),
            name: "Apollo".to_owned(),
        },
        member: UserId::new(),
        added_by: UserId::new(),
        added_by_name: "Grace".to_owned(),
    };

    assert_eq!(
        templates.message(&event).expect("render"),
        r#"You were added to project "Apollo" by Grace"#
    );
    let email = templates.email(&event, "Ada").expect("render");
    assert!(email.html.contains("Grace added you to the project"));
}

#[rstest]
fn email_html_escapes_user_content(templates: NotificationTemplates) {
    let user = UserId::new();
    let event = LifecycleEvent::TaskAssigned {
        task: snapshot(&[user], user),
        assignee: user,
    };

    let email = templates.email(&event, "Ada <admin>").expect("render");

    assert_eq!(email.subject, "New task assigned");
    assert!(email.html.contains("Hello Ada &lt;admin&gt;,"));
    assert!(email.html.contains("<h3>Ship &lt;release&gt;</h3>"));
    assert!(email.html.contains("Priority: high"));
    assert!(email.html.contains("Due: 2026-11-02"));
}

#[rstest]
fn status_email_reports_both_statuses(templates: NotificationTemplates) {
    let email = templates
        .email(&status_changed(), "Ada")
        .expect("render");

    assert_eq!(email.subject, "Task status changed");
    assert!(email.html.contains("moved from Pending to In Progress"));
}
