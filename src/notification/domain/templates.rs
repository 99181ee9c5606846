//! Message and email composition with `minijinja`.

use super::LifecycleEvent;
use minijinja::{Environment, Value, context};
use thiserror::Error;

const TEMPLATES: &[(&str, &str)] = &[
    ("task_assigned.txt", "You were assigned to task: {{ task.title }}"),
    ("task_assigned.subject.txt", "New task assigned"),
    (
        "task_assigned.html",
        r"<h2>New task assigned</h2>
<p>Hello {{ recipient_name }},</p>
<p>You were assigned to the following task:</p>
<h3>{{ task.title }}</h3>
<p>{{ task.description }}</p>
<p>Priority: {{ priority }}</p>
<p>Due: {{ due }}</p>",
    ),
    (
        "task_status_changed.txt",
        r#"Status of task "{{ task.title }}" changed from {{ previous_status }} to {{ current_status }}"#,
    ),
    ("task_status_changed.subject.txt", "Task status changed"),
    (
        "task_status_changed.html",
        r"<h2>Task status changed</h2>
<p>Hello {{ recipient_name }},</p>
<p>The task <strong>{{ task.title }}</strong> moved from {{ previous_status }} to {{ current_status }}.</p>",
    ),
    (
        "task_comment.txt",
        r#"New comment on task "{{ task.title }}" by {{ commenter_name }}"#,
    ),
    ("task_comment.subject.txt", "New comment on a task"),
    (
        "task_comment.html",
        r"<h2>New comment</h2>
<p>Hello {{ recipient_name }},</p>
<p>{{ commenter_name }} commented on <strong>{{ task.title }}</strong>.</p>",
    ),
    (
        "task_deadline.txt",
        r#"Task "{{ task.title }}" is due in {{ days_remaining }} day{{ "" if days_remaining == 1 else "s" }}"#,
    ),
    ("task_deadline.subject.txt", "Task deadline approaching"),
    (
        "task_deadline.html",
        r#"<h2>Deadline approaching</h2>
<p>Hello {{ recipient_name }},</p>
<p>The task <strong>{{ task.title }}</strong> is due on {{ due }} ({{ days_remaining }} day{{ "" if days_remaining == 1 else "s" }} left).</p>"#,
    ),
    (
        "project_member_added.txt",
        r#"You were added to project "{{ project.name }}" by {{ added_by_name }}"#,
    ),
    ("project_member_added.subject.txt", "Added to a project"),
    (
        "project_member_added.html",
        r"<h2>Welcome to {{ project.name }}</h2>
<p>Hello {{ recipient_name }},</p>
<p>{{ added_by_name }} added you to the project <strong>{{ project.name }}</strong>.</p>",
    ),
];

/// Failure to load or render a notification template.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("notification template '{template}' failed: {reason}")]
pub struct TemplateError {
    template: String,
    reason: String,
}

impl TemplateError {
    fn new(template: &str, err: &minijinja::Error) -> Self {
        Self {
            template: template.to_owned(),
            reason: err.to_string(),
        }
    }
}

/// Subject and HTML body of a notification email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailContent {
    /// Email subject line.
    pub subject: String,
    /// HTML body, with interpolated values escaped.
    pub html: String,
}

/// Compiled notification templates.
///
/// `.html` templates auto-escape interpolated values; `.txt` templates do
/// not.
#[derive(Debug)]
pub struct NotificationTemplates {
    environment: Environment<'static>,
}

impl NotificationTemplates {
    /// Compiles the built-in templates.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError`] when a template fails to parse.
    pub fn builtin() -> Result<Self, TemplateError> {
        let mut environment = Environment::new();
        for &(name, source) in TEMPLATES {
            environment
                .add_template(name, source)
                .map_err(|err| TemplateError::new(name, &err))?;
        }
        Ok(Self { environment })
    }

    /// Renders the in-app notification message for `event`.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError`] when rendering fails.
    pub fn message(&self, event: &LifecycleEvent) -> Result<String, TemplateError> {
        self.render(event, "txt", None)
    }

    /// Renders the email addressed to `recipient_name` for `event`.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError`] when rendering fails.
    pub fn email(
        &self,
        event: &LifecycleEvent,
        recipient_name: &str,
    ) -> Result<EmailContent, TemplateError> {
        Ok(EmailContent {
            subject: self.render(event, "subject.txt", Some(recipient_name))?,
            html: self.render(event, "html", Some(recipient_name))?,
        })
    }

    fn render(
        &self,
        event: &LifecycleEvent,
        suffix: &str,
        recipient_name: Option<&str>,
    ) -> Result<String, TemplateError> {
        let name = format!("{}.{suffix}", event.kind().as_str().to_ascii_lowercase());
        let template = self
            .environment
            .get_template(&name)
            .map_err(|err| TemplateError::new(&name, &err))?;
        template
            .render(event_context(event, recipient_name))
            .map_err(|err| TemplateError::new(&name, &err))
    }
}

fn event_context(event: &LifecycleEvent, recipient_name: Option<&str>) -> Value {
    match event {
        LifecycleEvent::TaskAssigned { task, .. } => context! {
            recipient_name => recipient_name,
            task => task,
            priority => task.priority.as_str(),
            due => task.deadline.format("%Y-%m-%d").to_string(),
        },
        LifecycleEvent::TaskStatusChanged { task, previous, .. } => context! {
            recipient_name => recipient_name,
            task => task,
            previous_status => previous.label(),
            current_status => task.status.label(),
        },
        LifecycleEvent::TaskCommented {
            task,
            commenter_name,
            ..
        } => context! {
            recipient_name => recipient_name,
            task => task,
            commenter_name => commenter_name,
        },
        LifecycleEvent::DeadlineApproaching {
            task,
            days_remaining,
        } => context! {
            recipient_name => recipient_name,
            task => task,
            days_remaining => days_remaining,
            due => task.deadline.format("%Y-%m-%d").to_string(),
        },
        LifecycleEvent::ProjectMemberAdded {
            project,
            added_by_name,
            ..
        } => context! {
            recipient_name => recipient_name,
            project => project,
            added_by_name => added_by_name,
        },
    }
}
