//! Delivers lifecycle events over the inbox, push, and email channels.

use async_trait::async_trait;
use mockable::Clock;
use std::sync::Arc;
use tracing::{info, warn};

use crate::config::TasklaneConfig;
use crate::identity::{
    domain::{NotificationRecord, UserId},
    ports::UserRepository,
};
use crate::notification::{
    domain::{LifecycleEvent, NotificationTemplates, recipients},
    ports::{
        DispatchReport, EmailSender, NotificationInbox, Notify, OutgoingEmail, PushChannel,
        PushEvent, PushTopic,
    },
};

/// Fan-out options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FanOutSettings {
    /// Sender address; `None` disables email.
    pub email_from: Option<String>,
}

impl FanOutSettings {
    /// Reads the settings from configuration.
    #[must_use]
    pub fn from_config(config: &TasklaneConfig) -> Self {
        Self {
            email_from: config.email_from.clone(),
        }
    }
}

/// Notification fan-out over every delivery channel.
pub struct FanOutService<U, I, P, E, C>
where
    U: UserRepository,
    I: NotificationInbox,
    P: PushChannel,
    E: EmailSender,
    C: Clock + Send + Sync,
{
    users: Arc<U>,
    inbox: Arc<I>,
    push: Arc<P>,
    email: Arc<E>,
    clock: Arc<C>,
    templates: Arc<NotificationTemplates>,
    settings: FanOutSettings,
}

impl<U, I, P, E, C> FanOutService<U, I, P, E, C>
where
    U: UserRepository,
    I: NotificationInbox,
    P: PushChannel,
    E: EmailSender,
    C: Clock + Send + Sync,
{
    /// Creates a fan-out service.
    #[must_use]
    pub const fn new(
        users: Arc<U>,
        inbox: Arc<I>,
        push: Arc<P>,
        email: Arc<E>,
        clock: Arc<C>,
        templates: Arc<NotificationTemplates>,
        settings: FanOutSettings,
    ) -> Self {
        Self {
            users,
            inbox,
            push,
            email,
            clock,
            templates,
            settings,
        }
    }

    async fn persist(&self, event: &LifecycleEvent, message: &str, report: &mut DispatchReport) {
        let created_at = self.clock.utc();
        for recipient in recipients(event) {
            let record = NotificationRecord::new(event.kind(), message, created_at);
            match self.inbox.append(recipient, record).await {
                Ok(()) => report.persisted += 1,
                Err(err) => {
                    warn!(%recipient, kind = %event.kind(), error = %err, "failed to persist notification");
                    report.failures += 1;
                }
            }
        }
    }

    async fn push_all(&self, event: &LifecycleEvent, message: &str, report: &mut DispatchReport) {
        let payload = PushEvent {
            kind: event.kind(),
            message: message.to_owned(),
            project_id: event.project_id(),
            task_id: event.task_id(),
            comment_id: event.comment_id(),
            created_at: self.clock.utc(),
        };
        let topics = recipients(event)
            .into_iter()
            .map(PushTopic::User)
            .chain(std::iter::once(PushTopic::Project(event.project_id())));
        for topic in topics {
            match self.push.publish(topic, payload.clone()).await {
                Ok(()) => report.pushed += 1,
                Err(err) => {
                    warn!(%topic, kind = %event.kind(), error = %err, "failed to push notification");
                    report.failures += 1;
                }
            }
        }
    }

    async fn email_all(&self, event: &LifecycleEvent, from: &str, report: &mut DispatchReport) {
        for recipient in recipients(event) {
            match self.compose_email(event, from, recipient).await {
                Ok(Some(email)) => match self.email.send(email).await {
                    Ok(()) => report.emailed += 1,
                    Err(err) => {
                        warn!(%recipient, error = %err, "failed to send notification email");
                        report.failures += 1;
                    }
                },
                Ok(None) => {
                    warn!(%recipient, "notification email skipped: unknown recipient");
                    report.failures += 1;
                }
                Err(reason) => {
                    warn!(%recipient, error = %reason, "failed to compose notification email");
                    report.failures += 1;
                }
            }
        }
    }

    async fn compose_email(
        &self,
        event: &LifecycleEvent,
        from: &str,
        recipient: UserId,
    ) -> Result<Option<OutgoingEmail>, String> {
        let Some(user) = self
            .users
            .find_by_id(recipient)
            .await
            .map_err(|err| err.to_string())?
        else {
            return Ok(None);
        };
        let content = self
            .templates
            .email(event, user.name())
            .map_err(|err| err.to_string())?;
        Ok(Some(OutgoingEmail {
            from: from.to_owned(),
            to: user.email().as_str().to_owned(),
            subject: content.subject,
            html: content.html,
        }))
    }
}

#[async_trait]
impl<U, I, P, E, C> Notify for FanOutService<U, I, P, E, C>
where
    U: UserRepository,
    I: NotificationInbox,
    P: PushChannel,
    E: EmailSender,
    C: Clock + Send + Sync,
{
    async fn notify(&self, event: LifecycleEvent) -> DispatchReport {
        let mut report = DispatchReport {
            recipients: recipients(&event).len(),
            ..DispatchReport::default()
        };

        let message = match self.templates.message(&event) {
            Ok(message) => message,
            Err(err) => {
                warn!(kind = %event.kind(), error = %err, "failed to render notification");
                report.failures += 1;
                return report;
            }
        };

        self.persist(&event, &message, &mut report).await;
        self.push_all(&event, &message, &mut report).await;
        if let Some(from) = self.settings.email_from.as_deref() {
            self.email_all(&event, from, &mut report).await;
        }

        info!(
            kind = %event.kind(),
            recipients = report.recipients,
            persisted = report.persisted,
            pushed = report.pushed,
            emailed = report.emailed,
            failures = report.failures,
            "notification fanned out"
        );
        report
    }
}
