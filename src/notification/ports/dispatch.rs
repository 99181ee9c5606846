//! Hand-off between lifecycle services and the notification fan-out.

use crate::notification::domain::LifecycleEvent;
use async_trait::async_trait;

/// Counts of deliveries made for one event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchReport {
    /// Users the event concerned.
    pub recipients: usize,
    /// Notifications appended to inboxes.
    pub persisted: usize,
    /// Push messages published, project topic included.
    pub pushed: usize,
    /// Emails handed to the sender.
    pub emailed: usize,
    /// Channel operations that failed and were skipped.
    pub failures: usize,
}

/// Delivers one event over every channel.
///
/// Implementations never fail: channel errors are logged and counted.
#[async_trait]
pub trait Notify: Send + Sync {
    /// Fans `event` out to its recipients.
    async fn notify(&self, event: LifecycleEvent) -> DispatchReport;
}

/// Accepts events emitted after a committed mutation.
#[async_trait]
pub trait EventDispatcher: Send + Sync {
    /// Schedules delivery of `events`, in order.
    async fn dispatch(&self, events: Vec<LifecycleEvent>);
}
