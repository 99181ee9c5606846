//! Event dispatchers: inline and background.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::notification::domain::LifecycleEvent;
use crate::notification::ports::{EventDispatcher, Notify};

/// Runs the fan-out before `dispatch` returns.
#[derive(Debug, Clone)]
pub struct InlineDispatcher<N>
where
    N: Notify,
{
    notifier: Arc<N>,
}

impl<N> InlineDispatcher<N>
where
    N: Notify,
{
    /// Creates a dispatcher delivering through `notifier`.
    #[must_use]
    pub const fn new(notifier: Arc<N>) -> Self {
        Self { notifier }
    }
}

#[async_trait]
impl<N> EventDispatcher for InlineDispatcher<N>
where
    N: Notify,
{
    async fn dispatch(&self, events: Vec<LifecycleEvent>) {
        for event in events {
            let kind = event.kind();
            let report = self.notifier.notify(event).await;
            debug!(%kind, ?report, "notification delivered");
        }
    }
}

/// Queues events for a worker task so callers never wait on delivery.
#[derive(Debug, Clone)]
pub struct BackgroundDispatcher {
    sender: mpsc::UnboundedSender<LifecycleEvent>,
}

impl BackgroundDispatcher {
    /// Spawns the delivery worker on the current runtime.
    ///
    /// The worker stops once every dispatcher clone is dropped and the
    /// queue is drained.
    #[must_use]
    pub fn spawn<N>(notifier: Arc<N>) -> (Self, JoinHandle<()>)
    where
        N: Notify + 'static,
    {
        let (sender, mut receiver) = mpsc::unbounded_channel::<LifecycleEvent>();
        let worker = tokio::spawn(async move {
            while let Some(event) = receiver.recv().await {
                let kind = event.kind();
                let report = notifier.notify(event).await;
                debug!(%kind, ?report, "notification delivered");
            }
        });
        (Self { sender }, worker)
    }
}

#[async_trait]
impl EventDispatcher for BackgroundDispatcher {
    async fn dispatch(&self, events: Vec<LifecycleEvent>) {
        for event in events {
            if let Err(err) = self.sender.send(event) {
                warn!(kind = %err.0.kind(), "notification worker stopped; event dropped");
            }
        }
    }
}
