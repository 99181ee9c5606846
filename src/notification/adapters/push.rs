//! Real-time push over `tokio` broadcast channels.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::{RwLock, broadcast};

use crate::config::TasklaneConfig;
use crate::notification::ports::{ChannelResult, PushChannel, PushEvent, PushTopic};

/// One broadcast channel per topic, created on first subscription.
#[derive(Debug)]
pub struct BroadcastPushChannel {
    buffer: usize,
    topics: RwLock<HashMap<PushTopic, broadcast::Sender<PushEvent>>>,
}

impl BroadcastPushChannel {
    /// Creates a channel whose topics buffer `buffer` events per
    /// subscriber. A zero buffer is raised to one.
    #[must_use]
    pub fn new(buffer: usize) -> Self {
        Self {
            buffer: buffer.max(1),
            topics: RwLock::new(HashMap::new()),
        }
    }

    /// Creates a channel sized from configuration.
    #[must_use]
    pub fn from_config(config: &TasklaneConfig) -> Self {
        Self::new(config.push_buffer)
    }

    /// Subscribes to `topic`, creating it when needed.
    ///
    /// Lagging receivers lose the oldest events.
    pub async fn subscribe(&self, topic: PushTopic) -> broadcast::Receiver<PushEvent> {
        let mut topics = self.topics.write().await;
        topics
            .entry(topic)
            .or_insert_with(|| broadcast::channel(self.buffer).0)
            .subscribe()
    }

    /// Returns the number of live receivers on `topic`.
    pub async fn subscriber_count(&self, topic: PushTopic) -> usize {
        let topics = self.topics.read().await;
        topics
            .get(&topic)
            .map_or(0, broadcast::Sender::receiver_count)
    }
}

#[async_trait]
impl PushChannel for BroadcastPushChannel {
    async fn publish(&self, topic: PushTopic, event: PushEvent) -> ChannelResult<()> {
        let topics = self.topics.read().await;
        let Some(sender) = topics.get(&topic) else {
            tracing::trace!(%topic, "no subscribers on push topic");
            return Ok(());
        };
        if sender.send(event).is_err() {
            tracing::trace!(%topic, "push topic has no live receivers");
        }
        Ok(())
    }
}
