//! Email sender that keeps outgoing messages in memory.

use async_trait::async_trait;
use std::sync::Mutex;

use crate::notification::ports::{ChannelError, ChannelResult, EmailSender, OutgoingEmail};

/// Collects outgoing email instead of delivering it.
///
/// Used by tests and the demo binary; a mail transport implements
/// [`EmailSender`] the same way.
#[derive(Debug, Default)]
pub struct OutboxEmailSender {
    outbox: Mutex<Vec<OutgoingEmail>>,
}

impl OutboxEmailSender {
    /// Creates an empty outbox.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every email sent so far, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`ChannelError::Delivery`] when the outbox lock is poisoned.
    pub fn sent(&self) -> ChannelResult<Vec<OutgoingEmail>> {
        let outbox = self
            .outbox
            .lock()
            .map_err(|err| ChannelError::Delivery(err.to_string()))?;
        Ok(outbox.clone())
    }
}

#[async_trait]
impl EmailSender for OutboxEmailSender {
    async fn send(&self, email: OutgoingEmail) -> ChannelResult<()> {
        let mut outbox = self
            .outbox
            .lock()
            .map_err(|err| ChannelError::Delivery(err.to_string()))?;
        tracing::debug!(to = %email.to, subject = %email.subject, "email queued");
        outbox.push(email);
        Ok(())
    }
}
