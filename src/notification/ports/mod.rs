//! Port contracts for notification delivery.
//!
//! Each channel is a separate port so the fan-out can keep going when one of
//! them fails.

pub mod channels;
pub mod dispatch;

pub use channels::{
    ChannelError, ChannelResult, EmailSender, NotificationInbox, OutgoingEmail, PushChannel,
    PushEvent, PushTopic,
};
pub use dispatch::{DispatchReport, EventDispatcher, Notify};
