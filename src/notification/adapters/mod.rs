//! Adapter implementations of notification ports.

pub mod dispatch;
pub mod email;
pub mod inbox;
pub mod push;

pub use dispatch::{BackgroundDispatcher, InlineDispatcher};
pub use email::OutboxEmailSender;
pub use inbox::UserInbox;
pub use push::BroadcastPushChannel;
