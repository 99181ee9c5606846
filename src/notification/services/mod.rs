//! Notification fan-out service.

mod fan_out;

pub use fan_out::{FanOutService, FanOutSettings};
