//! Lifecycle events, recipient computation, and message templates.

mod event;
mod recipients;
mod templates;

pub use event::{LifecycleEvent, ProjectSnapshot, TaskSnapshot};
pub use recipients::recipients;
pub use templates::{EmailContent, NotificationTemplates, TemplateError};
