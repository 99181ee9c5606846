//! Notification fan-out.
//!
//! Services commit a mutation first and then hand [`domain::LifecycleEvent`]s
//! to an [`ports::EventDispatcher`]. The fan-out computes the affected users,
//! composes a message (and an email when configured), appends a persisted
//! notification for every recipient, and pushes a real-time event to the
//! `user-{id}` and `project-{id}` topics. Channel failures are logged and
//! swallowed: a notification problem never fails the originating mutation.
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - The fan-out service in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
