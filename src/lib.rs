//! Tasklane: collaborative project and task management core.
//!
//! This crate implements the task and project lifecycle of a collaborative
//! work tracker: users form projects, assign tasks with deadlines and
//! priorities, comment on them, and receive notifications when something
//! relevant to them changes.
//!
//! # Architecture
//!
//! Tasklane follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (in-memory stores,
//!   password hashing, token signing, broadcast push)
//! - **Services**: Inbound operations that authorize, mutate, commit, and
//!   then hand lifecycle events to the notification fan-out
//!
//! # Modules
//!
//! - [`identity`]: Users, system roles, credentials, session tokens
//! - [`project`]: Projects, membership, progress aggregation
//! - [`task`]: Task lifecycle, deadline status, ordering
//! - [`comment`]: Threaded task comments with reactions and edit history
//! - [`access`]: Authorization policy engine
//! - [`notification`]: Notification fan-out over persisted and push channels
//! - [`store`]: Cross-aggregate unit-of-work persistence port

pub mod access;
pub mod comment;
pub mod config;
pub mod error;
pub mod identity;
pub mod notification;
pub mod project;
pub mod store;
pub mod task;
pub mod telemetry;

#[cfg(test)]
pub(crate) mod test_support;
