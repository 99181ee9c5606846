//! Task lifecycle for Tasklane.
//!
//! This module owns the Task aggregate: status transitions with their date
//! side effects, deadline status derivation, manual ordering within a
//! project, attachments, and typed dependency edges. The lifecycle service
//! recomputes project progress on every status change and hands lifecycle
//! events to the notification dispatcher after each commit.
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Orchestration services in [`services`]

pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
