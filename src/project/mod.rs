//! Projects: membership, ordered task references, and derived progress.
//!
//! A project exclusively owns the identifiers of its tasks, which define
//! the authoritative ordering. Deleting a project cascades through the
//! workspace store to its tasks and their comments.
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Orchestration services in [`services`]

pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
