//! User accounts for Tasklane.
//!
//! This module owns the User aggregate: identity, system role, the single
//! credential a user signs in with, and the list of persisted notifications
//! delivered to that user. It also defines the outbound credential-store
//! and token-issuer ports. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
