//! Cross-aggregate persistence.
//!
//! Projects, tasks, and comments reference each other, so writes that touch
//! more than one of them (task insertion, cascading deletes) go through the
//! [`WorkspaceStore`] unit-of-work port instead of separate repositories.

mod error;
mod memory;
mod workspace;

pub use error::{StoreError, StoreResult};
pub use memory::InMemoryWorkspaceStore;
pub use workspace::{CascadeSummary, WorkspaceStore};

#[cfg(test)]
mod tests;
