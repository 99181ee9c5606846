//! Errors shared by the project, task, and comment repositories.

use crate::error::EntityRef;
use std::sync::Arc;
use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors returned by workspace store implementations.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// The addressed entity does not exist.
    #[error("{0} not found")]
    NotFound(EntityRef),

    /// An entity with the same identifier already exists.
    #[error("{0} already exists")]
    Duplicate(EntityRef),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl StoreError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
