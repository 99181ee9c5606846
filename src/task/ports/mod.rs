//! Port contracts for task persistence.

pub mod repository;

pub use repository::TaskRepository;
