//! Port contracts for project persistence.

pub mod repository;

pub use repository::ProjectRepository;
