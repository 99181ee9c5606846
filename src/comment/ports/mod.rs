//! Port contracts for comment persistence.

pub mod repository;

pub use repository::CommentRepository;
