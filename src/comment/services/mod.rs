//! Comment orchestration services.

mod comment;

pub use comment::CommentService;
