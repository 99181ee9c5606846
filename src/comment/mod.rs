//! Threaded comments on tasks.
//!
//! Comments are standalone entities keyed by [`domain::CommentId`] with an
//! explicit back-reference to their task and an optional parent comment.
//! Each user holds at most one reaction per comment, and edits keep the
//! previous content in an edit history.
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Orchestration services in [`services`]

pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
