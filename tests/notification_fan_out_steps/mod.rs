//! Step definitions for notification fan-out scenarios.

mod given;
mod then;
mod when;
pub mod world;
