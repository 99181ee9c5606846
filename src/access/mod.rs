//! Authorization policy engine.
//!
//! [`authorize`] is a pure function of the calling [`Actor`], the addressed
//! [`Resource`], and the [`Capability`] the operation needs. Services call
//! it after loading the aggregates and before mutating anything.

pub mod context;
pub mod policy;

pub use context::{Actor, RequestContext};
pub use policy::{
    AccessDenied, Capability, DenialCode, Resource, authorize, authorize_project_creation,
};

#[cfg(test)]
mod tests;
