//! Shared module - Common types
//!
//! Types shared across all features. The IR lives here so that the call
//! graph and points-to features can both depend on it without depending on
//! each other.

pub mod models;

pub use models::*;
