//! Error types for codegraph-pta
//!
//! Every variant is fatal: it means the program handed to the analysis breaks
//! the front-end contract, or the configuration is unusable. Unresolvable
//! dispatch is not an error and never shows up here.

use crate::config::ConfigError;
use crate::shared::models::{ClassId, FieldId, VarId};
use thiserror::Error;

/// Main error type for codegraph-pta operations
#[derive(Debug, Error)]
pub enum PtaError {
    /// No entry method to start from
    #[error("Program has no entry method")]
    MissingEntry,

    /// Configured entry method not present in the program
    #[error("Unknown entry method '{0}'")]
    UnknownEntry(String),

    /// Call site and callee disagree on the number of parameters
    #[error("Arity mismatch at {call_site}: {args} argument(s) passed to {callee}, which declares {params} parameter(s)")]
    ArityMismatch {
        call_site: String,
        callee: String,
        args: usize,
        params: usize,
    },

    /// Method reference that resolves to nothing where a target is mandatory
    #[error("Dangling method reference: {0}")]
    DanglingMethod(String),

    #[error("Dangling class reference: #{0}")]
    DanglingClass(ClassId),

    #[error("Dangling field reference: #{0}")]
    DanglingField(FieldId),

    #[error("Dangling variable reference: #{0}")]
    DanglingVar(VarId),

    /// Instance method without a receiver variable
    #[error("Instance method {0} has no 'this' variable")]
    MissingThis(String),

    /// Allocation statement unknown to the heap model
    #[error("No abstract object for allocation site {0}")]
    MissingAllocation(String),

    /// Structurally malformed program
    #[error("Invalid program: {0}")]
    InvalidProgram(String),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl PtaError {
    /// Create an invalid-program error
    pub fn invalid(msg: impl Into<String>) -> Self {
        PtaError::InvalidProgram(msg.into())
    }
}

/// Result type alias for codegraph-pta operations
pub type Result<T> = std::result::Result<T, PtaError>;
