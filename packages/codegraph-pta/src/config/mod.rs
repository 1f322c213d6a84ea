//! Configuration system
//!
//! Two levels:
//! - Preset: one-liner choice of a precision/cost trade-off
//! - `PTAConfig`: explicit policy, depths and worklist order, from code or YAML
//!
//! # Examples
//!
//! ```rust,ignore
//! use codegraph_pta::config::{ContextPolicy, PTAConfig, Preset};
//!
//! let config = PTAConfig::from_preset(Preset::Thorough);
//! let config = PTAConfig::default().policy(ContextPolicy::CallSite).context_depth(2);
//! let config = PTAConfig::from_yaml_file("pta.yaml")?;
//! ```

pub mod error;
pub mod io;
pub mod preset;
pub mod pta_config;

// Re-exports
pub use error::{ConfigError, ConfigResult};
pub use io::ConfigFileV1;
pub use preset::Preset;
pub use pta_config::{ContextPolicy, PTAConfig, WorklistOrder, MAX_CONTEXT_DEPTH};
