//! Call graph infrastructure: dispatch and the CHA builder

pub mod cha_builder;
pub mod dispatch;

pub use cha_builder::{ChaBuilder, ChaCallGraph};
pub use dispatch::{dispatch, resolve_callee, resolve_static};
