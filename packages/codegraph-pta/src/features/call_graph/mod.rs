//! # Call Graph
//!
//! Call-graph structure shared by the pointer analysis and the class
//! hierarchy analysis (CHA) baseline, plus the dispatch rules both use.

pub mod domain;
pub mod infrastructure;

pub use domain::{CallGraph, CallKind, Edge};
pub use infrastructure::{ChaBuilder, ChaCallGraph};
