//! Call graph domain models

pub mod call_graph;
pub mod call_kind;

pub use call_graph::{CallGraph, Edge};
pub use call_kind::CallKind;
