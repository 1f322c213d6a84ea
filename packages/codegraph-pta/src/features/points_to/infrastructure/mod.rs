//! Infrastructure layer for Points-to Analysis
//!
//! - **AllocationSiteHeapModel**: one abstract object per allocation site
//! - **Context selectors**: insensitive, k-CFA, k-object, k-type
//! - **CSManager**: interning arena owning all points-to sets
//! - **PointerFlowGraph**: deduplicated, grow-only flow edges
//! - **WorkList / PendingMethods**: solver queues
//! - **Solver**: on-the-fly call graph + inclusion propagation

pub mod context_selector;
pub mod cs_manager;
pub mod heap_model;
pub mod pointer_flow_graph;
pub mod solver;
pub mod worklist;

pub use context_selector::{
    selector_from_config, ContextInsensitiveSelector, KCallSiteSelector, KObjectSelector,
    KTypeSelector,
};
pub use cs_manager::CSManager;
pub use heap_model::AllocationSiteHeapModel;
pub use pointer_flow_graph::PointerFlowGraph;
pub use solver::{CSCallGraph, Solver, SolverOutput, SolverStats};
pub use worklist::{PendingMethods, WorkList, WorkListEntry};
