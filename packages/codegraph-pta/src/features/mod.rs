//! Feature modules - Each feature follows Hexagonal Architecture
//!
//! Each feature contains:
//! - domain/     - Pure analysis data (no solver logic)
//! - ports/      - Interface definitions (traits)
//! - application/ - Use cases
//! - infrastructure/ - Algorithm implementations

// Call graph structure, dispatch and the CHA baseline
pub mod call_graph;

// Context-sensitive points-to analysis with on-the-fly call graph
pub mod points_to;
