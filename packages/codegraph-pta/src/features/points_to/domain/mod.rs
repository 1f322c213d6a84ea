//! Domain models for Points-to Analysis
//!
//! Core abstractions independent of the solving algorithm:
//! - AbstractObject: Heap allocation site abstraction
//! - Context: k-limited calling / heap contexts
//! - Element: Context-sensitive variables, objects, methods, call sites, pointers
//! - PointsToSet: Growing set of context-sensitive objects

pub mod abstract_object;
pub mod context;
pub mod element;
pub mod points_to_set;

pub use abstract_object::{AbstractObject, ObjId};
pub use context::{Context, ContextElement};
pub use element::{
    CSCallSite, CSCallSiteId, CSMethod, CSMethodId, CSObj, CSObjId, CSVar, ContextId, Pointer,
    PointerId,
};
pub use points_to_set::PointsToSet;
