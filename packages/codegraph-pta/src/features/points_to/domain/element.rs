//! Context-sensitive program elements
//!
//! Every element is a plain value (context id + program entity). The
//! canonicalizer maps each distinct value to one dense id, so two elements
//! are the same iff their ids are equal.

use super::abstract_object::ObjId;
use crate::shared::models::{FieldId, MethodId, StmtRef, VarId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Interned `Context`
pub type ContextId = u32;

/// Interned `CSObj`
pub type CSObjId = u32;

/// Interned `CSMethod`
pub type CSMethodId = u32;

/// Interned `CSCallSite`
pub type CSCallSiteId = u32;

/// Interned `Pointer`
pub type PointerId = u32;

/// Abstract object qualified by a heap context
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CSObj {
    pub heap_ctx: ContextId,
    pub obj: ObjId,
}

/// Method qualified by a calling context
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CSMethod {
    pub ctx: ContextId,
    pub method: MethodId,
}

/// Call site qualified by the context of its enclosing method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CSCallSite {
    pub ctx: ContextId,
    pub site: StmtRef,
}

/// Variable qualified by the context of its method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CSVar {
    pub ctx: ContextId,
    pub var: VarId,
}

/// Node of the pointer flow graph
///
/// Anything that can hold a points-to set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Pointer {
    /// Local variable in a context
    Var(CSVar),

    /// `o.f` for a context-sensitive object `o`
    InstanceField { base: CSObjId, field: FieldId },

    /// `C.f`, shared by all contexts
    StaticField { field: FieldId },

    /// `o[*]`, all elements of an array object merged
    ArrayIndex { array: CSObjId },
}

impl Pointer {
    #[inline]
    pub fn var(ctx: ContextId, var: VarId) -> Self {
        Pointer::Var(CSVar { ctx, var })
    }

    /// The variable, if this pointer is one
    #[inline]
    pub fn as_var(&self) -> Option<CSVar> {
        match self {
            Pointer::Var(v) => Some(*v),
            _ => None,
        }
    }
}

impl fmt::Display for Pointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pointer::Var(v) => write!(f, "c{}:v{}", v.ctx, v.var),
            Pointer::InstanceField { base, field } => write!(f, "cso{}.f{}", base, field),
            Pointer::StaticField { field } => write!(f, "static.f{}", field),
            Pointer::ArrayIndex { array } => write!(f, "cso{}[*]", array),
        }
    }
}
