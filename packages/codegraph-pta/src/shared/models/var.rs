//! Local variables and their use index

use super::method::MethodId;
use super::stmt::StmtRef;
use serde::{Deserialize, Serialize};

/// Variable identifier (index into `Program::vars`)
pub type VarId = u32;

/// A method-local variable (including `this`, parameters and temporaries)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Var {
    pub id: VarId,
    pub name: String,
    pub method: MethodId,
}

/// Statements that use a variable as the base of a heap access or as the
/// receiver of an instance call.
///
/// The solver consults this when a new object reaches the variable, which is
/// how field, array and call wiring is deferred until a concrete base object
/// is known.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VarUses {
    /// `base.f = x`
    pub store_fields: Vec<StmtRef>,
    /// `x = base.f`
    pub load_fields: Vec<StmtRef>,
    /// `base[*] = x`
    pub store_arrays: Vec<StmtRef>,
    /// `x = base[*]`
    pub load_arrays: Vec<StmtRef>,
    /// `base.m(...)` for every non-static invocation kind
    pub invokes: Vec<StmtRef>,
}

impl VarUses {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.store_fields.is_empty()
            && self.load_fields.is_empty()
            && self.store_arrays.is_empty()
            && self.load_arrays.is_empty()
            && self.invokes.is_empty()
    }
}
