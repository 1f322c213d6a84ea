//! Method entities

use super::class::ClassId;
use super::stmt::Stmt;
use super::var::VarId;
use serde::{Deserialize, Serialize};

/// Method identifier (index into `Program::methods`)
pub type MethodId = u32;

/// A method declaration together with its body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Method {
    pub id: MethodId,

    pub declaring_class: ClassId,

    /// Return type, name and parameter types, e.g. `"void foo(A,B)"`.
    /// Dispatch matches on this string.
    pub subsignature: String,

    #[serde(default)]
    pub is_static: bool,

    #[serde(default)]
    pub is_abstract: bool,

    /// Implicit receiver parameter; present for every non-static method
    #[serde(default)]
    pub this: Option<VarId>,

    #[serde(default)]
    pub params: Vec<VarId>,

    /// Variables returned by `return x` statements
    #[serde(default)]
    pub return_vars: Vec<VarId>,

    #[serde(default)]
    pub stmts: Vec<Stmt>,
}

impl Method {
    /// Method name extracted from the subsignature
    pub fn name(&self) -> &str {
        let head = self
            .subsignature
            .split('(')
            .next()
            .unwrap_or(&self.subsignature);
        head.rsplit(' ').next().unwrap_or(head)
    }

    #[inline]
    pub fn arity(&self) -> usize {
        self.params.len()
    }
}
