//! Statements relevant to pointer analysis
//!
//! The IR is a closed set of statement kinds. Anything that does not move
//! references around (arithmetic, branches, ...) is simply absent.

use super::class::ClassId;
use super::field::FieldId;
use super::method::MethodId;
use super::var::VarId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Location of a statement: owning method + position in its body.
///
/// Serves as the identity of allocation sites and call sites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StmtRef {
    pub method: MethodId,
    pub index: u32,
}

impl StmtRef {
    #[inline]
    pub fn new(method: MethodId, index: u32) -> Self {
        Self { method, index }
    }
}

impl fmt::Display for StmtRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "m{}#{}", self.method, self.index)
    }
}

/// Declared type of an allocated object
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeRef {
    Class(ClassId),
    Array(Box<TypeRef>),
}

impl TypeRef {
    /// Class of a class-typed value; `None` for arrays
    #[inline]
    pub fn as_class(&self) -> Option<ClassId> {
        match self {
            TypeRef::Class(c) => Some(*c),
            TypeRef::Array(_) => None,
        }
    }

    #[inline]
    pub fn array_of(element: TypeRef) -> Self {
        TypeRef::Array(Box::new(element))
    }
}

/// Dispatch flavor of an invocation as written in the IR
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InvokeKind {
    Static,
    /// Constructors, `super.m()` and private methods
    Special,
    Virtual,
    Interface,
    Dynamic,
}

/// Symbolic method reference at a call site
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MethodRef {
    /// Class named at the call site
    pub class: ClassId,
    pub subsignature: String,
}

impl MethodRef {
    pub fn new(class: ClassId, subsignature: impl Into<String>) -> Self {
        Self {
            class,
            subsignature: subsignature.into(),
        }
    }
}

/// Call statement: `[result =] [receiver.]method(args)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invoke {
    pub kind: InvokeKind,
    pub method_ref: MethodRef,
    /// Receiver variable; `None` only for static calls
    #[serde(default)]
    pub receiver: Option<VarId>,
    #[serde(default)]
    pub args: Vec<VarId>,
    #[serde(default)]
    pub result: Option<VarId>,
}

impl Invoke {
    #[inline]
    pub fn is_static(&self) -> bool {
        self.kind == InvokeKind::Static
    }

    #[inline]
    pub fn is_special(&self) -> bool {
        self.kind == InvokeKind::Special
    }

    #[inline]
    pub fn is_virtual(&self) -> bool {
        self.kind == InvokeKind::Virtual
    }

    #[inline]
    pub fn is_interface(&self) -> bool {
        self.kind == InvokeKind::Interface
    }

    #[inline]
    pub fn is_dynamic(&self) -> bool {
        self.kind == InvokeKind::Dynamic
    }
}

/// A statement in a method body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Stmt {
    /// `lhs = new T`
    New { lhs: VarId, ty: TypeRef },

    /// `lhs = rhs`
    Copy { lhs: VarId, rhs: VarId },

    /// `lhs = C.f`
    LoadStatic { lhs: VarId, field: FieldId },

    /// `C.f = rhs`
    StoreStatic { field: FieldId, rhs: VarId },

    /// `lhs = base.f`
    LoadField { lhs: VarId, base: VarId, field: FieldId },

    /// `base.f = rhs`
    StoreField { base: VarId, field: FieldId, rhs: VarId },

    /// `lhs = base[i]` (index-insensitive)
    LoadArray { lhs: VarId, base: VarId },

    /// `base[i] = rhs` (index-insensitive)
    StoreArray { base: VarId, rhs: VarId },

    Invoke(Invoke),
}

impl Stmt {
    #[inline]
    pub fn as_invoke(&self) -> Option<&Invoke> {
        match self {
            Stmt::Invoke(invoke) => Some(invoke),
            _ => None,
        }
    }

    /// Short name of the statement kind, used in diagnostics
    pub fn kind_str(&self) -> &'static str {
        match self {
            Stmt::New { .. } => "new",
            Stmt::Copy { .. } => "copy",
            Stmt::LoadStatic { .. } => "load_static",
            Stmt::StoreStatic { .. } => "store_static",
            Stmt::LoadField { .. } => "load_field",
            Stmt::StoreField { .. } => "store_field",
            Stmt::LoadArray { .. } => "load_array",
            Stmt::StoreArray { .. } => "store_array",
            Stmt::Invoke(_) => "invoke",
        }
    }
}
