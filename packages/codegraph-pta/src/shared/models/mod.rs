//! Program IR consumed by the analyses
//!
//! A small object-oriented IR: a class hierarchy with fields and methods, and
//! per-method statement lists restricted to the kinds that move references.

mod builder;
mod class;
mod field;
mod method;
mod program;
mod stmt;
mod var;

pub use builder::{MethodBuilder, ProgramBuilder};
pub use class::{Class, ClassId};
pub use field::{Field, FieldId};
pub use method::{Method, MethodId};
pub use program::Program;
pub use stmt::{Invoke, InvokeKind, MethodRef, Stmt, StmtRef, TypeRef};
pub use var::{Var, VarId, VarUses};
