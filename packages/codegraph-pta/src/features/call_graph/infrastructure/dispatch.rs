//! Method dispatch
//!
//! Pure lookups over the class hierarchy, shared by the pointer analysis
//! (exact receiver type) and the CHA baseline (every subtype).

use crate::errors::{PtaError, Result};
use crate::shared::models::{ClassId, Invoke, InvokeKind, MethodId, Program, TypeRef};

/// First concrete method with `subsignature`, walking up from `class`
pub fn dispatch(program: &Program, class: ClassId, subsignature: &str) -> Option<MethodId> {
    let mut current = Some(class);
    while let Some(c) = current {
        if let Some(m) = program.declared_method(c, subsignature) {
            if !program.method(m).is_abstract {
                return Some(m);
            }
        }
        current = program.superclass_of(c);
    }
    None
}

/// Target of a static call: the method declared in the referenced class.
///
/// A missing target is a dangling reference in the program.
pub fn resolve_static(program: &Program, invoke: &Invoke) -> Result<MethodId> {
    let mref = &invoke.method_ref;
    program
        .declared_method(mref.class, &mref.subsignature)
        .ok_or_else(|| {
            PtaError::DanglingMethod(format!(
                "<{}: {}>",
                program.class(mref.class).name,
                mref.subsignature
            ))
        })
}

/// Target of an instance call whose receiver object has type `recv_type`.
///
/// Special calls ignore the receiver type and dispatch from the referenced
/// class. Array receivers dispatch through the program's root class.
/// Returns `None` when no concrete method is found.
pub fn resolve_callee(program: &Program, recv_type: &TypeRef, invoke: &Invoke) -> Option<MethodId> {
    let subsignature = invoke.method_ref.subsignature.as_str();
    match invoke.kind {
        InvokeKind::Static => program.declared_method(invoke.method_ref.class, subsignature),
        InvokeKind::Special => dispatch(program, invoke.method_ref.class, subsignature),
        InvokeKind::Virtual | InvokeKind::Interface | InvokeKind::Dynamic => {
            let class = match recv_type {
                TypeRef::Class(c) => *c,
                TypeRef::Array(_) => program.root_class?,
            };
            dispatch(program, class, subsignature)
        }
    }
}
