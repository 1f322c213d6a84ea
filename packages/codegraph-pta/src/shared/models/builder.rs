//! Fluent construction of `Program`s
//!
//! # Example
//! ```
//! use codegraph_pta::shared::models::{ProgramBuilder, TypeRef};
//!
//! let mut b = ProgramBuilder::new();
//! let object = b.class("Object");
//! let a = b.subclass("A", object);
//! let foo = b.method(a, "void foo()", |_m, _this| {});
//! let main = b.static_method(a, "void main()", |m| {
//!     let x = m.var("x");
//!     m.new_obj(x, a);
//!     m.call_virtual(x, a, "void foo()", &[], None);
//! });
//! b.entry(main);
//! let program = b.build().unwrap();
//! assert_eq!(program.method(foo).name(), "foo");
//! ```

use super::class::{Class, ClassId};
use super::field::{Field, FieldId};
use super::method::{Method, MethodId};
use super::program::Program;
use super::stmt::{Invoke, InvokeKind, MethodRef, Stmt, StmtRef, TypeRef};
use super::var::{Var, VarId};
use crate::errors::Result;

/// Builder for `Program`
#[derive(Debug, Default)]
pub struct ProgramBuilder {
    program: Program,
}

impl ProgramBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Hierarchy
    // ═══════════════════════════════════════════════════════════════════════

    /// Add a class without a superclass
    pub fn class(&mut self, name: &str) -> ClassId {
        let id = self.program.classes.len() as ClassId;
        self.program.classes.push(Class::new(id, name));
        id
    }

    /// Add a class extending `superclass`
    pub fn subclass(&mut self, name: &str, superclass: ClassId) -> ClassId {
        let id = self.class(name);
        self.program.classes[id as usize].superclass = Some(superclass);
        id
    }

    /// Add an interface
    pub fn interface(&mut self, name: &str) -> ClassId {
        let id = self.class(name);
        let class = &mut self.program.classes[id as usize];
        class.is_interface = true;
        class.is_abstract = true;
        id
    }

    /// `class implements interface` (or `interface extends interface`)
    pub fn implements(&mut self, class: ClassId, interface: ClassId) -> &mut Self {
        self.program.classes[class as usize].interfaces.push(interface);
        self
    }

    pub fn set_abstract(&mut self, class: ClassId) -> &mut Self {
        self.program.classes[class as usize].is_abstract = true;
        self
    }

    /// Class whose methods arrays inherit
    pub fn root_class(&mut self, class: ClassId) -> &mut Self {
        self.program.root_class = Some(class);
        self
    }

    pub fn field(&mut self, class: ClassId, name: &str) -> FieldId {
        self.add_field(class, name, false)
    }

    pub fn static_field(&mut self, class: ClassId, name: &str) -> FieldId {
        self.add_field(class, name, true)
    }

    fn add_field(&mut self, class: ClassId, name: &str, is_static: bool) -> FieldId {
        let id = self.program.fields.len() as FieldId;
        self.program.fields.push(Field {
            id,
            name: name.to_string(),
            declaring_class: class,
            is_static,
        });
        id
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Methods
    // ═══════════════════════════════════════════════════════════════════════

    /// Add a static method and build its body
    pub fn static_method(
        &mut self,
        class: ClassId,
        subsignature: &str,
        body: impl FnOnce(&mut MethodBuilder<'_>),
    ) -> MethodId {
        let id = self.declare(class, subsignature, true, false);
        let Program { methods, vars, .. } = &mut self.program;
        let mut builder = MethodBuilder {
            method: &mut methods[id as usize],
            vars,
        };
        body(&mut builder);
        id
    }

    /// Add an instance method; the closure receives the `this` variable
    pub fn method(
        &mut self,
        class: ClassId,
        subsignature: &str,
        body: impl FnOnce(&mut MethodBuilder<'_>, VarId),
    ) -> MethodId {
        let id = self.declare(class, subsignature, false, false);
        let Program { methods, vars, .. } = &mut self.program;
        let mut builder = MethodBuilder {
            method: &mut methods[id as usize],
            vars,
        };
        let this = builder.var("this");
        builder.method.this = Some(this);
        body(&mut builder, this);
        id
    }

    /// Add an abstract instance method with `arity` parameters
    pub fn abstract_method(&mut self, class: ClassId, subsignature: &str, arity: usize) -> MethodId {
        let id = self.declare(class, subsignature, false, true);
        let Program { methods, vars, .. } = &mut self.program;
        let mut builder = MethodBuilder {
            method: &mut methods[id as usize],
            vars,
        };
        let this = builder.var("this");
        builder.method.this = Some(this);
        for i in 0..arity {
            builder.param(&format!("p{}", i));
        }
        id
    }

    fn declare(
        &mut self,
        class: ClassId,
        subsignature: &str,
        is_static: bool,
        is_abstract: bool,
    ) -> MethodId {
        let id = self.program.methods.len() as MethodId;
        self.program.methods.push(Method {
            id,
            declaring_class: class,
            subsignature: subsignature.to_string(),
            is_static,
            is_abstract,
            this: None,
            params: Vec::new(),
            return_vars: Vec::new(),
            stmts: Vec::new(),
        });
        if let Some(c) = self.program.classes.get_mut(class as usize) {
            c.declared_methods.insert(subsignature.to_string(), id);
        }
        id
    }

    /// Set the program entry method
    pub fn entry(&mut self, method: MethodId) -> &mut Self {
        self.program.entry = Some(method);
        self
    }

    /// Validate and index the program
    pub fn build(self) -> Result<Program> {
        let mut program = self.program;
        program.validate()?;
        program.reindex();
        Ok(program)
    }
}

/// Appends variables and statements to one method body
#[derive(Debug)]
pub struct MethodBuilder<'a> {
    method: &'a mut Method,
    vars: &'a mut Vec<Var>,
}

impl<'a> MethodBuilder<'a> {
    pub fn id(&self) -> MethodId {
        self.method.id
    }

    /// Declare a local variable
    pub fn var(&mut self, name: &str) -> VarId {
        let id = self.vars.len() as VarId;
        self.vars.push(Var {
            id,
            name: name.to_string(),
            method: self.method.id,
        });
        id
    }

    /// Declare the next formal parameter
    pub fn param(&mut self, name: &str) -> VarId {
        let id = self.var(name);
        self.method.params.push(id);
        id
    }

    /// `return var`
    pub fn ret(&mut self, var: VarId) -> &mut Self {
        self.method.return_vars.push(var);
        self
    }

    /// Append a raw statement
    pub fn stmt(&mut self, stmt: Stmt) -> StmtRef {
        let at = StmtRef::new(self.method.id, self.method.stmts.len() as u32);
        self.method.stmts.push(stmt);
        at
    }

    pub fn new_obj(&mut self, lhs: VarId, class: ClassId) -> StmtRef {
        self.stmt(Stmt::New {
            lhs,
            ty: TypeRef::Class(class),
        })
    }

    /// `lhs = new elem[n]`
    pub fn new_array(&mut self, lhs: VarId, elem: TypeRef) -> StmtRef {
        self.stmt(Stmt::New {
            lhs,
            ty: TypeRef::array_of(elem),
        })
    }

    pub fn assign(&mut self, lhs: VarId, rhs: VarId) -> StmtRef {
        self.stmt(Stmt::Copy { lhs, rhs })
    }

    pub fn load_field(&mut self, lhs: VarId, base: VarId, field: FieldId) -> StmtRef {
        self.stmt(Stmt::LoadField { lhs, base, field })
    }

    pub fn store_field(&mut self, base: VarId, field: FieldId, rhs: VarId) -> StmtRef {
        self.stmt(Stmt::StoreField { base, field, rhs })
    }

    pub fn load_static(&mut self, lhs: VarId, field: FieldId) -> StmtRef {
        self.stmt(Stmt::LoadStatic { lhs, field })
    }

    pub fn store_static(&mut self, field: FieldId, rhs: VarId) -> StmtRef {
        self.stmt(Stmt::StoreStatic { field, rhs })
    }

    pub fn load_array(&mut self, lhs: VarId, base: VarId) -> StmtRef {
        self.stmt(Stmt::LoadArray { lhs, base })
    }

    pub fn store_array(&mut self, base: VarId, rhs: VarId) -> StmtRef {
        self.stmt(Stmt::StoreArray { base, rhs })
    }

    pub fn call_static(
        &mut self,
        class: ClassId,
        subsignature: &str,
        args: &[VarId],
        result: Option<VarId>,
    ) -> StmtRef {
        self.invoke(InvokeKind::Static, None, class, subsignature, args, result)
    }

    pub fn call_virtual(
        &mut self,
        receiver: VarId,
        class: ClassId,
        subsignature: &str,
        args: &[VarId],
        result: Option<VarId>,
    ) -> StmtRef {
        self.invoke(InvokeKind::Virtual, Some(receiver), class, subsignature, args, result)
    }

    pub fn call_interface(
        &mut self,
        receiver: VarId,
        class: ClassId,
        subsignature: &str,
        args: &[VarId],
        result: Option<VarId>,
    ) -> StmtRef {
        self.invoke(InvokeKind::Interface, Some(receiver), class, subsignature, args, result)
    }

    pub fn call_special(
        &mut self,
        receiver: VarId,
        class: ClassId,
        subsignature: &str,
        args: &[VarId],
        result: Option<VarId>,
    ) -> StmtRef {
        self.invoke(InvokeKind::Special, Some(receiver), class, subsignature, args, result)
    }

    pub fn call_dynamic(
        &mut self,
        receiver: VarId,
        class: ClassId,
        subsignature: &str,
        args: &[VarId],
        result: Option<VarId>,
    ) -> StmtRef {
        self.invoke(InvokeKind::Dynamic, Some(receiver), class, subsignature, args, result)
    }

    fn invoke(
        &mut self,
        kind: InvokeKind,
        receiver: Option<VarId>,
        class: ClassId,
        subsignature: &str,
        args: &[VarId],
        result: Option<VarId>,
    ) -> StmtRef {
        self.stmt(Stmt::Invoke(Invoke {
            kind,
            method_ref: MethodRef::new(class, subsignature),
            receiver,
            args: args.to_vec(),
            result,
        }))
    }
}
