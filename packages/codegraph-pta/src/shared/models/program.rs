//! Whole-program IR and class hierarchy
//!
//! `Program` is the input to every analysis in this crate. Entities are
//! stored in flat vectors and addressed by their `u32` ids; ids are positions,
//! which `validate()` checks.

use super::class::{Class, ClassId};
use super::field::{Field, FieldId};
use super::method::{Method, MethodId};
use super::stmt::{Stmt, StmtRef, TypeRef};
use super::var::{Var, VarId, VarUses};
use crate::errors::{PtaError, Result};
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Derived lookup tables, rebuilt by `Program::reindex`
#[derive(Debug, Clone, Default)]
struct ProgramIndex {
    var_uses: Vec<VarUses>,
    direct_subclasses: Vec<Vec<ClassId>>,
    direct_implementors: Vec<Vec<ClassId>>,
    direct_subinterfaces: Vec<Vec<ClassId>>,
    classes_by_name: FxHashMap<String, ClassId>,
    /// Statement count at indexing time
    num_stmts: usize,
}

/// A complete program: hierarchy, fields, methods with bodies, variables.
///
/// Deserializing goes through `ProgramData`, so a deserialized program is
/// always validated and indexed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(try_from = "ProgramData")]
pub struct Program {
    pub classes: Vec<Class>,
    #[serde(default)]
    pub fields: Vec<Field>,
    pub methods: Vec<Method>,
    #[serde(default)]
    pub vars: Vec<Var>,

    /// Program entry (`main`)
    pub entry: Option<MethodId>,

    /// Class every array type inherits methods from (`java.lang.Object`)
    #[serde(default)]
    pub root_class: Option<ClassId>,

    #[serde(skip)]
    index: ProgramIndex,
}

/// Serialized form of a `Program`, before validation and indexing
#[derive(Debug, Clone, Deserialize)]
pub struct ProgramData {
    pub classes: Vec<Class>,
    #[serde(default)]
    pub fields: Vec<Field>,
    pub methods: Vec<Method>,
    #[serde(default)]
    pub vars: Vec<Var>,
    pub entry: Option<MethodId>,
    #[serde(default)]
    pub root_class: Option<ClassId>,
}

impl TryFrom<ProgramData> for Program {
    type Error = PtaError;

    fn try_from(data: ProgramData) -> Result<Self> {
        let mut program = Program {
            classes: data.classes,
            fields: data.fields,
            methods: data.methods,
            vars: data.vars,
            entry: data.entry,
            root_class: data.root_class,
            index: ProgramIndex::default(),
        };
        program.validate()?;
        program.reindex();
        Ok(program)
    }
}

impl Program {
    /// Load a program from JSON, validate it and build its indexes
    pub fn from_json(json: &str) -> Result<Self> {
        let data: ProgramData = serde_json::from_str(json)?;
        Program::try_from(data)
    }

    /// Load a program from a JSON file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Entity Access
    // ═══════════════════════════════════════════════════════════════════════

    #[inline]
    pub fn class(&self, id: ClassId) -> &Class {
        &self.classes[id as usize]
    }

    #[inline]
    pub fn field(&self, id: FieldId) -> &Field {
        &self.fields[id as usize]
    }

    #[inline]
    pub fn method(&self, id: MethodId) -> &Method {
        &self.methods[id as usize]
    }

    #[inline]
    pub fn var(&self, id: VarId) -> &Var {
        &self.vars[id as usize]
    }

    /// Statement at a location
    #[inline]
    pub fn stmt(&self, at: StmtRef) -> &Stmt {
        &self.method(at.method).stmts[at.index as usize]
    }

    /// Heap-access and call statements using `var` as base/receiver
    pub fn var_uses(&self, var: VarId) -> &VarUses {
        static EMPTY: VarUses = VarUses {
            store_fields: Vec::new(),
            load_fields: Vec::new(),
            store_arrays: Vec::new(),
            load_arrays: Vec::new(),
            invokes: Vec::new(),
        };
        self.index.var_uses.get(var as usize).unwrap_or(&EMPTY)
    }

    /// `<Class: subsignature>`
    pub fn method_signature(&self, id: MethodId) -> String {
        let method = self.method(id);
        format!(
            "<{}: {}>",
            self.class(method.declaring_class).name,
            method.subsignature
        )
    }

    /// Human-readable `method/var` name
    pub fn var_name(&self, id: VarId) -> String {
        let var = self.var(id);
        format!("{}/{}", self.method_signature(var.method), var.name)
    }

    /// Human-readable name of a type
    pub fn type_name(&self, ty: &TypeRef) -> String {
        match ty {
            TypeRef::Class(c) => self.class(*c).name.clone(),
            TypeRef::Array(elem) => format!("{}[]", self.type_name(elem)),
        }
    }

    pub fn class_by_name(&self, name: &str) -> Option<ClassId> {
        self.index.classes_by_name.get(name).copied()
    }

    /// Look up a method by `<Class: subsignature>` or `Class.name` form
    pub fn method_by_signature(&self, signature: &str) -> Option<MethodId> {
        if let Some(inner) = signature
            .strip_prefix('<')
            .and_then(|s| s.strip_suffix('>'))
        {
            let (class, subsig) = inner.split_once(": ")?;
            let class = self.class_by_name(class)?;
            return self.class(class).declared_method(subsig);
        }
        let (class, name) = signature.rsplit_once('.')?;
        let class = self.class_by_name(class)?;
        self.methods
            .iter()
            .find(|m| m.declaring_class == class && m.name() == name)
            .map(|m| m.id)
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Class Hierarchy
    // ═══════════════════════════════════════════════════════════════════════

    #[inline]
    pub fn superclass_of(&self, class: ClassId) -> Option<ClassId> {
        self.class(class).superclass
    }

    pub fn direct_subclasses_of(&self, class: ClassId) -> &[ClassId] {
        self.index
            .direct_subclasses
            .get(class as usize)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn direct_implementors_of(&self, interface: ClassId) -> &[ClassId] {
        self.index
            .direct_implementors
            .get(interface as usize)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn direct_subinterfaces_of(&self, interface: ClassId) -> &[ClassId] {
        self.index
            .direct_subinterfaces
            .get(interface as usize)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Method declared directly in `class` with `subsignature`
    #[inline]
    pub fn declared_method(&self, class: ClassId, subsignature: &str) -> Option<MethodId> {
        self.class(class).declared_method(subsignature)
    }

    /// `true` if `sub` is `sup` or inherits from it (classes and interfaces)
    pub fn is_subtype(&self, sub: ClassId, sup: ClassId) -> bool {
        let mut stack = vec![sub];
        while let Some(c) = stack.pop() {
            if c == sup {
                return true;
            }
            let class = self.class(c);
            stack.extend(class.superclass);
            stack.extend(class.interfaces.iter().copied());
        }
        false
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Validation & Indexing
    // ═══════════════════════════════════════════════════════════════════════

    /// Check every cross reference. A failure means the front end handed us
    /// a malformed program; nothing downstream tries to recover from it.
    pub fn validate(&self) -> Result<()> {
        let class_ok = |c: ClassId| (c as usize) < self.classes.len();
        let field_ok = |f: FieldId| (f as usize) < self.fields.len();
        let var_ok = |v: VarId| (v as usize) < self.vars.len();

        let mut class_names: FxHashSet<&str> = FxHashSet::default();
        for (i, class) in self.classes.iter().enumerate() {
            if class.id as usize != i {
                return Err(PtaError::InvalidProgram(format!(
                    "class '{}' has id {} at position {}",
                    class.name, class.id, i
                )));
            }
            if !class_names.insert(class.name.as_str()) {
                return Err(PtaError::InvalidProgram(format!(
                    "duplicate class '{}'",
                    class.name
                )));
            }
            for &c in class.superclass.iter().chain(&class.interfaces) {
                if !class_ok(c) {
                    return Err(PtaError::DanglingClass(c));
                }
            }
            for (subsig, &m) in &class.declared_methods {
                let Some(method) = self.methods.get(m as usize) else {
                    return Err(PtaError::DanglingMethod(format!(
                        "method #{} declared in '{}'",
                        m, class.name
                    )));
                };
                if method.declaring_class != class.id || method.subsignature != *subsig {
                    return Err(PtaError::InvalidProgram(format!(
                        "'{}' lists method #{} as '{}', but it is '{}' declared in class #{}",
                        class.name, m, subsig, method.subsignature, method.declaring_class
                    )));
                }
            }
        }
        self.check_acyclic_hierarchy()?;

        for (i, field) in self.fields.iter().enumerate() {
            if field.id as usize != i {
                return Err(PtaError::InvalidProgram(format!(
                    "field '{}' has id {} at position {}",
                    field.name, field.id, i
                )));
            }
            if !class_ok(field.declaring_class) {
                return Err(PtaError::DanglingClass(field.declaring_class));
            }
        }

        let mut names: FxHashSet<(MethodId, &str)> = FxHashSet::default();
        for (i, var) in self.vars.iter().enumerate() {
            if var.id as usize != i || (var.method as usize) >= self.methods.len() {
                return Err(PtaError::InvalidProgram(format!(
                    "variable '{}' (id {}) is misplaced or belongs to an unknown method",
                    var.name, var.id
                )));
            }
            if !names.insert((var.method, var.name.as_str())) {
                return Err(PtaError::InvalidProgram(format!(
                    "duplicate variable '{}' in method #{}",
                    var.name, var.method
                )));
            }
        }

        for (i, method) in self.methods.iter().enumerate() {
            if method.id as usize != i {
                return Err(PtaError::InvalidProgram(format!(
                    "method '{}' has id {} at position {}",
                    method.subsignature, method.id, i
                )));
            }
            if !class_ok(method.declaring_class) {
                return Err(PtaError::DanglingClass(method.declaring_class));
            }
            let listed = self.classes[method.declaring_class as usize]
                .declared_method(&method.subsignature);
            if listed != Some(method.id) {
                return Err(PtaError::InvalidProgram(format!(
                    "method #{} '{}' is not the one class #{} declares under that subsignature",
                    method.id, method.subsignature, method.declaring_class
                )));
            }
            if !method.is_static && method.this.is_none() {
                return Err(PtaError::MissingThis(self.method_signature(method.id)));
            }
            let mut vars: Vec<VarId> = method
                .this
                .iter()
                .chain(&method.params)
                .chain(&method.return_vars)
                .copied()
                .collect();
            for stmt in &method.stmts {
                match stmt {
                    Stmt::New { lhs, ty } => {
                        vars.push(*lhs);
                        let mut elem = ty;
                        while let TypeRef::Array(inner) = elem {
                            elem = inner;
                        }
                        if let TypeRef::Class(c) = elem {
                            if !class_ok(*c) {
                                return Err(PtaError::DanglingClass(*c));
                            }
                        }
                    }
                    Stmt::Copy { lhs, rhs } => vars.extend([*lhs, *rhs]),
                    Stmt::LoadStatic { lhs, field } | Stmt::StoreStatic { field, rhs: lhs } => {
                        vars.push(*lhs);
                        if !field_ok(*field) {
                            return Err(PtaError::DanglingField(*field));
                        }
                    }
                    Stmt::LoadField { lhs, base, field }
                    | Stmt::StoreField {
                        base,
                        field,
                        rhs: lhs,
                    } => {
                        vars.extend([*lhs, *base]);
                        if !field_ok(*field) {
                            return Err(PtaError::DanglingField(*field));
                        }
                    }
                    Stmt::LoadArray { lhs, base } | Stmt::StoreArray { base, rhs: lhs } => {
                        vars.extend([*lhs, *base])
                    }
                    Stmt::Invoke(invoke) => {
                        if !class_ok(invoke.method_ref.class) {
                            return Err(PtaError::DanglingClass(invoke.method_ref.class));
                        }
                        if !invoke.is_static() && invoke.receiver.is_none() {
                            return Err(PtaError::InvalidProgram(format!(
                                "{:?} call to '{}' in {} has no receiver",
                                invoke.kind,
                                invoke.method_ref.subsignature,
                                self.method_signature(method.id)
                            )));
                        }
                        vars.extend(invoke.receiver);
                        vars.extend(invoke.args.iter().copied());
                        vars.extend(invoke.result);
                    }
                }
            }
            if let Some(&bad) = vars.iter().find(|&&v| !var_ok(v)) {
                return Err(PtaError::DanglingVar(bad));
            }
            if let Some(&foreign) = vars
                .iter()
                .find(|&&v| self.vars[v as usize].method != method.id)
            {
                let var = &self.vars[foreign as usize];
                return Err(PtaError::InvalidProgram(format!(
                    "{} uses variable '{}' of method #{}",
                    self.method_signature(method.id),
                    var.name,
                    var.method
                )));
            }
        }

        for &c in self.root_class.iter() {
            if !class_ok(c) {
                return Err(PtaError::DanglingClass(c));
            }
        }
        match self.entry {
            Some(m) if (m as usize) < self.methods.len() => Ok(()),
            Some(m) => Err(PtaError::DanglingMethod(format!("entry method #{}", m))),
            None => Ok(()),
        }
    }

    /// Reject superclass / interface cycles
    fn check_acyclic_hierarchy(&self) -> Result<()> {
        #[derive(Clone, Copy, PartialEq, Eq)]
        enum Mark {
            Unvisited,
            OnPath,
            Done,
        }

        let mut marks = vec![Mark::Unvisited; self.classes.len()];
        for root in 0..self.classes.len() {
            if marks[root] != Mark::Unvisited {
                continue;
            }
            marks[root] = Mark::OnPath;
            // (class, index of the next supertype to visit)
            let mut stack: Vec<(usize, usize)> = vec![(root, 0)];
            while let Some(top) = stack.last_mut() {
                let (c, next) = *top;
                let class = &self.classes[c];
                match class.superclass.iter().chain(&class.interfaces).nth(next) {
                    Some(&sup) => {
                        top.1 += 1;
                        let sup = sup as usize;
                        match marks[sup] {
                            Mark::OnPath => {
                                return Err(PtaError::InvalidProgram(format!(
                                    "cyclic class hierarchy through '{}' and '{}'",
                                    class.name, self.classes[sup].name
                                )))
                            }
                            Mark::Unvisited => {
                                marks[sup] = Mark::OnPath;
                                stack.push((sup, 0));
                            }
                            Mark::Done => {}
                        }
                    }
                    None => {
                        marks[c] = Mark::Done;
                        stack.pop();
                    }
                }
            }
        }
        Ok(())
    }

    /// Fails if the derived indexes do not describe the current entities,
    /// i.e. the program was assembled or edited without `reindex()`.
    pub fn ensure_indexed(&self) -> Result<()> {
        let num_stmts: usize = self.methods.iter().map(|m| m.stmts.len()).sum();
        if self.index.var_uses.len() != self.vars.len()
            || self.index.direct_subclasses.len() != self.classes.len()
            || self.index.num_stmts != num_stmts
        {
            return Err(PtaError::InvalidProgram(
                "program indexes are out of date; call Program::reindex() after editing".to_string(),
            ));
        }
        Ok(())
    }

    /// Rebuild derived indexes. Must be called after any structural change.
    pub fn reindex(&mut self) {
        let n_classes = self.classes.len();
        let mut index = ProgramIndex {
            var_uses: vec![VarUses::default(); self.vars.len()],
            direct_subclasses: vec![Vec::new(); n_classes],
            direct_implementors: vec![Vec::new(); n_classes],
            direct_subinterfaces: vec![Vec::new(); n_classes],
            classes_by_name: FxHashMap::default(),
            num_stmts: self.methods.iter().map(|m| m.stmts.len()).sum(),
        };

        for class in &self.classes {
            index.classes_by_name.insert(class.name.clone(), class.id);
            if let Some(sup) = class.superclass {
                index.direct_subclasses[sup as usize].push(class.id);
            }
            for &i in &class.interfaces {
                if class.is_interface {
                    index.direct_subinterfaces[i as usize].push(class.id);
                } else {
                    index.direct_implementors[i as usize].push(class.id);
                }
            }
        }

        for method in &self.methods {
            for (i, stmt) in method.stmts.iter().enumerate() {
                let at = StmtRef::new(method.id, i as u32);
                let (base, slot) = match stmt {
                    Stmt::StoreField { base, .. } => (*base, 0),
                    Stmt::LoadField { base, .. } => (*base, 1),
                    Stmt::StoreArray { base, .. } => (*base, 2),
                    Stmt::LoadArray { base, .. } => (*base, 3),
                    Stmt::Invoke(invoke) => match invoke.receiver {
                        Some(recv) if !invoke.is_static() => (recv, 4),
                        _ => continue,
                    },
                    _ => continue,
                };
                let uses = &mut index.var_uses[base as usize];
                match slot {
                    0 => uses.store_fields.push(at),
                    1 => uses.load_fields.push(at),
                    2 => uses.store_arrays.push(at),
                    3 => uses.load_arrays.push(at),
                    _ => uses.invokes.push(at),
                }
            }
        }

        self.index = index;
    }
}
