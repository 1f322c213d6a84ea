//! Class Hierarchy Analysis (CHA) call graph
//!
//! Baseline call graph that resolves virtual and interface calls to every
//! concrete override in the referenced class and all of its transitive
//! subclasses, implementors and subinterfaces. No points-to information is
//! used, so it over-approximates the pointer-analysis call graph.

use super::dispatch::{dispatch, resolve_static};
use crate::errors::{PtaError, Result};
use crate::features::call_graph::domain::{CallGraph, CallKind, Edge};
use crate::shared::models::{ClassId, Invoke, InvokeKind, MethodId, Program, Stmt, StmtRef};
use rustc_hash::FxHashSet;
use std::collections::VecDeque;
use tracing::{debug, info};

/// Call graph over raw call sites and methods
pub type ChaCallGraph = CallGraph<StmtRef, MethodId>;

pub struct ChaBuilder<'a> {
    program: &'a Program,
    entries: Vec<MethodId>,
}

impl<'a> ChaBuilder<'a> {
    /// Builder starting from the program entry method (if any)
    pub fn new(program: &'a Program) -> Self {
        Self {
            program,
            entries: program.entry.into_iter().collect(),
        }
    }

    /// Add another entry method
    pub fn with_entry(mut self, method: MethodId) -> Self {
        if !self.entries.contains(&method) {
            self.entries.push(method);
        }
        self
    }

    /// Breadth-first construction from the entry methods
    pub fn build(&self) -> Result<ChaCallGraph> {
        if self.entries.is_empty() {
            return Err(PtaError::MissingEntry);
        }
        self.program.validate()?;
        self.program.ensure_indexed()?;

        let mut cg = ChaCallGraph::new();
        let mut queue: VecDeque<MethodId> = VecDeque::new();
        for &entry in &self.entries {
            cg.add_entry_method(entry);
            queue.push_back(entry);
        }

        while let Some(method) = queue.pop_front() {
            if !cg.add_reachable_method(method) {
                continue;
            }
            for (index, stmt) in self.program.method(method).stmts.iter().enumerate() {
                let Stmt::Invoke(invoke) = stmt else {
                    continue;
                };
                let site = StmtRef::new(method, index as u32);
                let kind = CallKind::from_invoke(invoke);
                for target in self.resolve(invoke)? {
                    if cg.add_edge(Edge::new(kind, site, target)) {
                        debug!(
                            "CHA edge {} -> {}",
                            site,
                            self.program.method_signature(target)
                        );
                    }
                    queue.push_back(target);
                }
            }
        }

        info!(
            "CHA call graph: {} reachable methods, {} edges",
            cg.num_reachable(),
            cg.num_edges()
        );
        Ok(cg)
    }

    /// All CHA targets of one call, sorted by method id
    pub fn resolve(&self, invoke: &Invoke) -> Result<Vec<MethodId>> {
        let subsignature = invoke.method_ref.subsignature.as_str();
        let mut targets = Vec::new();
        match invoke.kind {
            InvokeKind::Static => targets.push(resolve_static(self.program, invoke)?),
            InvokeKind::Special => {
                targets.extend(dispatch(self.program, invoke.method_ref.class, subsignature));
            }
            InvokeKind::Virtual | InvokeKind::Interface | InvokeKind::Dynamic => {
                for class in self.subtypes_of(invoke.method_ref.class) {
                    targets.extend(dispatch(self.program, class, subsignature));
                }
            }
        }
        targets.sort_unstable();
        targets.dedup();
        Ok(targets)
    }

    /// `class` and every transitive subclass, implementor and subinterface
    fn subtypes_of(&self, class: ClassId) -> Vec<ClassId> {
        let mut seen = FxHashSet::default();
        let mut order = Vec::new();
        let mut queue = VecDeque::from([class]);
        while let Some(c) = queue.pop_front() {
            if !seen.insert(c) {
                continue;
            }
            order.push(c);
            queue.extend(self.program.direct_subclasses_of(c));
            queue.extend(self.program.direct_implementors_of(c));
            queue.extend(self.program.direct_subinterfaces_of(c));
        }
        order
    }
}
