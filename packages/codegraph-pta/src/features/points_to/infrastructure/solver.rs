//! Context-sensitive inclusion solver
//!
//! Andersen-style propagation over a pointer flow graph that grows while the
//! call graph is discovered on the fly.
//!
//! # Algorithm
//! 1. Entry methods become reachable under the empty context
//! 2. Reachable methods wire allocations, copies, static fields and static
//!    calls immediately
//! 3. Instance field/array accesses and instance calls are wired only when a
//!    new object reaches their base/receiver variable
//! 4. Worklist entries `(pointer, delta)` are propagated along PFG edges
//!    until nothing changes
//!
//! Methods reached through new call edges go through a pending queue that
//! the main loop drains, so nothing here recurses.

use super::cs_manager::CSManager;
use super::pointer_flow_graph::PointerFlowGraph;
use super::worklist::{PendingMethods, WorkList};
use crate::config::WorklistOrder;
use crate::errors::{PtaError, Result};
use crate::features::call_graph::domain::{CallGraph, CallKind, Edge};
use crate::features::call_graph::infrastructure::dispatch::{resolve_callee, resolve_static};
use crate::features::points_to::domain::{
    CSCallSiteId, CSMethodId, CSObjId, CSVar, ContextId, Pointer, PointerId, PointsToSet,
};
use crate::features::points_to::ports::{ContextSelector, HeapModel, Receiver};
use crate::shared::models::{Invoke, MethodId, Program, Stmt, StmtRef};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, trace};

/// Context-sensitive call graph
pub type CSCallGraph = CallGraph<CSCallSiteId, CSMethodId>;

/// Solver counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolverStats {
    /// Worklist entries dequeued
    pub worklist_entries: usize,
    /// Entries that changed a points-to set
    pub propagations: usize,
    /// Instance calls with no concrete target for some receiver
    pub dispatch_misses: usize,
}

/// Everything the solver computed
#[derive(Debug)]
pub struct SolverOutput {
    pub cs_manager: CSManager,
    pub pfg: PointerFlowGraph,
    pub call_graph: CSCallGraph,
    pub stats: SolverStats,
}

pub struct Solver<'p> {
    program: &'p Program,
    selector: Arc<dyn ContextSelector>,
    heap_model: Arc<dyn HeapModel>,
    csm: CSManager,
    pfg: PointerFlowGraph,
    worklist: WorkList,
    pending: PendingMethods,
    call_graph: CSCallGraph,
    stats: SolverStats,
}

impl<'p> Solver<'p> {
    pub fn new(
        program: &'p Program,
        selector: Arc<dyn ContextSelector>,
        heap_model: Arc<dyn HeapModel>,
        order: WorklistOrder,
    ) -> Self {
        Self {
            program,
            selector,
            heap_model,
            csm: CSManager::new(),
            pfg: PointerFlowGraph::new(),
            worklist: WorkList::new(order),
            pending: PendingMethods::default(),
            call_graph: CSCallGraph::new(),
            stats: SolverStats::default(),
        }
    }

    /// Seed `entries` and run to the fixpoint
    pub fn solve(&mut self, entries: &[MethodId]) -> Result<()> {
        self.initialize(entries)?;
        self.analyze()
    }

    /// Make every entry method reachable under the selector's empty context
    pub fn initialize(&mut self, entries: &[MethodId]) -> Result<()> {
        if entries.is_empty() {
            return Err(PtaError::MissingEntry);
        }
        let ctx = self.csm.context_id(self.selector.empty_context());
        for &entry in entries {
            let cs_entry = self.csm.cs_method(ctx, entry);
            self.call_graph.add_entry_method(cs_entry);
            self.add_reachable(cs_entry)?;
        }
        Ok(())
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Reachability
    // ═══════════════════════════════════════════════════════════════════════

    /// Wire the statements of a newly reachable method. No-op if the method
    /// is already reachable.
    pub fn add_reachable(&mut self, cs_method: CSMethodId) -> Result<()> {
        if !self.call_graph.add_reachable_method(cs_method) {
            return Ok(());
        }
        let program = self.program;
        let m = self.csm.method(cs_method);
        let ctx = m.ctx;
        debug!(
            "reachable: {} {}",
            self.csm.context(ctx),
            program.method_signature(m.method)
        );

        for (index, stmt) in program.method(m.method).stmts.iter().enumerate() {
            let site = StmtRef::new(m.method, index as u32);
            match stmt {
                Stmt::New { lhs, .. } => {
                    let cs_obj = self.heap_object(ctx, site)?;
                    let ptr = self.csm.var_ptr(ctx, *lhs);
                    self.worklist.add_entry(ptr, PointsToSet::singleton(cs_obj));
                }
                Stmt::Copy { lhs, rhs } => {
                    let source = self.csm.var_ptr(ctx, *rhs);
                    let target = self.csm.var_ptr(ctx, *lhs);
                    self.add_pfg_edge(source, target);
                }
                Stmt::LoadStatic { lhs, field } => {
                    let source = self.csm.static_field_ptr(*field);
                    let target = self.csm.var_ptr(ctx, *lhs);
                    self.add_pfg_edge(source, target);
                }
                Stmt::StoreStatic { field, rhs } => {
                    let source = self.csm.var_ptr(ctx, *rhs);
                    let target = self.csm.static_field_ptr(*field);
                    self.add_pfg_edge(source, target);
                }
                Stmt::Invoke(invoke) if invoke.is_static() => {
                    let callee = resolve_static(program, invoke)?;
                    let callee_ctx = self.selector.select_context(
                        self.csm.context(ctx),
                        site,
                        None,
                        callee,
                    );
                    let callee_ctx = self.csm.context_id(callee_ctx);
                    let cs_callee = self.csm.cs_method(callee_ctx, callee);
                    let cs_site = self.csm.cs_call_site(ctx, site);
                    self.process_call_edge(Some(CallKind::Static), cs_site, cs_callee, invoke)?;
                }
                // instance accesses and calls wait for objects to arrive
                Stmt::LoadField { .. }
                | Stmt::StoreField { .. }
                | Stmt::LoadArray { .. }
                | Stmt::StoreArray { .. }
                | Stmt::Invoke(_) => {}
            }
        }
        Ok(())
    }

    /// Context-sensitive object for the allocation at `site`
    fn heap_object(&mut self, method_ctx: ContextId, site: StmtRef) -> Result<CSObjId> {
        let obj = self
            .heap_model
            .object_at(site)
            .ok_or_else(|| PtaError::MissingAllocation(site.to_string()))?;
        let heap_ctx = self
            .selector
            .select_heap_context(self.csm.context(method_ctx), obj);
        let obj_id = obj.id;
        let heap_ctx = self.csm.context_id(heap_ctx);
        Ok(self.csm.cs_obj(heap_ctx, obj_id))
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Pointer Flow Graph
    // ═══════════════════════════════════════════════════════════════════════

    /// Add `source → target`; a new edge forwards what `source` already holds
    pub fn add_pfg_edge(&mut self, source: PointerId, target: PointerId) {
        if self.pfg.add_edge(source, target) {
            let pts = self.csm.points_to(source);
            if !pts.is_empty() {
                self.worklist.add_entry(target, pts.clone());
            }
        }
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Fixpoint
    // ═══════════════════════════════════════════════════════════════════════

    /// Run until the worklist and the pending-method queue are both empty
    pub fn analyze(&mut self) -> Result<()> {
        while self.step()? {}
        Ok(())
    }

    /// Wire pending methods, then handle one worklist entry. Returns `false`
    /// once there is nothing left to do.
    pub fn step(&mut self) -> Result<bool> {
        while let Some(cs_method) = self.pending.pop() {
            self.add_reachable(cs_method)?;
        }
        let Some(entry) = self.worklist.poll_entry() else {
            return Ok(false);
        };
        self.stats.worklist_entries += 1;

        let delta = self.propagate(entry.pointer, &entry.points_to);
        if delta.is_empty() {
            return Ok(true);
        }
        if let Pointer::Var(var) = self.csm.pointer(entry.pointer) {
            for obj in delta.iter() {
                self.wire_instance_accesses(var, obj);
                self.process_call(var, obj)?;
            }
        }
        Ok(true)
    }

    /// Merge the new part of `points_to` into `pointer` and push it to the
    /// successors. Returns that new part.
    fn propagate(&mut self, pointer: PointerId, points_to: &PointsToSet) -> PointsToSet {
        let delta = points_to.difference(self.csm.points_to(pointer));
        if delta.is_empty() {
            return delta;
        }
        self.stats.propagations += 1;
        trace!(
            "propagate {} objects into {}",
            delta.len(),
            self.csm.pointer(pointer)
        );
        self.csm.points_to_mut(pointer).union_with(&delta);
        for &succ in self.pfg.successors(pointer) {
            self.worklist.add_entry(succ, delta.clone());
        }
        delta
    }

    /// Connect field and array accesses based on `var` to `obj`
    fn wire_instance_accesses(&mut self, var: CSVar, obj: CSObjId) {
        let program = self.program;
        let uses = program.var_uses(var.var);
        let ctx = var.ctx;

        for &site in &uses.store_fields {
            if let Stmt::StoreField { field, rhs, .. } = program.stmt(site) {
                let source = self.csm.var_ptr(ctx, *rhs);
                let target = self.csm.instance_field_ptr(obj, *field);
                self.add_pfg_edge(source, target);
            }
        }
        for &site in &uses.load_fields {
            if let Stmt::LoadField { lhs, field, .. } = program.stmt(site) {
                let source = self.csm.instance_field_ptr(obj, *field);
                let target = self.csm.var_ptr(ctx, *lhs);
                self.add_pfg_edge(source, target);
            }
        }
        for &site in &uses.store_arrays {
            if let Stmt::StoreArray { rhs, .. } = program.stmt(site) {
                let source = self.csm.var_ptr(ctx, *rhs);
                let target = self.csm.array_index_ptr(obj);
                self.add_pfg_edge(source, target);
            }
        }
        for &site in &uses.load_arrays {
            if let Stmt::LoadArray { lhs, .. } = program.stmt(site) {
                let source = self.csm.array_index_ptr(obj);
                let target = self.csm.var_ptr(ctx, *lhs);
                self.add_pfg_edge(source, target);
            }
        }
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Calls
    // ═══════════════════════════════════════════════════════════════════════

    /// Dispatch every instance call whose receiver is `var` on `recv`
    pub fn process_call(&mut self, var: CSVar, recv: CSObjId) -> Result<()> {
        let program = self.program;
        let cs_recv = self.csm.obj(recv);

        for &site in &program.var_uses(var.var).invokes {
            let Some(invoke) = program.stmt(site).as_invoke() else {
                continue;
            };
            let obj = self.heap_model.object(cs_recv.obj);
            let Some(callee) = resolve_callee(program, &obj.ty, invoke) else {
                self.stats.dispatch_misses += 1;
                trace!(
                    "no target for {} on {} at {}",
                    invoke.method_ref.subsignature,
                    program.type_name(&obj.ty),
                    site
                );
                continue;
            };

            let callee_ctx = self.selector.select_context(
                self.csm.context(var.ctx),
                site,
                Some(Receiver {
                    heap_ctx: self.csm.context(cs_recv.heap_ctx),
                    obj,
                }),
                callee,
            );
            let callee_ctx = self.csm.context_id(callee_ctx);
            let cs_callee = self.csm.cs_method(callee_ctx, callee);

            let this = program
                .method(callee)
                .this
                .ok_or_else(|| PtaError::MissingThis(program.method_signature(callee)))?;
            let this_ptr = self.csm.var_ptr(callee_ctx, this);
            self.worklist.add_entry(this_ptr, PointsToSet::singleton(recv));

            let cs_site = self.csm.cs_call_site(var.ctx, site);
            self.process_call_edge(None, cs_site, cs_callee, invoke)?;
        }
        Ok(())
    }

    /// Install `cs_site → cs_callee` once: record the edge, queue the callee
    /// and connect arguments, parameters and return values.
    pub fn process_call_edge(
        &mut self,
        kind: Option<CallKind>,
        cs_site: CSCallSiteId,
        cs_callee: CSMethodId,
        invoke: &Invoke,
    ) -> Result<()> {
        if self.call_graph.has_edge(cs_site, cs_callee) {
            return Ok(());
        }
        let program = self.program;
        let site = self.csm.call_site(cs_site);
        let callee = self.csm.method(cs_callee);
        let callee_method = program.method(callee.method);

        if invoke.args.len() != callee_method.params.len() {
            return Err(PtaError::ArityMismatch {
                call_site: format!("{} in {}", site.site, program.method_signature(site.site.method)),
                callee: program.method_signature(callee.method),
                args: invoke.args.len(),
                params: callee_method.params.len(),
            });
        }

        let kind = kind.unwrap_or_else(|| CallKind::from_invoke(invoke));
        self.call_graph.add_edge(Edge::new(kind, cs_site, cs_callee));
        debug!(
            "call edge [{}] {} {} -> {} {}",
            kind,
            self.csm.context(site.ctx),
            site.site,
            self.csm.context(callee.ctx),
            program.method_signature(callee.method)
        );
        self.pending.push(cs_callee);

        for (&arg, &param) in invoke.args.iter().zip(&callee_method.params) {
            let source = self.csm.var_ptr(site.ctx, arg);
            let target = self.csm.var_ptr(callee.ctx, param);
            self.add_pfg_edge(source, target);
        }
        if let Some(result) = invoke.result {
            let target = self.csm.var_ptr(site.ctx, result);
            for &ret in &callee_method.return_vars {
                let source = self.csm.var_ptr(callee.ctx, ret);
                self.add_pfg_edge(source, target);
            }
        }
        Ok(())
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Accessors
    // ═══════════════════════════════════════════════════════════════════════

    pub fn cs_manager(&self) -> &CSManager {
        &self.csm
    }

    pub fn pfg(&self) -> &PointerFlowGraph {
        &self.pfg
    }

    pub fn call_graph(&self) -> &CSCallGraph {
        &self.call_graph
    }

    pub fn stats(&self) -> SolverStats {
        self.stats
    }

    pub fn finish(self) -> SolverOutput {
        SolverOutput {
            cs_manager: self.csm,
            pfg: self.pfg,
            call_graph: self.call_graph,
            stats: self.stats,
        }
    }
}
