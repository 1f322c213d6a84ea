//! Pointer analysis result
//!
//! Read-only view over the solver state with two levels of queries:
//! - **Context-sensitive**: per `Pointer` / `CSMethod` / `CSCallSite`
//! - **Context-insensitive projections**: contexts erased, abstract objects
//!   and raw methods only
//!
//! The projected call graph can be exported to `petgraph`, and
//! `AnalysisSummary` gives a serializable report.

use crate::errors::Result;
use crate::features::call_graph::domain::{CallGraph, CallKind, Edge};
use crate::features::points_to::domain::{
    AbstractObject, CSCallSite, CSMethod, CSObj, CSObjId, Context, ContextId, ObjId, Pointer,
};
use crate::features::points_to::infrastructure::{SolverOutput, SolverStats};
use crate::features::points_to::ports::HeapModel;
use crate::shared::models::{FieldId, MethodId, Program, StmtRef, VarId};
use petgraph::graph::{DiGraph, NodeIndex};
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Call edge with its endpoints resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CSCallEdge {
    pub kind: CallKind,
    pub call_site: CSCallSite,
    pub callee: CSMethod,
}

/// Size and effort counters
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisStats {
    /// Distinct methods reachable in some context
    pub reachable_methods: usize,
    /// Reachable (context, method) pairs
    pub cs_methods: usize,
    pub contexts: usize,
    pub cs_objects: usize,
    pub pointers: usize,
    pub pfg_edges: usize,
    pub call_edges: usize,
    pub worklist_entries: usize,
    pub propagations: usize,
    pub dispatch_misses: usize,
    pub duration_ms: f64,
}

/// `Pointer` with contexts erased; objects are abstract objects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum ProjectedPointer {
    Var(VarId),
    InstanceField(ObjId, FieldId),
    StaticField(FieldId),
    ArrayIndex(ObjId),
}

/// Context-insensitive projection of the pointer state
#[derive(Debug, Default)]
struct Projection {
    vars: FxHashMap<VarId, Vec<ObjId>>,
    instance_fields: FxHashMap<(ObjId, FieldId), Vec<ObjId>>,
    static_fields: FxHashMap<FieldId, Vec<ObjId>>,
    arrays: FxHashMap<ObjId, Vec<ObjId>>,
}

pub struct PointerAnalysisResult {
    output: SolverOutput,
    heap_model: Arc<dyn HeapModel>,
    selector_name: String,
    duration_ms: f64,
    projection: Projection,
}

impl PointerAnalysisResult {
    pub fn new(
        output: SolverOutput,
        heap_model: Arc<dyn HeapModel>,
        selector_name: String,
        duration_ms: f64,
    ) -> Self {
        let projection = Self::project(&output);
        Self {
            output,
            heap_model,
            selector_name,
            duration_ms,
            projection,
        }
    }

    fn project(output: &SolverOutput) -> Projection {
        let csm = &output.cs_manager;
        let mut sets: FxHashMap<ProjectedPointer, FxHashSet<ObjId>> = FxHashMap::default();
        for (id, pointer) in csm.pointers() {
            let pts = csm.points_to(id);
            if pts.is_empty() {
                continue;
            }
            // erase contexts in the pointer and in every object it holds
            let key = match pointer {
                Pointer::Var(v) => ProjectedPointer::Var(v.var),
                Pointer::InstanceField { base, field } => {
                    ProjectedPointer::InstanceField(csm.obj(base).obj, field)
                }
                Pointer::StaticField { field } => ProjectedPointer::StaticField(field),
                Pointer::ArrayIndex { array } => ProjectedPointer::ArrayIndex(csm.obj(array).obj),
            };
            sets.entry(key)
                .or_default()
                .extend(pts.iter().map(|o| csm.obj(o).obj));
        }

        let mut projection = Projection::default();
        for (key, set) in sets {
            let mut objs: Vec<ObjId> = set.into_iter().collect();
            objs.sort_unstable();
            match key {
                ProjectedPointer::Var(var) => {
                    projection.vars.insert(var, objs);
                }
                ProjectedPointer::InstanceField(base, field) => {
                    projection.instance_fields.insert((base, field), objs);
                }
                ProjectedPointer::StaticField(field) => {
                    projection.static_fields.insert(field, objs);
                }
                ProjectedPointer::ArrayIndex(array) => {
                    projection.arrays.insert(array, objs);
                }
            }
        }
        projection
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Entities
    // ═══════════════════════════════════════════════════════════════════════

    /// Name of the context selector that produced this result
    pub fn selector_name(&self) -> &str {
        &self.selector_name
    }

    pub fn object(&self, id: ObjId) -> &AbstractObject {
        self.heap_model.object(id)
    }

    pub fn objects(&self) -> &[AbstractObject] {
        self.heap_model.objects()
    }

    pub fn context(&self, id: ContextId) -> &Context {
        self.output.cs_manager.context(id)
    }

    pub fn cs_obj(&self, id: CSObjId) -> CSObj {
        self.output.cs_manager.obj(id)
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Call graph (context-sensitive)
    // ═══════════════════════════════════════════════════════════════════════

    pub fn entry_methods(&self) -> Vec<CSMethod> {
        let csm = &self.output.cs_manager;
        self.output
            .call_graph
            .entry_methods()
            .iter()
            .map(|&m| csm.method(m))
            .collect()
    }

    /// Reachable (context, method) pairs in discovery order
    pub fn reachable_methods(&self) -> Vec<CSMethod> {
        let csm = &self.output.cs_manager;
        self.output
            .call_graph
            .reachable_methods()
            .iter()
            .map(|&m| csm.method(m))
            .collect()
    }

    pub fn call_edges(&self) -> Vec<CSCallEdge> {
        let csm = &self.output.cs_manager;
        self.output
            .call_graph
            .edges()
            .iter()
            .map(|e| CSCallEdge {
                kind: e.kind,
                call_site: csm.call_site(e.call_site),
                callee: csm.method(e.callee),
            })
            .collect()
    }

    /// Contexts under which `method` was analyzed
    pub fn contexts_of(&self, method: MethodId) -> Vec<&Context> {
        self.reachable_methods()
            .into_iter()
            .filter(|m| m.method == method)
            .map(|m| self.context(m.ctx))
            .collect()
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Call graph (context-insensitive projection)
    // ═══════════════════════════════════════════════════════════════════════

    /// Distinct reachable methods, sorted by id
    pub fn reachable_ci_methods(&self) -> Vec<MethodId> {
        let mut methods: Vec<MethodId> = self
            .reachable_methods()
            .into_iter()
            .map(|m| m.method)
            .collect();
        methods.sort_unstable();
        methods.dedup();
        methods
    }

    pub fn is_reachable(&self, method: MethodId) -> bool {
        self.reachable_methods().iter().any(|m| m.method == method)
    }

    /// Call graph with contexts erased
    pub fn ci_call_graph(&self) -> CallGraph<StmtRef, MethodId> {
        let mut cg = CallGraph::new();
        for m in self.entry_methods() {
            cg.add_entry_method(m.method);
        }
        for m in self.reachable_methods() {
            cg.add_reachable_method(m.method);
        }
        for e in self.call_edges() {
            cg.add_edge(Edge::new(e.kind, e.call_site.site, e.callee.method));
        }
        cg
    }

    /// Methods called from `site` in any context, sorted by id
    pub fn callees_of(&self, site: StmtRef) -> Vec<MethodId> {
        let mut callees: Vec<MethodId> = self
            .call_edges()
            .into_iter()
            .filter(|e| e.call_site.site == site)
            .map(|e| e.callee.method)
            .collect();
        callees.sort_unstable();
        callees.dedup();
        callees
    }

    /// Projected call graph as a petgraph `DiGraph`; node weights are
    /// method ids, edge weights call kinds (one edge per call site).
    pub fn to_petgraph(&self) -> DiGraph<MethodId, CallKind> {
        let cg = self.ci_call_graph();
        let mut graph = DiGraph::new();
        let mut nodes: FxHashMap<MethodId, NodeIndex> = FxHashMap::default();
        for &m in cg.reachable_methods() {
            nodes.insert(m, graph.add_node(m));
        }
        for e in cg.edges() {
            let caller = e.call_site.method;
            let (Some(&from), Some(&to)) = (nodes.get(&caller), nodes.get(&e.callee)) else {
                continue;
            };
            graph.add_edge(from, to, e.kind);
        }
        graph
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Points-to (context-sensitive)
    // ═══════════════════════════════════════════════════════════════════════

    /// Points-to set of a context-sensitive pointer; empty if never created
    pub fn cs_points_to(&self, pointer: &Pointer) -> Vec<CSObj> {
        let csm = &self.output.cs_manager;
        csm.find_pointer(pointer)
            .map(|p| csm.points_to(p).iter().map(|o| csm.obj(o)).collect())
            .unwrap_or_default()
    }

    /// Every context-sensitive pointer with its points-to set
    pub fn cs_pointers(&self) -> Vec<(Pointer, Vec<CSObj>)> {
        let csm = &self.output.cs_manager;
        csm.pointers()
            .map(|(id, p)| (p, csm.points_to(id).iter().map(|o| csm.obj(o)).collect()))
            .collect()
    }

    /// PFG edges with resolved endpoints
    pub fn pfg_edges(&self) -> Vec<(Pointer, Pointer)> {
        let csm = &self.output.cs_manager;
        self.output
            .pfg
            .edges()
            .map(|(s, t)| (csm.pointer(s), csm.pointer(t)))
            .collect()
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Points-to (context-insensitive projection)
    // ═══════════════════════════════════════════════════════════════════════

    /// Objects `var` may point to in any context
    pub fn var_points_to(&self, var: VarId) -> &[ObjId] {
        self.projection
            .vars
            .get(&var)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Objects `obj.field` may point to, all heap contexts merged
    pub fn field_points_to(&self, obj: ObjId, field: FieldId) -> &[ObjId] {
        self.projection
            .instance_fields
            .get(&(obj, field))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn static_field_points_to(&self, field: FieldId) -> &[ObjId] {
        self.projection
            .static_fields
            .get(&field)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Objects stored in array object `array`
    pub fn array_points_to(&self, array: ObjId) -> &[ObjId] {
        self.projection
            .arrays
            .get(&array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// `true` if the two variables may point to a common object
    pub fn may_alias(&self, v1: VarId, v2: VarId) -> bool {
        let (a, b) = (self.var_points_to(v1), self.var_points_to(v2));
        a.iter().any(|o| b.binary_search(o).is_ok())
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Reporting
    // ═══════════════════════════════════════════════════════════════════════

    pub fn solver_stats(&self) -> SolverStats {
        self.output.stats
    }

    pub fn stats(&self) -> AnalysisStats {
        let csm = &self.output.cs_manager;
        AnalysisStats {
            reachable_methods: self.reachable_ci_methods().len(),
            cs_methods: self.output.call_graph.num_reachable(),
            contexts: csm.num_contexts(),
            cs_objects: csm.num_objs(),
            pointers: csm.num_pointers(),
            pfg_edges: self.output.pfg.num_edges(),
            call_edges: self.output.call_graph.num_edges(),
            worklist_entries: self.output.stats.worklist_entries,
            propagations: self.output.stats.propagations,
            dispatch_misses: self.output.stats.dispatch_misses,
            duration_ms: self.duration_ms,
        }
    }

    /// Name-based, context-insensitive report
    pub fn summary(&self, program: &Program) -> AnalysisSummary {
        let describe = |objs: &[ObjId]| -> Vec<String> {
            objs.iter()
                .map(|&o| self.object(o).describe(program))
                .collect()
        };

        let reachable_methods = self
            .reachable_ci_methods()
            .into_iter()
            .map(|m| program.method_signature(m))
            .collect();

        let cg = self.ci_call_graph();
        let mut call_edges: Vec<CallEdgeSummary> = cg
            .edges()
            .iter()
            .map(|e| CallEdgeSummary {
                kind: e.kind,
                caller: program.method_signature(e.call_site.method),
                call_site: e.call_site.to_string(),
                callee: program.method_signature(e.callee),
            })
            .collect();
        call_edges.sort();

        let var_points_to = self
            .projection
            .vars
            .iter()
            .map(|(&v, objs)| (program.var_name(v), describe(objs)))
            .collect();
        let field_points_to = self
            .projection
            .instance_fields
            .iter()
            .map(|(&(o, f), objs)| {
                let key = format!("{}.{}", self.object(o).describe(program), program.field(f).name);
                (key, describe(objs))
            })
            .chain(self.projection.static_fields.iter().map(|(&f, objs)| {
                let field = program.field(f);
                let key = format!("{}.{}", program.class(field.declaring_class).name, field.name);
                (key, describe(objs))
            }))
            .chain(self.projection.arrays.iter().map(|(&a, objs)| {
                (format!("{}[*]", self.object(a).describe(program)), describe(objs))
            }))
            .collect();

        AnalysisSummary {
            selector: self.selector_name.clone(),
            stats: self.stats(),
            reachable_methods,
            call_edges,
            var_points_to,
            field_points_to,
        }
    }
}

/// One projected call edge in an `AnalysisSummary`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CallEdgeSummary {
    pub caller: String,
    pub call_site: String,
    pub callee: String,
    pub kind: CallKind,
}

/// Serializable, name-based analysis report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSummary {
    pub selector: String,
    pub stats: AnalysisStats,
    pub reachable_methods: Vec<String>,
    pub call_edges: Vec<CallEdgeSummary>,
    /// `<Class: subsig>/var` → allocation sites
    pub var_points_to: BTreeMap<String, Vec<String>>,
    /// `site.field`, `Class.field` and `site[*]` → allocation sites
    pub field_points_to: BTreeMap<String, Vec<String>>,
}

impl AnalysisSummary {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use crate::config::{ContextPolicy, PTAConfig};
    use crate::features::points_to::domain::Pointer;
    use crate::features::points_to::PointerAnalysis;
    use crate::shared::models::ProgramBuilder;

    #[test]
    fn test_projection_merges_heap_contexts() {
        let mut b = ProgramBuilder::new();
        let a = b.class("A");
        let bc = b.class("B");
        let f = b.field(a, "f");
        b.static_method(a, "A make(B)", |m| {
            let p = m.param("p");
            let r = m.var("r");
            m.new_obj(r, a);
            m.store_field(r, f, p);
            m.ret(r);
        });
        let (mut x, mut y, mut b1, mut b2) = (0, 0, 0, 0);
        let main = b.static_method(a, "void main()", |m| {
            x = m.var("x");
            y = m.var("y");
            b1 = m.var("b1");
            b2 = m.var("b2");
            m.new_obj(b1, bc);
            m.new_obj(b2, bc);
            m.call_static(a, "A make(B)", &[b1], Some(x));
            m.call_static(a, "A make(B)", &[b2], Some(y));
        });
        b.entry(main);
        let program = b.build().unwrap();

        let config = PTAConfig::default()
            .policy(ContextPolicy::CallSite)
            .context_depth(1)
            .heap_context_depth(1);
        let result = PointerAnalysis::new(config).analyze(&program).unwrap();

        // one allocation site, two heap contexts
        let bases: Vec<_> = result
            .cs_pointers()
            .into_iter()
            .filter_map(|(p, _)| match p {
                Pointer::InstanceField { base, .. } => Some(base),
                _ => None,
            })
            .collect();
        assert_eq!(bases.len(), 2);
        assert_eq!(result.cs_obj(bases[0]).obj, result.cs_obj(bases[1]).obj);
        assert_ne!(bases[0], bases[1]);

        let made = result.var_points_to(x);
        assert_eq!(made.len(), 1);
        assert_eq!(made, result.var_points_to(y));
        assert!((made[0] as usize) < result.objects().len());

        let mut stored = result.var_points_to(b1).to_vec();
        stored.extend_from_slice(result.var_points_to(b2));
        stored.sort_unstable();
        assert_eq!(result.field_points_to(made[0], f), stored.as_slice());
        assert!(result.may_alias(x, y));
        assert!(!result.may_alias(b1, b2));
    }
}
