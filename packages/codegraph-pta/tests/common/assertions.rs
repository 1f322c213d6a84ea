//! Result snapshots and subset checks
//!
//! Interned ids depend on discovery order, so snapshots render every
//! element by value (contexts included) before comparing runs.

use codegraph_pta::features::points_to::{CSObj, ObjId, Pointer, PointerAnalysisResult};
use codegraph_pta::shared::models::{Program, Stmt};
use std::collections::{BTreeMap, BTreeSet};

fn render_obj(result: &PointerAnalysisResult, obj: CSObj) -> String {
    format!("{}:o{}", result.context(obj.heap_ctx), obj.obj)
}

fn render_pointer(result: &PointerAnalysisResult, pointer: &Pointer) -> String {
    match pointer {
        Pointer::Var(v) => format!("{}:v{}", result.context(v.ctx), v.var),
        Pointer::InstanceField { base, field } => {
            format!("{}.f{}", render_obj(result, result.cs_obj(*base)), field)
        }
        Pointer::StaticField { field } => format!("static.f{}", field),
        Pointer::ArrayIndex { array } => {
            format!("{}[*]", render_obj(result, result.cs_obj(*array)))
        }
    }
}

/// Context-sensitive state rendered by value: non-empty pointers, reachable
/// contextualized methods and call edges
pub fn cs_snapshot(result: &PointerAnalysisResult) -> BTreeMap<String, BTreeSet<String>> {
    let mut snapshot: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
    for (pointer, objs) in result.cs_pointers() {
        if objs.is_empty() {
            continue;
        }
        snapshot
            .entry(render_pointer(result, &pointer))
            .or_default()
            .extend(objs.into_iter().map(|o| render_obj(result, o)));
    }

    let methods = snapshot.entry("<reachable>".to_string()).or_default();
    for m in result.reachable_methods() {
        methods.insert(format!("{}:m{}", result.context(m.ctx), m.method));
    }
    let edges = snapshot.entry("<edges>".to_string()).or_default();
    for e in result.call_edges() {
        edges.insert(format!(
            "{}:{} -{}-> {}:m{}",
            result.context(e.call_site.ctx),
            e.call_site.site,
            e.kind,
            result.context(e.callee.ctx),
            e.callee.method
        ));
    }
    snapshot
}

/// Context-insensitive projections of every variable, field, array and the
/// call graph
pub fn ci_snapshot(result: &PointerAnalysisResult, program: &Program) -> BTreeMap<String, BTreeSet<ObjId>> {
    let mut snapshot: BTreeMap<String, BTreeSet<ObjId>> = BTreeMap::new();
    for var in &program.vars {
        let pts = result.var_points_to(var.id);
        if !pts.is_empty() {
            snapshot.insert(format!("v{}", var.id), pts.iter().copied().collect());
        }
    }
    for obj in result.objects() {
        for field in &program.fields {
            let pts = result.field_points_to(obj.id, field.id);
            if !pts.is_empty() {
                snapshot.insert(format!("o{}.f{}", obj.id, field.id), pts.iter().copied().collect());
            }
        }
        let pts = result.array_points_to(obj.id);
        if !pts.is_empty() {
            snapshot.insert(format!("o{}[*]", obj.id), pts.iter().copied().collect());
        }
    }
    for field in &program.fields {
        let pts = result.static_field_points_to(field.id);
        if !pts.is_empty() {
            snapshot.insert(format!("static.f{}", field.id), pts.iter().copied().collect());
        }
    }
    snapshot.insert(
        "<reachable>".to_string(),
        result.reachable_ci_methods().into_iter().collect(),
    );
    for e in result.ci_call_graph().edges() {
        snapshot
            .entry(format!("<call {}>", e.call_site))
            .or_default()
            .insert(e.callee);
    }
    snapshot
}

/// Every entry of `small` is contained in the matching entry of `big`
pub fn is_sub_snapshot<V: Ord>(small: &BTreeMap<String, BTreeSet<V>>, big: &BTreeMap<String, BTreeSet<V>>) -> bool {
    small
        .iter()
        .all(|(k, v)| big.get(k).map_or(false, |b| v.is_subset(b)))
}

/// Assert the projected points-to set of `var`, objects given by allocation
/// variable (the lhs of their `new`)
pub fn assert_var_points_to(result: &PointerAnalysisResult, program: &Program, var: u32, expected_allocs: &[u32]) {
    let mut expected: Vec<ObjId> = expected_allocs
        .iter()
        .map(|&alloc_var| obj_allocated_into(result, program, alloc_var))
        .collect();
    expected.sort_unstable();
    pretty_assertions::assert_eq!(
        result.var_points_to(var).to_vec(),
        expected,
        "points-to set of {}",
        program.var_name(var)
    );
}

/// Abstract object whose allocation assigns to `var`
pub fn obj_allocated_into(result: &PointerAnalysisResult, program: &Program, var: u32) -> ObjId {
    result
        .objects()
        .iter()
        .find(|o| matches!(program.stmt(o.alloc_site), Stmt::New { lhs, .. } if *lhs == var))
        .map(|o| o.id)
        .unwrap_or_else(|| panic!("no allocation into {}", program.var_name(var)))
}
