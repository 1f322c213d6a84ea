//! Call graph
//!
//! Generic over the call-site and method representation so the same
//! structure serves the context-sensitive solver (`CSCallSiteId`,
//! `CSMethodId`) and the CHA baseline (`StmtRef`, `MethodId`).

use super::call_kind::CallKind;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use std::hash::Hash;

/// `call_site --kind--> callee`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge<CS, M> {
    pub kind: CallKind,
    pub call_site: CS,
    pub callee: M,
}

impl<CS, M> Edge<CS, M> {
    pub fn new(kind: CallKind, call_site: CS, callee: M) -> Self {
        Self {
            kind,
            call_site,
            callee,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CallGraph<CS, M> {
    entries: Vec<M>,
    reachable: FxHashSet<M>,
    /// Reachable methods in discovery order
    reachable_order: Vec<M>,
    edges: Vec<Edge<CS, M>>,
    edge_set: FxHashSet<(CS, M)>,
    callees: FxHashMap<CS, Vec<M>>,
    callers: FxHashMap<M, Vec<CS>>,
}

impl<CS, M> Default for CallGraph<CS, M> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            reachable: FxHashSet::default(),
            reachable_order: Vec::new(),
            edges: Vec::new(),
            edge_set: FxHashSet::default(),
            callees: FxHashMap::default(),
            callers: FxHashMap::default(),
        }
    }
}

impl<CS, M> CallGraph<CS, M>
where
    CS: Copy + Eq + Hash,
    M: Copy + Eq + Hash,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_entry_method(&mut self, method: M) {
        if !self.entries.contains(&method) {
            self.entries.push(method);
        }
    }

    /// Mark `method` reachable. Returns `false` if it already was.
    pub fn add_reachable_method(&mut self, method: M) -> bool {
        if self.reachable.insert(method) {
            self.reachable_order.push(method);
            true
        } else {
            false
        }
    }

    #[inline]
    pub fn contains(&self, method: M) -> bool {
        self.reachable.contains(&method)
    }

    /// Add an edge unless `(call_site, callee)` is already present,
    /// whatever its kind. Returns `true` if added.
    pub fn add_edge(&mut self, edge: Edge<CS, M>) -> bool {
        if !self.edge_set.insert((edge.call_site, edge.callee)) {
            return false;
        }
        self.callees
            .entry(edge.call_site)
            .or_default()
            .push(edge.callee);
        self.callers
            .entry(edge.callee)
            .or_default()
            .push(edge.call_site);
        self.edges.push(edge);
        true
    }

    #[inline]
    pub fn has_edge(&self, call_site: CS, callee: M) -> bool {
        self.edge_set.contains(&(call_site, callee))
    }

    pub fn callees_of(&self, call_site: CS) -> &[M] {
        self.callees
            .get(&call_site)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn callers_of(&self, method: M) -> &[CS] {
        self.callers
            .get(&method)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    #[inline]
    pub fn entry_methods(&self) -> &[M] {
        &self.entries
    }

    #[inline]
    pub fn reachable_methods(&self) -> &[M] {
        &self.reachable_order
    }

    #[inline]
    pub fn edges(&self) -> &[Edge<CS, M>] {
        &self.edges
    }

    #[inline]
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    #[inline]
    pub fn num_reachable(&self) -> usize {
        self.reachable_order.len()
    }
}
