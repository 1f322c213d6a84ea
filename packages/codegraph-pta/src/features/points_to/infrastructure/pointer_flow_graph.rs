//! Pointer Flow Graph
//!
//! Directed graph over `PointerId`s. An edge `s → t` means every object in
//! `pts(s)` must also be in `pts(t)`. Edges are deduplicated and never
//! removed.

use crate::features::points_to::domain::PointerId;
use rustc_hash::FxHashSet;

#[derive(Debug, Clone, Default)]
pub struct PointerFlowGraph {
    /// Successor lists indexed by source pointer, in insertion order
    successors: Vec<Vec<PointerId>>,
    edges: FxHashSet<(PointerId, PointerId)>,
}

impl PointerFlowGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `source → target`. Returns `false` if the edge already existed.
    pub fn add_edge(&mut self, source: PointerId, target: PointerId) -> bool {
        if !self.edges.insert((source, target)) {
            return false;
        }
        let idx = source as usize;
        if idx >= self.successors.len() {
            self.successors.resize_with(idx + 1, Vec::new);
        }
        self.successors[idx].push(target);
        true
    }

    #[inline]
    pub fn has_edge(&self, source: PointerId, target: PointerId) -> bool {
        self.edges.contains(&(source, target))
    }

    #[inline]
    pub fn successors(&self, source: PointerId) -> &[PointerId] {
        self.successors
            .get(source as usize)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// All edges grouped by source
    pub fn edges(&self) -> impl Iterator<Item = (PointerId, PointerId)> + '_ {
        self.successors
            .iter()
            .enumerate()
            .flat_map(|(s, succs)| succs.iter().map(move |&t| (s as PointerId, t)))
    }

    #[inline]
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }
}
