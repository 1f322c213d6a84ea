//! High-Level Pointer Analysis
//!
//! Checks the program, builds the context selector and heap model from
//! `PTAConfig`, resolves the entry methods, runs the solver and wraps its state in a queryable
//! `PointerAnalysisResult`.
//!
//! # Usage
//! ```
//! use codegraph_pta::config::{ContextPolicy, PTAConfig};
//! use codegraph_pta::features::points_to::PointerAnalysis;
//! use codegraph_pta::shared::models::ProgramBuilder;
//!
//! let mut b = ProgramBuilder::new();
//! let a = b.class("A");
//! let (mut x, mut y) = (0, 0);
//! let main = b.static_method(a, "void main()", |m| {
//!     x = m.var("x");
//!     y = m.var("y");
//!     m.new_obj(x, a);
//!     m.assign(y, x);
//! });
//! b.entry(main);
//! let program = b.build().unwrap();
//!
//! let config = PTAConfig::default().policy(ContextPolicy::CallSite).context_depth(1);
//! let result = PointerAnalysis::new(config).analyze(&program).unwrap();
//! assert!(result.may_alias(x, y));
//! ```

use super::result::PointerAnalysisResult;
use crate::config::PTAConfig;
use crate::errors::{PtaError, Result};
use crate::features::points_to::infrastructure::{
    selector_from_config, AllocationSiteHeapModel, Solver,
};
use crate::features::points_to::ports::{ContextSelector, HeapModel};
use crate::shared::models::{MethodId, Program};
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

/// Whole-program pointer analysis
pub struct PointerAnalysis {
    config: PTAConfig,

    /// Overrides the policy named in `config`
    selector: Option<Arc<dyn ContextSelector>>,
}

impl PointerAnalysis {
    pub fn new(config: PTAConfig) -> Self {
        Self {
            config,
            selector: None,
        }
    }

    /// Use a custom context selector instead of the configured policy
    pub fn with_selector(mut self, selector: impl ContextSelector + 'static) -> Self {
        self.selector = Some(Arc::new(selector));
        self
    }

    pub fn config(&self) -> &PTAConfig {
        &self.config
    }

    /// Run the analysis to its fixpoint
    pub fn analyze(&self, program: &Program) -> Result<PointerAnalysisResult> {
        self.config.validate()?;
        program.validate()?;
        program.ensure_indexed()?;
        let entries = self.entry_methods(program)?;

        let selector: Arc<dyn ContextSelector> = match &self.selector {
            Some(custom) => Arc::clone(custom),
            None => Arc::from(selector_from_config(&self.config)),
        };
        let heap_model: Arc<dyn HeapModel> = Arc::new(AllocationSiteHeapModel::new(program));

        info!(
            "Pointer analysis started: policy={}, entries={}, methods={}, allocation sites={}",
            selector.name(),
            entries.len(),
            program.methods.len(),
            heap_model.objects().len()
        );
        let start = Instant::now();

        let mut solver = Solver::new(
            program,
            Arc::clone(&selector),
            Arc::clone(&heap_model),
            self.config.worklist_order,
        );
        solver.solve(&entries)?;
        let output = solver.finish();

        let result = PointerAnalysisResult::new(
            output,
            heap_model,
            selector.name(),
            start.elapsed().as_secs_f64() * 1000.0,
        );
        let stats = result.stats();
        info!(
            "Pointer analysis finished in {:.2}ms: {} reachable methods ({} contextualized), {} call edges, {} pointers, {} PFG edges",
            stats.duration_ms,
            stats.reachable_methods,
            stats.cs_methods,
            stats.call_edges,
            stats.pointers,
            stats.pfg_edges
        );
        Ok(result)
    }

    /// Program entry followed by the configured extra entries
    fn entry_methods(&self, program: &Program) -> Result<Vec<MethodId>> {
        let mut entries: Vec<MethodId> = program.entry.into_iter().collect();
        for name in &self.config.extra_entries {
            let method = program
                .method_by_signature(name)
                .ok_or_else(|| PtaError::UnknownEntry(name.clone()))?;
            if !entries.contains(&method) {
                entries.push(method);
            }
        }
        if entries.is_empty() {
            return Err(PtaError::MissingEntry);
        }
        Ok(entries)
    }
}

impl Default for PointerAnalysis {
    fn default() -> Self {
        Self::new(PTAConfig::default())
    }
}
