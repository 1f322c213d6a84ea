//! Context selectors
//!
//! Shipped policies:
//! - **Insensitive**: one shared (empty) context
//! - **k-CFA**: the k most recent call sites
//! - **k-object**: receiver allocation sites (Milanova et al., TOSEM 2005)
//! - **k-type**: classes containing receiver allocations (Smaragdakis et al., POPL 2011)
//!
//! Heap contexts are the last `heap_k` elements of the allocating method's
//! context for every context-sensitive policy.

use crate::config::{ContextPolicy, PTAConfig};
use crate::features::points_to::domain::{AbstractObject, Context, ContextElement};
use crate::features::points_to::ports::{ContextSelector, Receiver};
use crate::shared::models::{MethodId, StmtRef};

/// Build the selector described by `config`
pub fn selector_from_config(config: &PTAConfig) -> Box<dyn ContextSelector> {
    let (k, heap_k) = (config.context_depth, config.heap_context_depth);
    match config.policy {
        ContextPolicy::Insensitive => Box::new(ContextInsensitiveSelector),
        ContextPolicy::CallSite => Box::new(KCallSiteSelector::new(k, heap_k)),
        ContextPolicy::Object => Box::new(KObjectSelector::new(k, heap_k)),
        ContextPolicy::Type => Box::new(KTypeSelector::new(k, heap_k)),
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Insensitive
// ═══════════════════════════════════════════════════════════════════════════

/// Every method and object lives in the empty context
#[derive(Debug, Clone, Copy, Default)]
pub struct ContextInsensitiveSelector;

impl ContextSelector for ContextInsensitiveSelector {
    fn name(&self) -> String {
        "context-insensitive".to_string()
    }

    fn select_context(
        &self,
        _caller: &Context,
        _call_site: StmtRef,
        _receiver: Option<Receiver<'_>>,
        _callee: MethodId,
    ) -> Context {
        Context::empty()
    }

    fn select_heap_context(&self, _method_ctx: &Context, _obj: &AbstractObject) -> Context {
        Context::empty()
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// k-CFA
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy)]
pub struct KCallSiteSelector {
    k: usize,
    heap_k: usize,
}

impl KCallSiteSelector {
    pub fn new(k: usize, heap_k: usize) -> Self {
        Self { k, heap_k }
    }
}

impl ContextSelector for KCallSiteSelector {
    fn name(&self) -> String {
        format!("{}-call-site", self.k)
    }

    fn select_context(
        &self,
        caller: &Context,
        call_site: StmtRef,
        _receiver: Option<Receiver<'_>>,
        _callee: MethodId,
    ) -> Context {
        caller.append(ContextElement::CallSite(call_site), self.k)
    }

    fn select_heap_context(&self, method_ctx: &Context, _obj: &AbstractObject) -> Context {
        method_ctx.truncate(self.heap_k)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// k-object
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy)]
pub struct KObjectSelector {
    k: usize,
    heap_k: usize,
}

impl KObjectSelector {
    pub fn new(k: usize, heap_k: usize) -> Self {
        Self { k, heap_k }
    }
}

impl ContextSelector for KObjectSelector {
    fn name(&self) -> String {
        format!("{}-object", self.k)
    }

    fn select_context(
        &self,
        caller: &Context,
        _call_site: StmtRef,
        receiver: Option<Receiver<'_>>,
        _callee: MethodId,
    ) -> Context {
        match receiver {
            Some(recv) => recv
                .heap_ctx
                .append(ContextElement::Object(recv.obj.id), self.k),
            // static calls stay in the caller's context
            None => caller.truncate(self.k),
        }
    }

    fn select_heap_context(&self, method_ctx: &Context, _obj: &AbstractObject) -> Context {
        method_ctx.truncate(self.heap_k)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// k-type
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy)]
pub struct KTypeSelector {
    k: usize,
    heap_k: usize,
}

impl KTypeSelector {
    pub fn new(k: usize, heap_k: usize) -> Self {
        Self { k, heap_k }
    }
}

impl ContextSelector for KTypeSelector {
    fn name(&self) -> String {
        format!("{}-type", self.k)
    }

    fn select_context(
        &self,
        caller: &Context,
        _call_site: StmtRef,
        receiver: Option<Receiver<'_>>,
        _callee: MethodId,
    ) -> Context {
        match receiver {
            Some(recv) => recv
                .heap_ctx
                .append(ContextElement::Type(recv.obj.container), self.k),
            None => caller.truncate(self.k),
        }
    }

    fn select_heap_context(&self, method_ctx: &Context, _obj: &AbstractObject) -> Context {
        method_ctx.truncate(self.heap_k)
    }
}
