//! Ports (Interfaces) for Points-to Analysis
//!
//! The solver is written once against these two traits:
//! - **ContextSelector**: context-sensitivity policy
//! - **HeapModel**: allocation-site abstraction
//!
//! Both are pure: the same inputs always produce the same outputs.

use crate::features::points_to::domain::{AbstractObject, Context, ObjId};
use crate::shared::models::{MethodId, StmtRef};

// ============================================================================
// Context Selection
// ============================================================================

/// Receiver object of an instance call, as seen by a context selector
#[derive(Debug, Clone, Copy)]
pub struct Receiver<'a> {
    /// Heap context of the receiver object
    pub heap_ctx: &'a Context,
    pub obj: &'a AbstractObject,
}

/// Context-sensitivity policy
///
/// # Example (custom selector)
/// ```
/// use codegraph_pta::features::points_to::domain::{AbstractObject, Context};
/// use codegraph_pta::features::points_to::ports::{ContextSelector, Receiver};
/// use codegraph_pta::shared::models::{MethodId, StmtRef};
///
/// /// Distinguishes only the most recent call site, never heap objects
/// struct LastCallSite;
///
/// impl ContextSelector for LastCallSite {
///     fn name(&self) -> String {
///         "last-call-site".to_string()
///     }
///
///     fn select_context(
///         &self,
///         _caller: &Context,
///         call_site: StmtRef,
///         _receiver: Option<Receiver<'_>>,
///         _callee: MethodId,
///     ) -> Context {
///         Context::empty().append(call_site.into(), 1)
///     }
///
///     fn select_heap_context(&self, _method_ctx: &Context, _obj: &AbstractObject) -> Context {
///         Context::empty()
///     }
/// }
/// ```
pub trait ContextSelector: Send + Sync {
    /// Human-readable policy name, used in logs and summaries
    fn name(&self) -> String;

    /// Context of entry methods
    fn empty_context(&self) -> Context {
        Context::empty()
    }

    /// Callee context for a call from `caller` at `call_site`.
    ///
    /// `receiver` is `None` for static calls.
    fn select_context(
        &self,
        caller: &Context,
        call_site: StmtRef,
        receiver: Option<Receiver<'_>>,
        callee: MethodId,
    ) -> Context;

    /// Heap context for `obj` allocated by a method running under `method_ctx`
    fn select_heap_context(&self, method_ctx: &Context, obj: &AbstractObject) -> Context;
}

// ============================================================================
// Heap Abstraction
// ============================================================================

/// Maps allocation statements to abstract objects
pub trait HeapModel: Send + Sync {
    /// Abstract object for the allocation statement at `site`
    fn object_at(&self, site: StmtRef) -> Option<&AbstractObject>;

    /// Abstract object by id
    fn object(&self, id: ObjId) -> &AbstractObject;

    /// All abstract objects, indexed by id
    fn objects(&self) -> &[AbstractObject];
}
