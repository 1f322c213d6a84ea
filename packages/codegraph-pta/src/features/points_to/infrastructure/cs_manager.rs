//! Context-sensitive element manager
//!
//! Arena that interns every context-sensitive entity to a dense `u32` id and
//! owns the points-to set of every pointer. Asking twice for the same
//! logical element always yields the same id.

use crate::features::points_to::domain::{
    CSCallSite, CSCallSiteId, CSMethod, CSMethodId, CSObj, CSObjId, Context, ContextId, ObjId,
    Pointer, PointerId, PointsToSet,
};
use crate::shared::models::{FieldId, MethodId, StmtRef, VarId};
use rustc_hash::FxHashMap;
use std::hash::Hash;

/// Value ↔ dense id table
#[derive(Debug, Clone)]
struct Interner<T> {
    items: Vec<T>,
    ids: FxHashMap<T, u32>,
}

impl<T> Default for Interner<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            ids: FxHashMap::default(),
        }
    }
}

impl<T: Clone + Eq + Hash> Interner<T> {
    /// Returns the id and whether it was freshly created
    fn intern(&mut self, item: T) -> (u32, bool) {
        if let Some(&id) = self.ids.get(&item) {
            return (id, false);
        }
        let id = self.items.len() as u32;
        self.items.push(item.clone());
        self.ids.insert(item, id);
        (id, true)
    }

    #[inline]
    fn lookup(&self, item: &T) -> Option<u32> {
        self.ids.get(item).copied()
    }

    #[inline]
    fn get(&self, id: u32) -> &T {
        &self.items[id as usize]
    }

    #[inline]
    fn len(&self) -> usize {
        self.items.len()
    }
}

#[derive(Debug, Clone)]
pub struct CSManager {
    contexts: Interner<Context>,
    objs: Interner<CSObj>,
    methods: Interner<CSMethod>,
    call_sites: Interner<CSCallSite>,
    pointers: Interner<Pointer>,

    /// Indexed by `PointerId`
    points_to: Vec<PointsToSet>,
}

impl Default for CSManager {
    fn default() -> Self {
        Self::new()
    }
}

impl CSManager {
    /// Id of the empty context
    pub const EMPTY_CONTEXT: ContextId = 0;

    pub fn new() -> Self {
        let mut contexts = Interner::default();
        contexts.intern(Context::empty());
        Self {
            contexts,
            objs: Interner::default(),
            methods: Interner::default(),
            call_sites: Interner::default(),
            pointers: Interner::default(),
            points_to: Vec::new(),
        }
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Contexts
    // ═══════════════════════════════════════════════════════════════════════

    #[inline]
    pub fn context_id(&mut self, ctx: Context) -> ContextId {
        self.contexts.intern(ctx).0
    }

    #[inline]
    pub fn context(&self, id: ContextId) -> &Context {
        self.contexts.get(id)
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Objects, methods, call sites
    // ═══════════════════════════════════════════════════════════════════════

    #[inline]
    pub fn cs_obj(&mut self, heap_ctx: ContextId, obj: ObjId) -> CSObjId {
        self.objs.intern(CSObj { heap_ctx, obj }).0
    }

    #[inline]
    pub fn obj(&self, id: CSObjId) -> CSObj {
        *self.objs.get(id)
    }

    #[inline]
    pub fn cs_method(&mut self, ctx: ContextId, method: MethodId) -> CSMethodId {
        self.methods.intern(CSMethod { ctx, method }).0
    }

    #[inline]
    pub fn method(&self, id: CSMethodId) -> CSMethod {
        *self.methods.get(id)
    }

    #[inline]
    pub fn cs_call_site(&mut self, ctx: ContextId, site: StmtRef) -> CSCallSiteId {
        self.call_sites.intern(CSCallSite { ctx, site }).0
    }

    #[inline]
    pub fn call_site(&self, id: CSCallSiteId) -> CSCallSite {
        *self.call_sites.get(id)
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Pointers
    // ═══════════════════════════════════════════════════════════════════════

    /// Intern a pointer, allocating an empty points-to set on first sight
    pub fn pointer_id(&mut self, pointer: Pointer) -> PointerId {
        let (id, fresh) = self.pointers.intern(pointer);
        if fresh {
            self.points_to.push(PointsToSet::new());
        }
        id
    }

    #[inline]
    pub fn var_ptr(&mut self, ctx: ContextId, var: VarId) -> PointerId {
        self.pointer_id(Pointer::var(ctx, var))
    }

    #[inline]
    pub fn instance_field_ptr(&mut self, base: CSObjId, field: FieldId) -> PointerId {
        self.pointer_id(Pointer::InstanceField { base, field })
    }

    #[inline]
    pub fn static_field_ptr(&mut self, field: FieldId) -> PointerId {
        self.pointer_id(Pointer::StaticField { field })
    }

    #[inline]
    pub fn array_index_ptr(&mut self, array: CSObjId) -> PointerId {
        self.pointer_id(Pointer::ArrayIndex { array })
    }

    /// Id of an already-created pointer
    #[inline]
    pub fn find_pointer(&self, pointer: &Pointer) -> Option<PointerId> {
        self.pointers.lookup(pointer)
    }

    #[inline]
    pub fn pointer(&self, id: PointerId) -> Pointer {
        *self.pointers.get(id)
    }

    #[inline]
    pub fn points_to(&self, id: PointerId) -> &PointsToSet {
        &self.points_to[id as usize]
    }

    #[inline]
    pub fn points_to_mut(&mut self, id: PointerId) -> &mut PointsToSet {
        &mut self.points_to[id as usize]
    }

    /// All pointers with their ids, in creation order
    pub fn pointers(&self) -> impl Iterator<Item = (PointerId, Pointer)> + '_ {
        self.pointers
            .items
            .iter()
            .enumerate()
            .map(|(i, p)| (i as PointerId, *p))
    }

    /// All context-sensitive objects with their ids
    pub fn objs(&self) -> impl Iterator<Item = (CSObjId, CSObj)> + '_ {
        self.objs
            .items
            .iter()
            .enumerate()
            .map(|(i, o)| (i as CSObjId, *o))
    }

    pub fn num_contexts(&self) -> usize {
        self.contexts.len()
    }

    pub fn num_objs(&self) -> usize {
        self.objs.len()
    }

    pub fn num_methods(&self) -> usize {
        self.methods.len()
    }

    pub fn num_call_sites(&self) -> usize {
        self.call_sites.len()
    }

    pub fn num_pointers(&self) -> usize {
        self.pointers.len()
    }
}
