//! Allocation-site heap model
//!
//! One abstract object per `new` statement, created eagerly for the whole
//! program so that object ids are stable across runs and policies.

use crate::features::points_to::domain::{AbstractObject, ObjId};
use crate::features::points_to::ports::HeapModel;
use crate::shared::models::{Program, Stmt, StmtRef};
use rustc_hash::FxHashMap;

#[derive(Debug, Clone, Default)]
pub struct AllocationSiteHeapModel {
    objects: Vec<AbstractObject>,
    by_site: FxHashMap<StmtRef, ObjId>,
}

impl AllocationSiteHeapModel {
    pub fn new(program: &Program) -> Self {
        let mut model = Self::default();
        for method in &program.methods {
            for (index, stmt) in method.stmts.iter().enumerate() {
                if let Stmt::New { ty, .. } = stmt {
                    let site = StmtRef::new(method.id, index as u32);
                    let id = model.objects.len() as ObjId;
                    model.objects.push(AbstractObject::new(
                        id,
                        site,
                        ty.clone(),
                        method.declaring_class,
                    ));
                    model.by_site.insert(site, id);
                }
            }
        }
        model
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl HeapModel for AllocationSiteHeapModel {
    fn object_at(&self, site: StmtRef) -> Option<&AbstractObject> {
        self.by_site.get(&site).map(|&id| &self.objects[id as usize])
    }

    fn object(&self, id: ObjId) -> &AbstractObject {
        &self.objects[id as usize]
    }

    fn objects(&self) -> &[AbstractObject] {
        &self.objects
    }
}
