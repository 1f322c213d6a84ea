//! Abstract Heap Object
//!
//! Allocation-site abstraction: every concrete object created by one `new`
//! statement is represented by the same abstract object.

use crate::shared::models::{ClassId, Program, StmtRef, TypeRef};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for abstract objects
pub type ObjId = u32;

/// Abstract representation of a heap allocation site
///
/// # Example
/// ```text
/// // Source code:
/// // main#0: x = new A()
/// // main#1: y = new A()
/// // main#2: z = new B()
///
/// // Abstract objects:
/// // o0 = A@main#0
/// // o1 = A@main#1   (different site, different object)
/// // o2 = B@main#2
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AbstractObject {
    /// Dense numeric ID for efficient set operations
    pub id: ObjId,

    /// Allocation statement
    pub alloc_site: StmtRef,

    /// Declared (exact runtime) type of the allocated object
    pub ty: TypeRef,

    /// Class declaring the method that contains the allocation site
    pub container: ClassId,
}

impl AbstractObject {
    #[inline]
    pub fn new(id: ObjId, alloc_site: StmtRef, ty: TypeRef, container: ClassId) -> Self {
        Self {
            id,
            alloc_site,
            ty,
            container,
        }
    }

    /// Render with program names, e.g. `A@<Main: void main()>#0`
    pub fn describe(&self, program: &Program) -> String {
        format!(
            "{}@{}#{}",
            program.type_name(&self.ty),
            program.method_signature(self.alloc_site.method),
            self.alloc_site.index
        )
    }
}

impl fmt::Display for AbstractObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "o{}@{}", self.id, self.alloc_site)
    }
}
