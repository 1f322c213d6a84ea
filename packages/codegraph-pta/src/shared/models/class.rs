//! Class hierarchy entities

use super::method::MethodId;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Class identifier (index into `Program::classes`)
pub type ClassId = u32;

/// A class or interface declaration
///
/// `declared_methods` maps a method subsignature (e.g. `"void foo(A)"`) to the
/// method declared directly in this class. Inherited methods are not listed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Class {
    pub id: ClassId,

    /// Fully qualified name
    pub name: String,

    /// Direct superclass (`None` for the hierarchy root and for interfaces)
    pub superclass: Option<ClassId>,

    /// Directly implemented interfaces (or extended interfaces, for an interface)
    #[serde(default)]
    pub interfaces: Vec<ClassId>,

    #[serde(default)]
    pub is_interface: bool,

    #[serde(default)]
    pub is_abstract: bool,

    #[serde(default)]
    pub declared_methods: FxHashMap<String, MethodId>,
}

impl Class {
    pub fn new(id: ClassId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            superclass: None,
            interfaces: Vec::new(),
            is_interface: false,
            is_abstract: false,
            declared_methods: FxHashMap::default(),
        }
    }

    /// Method declared directly in this class with the given subsignature
    #[inline]
    pub fn declared_method(&self, subsignature: &str) -> Option<MethodId> {
        self.declared_methods.get(subsignature).copied()
    }
}
