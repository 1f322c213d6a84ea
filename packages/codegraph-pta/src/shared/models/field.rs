//! Field entities

use super::class::ClassId;
use serde::{Deserialize, Serialize};

/// Field identifier (index into `Program::fields`)
pub type FieldId = u32;

/// A resolved field declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub id: FieldId,
    pub name: String,
    pub declaring_class: ClassId,
    #[serde(default)]
    pub is_static: bool,
}
