//! Call edge kinds

use crate::shared::models::{Invoke, InvokeKind};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of a call-graph edge. Informational only: it never changes which
/// targets are found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CallKind {
    Static,
    Virtual,
    Special,
    Interface,
    Dynamic,
    Other,
}

impl CallKind {
    /// Classify by the dispatch flavor written at the call site
    pub fn from_invoke(invoke: &Invoke) -> Self {
        match invoke.kind {
            InvokeKind::Static => CallKind::Static,
            InvokeKind::Virtual => CallKind::Virtual,
            InvokeKind::Special => CallKind::Special,
            InvokeKind::Interface => CallKind::Interface,
            InvokeKind::Dynamic => CallKind::Dynamic,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CallKind::Static => "static",
            CallKind::Virtual => "virtual",
            CallKind::Special => "special",
            CallKind::Interface => "interface",
            CallKind::Dynamic => "dynamic",
            CallKind::Other => "other",
        }
    }
}

impl fmt::Display for CallKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
