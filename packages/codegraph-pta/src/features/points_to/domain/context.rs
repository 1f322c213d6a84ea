//! Calling and heap contexts
//!
//! A context is a bounded sequence of elements whose meaning depends on the
//! policy that produced it: call sites (k-CFA), receiver allocation sites
//! (object sensitivity) or classes (type sensitivity). Contexts are values;
//! the canonicalizer interns them to `ContextId`s.

use super::abstract_object::ObjId;
use crate::shared::models::{ClassId, StmtRef};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One element of a context
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ContextElement {
    CallSite(StmtRef),
    Object(ObjId),
    Type(ClassId),
}

impl fmt::Display for ContextElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContextElement::CallSite(site) => write!(f, "{}", site),
            ContextElement::Object(obj) => write!(f, "o{}", obj),
            ContextElement::Type(class) => write!(f, "T{}", class),
        }
    }
}

impl From<StmtRef> for ContextElement {
    fn from(site: StmtRef) -> Self {
        ContextElement::CallSite(site)
    }
}

/// Immutable, k-limited context
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Context {
    elements: Vec<ContextElement>,
}

impl Context {
    /// The empty context
    #[inline]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Context with a single element
    pub fn with_element(element: ContextElement) -> Self {
        Self {
            elements: vec![element],
        }
    }

    /// New context with `element` appended, keeping only the last `limit`
    /// elements. `limit == 0` always yields the empty context.
    pub fn append(&self, element: ContextElement, limit: usize) -> Self {
        if limit == 0 {
            return Self::empty();
        }
        let keep = (self.elements.len() + 1).min(limit);
        let mut elements = Vec::with_capacity(keep);
        let skip = self.elements.len() + 1 - keep;
        elements.extend(self.elements.iter().skip(skip).copied());
        elements.push(element);
        Self { elements }
    }

    /// Suffix of at most `limit` elements
    pub fn truncate(&self, limit: usize) -> Self {
        let skip = self.elements.len().saturating_sub(limit);
        Self {
            elements: self.elements[skip..].to_vec(),
        }
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.elements.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    #[inline]
    pub fn elements(&self) -> &[ContextElement] {
        &self.elements
    }

    /// Most recent element
    #[inline]
    pub fn last(&self) -> Option<&ContextElement> {
        self.elements.last()
    }
}

impl fmt::Display for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, elem) in self.elements.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", elem)?;
        }
        write!(f, "]")
    }
}
