//! Points-to sets
//!
//! Sorted, deduplicated vector of `CSObjId`s. Sets only ever grow during
//! solving, so the representation is optimised for `union_with` and
//! `difference` (linear merges) rather than removal.
//!
//! # Performance Characteristics
//! - Insert: O(n) worst case, O(1) when appending the largest id
//! - Contains: O(log n)
//! - Union / Difference: O(n + m)

use super::element::CSObjId;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PointsToSet {
    elements: Vec<CSObjId>,
}

impl PointsToSet {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn singleton(obj: CSObjId) -> Self {
        Self {
            elements: vec![obj],
        }
    }

    /// Insert one object. Returns `true` if it was not present.
    pub fn insert(&mut self, obj: CSObjId) -> bool {
        match self.elements.last() {
            None => {
                self.elements.push(obj);
                true
            }
            Some(&last) if obj > last => {
                self.elements.push(obj);
                true
            }
            _ => match self.elements.binary_search(&obj) {
                Ok(_) => false,
                Err(pos) => {
                    self.elements.insert(pos, obj);
                    true
                }
            },
        }
    }

    #[inline]
    pub fn contains(&self, obj: CSObjId) -> bool {
        self.elements.binary_search(&obj).is_ok()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Objects in ascending id order
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = CSObjId> + '_ {
        self.elements.iter().copied()
    }

    #[inline]
    pub fn as_slice(&self) -> &[CSObjId] {
        &self.elements
    }

    /// `self ∪= other`. Returns `true` if `self` grew.
    pub fn union_with(&mut self, other: &PointsToSet) -> bool {
        if other.is_empty() {
            return false;
        }
        if self.is_empty() {
            self.elements = other.elements.clone();
            return true;
        }

        let mut merged = Vec::with_capacity(self.elements.len() + other.elements.len());
        let (mut i, mut j) = (0, 0);
        while i < self.elements.len() && j < other.elements.len() {
            match self.elements[i].cmp(&other.elements[j]) {
                Ordering::Less => {
                    merged.push(self.elements[i]);
                    i += 1;
                }
                Ordering::Greater => {
                    merged.push(other.elements[j]);
                    j += 1;
                }
                Ordering::Equal => {
                    merged.push(self.elements[i]);
                    i += 1;
                    j += 1;
                }
            }
        }
        merged.extend_from_slice(&self.elements[i..]);
        merged.extend_from_slice(&other.elements[j..]);

        let grew = merged.len() > self.elements.len();
        self.elements = merged;
        grew
    }

    /// Objects of `self` that are not in `other`
    pub fn difference(&self, other: &PointsToSet) -> PointsToSet {
        let mut out = Vec::new();
        let mut j = 0;
        for &obj in &self.elements {
            while j < other.elements.len() && other.elements[j] < obj {
                j += 1;
            }
            if j >= other.elements.len() || other.elements[j] != obj {
                out.push(obj);
            }
        }
        PointsToSet { elements: out }
    }

    pub fn is_subset_of(&self, other: &PointsToSet) -> bool {
        self.len() <= other.len() && self.difference(other).is_empty()
    }

    /// Whether the two sets share at least one object
    pub fn intersects(&self, other: &PointsToSet) -> bool {
        let (mut i, mut j) = (0, 0);
        while i < self.elements.len() && j < other.elements.len() {
            match self.elements[i].cmp(&other.elements[j]) {
                Ordering::Less => i += 1,
                Ordering::Greater => j += 1,
                Ordering::Equal => return true,
            }
        }
        false
    }
}

impl FromIterator<CSObjId> for PointsToSet {
    fn from_iter<I: IntoIterator<Item = CSObjId>>(iter: I) -> Self {
        let mut elements: Vec<CSObjId> = iter.into_iter().collect();
        elements.sort_unstable();
        elements.dedup();
        Self { elements }
    }
}

impl<'a> IntoIterator for &'a PointsToSet {
    type Item = CSObjId;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, CSObjId>>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter().copied()
    }
}
