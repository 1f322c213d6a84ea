//! Solver work queues
//!
//! - `WorkList`: pending `(pointer, delta)` propagation entries
//! - `PendingMethods`: methods that became reachable and still need their
//!   statements wired
//!
//! Each entry is consumed once. The final result is independent of the
//! dequeue order.

use crate::config::WorklistOrder;
use crate::features::points_to::domain::{CSMethodId, PointerId, PointsToSet};
use std::collections::VecDeque;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkListEntry {
    pub pointer: PointerId,
    pub points_to: PointsToSet,
}

#[derive(Debug, Clone, Default)]
pub struct WorkList {
    entries: VecDeque<WorkListEntry>,
    order: WorklistOrder,
}

impl WorkList {
    pub fn new(order: WorklistOrder) -> Self {
        Self {
            entries: VecDeque::new(),
            order,
        }
    }

    #[inline]
    pub fn add_entry(&mut self, pointer: PointerId, points_to: PointsToSet) {
        self.entries.push_back(WorkListEntry { pointer, points_to });
    }

    #[inline]
    pub fn poll_entry(&mut self) -> Option<WorkListEntry> {
        match self.order {
            WorklistOrder::Fifo => self.entries.pop_front(),
            WorklistOrder::Lifo => self.entries.pop_back(),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// FIFO queue of newly reachable methods
#[derive(Debug, Clone, Default)]
pub struct PendingMethods {
    queue: VecDeque<CSMethodId>,
}

impl PendingMethods {
    #[inline]
    pub fn push(&mut self, method: CSMethodId) {
        self.queue.push_back(method);
    }

    #[inline]
    pub fn pop(&mut self) -> Option<CSMethodId> {
        self.queue.pop_front()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
