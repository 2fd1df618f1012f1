//! Priority queue entries for frontier expansion and Dijkstra.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// A queued cell with the accumulated cost of reaching it.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Candidate {
    /// Accumulated path cost from the root.
    pub(crate) cost: f64,
    /// Cost of the final edge, charged against the growth budget.
    pub(crate) step: f64,
    /// Row-major cell index.
    pub(crate) index: usize,
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Candidate {}

// Reversed so `BinaryHeap` pops the cheapest candidate, lowest index first.
impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.index.cmp(&self.index))
    }
}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Min-queue of candidates not yet committed.
#[derive(Debug, Clone, Default)]
pub(crate) struct Frontier {
    heap: BinaryHeap<Candidate>,
}

impl Frontier {
    pub(crate) fn push(&mut self, candidate: Candidate) {
        self.heap.push(candidate);
    }

    pub(crate) fn peek(&self) -> Option<Candidate> {
        self.heap.peek().copied()
    }

    pub(crate) fn pop(&mut self) -> Option<Candidate> {
        self.heap.pop()
    }

    pub(crate) fn len(&self) -> usize {
        self.heap.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub(crate) fn clear(&mut self) {
        self.heap.clear();
    }
}
