//! A thin wrapper over `priority_queue::PriorityQueue`, mirroring the
//! teacher crate's `InternalPriorityQueue` — the search drivers share this
//! one indexed min-priority-queue primitive rather than each rolling their
//! own heap.

use ordered_float::OrderedFloat;
use priority_queue::PriorityQueue;
use std::cmp::Reverse;
use std::hash::Hash;

/// A min-priority queue over `f64` keys, keyed by item `I`. Wraps the
/// (max-oriented) `priority_queue` crate with `Reverse<OrderedFloat<f64>>`
/// so that `pop()` returns the *smallest* priority.
pub struct MinPriorityQueue<I: Hash + Eq> {
    inner: PriorityQueue<I, Reverse<OrderedFloat<f64>>>,
}

impl<I: Hash + Eq> Default for MinPriorityQueue<I> {
    fn default() -> Self {
        Self {
            inner: PriorityQueue::new(),
        }
    }
}

impl<I: Hash + Eq + Clone> MinPriorityQueue<I> {
    pub fn push(&mut self, item: I, priority: f64) {
        self.inner.push(item, Reverse(OrderedFloat(priority)));
    }

    /// Insert, or improve (decrease) the priority of an existing entry — a
    /// no-op if `priority` is not smaller than the entry's current one.
    /// Named for what it does in priority terms, not for the underlying
    /// `Reverse`-wrapped call (`push_increase` on the reversed key is what
    /// decreases the real-valued priority).
    pub fn decrease_priority(&mut self, item: I, priority: f64) {
        self.inner.push_increase(item, Reverse(OrderedFloat(priority)));
    }

    pub fn pop(&mut self) -> Option<(I, f64)> {
        self.inner.pop().map(|(item, Reverse(OrderedFloat(p)))| (item, p))
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pops_in_ascending_priority_order() {
        let mut q: MinPriorityQueue<i32> = MinPriorityQueue::default();
        q.push(1, 5.0);
        q.push(2, 1.0);
        q.push(3, 3.0);
        assert_eq!(q.pop(), Some((2, 1.0)));
        assert_eq!(q.pop(), Some((3, 3.0)));
        assert_eq!(q.pop(), Some((1, 5.0)));
    }

    #[test]
    fn decrease_priority_only_improves() {
        let mut q: MinPriorityQueue<i32> = MinPriorityQueue::default();
        q.push(1, 5.0);
        q.decrease_priority(1, 10.0);
        assert_eq!(q.pop(), Some((1, 5.0)));

        q.push(2, 5.0);
        q.decrease_priority(2, 1.0);
        assert_eq!(q.pop(), Some((2, 1.0)));
    }
}
