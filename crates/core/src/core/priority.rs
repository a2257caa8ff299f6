//! Priority queue for BPE merge candidates.
//!
//! Candidates are ordered by frequency, then by the pair itself so that
//! equal frequencies always resolve the same way: the pair that sorts first
//! lexicographically as `(left, right)` wins.

use crate::core::merges::Pair;
use ahash::AHashMap;
use dary_heap::OctonaryHeap;
use std::cmp::Ordering;

/// A merge candidate during BPE training.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeCandidate {
    /// The pair of symbols to merge
    pub pair: Pair,
    /// The frequency of this pair
    pub count: u64,
}

impl MergeCandidate {
    /// Create a new merge candidate.
    pub fn new(pair: Pair, count: u64) -> Self {
        Self { pair, count }
    }
}

// Greater = higher priority: higher count, then lexicographically smaller pair
impl Ord for MergeCandidate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.count
            .cmp(&other.count)
            .then_with(|| other.pair.cmp(&self.pair))
    }
}

impl PartialOrd for MergeCandidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Priority queue for BPE merge operations.
///
/// Uses an 8-ary heap for better cache locality than a binary heap. Updated
/// counts are pushed as new entries; outdated entries are skipped on pop.
pub struct PairPriorityQueue {
    /// The heap storing merge candidates
    heap: OctonaryHeap<MergeCandidate>,
    /// Track current counts to detect stale entries
    current_counts: AHashMap<Pair, u64>,
}

impl PairPriorityQueue {
    /// Create a new priority queue with the given capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: OctonaryHeap::with_capacity(capacity),
            current_counts: AHashMap::with_capacity(capacity),
        }
    }

    /// Create a new empty priority queue.
    pub fn new() -> Self {
        Self {
            heap: OctonaryHeap::new(),
            current_counts: AHashMap::new(),
        }
    }

    /// Push a merge candidate onto the queue.
    pub fn push(&mut self, candidate: MergeCandidate) {
        self.current_counts
            .insert(candidate.pair.clone(), candidate.count);
        self.heap.push(candidate);
    }

    /// Pop the highest priority merge candidate.
    ///
    /// Returns None if the queue is empty or only contains stale entries.
    pub fn pop(&mut self) -> Option<MergeCandidate> {
        while let Some(candidate) = self.heap.pop() {
            if self.current_counts.get(&candidate.pair) == Some(&candidate.count) {
                self.current_counts.remove(&candidate.pair);
                return Some(candidate);
            }
        }
        None
    }

    /// Set the count for a pair, marking any older entry as stale.
    ///
    /// A count of zero removes the pair.
    pub fn update(&mut self, pair: Pair, new_count: u64) {
        if new_count == 0 {
            self.current_counts.remove(&pair);
            return;
        }
        self.current_counts.insert(pair.clone(), new_count);
        self.heap.push(MergeCandidate::new(pair, new_count));
    }

    /// Get the number of (potentially stale) entries in the queue.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Check if the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Clear all entries from the queue.
    pub fn clear(&mut self) {
        self.heap.clear();
        self.current_counts.clear();
    }

    /// Get the current count for a pair.
    pub fn get_count(&self, pair: &Pair) -> Option<u64> {
        self.current_counts.get(pair).copied()
    }
}

impl Default for PairPriorityQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::symbol::Symbol;

    fn pair(a: &str, b: &str) -> Pair {
        (Symbol::new(a), Symbol::new(b))
    }

    #[test]
    fn test_push_pop() {
        let mut queue = PairPriorityQueue::new();

        queue.push(MergeCandidate::new(pair("a", "b"), 10));
        queue.push(MergeCandidate::new(pair("b", "c"), 20));
        queue.push(MergeCandidate::new(pair("c", "d"), 15));

        assert_eq!(queue.pop().unwrap().pair, pair("b", "c"));
        assert_eq!(queue.pop().unwrap().pair, pair("c", "d"));
        assert_eq!(queue.pop().unwrap().pair, pair("a", "b"));
        assert!(queue.pop().is_none());
    }

    #[test]
    fn test_ties_prefer_smaller_pair() {
        let mut queue = PairPriorityQueue::new();

        queue.push(MergeCandidate::new(pair("l", "o"), 3));
        queue.push(MergeCandidate::new(pair("e", "w"), 3));
        queue.push(MergeCandidate::new(pair("e", "r"), 3));
        queue.push(MergeCandidate::new(pair("ab", "c"), 3));
        queue.push(MergeCandidate::new(pair("a", "bc"), 3));

        let order: Vec<Pair> = std::iter::from_fn(|| queue.pop()).map(|c| c.pair).collect();
        assert_eq!(
            order,
            vec![
                pair("a", "bc"),
                pair("ab", "c"),
                pair("e", "r"),
                pair("e", "w"),
                pair("l", "o"),
            ]
        );
    }

    #[test]
    fn test_stale_entry_detection() {
        let mut queue = PairPriorityQueue::new();

        queue.push(MergeCandidate::new(pair("a", "b"), 10));
        queue.push(MergeCandidate::new(pair("b", "c"), 20));

        queue.update(pair("a", "b"), 15);

        let first = queue.pop().unwrap();
        assert_eq!(first.pair, pair("b", "c"));

        let second = queue.pop().unwrap();
        assert_eq!(second.pair, pair("a", "b"));
        assert_eq!(second.count, 15);

        assert!(queue.pop().is_none());
    }

    #[test]
    fn test_update_to_zero_removes() {
        let mut queue = PairPriorityQueue::new();

        queue.push(MergeCandidate::new(pair("a", "b"), 4));
        queue.update(pair("a", "b"), 0);

        assert_eq!(queue.get_count(&pair("a", "b")), None);
        assert!(queue.pop().is_none());
    }

    #[test]
    fn test_clear() {
        let mut queue = PairPriorityQueue::new();

        queue.push(MergeCandidate::new(pair("a", "b"), 10));
        assert!(!queue.is_empty());

        queue.clear();
        assert!(queue.is_empty());
        assert_eq!(queue.len(), 0);
    }
}
