//! Pair counting for BPE training.
//!
//! This module counts adjacent symbol pairs across the word vocabulary,
//! weighted by word frequency, with optional parallel processing.

use ahash::AHashMap;
use std::cmp::Ordering;
use subwords_core::{
    MergeCandidate, Pair, PairDelta, PairPriorityQueue, Symbol, WordVocabulary,
};

/// Frequencies of adjacent symbol pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PairStatistics {
    /// Pair -> frequency count
    pair_counts: AHashMap<Pair, u64>,
}

impl PairStatistics {
    /// Create an empty table.
    pub fn new() -> Self {
        Self {
            pair_counts: AHashMap::new(),
        }
    }

    /// Count all pairs sequentially.
    pub fn count(vocab: &WordVocabulary) -> Self {
        let mut pair_counts: AHashMap<Pair, u64> = AHashMap::new();

        for (symbols, count) in vocab.iter() {
            add_pairs(&mut pair_counts, symbols, count);
        }

        Self { pair_counts }
    }

    /// Count all pairs in parallel.
    ///
    /// Produces the same table as [`count`](Self::count).
    pub fn count_parallel(vocab: &WordVocabulary) -> Self {
        use rayon::prelude::*;

        let entries: Vec<(&[Symbol], u64)> = vocab.iter().collect();

        let pair_counts = entries
            .par_iter()
            .map(|&(symbols, count)| {
                let mut pair_counts: AHashMap<Pair, u64> = AHashMap::new();
                add_pairs(&mut pair_counts, symbols, count);
                pair_counts
            })
            .reduce(AHashMap::new, |mut acc, pair_counts| {
                for (pair, count) in pair_counts {
                    *acc.entry(pair).or_insert(0) += count;
                }
                acc
            });

        Self { pair_counts }
    }

    /// Get the frequency of a pair.
    pub fn get(&self, pair: &Pair) -> Option<u64> {
        self.pair_counts.get(pair).copied()
    }

    /// Iterate over `(pair, frequency)` entries in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&Pair, u64)> + '_ {
        self.pair_counts.iter().map(|(p, &c)| (p, c))
    }

    /// Number of distinct pairs.
    pub fn len(&self) -> usize {
        self.pair_counts.len()
    }

    /// Check if no pairs were observed.
    pub fn is_empty(&self) -> bool {
        self.pair_counts.is_empty()
    }

    /// Select the pair to merge next.
    ///
    /// Highest frequency wins; equal frequencies go to the pair that sorts
    /// first as `(left, right)`, matching [`MergeCandidate`]'s ordering.
    /// Pairs below `min_frequency` (and zero counts) are never selected.
    pub fn best(&self, min_frequency: u64) -> Option<MergeCandidate> {
        let min_frequency = min_frequency.max(1);

        self.pair_counts
            .iter()
            .filter(|(_, &count)| count >= min_frequency)
            .max_by(|a, b| compare_entries(a, b))
            .map(|(pair, &count)| MergeCandidate::new(pair.clone(), count))
    }

    /// Apply merge deltas to the table.
    ///
    /// Returns the new frequency of every pair whose count changed, zero for
    /// pairs that disappeared.
    pub fn apply_changes(&mut self, changes: Vec<PairDelta>) -> Vec<(Pair, u64)> {
        let mut aggregated: AHashMap<Pair, i64> = AHashMap::new();
        for (pair, delta) in changes {
            *aggregated.entry(pair).or_insert(0) += delta;
        }

        let mut updated = Vec::with_capacity(aggregated.len());

        for (pair, delta) in aggregated {
            if delta == 0 {
                continue;
            }
            let current = self.pair_counts.get(&pair).copied().unwrap_or(0);
            let new_count = (current as i64 + delta).max(0) as u64;

            if new_count > 0 {
                self.pair_counts.insert(pair.clone(), new_count);
            } else {
                self.pair_counts.remove(&pair);
            }
            updated.push((pair, new_count));
        }

        updated
    }

    /// Build a priority queue holding every counted pair.
    pub fn to_queue(&self) -> PairPriorityQueue {
        let mut queue = PairPriorityQueue::with_capacity(self.pair_counts.len());

        for (pair, &count) in &self.pair_counts {
            queue.push(MergeCandidate::new(pair.clone(), count));
        }

        queue
    }
}

fn add_pairs(pair_counts: &mut AHashMap<Pair, u64>, symbols: &[Symbol], count: u64) {
    for window in symbols.windows(2) {
        let pair = (window[0].clone(), window[1].clone());
        *pair_counts.entry(pair).or_insert(0) += count;
    }
}

fn compare_entries(a: &(&Pair, &u64), b: &(&Pair, &u64)) -> Ordering {
    a.1.cmp(b.1).then_with(|| b.0.cmp(a.0))
}
