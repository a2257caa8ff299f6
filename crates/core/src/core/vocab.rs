//! Frequency-weighted word vocabulary used during training.
//!
//! Each distinct word is stored once as its current symbol sequence along
//! with the number of times it occurred in the corpus. An index from every
//! adjacent pair to the words containing it lets a merge visit only the
//! words it actually rewrites.

use crate::core::merges::Pair;
use crate::core::symbol::{concat, merge_adjacent, Symbol, END_OF_WORD};
use ahash::{AHashMap, AHashSet};
use std::collections::BTreeSet;

/// Ordered set of distinct symbols.
pub type Alphabet = BTreeSet<Symbol>;

/// Mapping from a word's symbol sequence to its corpus frequency.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordVocabulary {
    words: AHashMap<Vec<Symbol>, u64>,
    /// Pair -> sequences in `words` holding it at least once
    pair_index: AHashMap<Pair, AHashSet<Vec<Symbol>>>,
}

/// Signed change to a pair's frequency produced by a merge.
pub type PairDelta = (Pair, i64);

impl WordVocabulary {
    /// Create a new empty vocabulary.
    pub fn new() -> Self {
        Self {
            words: AHashMap::new(),
            pair_index: AHashMap::new(),
        }
    }

    /// Add `count` occurrences of a symbol sequence.
    pub fn add(&mut self, symbols: Vec<Symbol>, count: u64) {
        if let Some(existing) = self.words.get_mut(&symbols) {
            *existing += count;
            return;
        }
        self.index(&symbols);
        self.words.insert(symbols, count);
    }

    /// Frequency of a symbol sequence, if present.
    pub fn get(&self, symbols: &[Symbol]) -> Option<u64> {
        self.words.get(symbols).copied()
    }

    /// Iterate over `(symbols, frequency)` entries in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&[Symbol], u64)> + '_ {
        self.words.iter().map(|(k, &v)| (k.as_slice(), v))
    }

    /// Number of distinct entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Check if the vocabulary has no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Total number of word occurrences across all entries.
    pub fn total_occurrences(&self) -> u64 {
        self.words.values().sum()
    }

    /// Every distinct symbol currently present.
    pub fn alphabet(&self) -> Alphabet {
        self.words.keys().flatten().cloned().collect()
    }

    /// Number of distinct characters, not counting the end-of-word marker.
    ///
    /// Meaningful on a freshly built vocabulary where each symbol is still a
    /// single character; merged symbols are counted as one entry.
    pub fn base_alphabet_size(&self) -> usize {
        self.words
            .keys()
            .flatten()
            .filter(|s| s.as_str() != END_OF_WORD)
            .collect::<BTreeSet<_>>()
            .len()
    }

    /// Number of distinct entries holding `pair`.
    pub fn words_containing(&self, pair: &Pair) -> usize {
        self.pair_index.get(pair).map_or(0, |words| words.len())
    }

    /// Merge `pair` in every entry.
    ///
    /// Entries that collapse onto the same sequence have their frequencies
    /// summed. Returns the frequency-weighted pair changes caused by the
    /// rewrite, for callers maintaining incremental statistics.
    pub fn merge_pair(&mut self, pair: &Pair) -> Vec<PairDelta> {
        let Some(touched) = self.pair_index.remove(pair) else {
            return Vec::new();
        };

        let (left, right) = (pair.0.as_str(), pair.1.as_str());
        let merged = concat(left, right);
        let mut changes = Vec::new();

        for old in touched {
            let Some(count) = self.words.remove(&old) else {
                continue;
            };
            self.unindex(&old);
            let weight = count as i64;

            let mut new = old.clone();
            merge_adjacent(&mut new, left, right, &merged);

            push_pairs(&mut changes, &old, -weight);
            push_pairs(&mut changes, &new, weight);

            self.add(new, count);
        }

        changes
    }

    fn index(&mut self, symbols: &[Symbol]) {
        for w in symbols.windows(2) {
            self.pair_index
                .entry((w[0].clone(), w[1].clone()))
                .or_default()
                .insert(symbols.to_vec());
        }
    }

    fn unindex(&mut self, symbols: &[Symbol]) {
        for w in symbols.windows(2) {
            let key = (w[0].clone(), w[1].clone());
            if let Some(words) = self.pair_index.get_mut(&key) {
                words.remove(symbols);
                if words.is_empty() {
                    self.pair_index.remove(&key);
                }
            }
        }
    }
}

fn push_pairs(changes: &mut Vec<PairDelta>, symbols: &[Symbol], delta: i64) {
    for w in symbols.windows(2) {
        changes.push(((w[0].clone(), w[1].clone()), delta));
    }
}

impl FromIterator<(Vec<Symbol>, u64)> for WordVocabulary {
    fn from_iter<I: IntoIterator<Item = (Vec<Symbol>, u64)>>(iter: I) -> Self {
        let mut vocab = Self::new();
        for (symbols, count) in iter {
            vocab.add(symbols, count);
        }
        vocab
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::symbol::symbolize;

    fn syms(items: &[&str]) -> Vec<Symbol> {
        items.iter().map(|s| Symbol::new(s)).collect()
    }

    fn pair(a: &str, b: &str) -> Pair {
        (Symbol::new(a), Symbol::new(b))
    }

    #[test]
    fn test_add_accumulates() {
        let mut vocab = WordVocabulary::new();
        vocab.add(symbolize("low").unwrap(), 1);
        vocab.add(symbolize("low").unwrap(), 2);

        assert_eq!(vocab.len(), 1);
        assert_eq!(vocab.get(&symbolize("low").unwrap()), Some(3));
        assert_eq!(vocab.total_occurrences(), 3);
    }

    #[test]
    fn test_base_alphabet_excludes_marker() {
        let mut vocab = WordVocabulary::new();
        vocab.add(symbolize("low").unwrap(), 1);
        vocab.add(symbolize("new").unwrap(), 1);

        assert_eq!(vocab.base_alphabet_size(), 5);
        assert_eq!(vocab.alphabet().len(), 6);
    }

    #[test]
    fn test_merge_pair_rewrites_entries() {
        let mut vocab = WordVocabulary::new();
        vocab.add(symbolize("lower").unwrap(), 2);
        vocab.add(symbolize("new").unwrap(), 1);

        vocab.merge_pair(&pair("w", "e"));

        assert_eq!(vocab.get(&syms(&["l", "o", "we", "r", END_OF_WORD])), Some(2));
        assert_eq!(vocab.get(&symbolize("new").unwrap()), Some(1));
    }

    #[test]
    fn test_merge_pair_reports_weighted_deltas() {
        let mut vocab = WordVocabulary::new();
        vocab.add(symbolize("ab").unwrap(), 3);

        let changes = vocab.merge_pair(&pair("a", "b"));

        let mut net: AHashMap<Pair, i64> = AHashMap::new();
        for (p, d) in changes {
            *net.entry(p).or_insert(0) += d;
        }
        assert_eq!(net.get(&pair("a", "b")), Some(&-3));
        assert_eq!(net.get(&pair("b", END_OF_WORD)), Some(&-3));
        assert_eq!(net.get(&pair("ab", END_OF_WORD)), Some(&3));
    }

    #[test]
    fn test_merge_pair_collapses_equal_sequences() {
        let mut vocab = WordVocabulary::new();
        vocab.add(syms(&["ab", "c", END_OF_WORD]), 2);
        vocab.add(syms(&["a", "bc", END_OF_WORD]), 5);

        vocab.merge_pair(&pair("ab", "c"));
        vocab.merge_pair(&pair("a", "bc"));

        assert_eq!(vocab.len(), 1);
        assert_eq!(vocab.get(&syms(&["abc", END_OF_WORD])), Some(7));
        assert_eq!(vocab.total_occurrences(), 7);
    }

    #[test]
    fn test_merge_absent_pair_is_noop() {
        let mut vocab = WordVocabulary::new();
        vocab.add(symbolize("low").unwrap(), 1);
        let before = vocab.clone();

        let changes = vocab.merge_pair(&pair("x", "y"));

        assert!(changes.is_empty());
        assert_eq!(vocab, before);
    }

    #[test]
    fn test_merge_pair_matches_full_rewrite() {
        let corpus = [("lower", 2), ("lowest", 1), ("newer", 3), ("wider", 1), ("aaaa", 2)];
        let merges = [
            pair("w", "e"),
            pair("e", "r"),
            pair("l", "o"),
            pair("lo", "we"),
            pair("a", "a"),
            pair("aa", "aa"),
            pair("er", END_OF_WORD),
        ];

        let mut vocab: WordVocabulary = corpus
            .iter()
            .map(|(w, c)| (symbolize(w).unwrap(), *c))
            .collect();
        for p in &merges {
            vocab.merge_pair(p);
        }

        for (word, count) in corpus {
            let mut expected = symbolize(word).unwrap();
            for (l, r) in &merges {
                merge_adjacent(&mut expected, l, r, &concat(l, r));
            }
            assert_eq!(vocab.get(&expected), Some(count), "word {word}");
        }
        assert_eq!(vocab.len(), corpus.len());
    }

    #[test]
    fn test_index_tracks_rewritten_words() {
        let mut vocab = WordVocabulary::new();
        vocab.add(symbolize("lower").unwrap(), 2);
        vocab.add(symbolize("newer").unwrap(), 1);
        vocab.add(symbolize("low").unwrap(), 4);

        assert_eq!(vocab.words_containing(&pair("w", "e")), 2);
        vocab.merge_pair(&pair("w", "e"));

        assert_eq!(vocab.words_containing(&pair("w", "e")), 0);
        assert_eq!(vocab.words_containing(&pair("we", "r")), 2);
        assert_eq!(vocab.words_containing(&pair("o", "w")), 1);
        assert_eq!(vocab.words_containing(&pair("o", "we")), 1);
    }

    #[test]
    fn test_index_follows_collapsed_entries() {
        let mut vocab = WordVocabulary::new();
        vocab.add(syms(&["ab", "c", END_OF_WORD]), 2);
        vocab.add(syms(&["a", "bc", END_OF_WORD]), 5);

        vocab.merge_pair(&pair("ab", "c"));
        vocab.merge_pair(&pair("a", "bc"));
        assert_eq!(vocab.words_containing(&pair("abc", END_OF_WORD)), 1);

        vocab.merge_pair(&pair("abc", END_OF_WORD));
        assert_eq!(vocab.get(&syms(&["abc</w>"])), Some(7));
        assert_eq!(vocab.words_containing(&pair("abc", END_OF_WORD)), 0);
    }
}
