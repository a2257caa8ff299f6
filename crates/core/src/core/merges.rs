//! Merge rule management for BPE.
//!
//! Merge rules are kept in the order they were learned. That order is also
//! their priority at encode time, so every rule carries its rank (position in
//! the list, lower rank = higher priority) in a hash index for fast lookups.

use crate::core::symbol::{concat, Symbol};
use crate::error::{Result, TokenizerError};
use ahash::AHashMap;

/// An ordered pair of adjacent symbols.
pub type Pair = (Symbol, Symbol);

/// Rank index: left symbol -> right symbol -> rank.
///
/// Nested so that lookups can borrow both halves as `&str`.
pub type MergeMap = AHashMap<Symbol, AHashMap<Symbol, u32>>;

/// Ordered list of BPE merge rules with rank lookup.
#[derive(Debug, Clone, Default)]
pub struct MergeRules {
    /// Rules in the order they were learned
    rules: Vec<Pair>,
    /// Left -> right -> rank
    ranks: MergeMap,
}

impl MergeRules {
    /// Create a new empty collection of merge rules.
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            ranks: MergeMap::new(),
        }
    }

    /// Create a new collection with capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            rules: Vec::with_capacity(capacity),
            ranks: MergeMap::with_capacity(capacity),
        }
    }

    /// Append a merge rule with the next rank.
    ///
    /// Returns the rank assigned to the rule. Rules with an empty symbol and
    /// rules already present are rejected.
    pub fn push(&mut self, pair: Pair) -> Result<u32> {
        if pair.0.is_empty() || pair.1.is_empty() {
            return Err(TokenizerError::InvalidMerge(format!(
                "empty symbol in pair ({:?}, {:?})",
                pair.0, pair.1
            )));
        }
        if let Some(rank) = self.rank(&pair.0, &pair.1) {
            return Err(TokenizerError::InvalidMerge(format!(
                "duplicate pair ({:?}, {:?}), first learned at rank {}",
                pair.0, pair.1, rank
            )));
        }

        let rank = self.rules.len() as u32;
        self.ranks
            .entry(pair.0.clone())
            .or_default()
            .insert(pair.1.clone(), rank);
        self.rules.push(pair);

        Ok(rank)
    }

    /// Get the rank of a pair, if it is a merge rule.
    #[inline]
    pub fn rank(&self, left: &str, right: &str) -> Option<u32> {
        self.ranks.get(left)?.get(right).copied()
    }

    /// Get the rule at a given rank.
    #[inline]
    pub fn get(&self, rank: u32) -> Option<&Pair> {
        self.rules.get(rank as usize)
    }

    /// Iterate over rules in priority order.
    pub fn iter(&self) -> impl Iterator<Item = &Pair> + '_ {
        self.rules.iter()
    }

    /// The rules as a slice, in priority order.
    pub fn as_slice(&self) -> &[Pair] {
        &self.rules
    }

    /// Symbols produced by the rules, in learned order.
    pub fn merged_symbols(&self) -> impl Iterator<Item = Symbol> + '_ {
        self.rules.iter().map(|(l, r)| concat(l, r))
    }

    /// Get the number of merge rules.
    #[inline]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Check if there are no merge rules.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Create merge rules from a list of pairs.
    ///
    /// The pairs are assigned ranks in order (0, 1, 2, ...).
    pub fn from_pairs(pairs: impl IntoIterator<Item = Pair>) -> Result<Self> {
        let mut rules = Self::new();

        for pair in pairs {
            rules.push(pair)?;
        }

        Ok(rules)
    }
}

impl PartialEq for MergeRules {
    fn eq(&self, other: &Self) -> bool {
        self.rules == other.rules
    }
}

impl Eq for MergeRules {}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(a: &str, b: &str) -> Pair {
        (Symbol::new(a), Symbol::new(b))
    }

    #[test]
    fn test_push_assigns_ranks_in_order() {
        let mut rules = MergeRules::new();
        assert_eq!(rules.push(pair("e", "r")).unwrap(), 0);
        assert_eq!(rules.push(pair("l", "o")).unwrap(), 1);

        assert_eq!(rules.rank(&Symbol::new("e"), &Symbol::new("r")), Some(0));
        assert_eq!(rules.rank(&Symbol::new("l"), &Symbol::new("o")), Some(1));
        assert_eq!(rules.rank(&Symbol::new("o"), &Symbol::new("w")), None);
        assert_eq!(rules.get(1), Some(&pair("l", "o")));
    }

    #[test]
    fn test_duplicate_rejected() {
        let mut rules = MergeRules::new();
        rules.push(pair("a", "b")).unwrap();

        let err = rules.push(pair("a", "b")).unwrap_err();
        assert!(matches!(err, TokenizerError::InvalidMerge(_)));
        assert_eq!(rules.len(), 1);
    }

    #[test]
    fn test_empty_symbol_rejected() {
        let mut rules = MergeRules::new();
        assert!(rules.push(pair("", "b")).is_err());
        assert!(rules.is_empty());
    }

    #[test]
    fn test_rank_lookup_keeps_halves_apart() {
        let rules = MergeRules::from_pairs(vec![pair("ab", "c"), pair("a", "bc")]).unwrap();

        assert_eq!(rules.rank("ab", "c"), Some(0));
        assert_eq!(rules.rank("a", "bc"), Some(1));
        assert_eq!(rules.rank("abc", ""), None);
        assert_eq!(rules.rank("a", "b"), None);
    }

    #[test]
    fn test_from_pairs_and_merged_symbols() {
        let rules = MergeRules::from_pairs(vec![pair("l", "o"), pair("lo", "w")]).unwrap();

        let merged: Vec<Symbol> = rules.merged_symbols().collect();
        assert_eq!(merged, vec![Symbol::new("lo"), Symbol::new("low")]);
        assert_eq!(rules.len(), 2);
    }
}
