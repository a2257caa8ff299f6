//! Greedy merge-rule encoder.
//!
//! A word starts as its characters plus the end-of-word marker. At every
//! step the highest-priority rule that matches any adjacent pair is applied
//! at its leftmost occurrence, and the search restarts from the top of the
//! rule list, because a merge can expose a pair that an earlier rule covers.
//! Picking the adjacent pair with the lowest rank is the same as scanning
//! the rule list in order and stopping at the first rule present.

use crate::core::merges::MergeRules;
use crate::core::symbol::{concat, symbolize, Symbol, END_OF_WORD};
use crate::Result;
use std::sync::Arc;

/// Encoder applying an ordered merge-rule list to single words.
#[derive(Debug, Clone)]
pub struct MergeEncoder {
    /// Merge rules in priority order
    rules: Arc<MergeRules>,
}

impl MergeEncoder {
    /// Create a new encoder over the given rules.
    pub fn new(rules: MergeRules) -> Self {
        Self::with_arc(Arc::new(rules))
    }

    /// Create an encoder sharing an existing rule list.
    pub fn with_arc(rules: Arc<MergeRules>) -> Self {
        Self { rules }
    }

    /// The rules this encoder applies.
    pub fn rules(&self) -> &MergeRules {
        &self.rules
    }

    /// Segment a single word into subword symbols.
    ///
    /// The last symbol always ends with the end-of-word marker. Fails only if
    /// the word contains the marker text.
    pub fn encode_word(&self, word: &str) -> Result<Vec<Symbol>> {
        let mut tokens = symbolize(word)?;

        while let Some(i) = self.best_position(&tokens) {
            let merged = concat(&tokens[i], &tokens[i + 1]);
            tokens[i] = merged;
            tokens.remove(i + 1);
        }

        Ok(tokens)
    }

    /// Index of the leftmost occurrence of the lowest-rank adjacent pair.
    fn best_position(&self, tokens: &[Symbol]) -> Option<usize> {
        let mut best: Option<(u32, usize)> = None;

        for i in 0..tokens.len().saturating_sub(1) {
            if let Some(rank) = self.rules.rank(&tokens[i], &tokens[i + 1]) {
                if best.map_or(true, |(r, _)| rank < r) {
                    best = Some((rank, i));
                }
            }
        }

        best.map(|(_, i)| i)
    }

    /// Reassemble text from symbols produced by [`encode_word`](Self::encode_word).
    ///
    /// Each symbol ending in the end-of-word marker closes a word; words are
    /// joined with a single space. Trailing symbols without a marker are kept
    /// as a final word.
    pub fn decode(&self, tokens: &[Symbol]) -> String {
        decode_symbols(tokens)
    }
}

/// Join symbols back into whitespace-separated words.
pub fn decode_symbols(tokens: &[Symbol]) -> String {
    let mut words: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut open = false;

    for token in tokens {
        match token.strip_suffix(END_OF_WORD) {
            Some(stem) => {
                current.push_str(stem);
                words.push(std::mem::take(&mut current));
                open = false;
            }
            None => {
                current.push_str(token);
                open = true;
            }
        }
    }
    if open {
        words.push(current);
    }

    words.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::merges::Pair;
    use crate::TokenizerError;

    fn pair(a: &str, b: &str) -> Pair {
        (Symbol::new(a), Symbol::new(b))
    }

    fn strs(tokens: &[Symbol]) -> Vec<&str> {
        tokens.iter().map(|s| s.as_str()).collect()
    }

    fn encoder(pairs: &[(&str, &str)]) -> MergeEncoder {
        MergeEncoder::new(
            MergeRules::from_pairs(pairs.iter().map(|(a, b)| pair(a, b))).unwrap(),
        )
    }

    #[test]
    fn test_single_char_no_rules() {
        let enc = encoder(&[]);
        assert_eq!(strs(&enc.encode_word("a").unwrap()), vec!["a", END_OF_WORD]);
    }

    #[test]
    fn test_empty_word() {
        let enc = encoder(&[("a", "b")]);
        assert_eq!(strs(&enc.encode_word("").unwrap()), vec![END_OF_WORD]);
    }

    #[test]
    fn test_applies_rules_in_priority_order() {
        let enc = encoder(&[("e", "r"), ("l", "o"), ("lo", "w"), ("er", "</w>")]);
        assert_eq!(strs(&enc.encode_word("lower").unwrap()), vec!["low", "er</w>"]);
    }

    #[test]
    fn test_rescans_from_top_after_merge() {
        // ("ab", "c") only becomes possible after ("a", "b"); it must then beat
        // the lower-priority ("c", "d") that was available from the start.
        let enc = encoder(&[("a", "b"), ("ab", "c"), ("c", "d")]);
        assert_eq!(strs(&enc.encode_word("abcd").unwrap()), vec!["abc", "d", END_OF_WORD]);
    }

    #[test]
    fn test_merges_leftmost_occurrence_first() {
        let enc = encoder(&[("a", "a")]);
        assert_eq!(strs(&enc.encode_word("aaa").unwrap()), vec!["aa", "a", END_OF_WORD]);
    }

    #[test]
    fn test_unknown_rules_fall_back_to_characters() {
        let enc = encoder(&[("x", "y"), ("y", "z")]);
        assert_eq!(strs(&enc.encode_word("abc").unwrap()), vec!["a", "b", "c", END_OF_WORD]);
    }

    #[test]
    fn test_rejects_reserved_marker() {
        let enc = encoder(&[]);
        assert!(matches!(
            enc.encode_word("x</w>"),
            Err(TokenizerError::ReservedMarker { .. })
        ));
    }

    #[test]
    fn test_decode_joins_words() {
        let enc = encoder(&[("l", "o"), ("lo", "w")]);
        let mut tokens = enc.encode_word("low").unwrap();
        tokens.extend(enc.encode_word("er").unwrap());
        assert_eq!(enc.decode(&tokens), "low er");
    }

    #[test]
    fn test_decode_unterminated_tail() {
        let tokens = vec![Symbol::new("lo"), Symbol::new("w</w>"), Symbol::new("ne")];
        assert_eq!(decode_symbols(&tokens), "low ne");
    }

    #[test]
    fn test_decode_empty() {
        assert_eq!(decode_symbols(&[]), "");
    }
}
