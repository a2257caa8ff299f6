//! Symbols and the per-word decomposition shared by training and encoding.

use crate::error::{Result, TokenizerError};
use compact_str::CompactString;

/// The smallest unit the merge algorithm tracks.
///
/// Initially one character, later the concatenation of two merged symbols.
/// Most symbols fit inline in a `CompactString`, so cloning them is cheap.
pub type Symbol = CompactString;

/// Reserved end-of-word marker appended to every word.
///
/// It keeps merges from crossing word boundaries and tells the decoder
/// where one word stops.
pub const END_OF_WORD: &str = "</w>";

/// Check that `word` does not contain the end-of-word marker text.
pub fn check_reserved(word: &str) -> Result<()> {
    if word.contains(END_OF_WORD) {
        return Err(TokenizerError::ReservedMarker {
            word: word.to_string(),
            marker: END_OF_WORD,
        });
    }
    Ok(())
}

/// Split a word into single-character symbols followed by the end-of-word marker.
///
/// Both the vocabulary builder and the encoder start from this sequence.
pub fn symbolize(word: &str) -> Result<Vec<Symbol>> {
    check_reserved(word)?;

    let mut symbols = Vec::with_capacity(word.chars().count() + 1);
    let mut buf = [0u8; 4];
    for ch in word.chars() {
        symbols.push(Symbol::new(ch.encode_utf8(&mut buf)));
    }
    symbols.push(Symbol::const_new(END_OF_WORD));

    Ok(symbols)
}

/// Replace every non-overlapping occurrence of `left` followed by `right`.
///
/// Only whole adjacent symbols match; a pair that merely appears inside a
/// longer symbol's text is left alone. Occurrences are consumed left to
/// right, so `a a a` merged on `(a, a)` becomes `aa a`.
///
/// Returns the number of occurrences replaced.
pub fn merge_adjacent(
    symbols: &mut Vec<Symbol>,
    left: &str,
    right: &str,
    merged: &Symbol,
) -> usize {
    let mut replaced = 0;
    let mut out = Vec::with_capacity(symbols.len());
    let mut iter = std::mem::take(symbols).into_iter().peekable();

    while let Some(symbol) = iter.next() {
        if symbol == left && iter.peek().is_some_and(|next| *next == right) {
            iter.next();
            out.push(merged.clone());
            replaced += 1;
        } else {
            out.push(symbol);
        }
    }

    *symbols = out;
    replaced
}

/// Concatenate the text of a pair into the merged symbol.
#[inline]
pub fn concat(left: &str, right: &str) -> Symbol {
    let mut merged = Symbol::with_capacity(left.len() + right.len());
    merged.push_str(left);
    merged.push_str(right);
    merged
}
