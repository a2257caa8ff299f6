//! Initial vocabulary construction from corpus lines.

use ahash::AHashMap;
use compact_str::CompactString;
use subwords_core::{check_reserved, symbolize, Result, WordVocabulary};

/// Accumulates word frequencies from corpus text.
///
/// Words are counted as whole strings first and only decomposed into
/// symbols once per distinct word in [`build`](Self::build).
#[derive(Debug, Default)]
pub struct VocabularyBuilder {
    /// Word -> number of occurrences
    word_counts: AHashMap<CompactString, u64>,
}

impl VocabularyBuilder {
    /// Create a new empty builder.
    pub fn new() -> Self {
        Self {
            word_counts: AHashMap::new(),
        }
    }

    /// Add every whitespace-separated word of a line.
    pub fn add_line(&mut self, line: &str) -> Result<()> {
        for word in line.split_whitespace() {
            self.add_word(word)?;
        }
        Ok(())
    }

    /// Add a single occurrence of a word.
    pub fn add_word(&mut self, word: &str) -> Result<()> {
        check_reserved(word)?;
        *self
            .word_counts
            .entry(CompactString::new(word))
            .or_insert(0) += 1;
        Ok(())
    }

    /// Number of distinct words seen so far.
    pub fn word_count(&self) -> usize {
        self.word_counts.len()
    }

    /// Decompose each distinct word into symbols.
    pub fn build(self) -> Result<WordVocabulary> {
        let mut vocab = WordVocabulary::new();
        for (word, count) in self.word_counts {
            vocab.add(symbolize(&word)?, count);
        }
        Ok(vocab)
    }

    /// Build a vocabulary from corpus lines in one call.
    pub fn from_lines<I, S>(lines: I) -> Result<WordVocabulary>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut builder = Self::new();
        for line in lines {
            builder.add_line(line.as_ref())?;
        }
        builder.build()
    }
}
