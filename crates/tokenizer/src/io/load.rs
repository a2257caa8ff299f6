//! Load functionality for pre-trained tokenizers.
//!
//! This module provides methods for loading merge rules from disk. Loaded
//! rules keep their saved priority order, so a reloaded tokenizer produces
//! the same tokens as the one that was saved.

use super::format::{
    SerializedConfig, SerializedTokenizer, MERGES_FILE, MERGES_HEADER_PREFIX, TOKENIZER_FILE,
};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use subwords_core::{Alphabet, MergeRules, Result, Symbol, TokenizerError, END_OF_WORD};
use tracing::info;

/// A model read back from `tokenizer.json`.
#[derive(Debug, Clone)]
pub struct LoadedModel {
    /// Merge rules in priority order
    pub merges: MergeRules,
    /// Trained alphabet
    pub alphabet: Alphabet,
    /// Configuration the rules were trained with
    pub config: SerializedConfig,
}

/// Tokenizer loader - handles loading trained models.
pub struct TokenizerLoader;

impl TokenizerLoader {
    /// Load a tokenizer from a directory in custom JSON format.
    ///
    /// Expects a `tokenizer.json` file in the given directory.
    pub fn load(path: &Path) -> Result<LoadedModel> {
        let file_path = path.join(TOKENIZER_FILE);
        let file = File::open(&file_path).map_err(|err| TokenizerError::Io {
            path: file_path.clone(),
            err,
        })?;

        let reader = BufReader::new(file);
        let serialized: SerializedTokenizer = serde_json::from_reader(reader)?;

        let model = Self::deserialize(serialized)?;
        info!(path = %file_path.display(), merges = model.merges.len(), "loaded tokenizer");
        Ok(model)
    }

    /// Load merge rules from a directory containing `merges.txt`.
    pub fn load_merges(path: &Path) -> Result<MergeRules> {
        let file_path = path.join(MERGES_FILE);
        let content = std::fs::read_to_string(&file_path).map_err(|err| TokenizerError::Io {
            path: file_path.clone(),
            err,
        })?;

        let merges = parse_merges(&content)?;
        info!(path = %file_path.display(), merges = merges.len(), "loaded merge list");
        Ok(merges)
    }

    /// Deserialize from a serialized structure.
    fn deserialize(data: SerializedTokenizer) -> Result<LoadedModel> {
        if data.end_of_word != END_OF_WORD {
            return Err(TokenizerError::Load(format!(
                "Unsupported end-of-word marker {:?} (expected {:?})",
                data.end_of_word, END_OF_WORD
            )));
        }

        let mut records = data.merges;
        records.sort_by_key(|m| m.rank);

        let mut merges = MergeRules::with_capacity(records.len());
        for (expected, record) in records.into_iter().enumerate() {
            if record.rank as usize != expected {
                return Err(TokenizerError::Load(format!(
                    "Merge ranks are not contiguous: expected rank {}, found {}",
                    expected, record.rank
                )));
            }
            let (left, right) = record.pair;
            if left.contains(char::is_whitespace) || right.contains(char::is_whitespace) {
                return Err(TokenizerError::Load(format!(
                    "Merge at rank {} has a symbol containing whitespace: ({:?}, {:?})",
                    record.rank, left, right
                )));
            }
            merges.push((Symbol::from(left), Symbol::from(right)))?;
        }

        let alphabet = data.alphabet.into_iter().map(Symbol::from).collect();

        Ok(LoadedModel {
            merges,
            alphabet,
            config: data.config,
        })
    }
}

/// Parse the `merges.txt` layout.
///
/// The optional `#version:` header on the first line and blank lines are
/// skipped. Every other line must hold exactly two symbols.
pub fn parse_merges(content: &str) -> Result<MergeRules> {
    let mut merges = MergeRules::new();

    for (line_num, line) in content.lines().enumerate() {
        if line_num == 0 && line.starts_with(MERGES_HEADER_PREFIX) {
            continue;
        }
        if line.trim().is_empty() {
            continue;
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() != 2 {
            return Err(TokenizerError::Load(format!(
                "Invalid merge format at line {}: '{}'",
                line_num + 1,
                line
            )));
        }

        merges
            .push((Symbol::new(parts[0]), Symbol::new(parts[1])))
            .map_err(|e| TokenizerError::Load(format!("Line {}: {}", line_num + 1, e)))?;
    }

    Ok(merges)
}
