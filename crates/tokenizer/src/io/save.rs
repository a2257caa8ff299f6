//! Save functionality for trained tokenizers.
//!
//! This module provides methods for saving trained merge rules to disk
//! in the JSON and plain-text formats.

use super::format::{
    SerializedConfig, SerializedMerge, SerializedTokenizer, MERGES_FILE, MERGES_HEADER_PREFIX,
    TOKENIZER_FILE,
};
use crate::tokenizer::TokenizerConfig;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use subwords_core::{Alphabet, MergeRules, Result, TokenizerError, END_OF_WORD};
use tracing::info;

/// Tokenizer saver - handles saving trained models.
pub struct TokenizerSaver<'a> {
    /// Merge rules reference
    merges: &'a MergeRules,
    /// Trained alphabet reference
    alphabet: &'a Alphabet,
    /// Configuration the rules were trained with
    config: &'a TokenizerConfig,
}

impl<'a> TokenizerSaver<'a> {
    /// Create a new tokenizer saver.
    pub fn new(merges: &'a MergeRules, alphabet: &'a Alphabet, config: &'a TokenizerConfig) -> Self {
        Self {
            merges,
            alphabet,
            config,
        }
    }

    /// Save the tokenizer to a directory as `tokenizer.json`.
    pub fn save(&self, path: &Path) -> Result<()> {
        create_dir(path)?;

        let file_path = path.join(TOKENIZER_FILE);
        let file = File::create(&file_path).map_err(|err| TokenizerError::Io {
            path: file_path.clone(),
            err,
        })?;

        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &self.serialize())?;
        writer.flush().map_err(|err| TokenizerError::Io {
            path: file_path.clone(),
            err,
        })?;

        info!(path = %file_path.display(), merges = self.merges.len(), "saved tokenizer");
        Ok(())
    }

    /// Save the merge rules to a directory as `merges.txt`.
    pub fn save_merges(&self, path: &Path) -> Result<()> {
        create_dir(path)?;

        let file_path = path.join(MERGES_FILE);
        std::fs::write(&file_path, render_merges(self.merges)).map_err(|err| {
            TokenizerError::Io {
                path: file_path.clone(),
                err,
            }
        })?;

        info!(path = %file_path.display(), merges = self.merges.len(), "saved merge list");
        Ok(())
    }

    /// Serialize the tokenizer to a structure.
    pub(crate) fn serialize(&self) -> SerializedTokenizer {
        let merges = self
            .merges
            .iter()
            .enumerate()
            .map(|(rank, (left, right))| SerializedMerge {
                pair: (left.to_string(), right.to_string()),
                rank: rank as u32,
            })
            .collect();

        SerializedTokenizer {
            version: env!("CARGO_PKG_VERSION").to_string(),
            end_of_word: END_OF_WORD.to_string(),
            merges,
            alphabet: self.alphabet.iter().map(|s| s.to_string()).collect(),
            config: SerializedConfig {
                max_alphabet_size: self.config.max_alphabet_size,
                min_frequency: self.config.min_frequency,
            },
        }
    }
}

/// Render merge rules in the `merges.txt` layout.
pub fn render_merges(merges: &MergeRules) -> String {
    let mut out = format!("{} {}\n", MERGES_HEADER_PREFIX, env!("CARGO_PKG_VERSION"));
    for (left, right) in merges.iter() {
        out.push_str(left);
        out.push(' ');
        out.push_str(right);
        out.push('\n');
    }
    out
}

fn create_dir(path: &Path) -> Result<()> {
    std::fs::create_dir_all(path).map_err(|err| TokenizerError::Io {
        path: path.to_path_buf(),
        err,
    })
}
