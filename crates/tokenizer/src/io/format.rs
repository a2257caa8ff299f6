//! Format definitions for tokenizer serialization.
//!
//! Two on-disk formats are supported:
//! - `tokenizer.json`: merge rules with ranks, the trained alphabet and the
//!   training configuration
//! - `merges.txt`: a version header followed by one `left right` pair per
//!   line, in rank order

use serde::{Deserialize, Serialize};

/// File name of the JSON model inside a tokenizer directory.
pub const TOKENIZER_FILE: &str = "tokenizer.json";

/// File name of the plain-text merge list inside a tokenizer directory.
pub const MERGES_FILE: &str = "merges.txt";

/// Prefix of the first line of `merges.txt`.
pub const MERGES_HEADER_PREFIX: &str = "#version:";

/// Model format types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelFormat {
    /// Custom JSON format (`tokenizer.json`)
    Json,
    /// Plain merge list (`merges.txt`)
    MergesText,
}

impl ModelFormat {
    /// File name used for this format inside a tokenizer directory.
    pub fn file_name(self) -> &'static str {
        match self {
            ModelFormat::Json => TOKENIZER_FILE,
            ModelFormat::MergesText => MERGES_FILE,
        }
    }
}

/// Merge rule for serialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializedMerge {
    /// The pair of symbols being merged
    pub pair: (String, String),
    /// The rank/priority of this merge
    pub rank: u32,
}

/// Complete tokenizer serialization format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SerializedTokenizer {
    /// Format version
    pub version: String,
    /// End-of-word marker the rules were trained with
    pub end_of_word: String,
    /// Merge rules
    pub merges: Vec<SerializedMerge>,
    /// Final alphabet, sorted
    pub alphabet: Vec<String>,
    /// Configuration
    pub config: SerializedConfig,
}

/// Tokenizer configuration in serialized format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializedConfig {
    pub max_alphabet_size: usize,
    pub min_frequency: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialization_roundtrip() {
        let tokenizer_data = SerializedTokenizer {
            version: "0.3.0".to_string(),
            end_of_word: "</w>".to_string(),
            merges: vec![
                SerializedMerge {
                    pair: ("w".to_string(), "e".to_string()),
                    rank: 0,
                },
                SerializedMerge {
                    pair: ("l".to_string(), "o".to_string()),
                    rank: 1,
                },
            ],
            alphabet: vec!["lo".to_string(), "we".to_string()],
            config: SerializedConfig {
                max_alphabet_size: 20,
                min_frequency: 1,
            },
        };

        let json = serde_json::to_string(&tokenizer_data).unwrap();
        let deserialized: SerializedTokenizer = serde_json::from_str(&json).unwrap();

        assert_eq!(deserialized.version, tokenizer_data.version);
        assert_eq!(deserialized.merges, tokenizer_data.merges);
        assert_eq!(deserialized.alphabet, tokenizer_data.alphabet);
        assert_eq!(deserialized.config, tokenizer_data.config);
    }

    #[test]
    fn test_pair_is_a_json_array() {
        let merge = SerializedMerge {
            pair: ("e".to_string(), "r</w>".to_string()),
            rank: 3,
        };
        let json = serde_json::to_string(&merge).unwrap();
        assert_eq!(json, r#"{"pair":["e","r</w>"],"rank":3}"#);
    }
}
