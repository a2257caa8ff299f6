//! Error types shared by the subwords crates.
//!
//! Training and encoding only fail on bad input (a reserved marker inside a
//! word, an invalid configuration or rule list). Everything else comes from
//! persistence.

use std::path::PathBuf;
use thiserror::Error;

/// Error type for every fallible subwords operation.
#[derive(Error, Debug)]
pub enum TokenizerError {
    /// A word contains the end-of-word marker text
    #[error("Word {word:?} contains the reserved end-of-word marker {marker:?}")]
    ReservedMarker { word: String, marker: &'static str },

    /// Training configuration out of range
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Merge rule with an empty symbol, or already in the list
    #[error("Invalid merge rule: {0}")]
    InvalidMerge(String),

    /// Saved model is readable but inconsistent
    #[error("Load error: {0}")]
    Load(String),

    /// File could not be read or written
    #[error("I/O error for {path}: {err}")]
    Io {
        path: PathBuf,
        #[source]
        err: std::io::Error,
    },

    /// `tokenizer.json` could not be encoded or parsed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TokenizerError>;
