//! Subwords-core - Core BPE data model and encoder
//!
//! This crate provides the fundamental data structures for symbol-level
//! byte-pair encoding (BPE) and the encoder that applies a trained,
//! ordered merge-rule list to new words. It has no knowledge of how the
//! rules were learned.
//!
//! # Features
//!
//! - Compact symbol storage using `CompactString`
//! - Frequency-weighted word vocabulary with in-place merge rewriting
//! - Ordered merge rules with `AHashMap` rank lookup
//! - Deterministic candidate priority queue
//! - Greedy priority-ordered encoder with lossless decoding
//!
//! # Example
//!
//! ```rust
//! use subwords_core::{MergeEncoder, MergeRules, Symbol};
//!
//! let rules = MergeRules::from_pairs(vec![
//!     (Symbol::new("l"), Symbol::new("o")),
//!     (Symbol::new("lo"), Symbol::new("w")),
//! ])?;
//! let encoder = MergeEncoder::new(rules);
//!
//! let tokens = encoder.encode_word("lower")?;
//! assert_eq!(tokens, ["low", "e", "r", "</w>"]);
//! assert_eq!(encoder.decode(&tokens), "lower");
//! # Ok::<(), subwords_core::TokenizerError>(())
//! ```

pub mod error;
pub use error::{Result, TokenizerError};

// Core BPE data model
pub mod core;
pub use core::{
    check_reserved, concat, symbolize, Alphabet, MergeCandidate, MergeMap, MergeRules, Pair,
    PairDelta, PairPriorityQueue, Symbol, WordVocabulary, END_OF_WORD,
};

// Encoding
pub mod encoding;
pub use encoding::{decode_symbols, MergeEncoder};
