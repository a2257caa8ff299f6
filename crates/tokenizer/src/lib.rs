//! Subwords-tokenizer - High-level tokenizer API
//!
//! This crate provides a user-friendly interface over the subwords BPE
//! components: train merge rules from a corpus, encode and decode text, and
//! save or load the trained rules.
//!
//! # Features
//!
//! - Builder pattern for tokenizer configuration
//! - Whitespace word splitting with per-word greedy merge encoding
//! - Parallel batch encoding
//! - Loading and saving as `tokenizer.json` or `merges.txt`
//!
//! # Example
//!
//! ```rust
//! use subwords_tokenizer::Tokenizer;
//!
//! let mut tokenizer = Tokenizer::builder()
//!     .max_alphabet_size(20)
//!     .build()?;
//! tokenizer.train(["low lower lowest", "new newer newest"])?;
//!
//! let encoding = tokenizer.encode("lowest newer")?;
//! println!("{:?}", encoding.tokens);
//!
//! assert_eq!(tokenizer.decode(&encoding.tokens), "lowest newer");
//! # Ok::<(), subwords_tokenizer::TokenizerError>(())
//! ```

// Re-export core types
pub use subwords_core::{Alphabet, MergeRules, Result, Symbol, TokenizerError, END_OF_WORD};

// Tokenizer API
pub mod tokenizer;
pub use tokenizer::{Encoding, Tokenizer, TokenizerBuilder, TokenizerConfig};

// IO/Serialization
pub mod io;
pub use io::{LoadedModel, ModelFormat, TokenizerLoader, TokenizerSaver};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
