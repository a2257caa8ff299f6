//! Subwords-training - BPE training infrastructure
//!
//! This crate learns an ordered list of BPE merge rules from corpus lines.
//!
//! # Features
//!
//! - Whitespace word splitting with frequency-weighted vocabulary building
//! - Pair frequency counting with optional parallel processing
//! - Deterministic merge selection (frequency, then lexicographic pair order)
//! - Incremental pair statistics backed by a priority queue
//!
//! # Example
//!
//! ```rust
//! use subwords_training::{BpeTrainer, TrainingConfig};
//!
//! let trainer = BpeTrainer::new(TrainingConfig {
//!     max_alphabet_size: 20,
//!     ..Default::default()
//! })?;
//!
//! let model = trainer.train(["low lower lowest", "new newer newest"])?;
//! assert!(model.merges.len() <= 20 - model.initial_alphabet_size);
//! # Ok::<(), subwords_training::TokenizerError>(())
//! ```

pub use subwords_core::{Result, TokenizerError};

// Training infrastructure
pub mod training;
pub use training::{
    BpeTrainer, PairStatistics, TrainedModel, TrainingConfig, VocabularyBuilder,
};
