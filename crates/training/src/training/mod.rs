//! Training infrastructure for BPE tokenizers.
//!
//! This module provides the vocabulary builder, pair statistics and the
//! merge loop that learns BPE merge rules from text data.

pub mod builder;
pub mod counter;
pub mod trainer;

pub use builder::VocabularyBuilder;
pub use counter::PairStatistics;
pub use trainer::{BpeTrainer, TrainedModel, TrainingConfig};
