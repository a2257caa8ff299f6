//! BPE trainer implementation.
//!
//! This module drives the merge loop: select the most frequent adjacent pair,
//! record it as the next rule, rewrite the vocabulary, repeat until the merge
//! budget is spent or no pair is left.

use super::builder::VocabularyBuilder;
use super::counter::PairStatistics;
use subwords_core::{
    concat, Alphabet, MergeCandidate, MergeRules, Result, TokenizerError, WordVocabulary,
};
use tracing::{debug, info};

/// Configuration for BPE training.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainingConfig {
    /// Upper bound on the alphabet size that sets the merge budget:
    /// `max_alphabet_size - initial distinct characters` merges at most
    pub max_alphabet_size: usize,
    /// Minimum frequency for a pair to be merged
    pub min_frequency: u64,
    /// Count pairs with rayon when recounting
    pub parallel: bool,
    /// Maintain pair counts incrementally instead of recounting every step
    pub incremental: bool,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            max_alphabet_size: 50,
            min_frequency: 1,
            parallel: false,
            incremental: true,
        }
    }
}

impl TrainingConfig {
    /// Check the configuration before training starts.
    pub fn validate(&self) -> Result<()> {
        if self.max_alphabet_size == 0 {
            return Err(TokenizerError::InvalidConfig(
                "max_alphabet_size must be positive".to_string(),
            ));
        }
        if self.min_frequency == 0 {
            return Err(TokenizerError::InvalidConfig(
                "min_frequency must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Number of merges allowed for a corpus with `initial_alphabet_size`
    /// distinct characters.
    pub fn merge_target(&self, initial_alphabet_size: usize) -> usize {
        self.max_alphabet_size
            .saturating_sub(initial_alphabet_size)
    }
}

/// Artifacts produced by training.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainedModel {
    /// Merge rules in the order they were learned
    pub merges: MergeRules,
    /// Distinct symbols of the final vocabulary
    pub alphabet: Alphabet,
    /// Distinct characters in the corpus, end-of-word marker excluded
    pub initial_alphabet_size: usize,
}

/// BPE trainer.
///
/// Learns an ordered list of merge rules from corpus lines by repeatedly
/// merging the most frequent adjacent symbol pair.
#[derive(Debug, Clone)]
pub struct BpeTrainer {
    /// Configuration
    config: TrainingConfig,
}

impl BpeTrainer {
    /// Create a new BPE trainer, rejecting invalid configurations.
    pub fn new(config: TrainingConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Create a trainer with default settings and the given alphabet bound.
    pub fn with_max_alphabet_size(max_alphabet_size: usize) -> Result<Self> {
        Self::new(TrainingConfig {
            max_alphabet_size,
            ..Default::default()
        })
    }

    /// The trainer's configuration.
    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    /// Train on corpus lines.
    pub fn train<I, S>(&self, lines: I) -> Result<TrainedModel>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let vocab = VocabularyBuilder::from_lines(lines)?;
        self.train_vocabulary(vocab)
    }

    /// Train on an already built vocabulary.
    pub fn train_vocabulary(&self, mut vocab: WordVocabulary) -> Result<TrainedModel> {
        let initial_alphabet_size = vocab.base_alphabet_size();
        let target = self.config.merge_target(initial_alphabet_size);

        info!(
            words = vocab.len(),
            occurrences = vocab.total_occurrences(),
            initial_alphabet_size,
            target_merges = target,
            incremental = self.config.incremental,
            "starting BPE training"
        );

        let merges = if self.config.incremental {
            self.run_incremental(&mut vocab, target)?
        } else {
            self.run_full_rescan(&mut vocab, target)?
        };

        let alphabet = vocab.alphabet();

        info!(
            merges = merges.len(),
            alphabet_size = alphabet.len(),
            "finished BPE training"
        );

        Ok(TrainedModel {
            merges,
            alphabet,
            initial_alphabet_size,
        })
    }

    /// Recount every pair before each selection.
    fn run_full_rescan(&self, vocab: &mut WordVocabulary, target: usize) -> Result<MergeRules> {
        let mut merges = MergeRules::with_capacity(target);

        while merges.len() < target {
            let stats = self.count_pairs(vocab);
            let Some(candidate) = stats.best(self.config.min_frequency) else {
                break;
            };

            record(&mut merges, &candidate)?;
            vocab.merge_pair(&candidate.pair);
        }

        Ok(merges)
    }

    /// Count once, then update only the pairs touched by each merge.
    fn run_incremental(&self, vocab: &mut WordVocabulary, target: usize) -> Result<MergeRules> {
        let mut merges = MergeRules::with_capacity(target);
        if target == 0 {
            return Ok(merges);
        }

        let mut stats = self.count_pairs(vocab);
        let mut queue = stats.to_queue();

        while merges.len() < target {
            let Some(candidate) = queue.pop() else {
                break;
            };
            if candidate.count < self.config.min_frequency {
                break;
            }

            record(&mut merges, &candidate)?;

            let changes = vocab.merge_pair(&candidate.pair);
            for (pair, count) in stats.apply_changes(changes) {
                queue.update(pair, count);
            }
        }

        Ok(merges)
    }

    fn count_pairs(&self, vocab: &WordVocabulary) -> PairStatistics {
        if self.config.parallel {
            PairStatistics::count_parallel(vocab)
        } else {
            PairStatistics::count(vocab)
        }
    }
}

fn record(merges: &mut MergeRules, candidate: &MergeCandidate) -> Result<()> {
    let (left, right) = &candidate.pair;
    let merged = concat(left, right);
    let rank = merges.push(candidate.pair.clone())?;

    debug!(
        rank,
        left = left.as_str(),
        right = right.as_str(),
        merged = merged.as_str(),
        count = candidate.count,
        "merge"
    );

    Ok(())
}
