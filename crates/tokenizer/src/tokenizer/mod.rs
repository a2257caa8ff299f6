//! Main tokenizer implementation.
//!
//! This module provides the high-level `Tokenizer` struct that ties together
//! training, the merge-rule encoder and persistence.

use crate::io::{ModelFormat, TokenizerLoader, TokenizerSaver};
use std::path::Path;
use subwords_core::{
    decode_symbols, Alphabet, MergeEncoder, MergeRules, Result, Symbol, TokenizerError,
};
use subwords_training::{BpeTrainer, TrainingConfig};
use tracing::info;

/// Configuration for building a tokenizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenizerConfig {
    /// Alphabet bound that sets the merge budget during training
    pub max_alphabet_size: usize,
    /// Minimum frequency for merges during training
    pub min_frequency: u64,
    /// Count pairs in parallel during training
    pub parallel: bool,
    /// Use incremental pair statistics during training
    pub incremental: bool,
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        let training = TrainingConfig::default();
        Self {
            max_alphabet_size: training.max_alphabet_size,
            min_frequency: training.min_frequency,
            parallel: training.parallel,
            incremental: training.incremental,
        }
    }
}

impl TokenizerConfig {
    /// The training configuration derived from this config.
    pub fn training_config(&self) -> TrainingConfig {
        TrainingConfig {
            max_alphabet_size: self.max_alphabet_size,
            min_frequency: self.min_frequency,
            parallel: self.parallel,
            incremental: self.incremental,
        }
    }
}

/// Builder for creating a tokenizer.
#[derive(Clone, Default)]
pub struct TokenizerBuilder {
    config: TokenizerConfig,
}

impl TokenizerBuilder {
    /// Create a new tokenizer builder with default configuration.
    pub fn new() -> Self {
        Self {
            config: TokenizerConfig::default(),
        }
    }

    /// Set the alphabet bound used during training.
    pub fn max_alphabet_size(mut self, size: usize) -> Self {
        self.config.max_alphabet_size = size;
        self
    }

    /// Set the minimum frequency for merges.
    pub fn min_frequency(mut self, freq: u64) -> Self {
        self.config.min_frequency = freq;
        self
    }

    /// Count pairs in parallel during training.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.config.parallel = parallel;
        self
    }

    /// Choose between incremental statistics and a full recount per merge.
    pub fn incremental(mut self, incremental: bool) -> Self {
        self.config.incremental = incremental;
        self
    }

    /// Build the tokenizer.
    pub fn build(self) -> Result<Tokenizer> {
        Tokenizer::new(self.config)
    }
}

/// Main tokenizer struct.
///
/// Starts without merge rules, which makes it a character-level tokenizer
/// until it is trained or loaded.
#[derive(Debug, Clone)]
pub struct Tokenizer {
    /// Encoder over the current merge rules
    encoder: MergeEncoder,
    /// Alphabet from the last training run (empty if unknown)
    alphabet: Alphabet,
    /// Configuration
    config: TokenizerConfig,
}

impl Tokenizer {
    /// Create a new untrained tokenizer with the given configuration.
    pub fn new(config: TokenizerConfig) -> Result<Self> {
        config.training_config().validate()?;

        Ok(Self {
            encoder: MergeEncoder::new(MergeRules::new()),
            alphabet: Alphabet::new(),
            config,
        })
    }

    /// Create a tokenizer builder.
    pub fn builder() -> TokenizerBuilder {
        TokenizerBuilder::new()
    }

    /// Create a tokenizer from an existing rule list.
    pub fn from_merges(merges: MergeRules, config: TokenizerConfig) -> Result<Self> {
        let mut tokenizer = Self::new(config)?;
        tokenizer.encoder = MergeEncoder::new(merges);
        Ok(tokenizer)
    }

    /// Train the tokenizer on corpus lines, replacing any previous rules.
    pub fn train<I, S>(&mut self, lines: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let trainer = BpeTrainer::new(self.config.training_config())?;
        let model = trainer.train(lines)?;

        self.encoder = MergeEncoder::new(model.merges);
        self.alphabet = model.alphabet;

        Ok(())
    }

    /// Train on a block of text, one corpus line per text line.
    pub fn train_from_text(&mut self, data: &str) -> Result<()> {
        self.train(data.lines())
    }

    /// Encode a single word.
    pub fn encode_word(&self, word: &str) -> Result<Vec<Symbol>> {
        self.encoder.encode_word(word)
    }

    /// Encode whitespace-separated text.
    ///
    /// Each word is encoded on its own; the result is the concatenation of
    /// the per-word symbols.
    pub fn encode(&self, text: &str) -> Result<Encoding> {
        let mut tokens = Vec::new();
        let mut words = 0;

        for word in text.split_whitespace() {
            tokens.extend(self.encoder.encode_word(word)?);
            words += 1;
        }

        Ok(Encoding {
            tokens,
            words,
            text: text.to_string(),
        })
    }

    /// Encode a batch of texts (parallelized).
    pub fn encode_batch(&self, texts: &[String]) -> Result<Vec<Encoding>> {
        use rayon::prelude::*;

        texts
            .par_iter()
            .map(|text| self.encode(text))
            .collect::<Result<Vec<_>>>()
    }

    /// Decode symbols back to text, joining words with single spaces.
    pub fn decode(&self, tokens: &[Symbol]) -> String {
        decode_symbols(tokens)
    }

    /// The merge rules in priority order.
    pub fn merges(&self) -> &MergeRules {
        self.encoder.rules()
    }

    /// The alphabet from the last training run.
    ///
    /// Empty for tokenizers loaded from `merges.txt`, which only records rules.
    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Get the alphabet size.
    pub fn alphabet_size(&self) -> usize {
        self.alphabet.len()
    }

    /// Get the configuration.
    pub fn config(&self) -> &TokenizerConfig {
        &self.config
    }

    /// Save the tokenizer to a directory as `tokenizer.json`.
    pub fn save(&self, path: &Path) -> Result<()> {
        TokenizerSaver::new(self.merges(), &self.alphabet, &self.config).save(path)
    }

    /// Save only the merge rules to a directory as `merges.txt`.
    pub fn save_merges(&self, path: &Path) -> Result<()> {
        TokenizerSaver::new(self.merges(), &self.alphabet, &self.config).save_merges(path)
    }

    /// Load a tokenizer from a directory containing `tokenizer.json`.
    pub fn load(path: &Path) -> Result<Self> {
        let loaded = TokenizerLoader::load(path)?;

        let config = TokenizerConfig {
            max_alphabet_size: loaded.config.max_alphabet_size,
            min_frequency: loaded.config.min_frequency,
            ..Default::default()
        };

        let mut tokenizer = Self::from_merges(loaded.merges, config)?;
        tokenizer.alphabet = loaded.alphabet;
        Ok(tokenizer)
    }

    /// Load a tokenizer from a directory containing `merges.txt`.
    pub fn load_merges(path: &Path) -> Result<Self> {
        let merges = TokenizerLoader::load_merges(path)?;
        Self::from_merges(merges, TokenizerConfig::default())
    }

    /// Load from a directory, preferring `tokenizer.json` over `merges.txt`.
    pub fn load_dir(path: &Path) -> Result<Self> {
        for format in [ModelFormat::Json, ModelFormat::MergesText] {
            if path.join(format.file_name()).is_file() {
                info!(path = %path.display(), ?format, "loading tokenizer");
                return match format {
                    ModelFormat::Json => Self::load(path),
                    ModelFormat::MergesText => Self::load_merges(path),
                };
            }
        }

        Err(TokenizerError::Load(format!(
            "No tokenizer.json or merges.txt in {}",
            path.display()
        )))
    }
}

/// Result of encoding text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Encoding {
    /// Subword symbols, every word closed by a symbol ending in the marker
    pub tokens: Vec<Symbol>,
    /// Number of words encoded
    pub words: usize,
    /// Original text
    pub text: String,
}

impl Encoding {
    /// Get the number of tokens.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Check if the encoding is empty.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Get the tokens as strings.
    pub fn get_tokens(&self) -> Vec<String> {
        self.tokens.iter().map(|t| t.to_string()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use subwords_core::END_OF_WORD;

    const CORPUS: [&str; 3] = [
        "low lower lowest",
        "new newer newest",
        "how hello tester writer",
    ];

    fn trained() -> Tokenizer {
        let mut tokenizer = Tokenizer::builder().max_alphabet_size(30).build().unwrap();
        tokenizer.train(CORPUS).unwrap();
        tokenizer
    }

    #[test]
    fn test_builder() {
        let tokenizer = Tokenizer::builder()
            .max_alphabet_size(100)
            .min_frequency(2)
            .parallel(true)
            .build()
            .unwrap();

        assert_eq!(tokenizer.config().max_alphabet_size, 100);
        assert_eq!(tokenizer.config().min_frequency, 2);
        assert!(tokenizer.merges().is_empty());
    }

    #[test]
    fn test_builder_rejects_zero_alphabet() {
        let result = Tokenizer::builder().max_alphabet_size(0).build();
        assert!(matches!(result, Err(TokenizerError::InvalidConfig(_))));
    }

    #[test]
    fn test_untrained_is_character_level() {
        let tokenizer = Tokenizer::builder().build().unwrap();
        let tokens = tokenizer.encode_word("a").unwrap();
        assert_eq!(tokens, ["a", END_OF_WORD]);
    }

    #[test]
    fn test_train_and_encode() {
        let tokenizer = trained();
        assert!(!tokenizer.merges().is_empty());
        assert!(tokenizer.alphabet_size() > 0);

        let tokens = tokenizer.encode_word("tester").unwrap();
        assert!(tokens.len() < "tester".len() + 1);
        assert_eq!(tokenizer.decode(&tokens), "tester");
    }

    #[test]
    fn test_encode_decode_roundtrip() {
        let tokenizer = trained();

        let text = "lowest  newer\twriter";
        let encoding = tokenizer.encode(text).unwrap();

        assert_eq!(encoding.words, 3);
        assert_eq!(encoding.text, text);
        assert_eq!(tokenizer.decode(&encoding.tokens), "lowest newer writer");
    }

    #[test]
    fn test_encode_empty_text() {
        let encoding = trained().encode("   ").unwrap();
        assert!(encoding.is_empty());
        assert_eq!(encoding.words, 0);
    }

    #[test]
    fn test_encode_batch_matches_encode() {
        let tokenizer = trained();
        let texts = vec!["lower".to_string(), "hello writer".to_string()];

        let batch = tokenizer.encode_batch(&texts).unwrap();
        assert_eq!(batch.len(), 2);
        for (text, encoding) in texts.iter().zip(&batch) {
            assert_eq!(encoding, &tokenizer.encode(text).unwrap());
        }
    }

    #[test]
    fn test_encode_rejects_marker() {
        let tokenizer = trained();
        assert!(tokenizer.encode("ok not</w>ok").is_err());
    }

    #[test]
    fn test_get_tokens() {
        let encoding = Tokenizer::builder().build().unwrap().encode("ab").unwrap();
        assert_eq!(encoding.get_tokens(), vec!["a", "b", END_OF_WORD]);
        assert_eq!(encoding.len(), 3);
    }
}
