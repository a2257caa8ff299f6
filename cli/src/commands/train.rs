//! Train command implementation.

use clap::Parser;

/// Train command arguments.
#[derive(Parser)]
pub struct TrainCommand {
    /// Path to the training corpus (one line of text per corpus line)
    #[arg(short, long)]
    pub input: String,

    /// Output directory for tokenizer.json and merges.txt
    #[arg(short, long)]
    pub output: String,

    /// Alphabet bound: at most this minus the corpus's distinct characters merges
    #[arg(short = 'a', long, default_value_t = 50)]
    pub max_alphabet_size: usize,

    /// Minimum frequency for a pair to be merged
    #[arg(short, long, default_value_t = 1)]
    pub min_frequency: u64,

    /// Count pairs in parallel
    #[arg(short, long, default_value_t = false)]
    pub parallel: bool,

    /// Recount all pairs after every merge instead of updating incrementally
    #[arg(long, default_value_t = false)]
    pub full_rescan: bool,
}

use anyhow::{Context, Result as AnyhowResult};
use std::fs;
use std::path::Path;
use std::time::Instant;
use subwords_tokenizer::Tokenizer;

/// Number of alphabet symbols shown after training.
const PREVIEW_SYMBOLS: usize = 20;

pub fn run(cmd: TrainCommand) -> AnyhowResult<()> {
    println!("Training tokenizer...");
    println!("  Input: {}", cmd.input);
    println!("  Output: {}", cmd.output);
    println!("  Max alphabet size: {}", cmd.max_alphabet_size);
    println!("  Min frequency: {}", cmd.min_frequency);
    println!("  Parallel: {}", cmd.parallel);
    println!();

    // Read training data
    let start = Instant::now();
    let data = fs::read_to_string(&cmd.input)
        .with_context(|| format!("failed to read corpus {}", cmd.input))?;
    println!("Read {} bytes in {:.2}s", data.len(), start.elapsed().as_secs_f64());
    println!();

    let mut tokenizer = Tokenizer::builder()
        .max_alphabet_size(cmd.max_alphabet_size)
        .min_frequency(cmd.min_frequency)
        .parallel(cmd.parallel)
        .incremental(!cmd.full_rescan)
        .build()?;

    // Train
    let start = Instant::now();
    tokenizer
        .train_from_text(&data)
        .context("training failed")?;
    println!("Training completed in {:.2}s", start.elapsed().as_secs_f64());
    println!("Merges learned: {}", tokenizer.merges().len());
    println!("Final alphabet size: {}", tokenizer.alphabet_size());

    let preview: Vec<&str> = tokenizer
        .alphabet()
        .iter()
        .take(PREVIEW_SYMBOLS)
        .map(|s| s.as_str())
        .collect();
    println!("Alphabet (first {}): {:?}", preview.len(), preview);
    println!();

    // Save model
    let output_path = Path::new(&cmd.output);
    let start = Instant::now();
    tokenizer
        .save(output_path)
        .with_context(|| format!("failed to save tokenizer to {}", cmd.output))?;
    tokenizer
        .save_merges(output_path)
        .with_context(|| format!("failed to save merges to {}", cmd.output))?;
    println!("Model saved to {} in {:.2}s", cmd.output, start.elapsed().as_secs_f64());

    Ok(())
}
