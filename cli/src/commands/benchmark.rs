//! Benchmark command implementation.

use clap::Parser;

/// Benchmark command arguments.
#[derive(Parser)]
pub struct BenchmarkCommand {
    /// Directory holding tokenizer.json or merges.txt
    #[arg(short, long)]
    pub tokenizer: String,

    /// Path to input text file for benchmarking
    #[arg(short, long)]
    pub input: String,

    /// Number of iterations to run
    #[arg(short = 'n', long, default_value_t = 100)]
    pub iterations: usize,
}

use anyhow::{bail, Context, Result as AnyhowResult};
use std::fs;
use std::path::Path;
use std::time::Instant;
use subwords_tokenizer::Tokenizer;

pub fn run(cmd: BenchmarkCommand) -> AnyhowResult<()> {
    if cmd.iterations == 0 {
        bail!("iterations must be at least 1");
    }

    let tokenizer = Tokenizer::load_dir(Path::new(&cmd.tokenizer))
        .with_context(|| format!("failed to load tokenizer from {}", cmd.tokenizer))?;

    let text = fs::read_to_string(&cmd.input)
        .with_context(|| format!("failed to read {}", cmd.input))?;

    println!("Benchmarking encoding...");
    println!("  Text length: {} bytes", text.len());
    println!("  Iterations: {}", cmd.iterations);
    println!();

    // Warmup
    let encoding = tokenizer.encode(&text)?;

    let start = Instant::now();
    for _ in 0..cmd.iterations {
        tokenizer.encode(&text)?;
    }
    let elapsed = start.elapsed();

    let avg_secs = elapsed.as_secs_f64() / cmd.iterations as f64;

    println!("Results:");
    println!("  Words: {}, tokens: {}", encoding.words, encoding.len());
    println!("  Total time: {:.2}s", elapsed.as_secs_f64());
    println!("  Average time: {:.3}ms", avg_secs * 1000.0);
    if avg_secs > 0.0 {
        println!("  Throughput: {:.0} words/s", encoding.words as f64 / avg_secs);
        println!("  Throughput: {:.0} tokens/s", encoding.len() as f64 / avg_secs);
    }

    Ok(())
}
