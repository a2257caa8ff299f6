//! Subwords CLI - Command-line interface for the BPE tokenizer.
//!
//! This is the main entry point for the `subwords` command-line tool.

mod commands;

use clap::{Parser, Subcommand};
use commands::{BenchmarkCommand, DecodeCommand, EncodeCommand, TrainCommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "subwords")]
#[command(about = "A symbol-level BPE subword tokenizer", long_about = None)]
#[command(version)]
struct Cli {
    /// Log every merge and other debug output (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Learn merge rules from a text corpus
    Train(TrainCommand),
    /// Encode text into subword tokens
    Encode(EncodeCommand),
    /// Decode subword tokens back to text
    Decode(DecodeCommand),
    /// Benchmark encoding performance
    Benchmark(BenchmarkCommand),
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Train(cmd) => commands::train::run(cmd)?,
        Commands::Encode(cmd) => commands::encode::run(cmd)?,
        Commands::Decode(cmd) => commands::decode::run(cmd)?,
        Commands::Benchmark(cmd) => commands::benchmark::run(cmd)?,
    }

    Ok(())
}
