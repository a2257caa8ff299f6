//! Decode command implementation.

use clap::Parser;

/// Decode command arguments.
#[derive(Parser)]
pub struct DecodeCommand {
    /// Directory holding tokenizer.json or merges.txt
    #[arg(short, long)]
    pub tokenizer: String,

    /// Tokens to decode, separated by whitespace (e.g. "low est</w>")
    #[arg(short = 'k', long)]
    pub tokens: String,
}

use anyhow::{Context, Result as AnyhowResult};
use std::path::Path;
use subwords_tokenizer::{Symbol, Tokenizer};

pub fn run(cmd: DecodeCommand) -> AnyhowResult<()> {
    let tokenizer = Tokenizer::load_dir(Path::new(&cmd.tokenizer))
        .with_context(|| format!("failed to load tokenizer from {}", cmd.tokenizer))?;

    let tokens: Vec<Symbol> = cmd.tokens.split_whitespace().map(Symbol::new).collect();

    println!("{}", tokenizer.decode(&tokens));

    Ok(())
}
