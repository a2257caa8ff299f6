//! Encode command implementation.

use clap::Parser;

/// Encode command arguments.
#[derive(Parser)]
pub struct EncodeCommand {
    /// Directory holding tokenizer.json or merges.txt
    #[arg(short, long)]
    pub tokenizer: String,

    /// Text to encode ("-" reads stdin)
    #[arg(short, long)]
    pub input: String,

    /// Output file (stdout if not specified)
    #[arg(short, long)]
    pub output: Option<String>,
}

use anyhow::{Context, Result as AnyhowResult};
use std::path::Path;
use subwords_tokenizer::Tokenizer;

pub fn run(cmd: EncodeCommand) -> AnyhowResult<()> {
    let tokenizer = Tokenizer::load_dir(Path::new(&cmd.tokenizer))
        .with_context(|| format!("failed to load tokenizer from {}", cmd.tokenizer))?;

    // Read input text (from stdin if "-")
    let input_text = if cmd.input == "-" {
        use std::io::Read;
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("failed to read stdin")?;
        buffer
    } else {
        cmd.input
    };

    let encoding = tokenizer.encode(&input_text)?;
    let output = encoding.get_tokens().join(" ");

    match &cmd.output {
        Some(path) => {
            std::fs::write(path, &output).with_context(|| format!("failed to write {}", path))?;
            println!(
                "Encoded {} words into {} tokens to {}",
                encoding.words,
                encoding.len(),
                path
            );
        }
        None => {
            println!("{}", output);
        }
    }

    Ok(())
}
