//! Serialization and deserialization for trained merge rules.
//!
//! This module provides functionality for saving and loading trained
//! tokenizers as `tokenizer.json` or as a plain `merges.txt` list.

pub mod format;
pub mod load;
pub mod save;

pub use format::{ModelFormat, MERGES_FILE, TOKENIZER_FILE};
pub use load::{parse_merges, LoadedModel, TokenizerLoader};
pub use save::{render_merges, TokenizerSaver};
