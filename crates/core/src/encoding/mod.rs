//! Encoding of words against a trained merge-rule list.

pub mod greedy;

pub use greedy::{decode_symbols, MergeEncoder};
