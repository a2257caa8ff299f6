//! Core BPE data model.
//!
//! Symbols, the frequency-weighted word vocabulary, ordered merge rules and
//! the candidate priority queue used by the trainer.

pub mod merges;
pub mod priority;
pub mod symbol;
pub mod vocab;

pub use merges::{MergeMap, MergeRules, Pair};
pub use priority::{MergeCandidate, PairPriorityQueue};
pub use symbol::{check_reserved, concat, merge_adjacent, symbolize, Symbol, END_OF_WORD};
pub use vocab::{Alphabet, PairDelta, WordVocabulary};
