//! Predictive text and spell correction over a plain-text corpus.
//!
//! [`trie`] and [`corpus`] model word frequencies and which words follow which;
//! [`hash_table`], [`edit`] and [`spellcheck`] look words up in a hashed dictionary
//! and find the closest known word to a misspelling.

pub mod commands;
pub mod config;
pub mod corpus;
pub mod edit;
pub mod error;
pub mod hash_table;
pub mod spellcheck;
pub mod trie;

pub use config::CheckerConfig;
pub use error::{ConfigError, DictionaryError, TrieError};
pub use hash_table::HashTable;
pub use spellcheck::{SpellCorrector, SuggestedCorrection, Suggestion};
pub use trie::TrieNode;
