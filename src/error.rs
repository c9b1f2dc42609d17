//! Error types for trie building, dictionary storage and configuration.

use std::io;
use std::path::PathBuf;

/// Errors raised while inserting into or building a trie.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum TrieError {
    /// The word contains a character outside a-z / A-Z
    #[error("({word}) contains non-alpha character ({ch}) and will not be inserted")]
    InvalidCharacter { word: String, ch: char },

    /// Empty words have no terminal node of their own
    #[error("empty word cannot be inserted")]
    EmptyWord,

    /// The corpus could not be opened or read
    #[error("failed to read corpus '{}'", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Reading from an already opened source failed
    #[error("failed to read token stream")]
    Read(#[from] io::Error),
}

/// Errors raised by the dictionary hash table.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum DictionaryError {
    /// Reading or writing a dictionary source failed
    #[error("dictionary I/O error")]
    Io(#[from] io::Error),

    /// Only lowercase a-z words can be hashed
    #[error("({0}) contains characters other than a-z")]
    InvalidWord(String),

    /// Every slot is occupied
    #[error("hash table of size {0} is full")]
    TableFull(usize),

    /// The table cannot be described with 32-bit snapshot fields
    #[error("table of size {0} does not fit the snapshot format")]
    TooLarge(usize),

    /// The binary snapshot does not describe a valid table
    #[error("corrupt dictionary snapshot: {0}")]
    CorruptSnapshot(String),
}

/// Errors raised while loading a configuration file.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("failed to read config '{}'", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config")]
    Parse(#[from] serde_json::Error),
}
