//! Interpreter for the trie command stream.
//!
//! `!` renders the whole trie, `@ word n` prints `word` followed by `n` predicted
//! words, and any other token is looked up and its followers listed.

use std::io::Read;

use crate::corpus::strip_punctuation;
use crate::error::TrieError;
use crate::trie::TrieNode;

pub const EMPTY_MARKER: &str = "(EMPTY)";
pub const INVALID_MARKER: &str = "(INVALID STRING)";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    RenderAll,
    Predict { word: String, n: usize },
    Query(String),
}

/// Splits a command stream into commands.
///
/// An `@` missing its word is dropped; a missing or unparsable count reads as 0.
pub fn parse_commands(input: &str) -> Vec<Command> {
    let mut tokens = input.split_whitespace();
    let mut commands = Vec::new();

    while let Some(token) = tokens.next() {
        match token {
            "!" => commands.push(Command::RenderAll),
            "@" => {
                let Some(word) = tokens.next() else {
                    log::warn!("'@' command without a word");
                    break;
                };
                let n = tokens.next().and_then(|raw| raw.parse().ok()).unwrap_or_else(|| {
                    log::warn!("'@ {}' has no valid word count, using 0", word);
                    0
                });
                commands.push(Command::Predict {
                    word: strip_punctuation(word),
                    n,
                });
            }
            word => commands.push(Command::Query(word.to_string())),
        }
    }
    commands
}

/// Output lines produced by one command. Never mutates the trie.
pub fn run_command(root: &TrieNode, command: &Command) -> Vec<String> {
    match command {
        Command::RenderAll => root.render(false),
        Command::Predict { word, n } => vec![root.predict(word, *n).join(" ")],
        Command::Query(word) => {
            let mut lines = vec![word.clone()];
            match root.lookup(word) {
                None => lines.push(INVALID_MARKER.to_string()),
                Some(node) => match node.subtrie() {
                    None => lines.push(EMPTY_MARKER.to_string()),
                    Some(subtrie) => lines.extend(subtrie.render(true)),
                },
            }
            lines
        }
    }
}

/// Runs every command read from `reader` and collects the output lines.
pub fn process_commands<R: Read>(
    root: &TrieNode,
    mut reader: R,
) -> Result<Vec<String>, TrieError> {
    let mut input = String::new();
    reader.read_to_string(&mut input)?;

    Ok(parse_commands(&input)
        .iter()
        .flat_map(|command| run_command(root, command))
        .collect())
}
