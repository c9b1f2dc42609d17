//! Builds a co-occurrence trie from a whitespace-delimited corpus.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::TrieError;
use crate::trie::TrieNode;

const SENTENCE_TERMINATORS: [char; 3] = ['.', '?', '!'];

/// Keeps only the ASCII letters of a raw token.
pub fn strip_punctuation(token: &str) -> String {
    token.chars().filter(char::is_ascii_alphabetic).collect()
}

/// A raw token closes its sentence when it contains `.`, `?` or `!`.
pub fn ends_sentence(token: &str) -> bool {
    token.contains(SENTENCE_TERMINATORS)
}

/// Incremental trie builder fed one raw token at a time.
#[derive(Debug, Default)]
pub struct TrieBuilder {
    root: TrieNode,
    previous: Option<String>,
    words: usize,
    sentences: usize,
}

impl TrieBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one raw token.
    ///
    /// Every word goes into the root trie. A word in the middle of a sentence is
    /// also recorded in the subtrie of the word before it, while a sentence's last
    /// word has its subtrie cleared.
    pub fn push_token(&mut self, token: &str) -> Result<(), TrieError> {
        let sentence_end = ends_sentence(token);
        let word = strip_punctuation(token);

        if word.is_empty() {
            log::trace!("token ({}) has no letters", token);
            if sentence_end {
                self.end_sentence();
            }
            return Ok(());
        }

        let terminal = self.root.insert(&word)?;
        self.words += 1;

        if sentence_end {
            terminal.clear_subtrie();
            self.end_sentence();
            return Ok(());
        }

        if let Some(previous) = self.previous.take() {
            if let Some(node) = self.root.lookup_mut(&previous) {
                node.insert_follower(&word)?;
            }
        }
        self.previous = Some(word);
        Ok(())
    }

    fn end_sentence(&mut self) {
        self.previous = None;
        self.sentences += 1;
    }

    /// Feeds every whitespace-delimited token of `reader`.
    ///
    /// Bytes that are not valid UTF-8 are replaced and then stripped with the
    /// rest of a token's non-letters.
    pub fn push_reader<R: BufRead>(&mut self, reader: R) -> Result<(), TrieError> {
        for line in reader.split(b'\n') {
            let line = line?;
            for token in String::from_utf8_lossy(&line).split_whitespace() {
                self.push_token(token)?;
            }
        }
        Ok(())
    }

    pub fn finish(self) -> TrieNode {
        log::debug!(
            "built trie: {} words inserted, {} sentences, {} distinct",
            self.words,
            self.sentences,
            self.root.count_words()
        );
        self.root
    }
}

pub fn build_from_reader<R: BufRead>(reader: R) -> Result<TrieNode, TrieError> {
    let mut builder = TrieBuilder::new();
    builder.push_reader(reader)?;
    Ok(builder.finish())
}

pub fn build_from_corpus<P: AsRef<Path>>(path: P) -> Result<TrieNode, TrieError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| TrieError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    build_from_reader(BufReader::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};

    fn build(text: &str) -> TrieNode {
        build_from_reader(Cursor::new(text)).unwrap()
    }

    fn followers(root: &TrieNode, word: &str) -> Option<Vec<String>> {
        root.lookup(word)
            .and_then(TrieNode::subtrie)
            .map(|subtrie| subtrie.render(false))
    }

    #[test]
    fn test_strip_punctuation() {
        assert_eq!(strip_punctuation("Hello,"), "Hello");
        assert_eq!(strip_punctuation("don't!"), "dont");
        assert_eq!(strip_punctuation("..."), "");
        assert!(ends_sentence("end."));
        assert!(ends_sentence("really?!"));
        assert!(!ends_sentence("comma,"));
    }

    #[test]
    fn test_sentence_structure() {
        let root = build("I like cats. Cats like fish!\nDo dogs like cats?");

        assert_eq!(
            root.render(false),
            vec![
                "cats (3)", "do (1)", "dogs (1)", "fish (1)", "i (1)", "like (3)"
            ]
        );
        assert_eq!(followers(&root, "i"), Some(vec!["like (1)".to_string()]));
        assert_eq!(followers(&root, "dogs"), Some(vec!["like (1)".to_string()]));
        // "cats" is the last word of the final sentence
        assert_eq!(followers(&root, "cats"), None);
        // the last word of a sentence is never recorded as a follower
        assert_eq!(followers(&root, "like"), None);
        assert_eq!(followers(&root, "fish"), None);
    }

    #[test]
    fn test_sentence_end_clears_followers() {
        let root = build("rain falls. the rain.");
        assert_eq!(followers(&root, "the"), None);
        assert_eq!(followers(&root, "rain"), None);
        assert_eq!(root.lookup("rain").map(TrieNode::count), Some(2));

        let root = build("rain falls. rain falls down");
        assert_eq!(followers(&root, "rain"), Some(vec!["falls (1)".to_string()]));
        assert_eq!(followers(&root, "falls"), Some(vec!["down (1)".to_string()]));
    }

    #[test]
    fn test_last_word_drops_earlier_followers() {
        let root = build("the dog sat here.");
        assert_eq!(followers(&root, "dog"), Some(vec!["sat (1)".to_string()]));

        let root = build("the dog sat here. a dog.");
        assert_eq!(followers(&root, "dog"), None);
        assert_eq!(root.lookup("dog").map(TrieNode::count), Some(2));
        assert_eq!(followers(&root, "a"), None);
    }

    #[test]
    fn test_non_utf8_bytes_are_stripped() {
        let text: &[u8] = b"the caf\xe9 is open.\n";
        let root = build_from_reader(Cursor::new(text)).unwrap();
        assert_eq!(
            root.render(false),
            vec!["caf (1)", "is (1)", "open (1)", "the (1)"]
        );
        assert_eq!(followers(&root, "the"), Some(vec!["caf (1)".to_string()]));
        assert_eq!(followers(&root, "caf"), Some(vec!["is (1)".to_string()]));
    }

    #[test]
    fn test_single_word_sentence_resets_context() {
        let root = build("Stop. go home.");
        assert_eq!(followers(&root, "stop"), None);
        assert_eq!(followers(&root, "go"), None);
        assert!(root.contains_word("home"));
    }

    #[test]
    fn test_bare_punctuation_closes_sentence() {
        let root = build("we ran ... they hid");
        assert_eq!(followers(&root, "we"), Some(vec!["ran (1)".to_string()]));
        assert_eq!(followers(&root, "ran"), None);
        assert_eq!(followers(&root, "they"), Some(vec!["hid (1)".to_string()]));
    }

    #[test]
    fn test_repeated_followers_accumulate() {
        let root = build("the cat the cat the dog.");
        assert_eq!(
            followers(&root, "the"),
            Some(vec!["cat (2)".to_string()])
        );
        assert_eq!(followers(&root, "cat"), Some(vec!["the (2)".to_string()]));
        assert_eq!(root.lookup("the").map(TrieNode::count), Some(3));
    }

    #[test]
    fn test_build_from_corpus_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "The quick fox. The lazy dog.").unwrap();

        let root = build_from_corpus(file.path()).unwrap();
        assert_eq!(root.most_frequent_word(), "the");
        assert_eq!(
            followers(&root, "the"),
            Some(vec!["lazy (1)".to_string(), "quick (1)".to_string()])
        );
    }

    #[test]
    fn test_build_from_missing_corpus() {
        let dir = tempfile::tempdir().unwrap();
        match build_from_corpus(dir.path().join("missing.txt")) {
            Err(TrieError::Io { path, .. }) => assert!(path.ends_with("missing.txt")),
            other => panic!("expected I/O error, got {:?}", other),
        }
    }
}
