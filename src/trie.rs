//! Word-frequency trie with per-word co-occurrence subtries.
//!
//! Every node owns its 26 children and, when it terminates a word, an optional
//! subtrie recording the words that followed it inside a sentence. Ownership is
//! strictly tree-shaped, so dropping the root releases everything below it.

use crate::error::TrieError;

pub const ALPHABET_SIZE: usize = 26;

/// Line prefix used when rendering a co-occurrence subtrie.
pub const SUBTRIE_MARKER: &str = "- ";

#[derive(Debug, Default)]
pub struct TrieNode {
    count: u32,
    children: [Option<Box<TrieNode>>; ALPHABET_SIZE],
    subtrie: Option<Box<TrieNode>>,
}

/// Maps an ASCII letter of either case to its child slot.
fn letter_index(ch: char) -> Option<usize> {
    if ch.is_ascii_alphabetic() {
        Some((ch.to_ascii_lowercase() as u8 - b'a') as usize)
    } else {
        None
    }
}

fn index_letter(idx: usize) -> char {
    (b'a' + idx as u8) as char
}

/// Checks that `word` can be inserted: non-empty and letters only.
pub fn validate_word(word: &str) -> Result<(), TrieError> {
    if word.is_empty() {
        return Err(TrieError::EmptyWord);
    }
    match word.chars().find(|&ch| letter_index(ch).is_none()) {
        Some(ch) => Err(TrieError::InvalidCharacter {
            word: word.to_string(),
            ch,
        }),
        None => Ok(()),
    }
}

/// Inserts `word` under `root`, creating the root first if it is absent.
///
/// Returns the terminal node of the word. A rejected word leaves `root` untouched.
pub fn insert<'a>(
    root: &'a mut Option<Box<TrieNode>>,
    word: &str,
) -> Result<&'a mut TrieNode, TrieError> {
    validate_word(word)?;
    let node: &mut TrieNode = root.get_or_insert_with(Box::default);
    Ok(node.insert_validated(word))
}

/// Releases a whole trie, subtries included. Calling it on an absent root is a no-op.
pub fn destroy(root: &mut Option<Box<TrieNode>>) {
    root.take();
}

impl TrieNode {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn subtrie(&self) -> Option<&TrieNode> {
        self.subtrie.as_deref()
    }

    pub fn clear_subtrie(&mut self) {
        self.subtrie = None;
    }

    /// Inserts `word` into the subtrie of this node, creating the subtrie if needed.
    pub fn insert_follower(&mut self, word: &str) -> Result<&mut TrieNode, TrieError> {
        insert(&mut self.subtrie, word)
    }

    pub fn child(&self, ch: char) -> Option<&TrieNode> {
        letter_index(ch).and_then(|idx| self.children[idx].as_deref())
    }

    fn child_or_insert(&mut self, idx: usize) -> &mut TrieNode {
        self.children[idx].get_or_insert_with(Box::default)
    }

    /// Present children paired with their letter, in a..z order.
    fn children(&self) -> impl Iterator<Item = (char, &TrieNode)> {
        self.children
            .iter()
            .enumerate()
            .filter_map(|(idx, child)| child.as_deref().map(|node| (index_letter(idx), node)))
    }

    /// Number of non-empty child slots (0 to 26).
    pub fn active_children(&self) -> usize {
        self.children.iter().filter(|child| child.is_some()).count()
    }

    /// Inserts `word` below this node and bumps the count of its terminal node.
    pub fn insert(&mut self, word: &str) -> Result<&mut TrieNode, TrieError> {
        validate_word(word)?;
        Ok(self.insert_validated(word))
    }

    fn insert_validated(&mut self, word: &str) -> &mut TrieNode {
        let mut node = self;
        for byte in word.bytes() {
            node = node.child_or_insert((byte.to_ascii_lowercase() - b'a') as usize);
        }
        node.count += 1;
        node
    }

    /// Follows the path spelled by `prefix` without looking at counts.
    pub fn prefix_node(&self, prefix: &str) -> Option<&TrieNode> {
        prefix.chars().try_fold(self, |node, ch| node.child(ch))
    }

    /// Terminal node of `word`, if the word itself was inserted.
    pub fn lookup(&self, word: &str) -> Option<&TrieNode> {
        self.prefix_node(word).filter(|node| node.count >= 1)
    }

    pub fn lookup_mut(&mut self, word: &str) -> Option<&mut TrieNode> {
        let mut node = self;
        for ch in word.chars() {
            let idx = letter_index(ch)?;
            node = node.children[idx].as_deref_mut()?;
        }
        (node.count >= 1).then_some(node)
    }

    pub fn contains_word(&self, word: &str) -> bool {
        self.lookup(word).is_some()
    }

    /// Counts stored words starting with `prefix`.
    ///
    /// The prefix's own occurrences count first. A terminal with a single child adds
    /// one, a terminal that branches adds its number of branches.
    pub fn prefix_count(&self, prefix: &str) -> u32 {
        let Some(terminal) = self.prefix_node(prefix) else {
            log::trace!("prefix ({}) not found", prefix);
            return 0;
        };

        let count = terminal.count;
        match terminal.active_children() {
            0 => count,
            1 => count + 1,
            branches => count + branches as u32,
        }
    }

    /// Number of distinct words stored in this trie (subtries excluded).
    pub fn count_words(&self) -> usize {
        let own = usize::from(self.count > 0);
        own + self
            .children()
            .map(|(_, child)| child.count_words())
            .sum::<usize>()
    }

    /// The word with the highest count; ties go to the alphabetically earlier word.
    ///
    /// Returns an empty string when the trie holds no words.
    pub fn most_frequent_word(&self) -> String {
        let mut buffer = String::new();
        self.most_frequent_helper(&mut buffer, Best::default()).word
    }

    fn most_frequent_helper(&self, buffer: &mut String, best: Best) -> Best {
        let mut best = best;
        if self.count > 0 && best.loses_to(buffer, self.count) {
            best = Best {
                word: buffer.clone(),
                count: self.count,
            };
        }

        for (ch, child) in self.children() {
            buffer.push(ch);
            best = child.most_frequent_helper(buffer, best);
            buffer.pop();
        }
        best
    }

    /// Renders every stored word as `word (count)` in alphabetical order.
    ///
    /// Subtrie listings prefix each line with [`SUBTRIE_MARKER`].
    pub fn render(&self, nested: bool) -> Vec<String> {
        let mut buffer = String::from(if nested { SUBTRIE_MARKER } else { "" });
        let mut lines = Vec::new();
        self.render_helper(&mut buffer, &mut lines);
        lines
    }

    fn render_helper(&self, buffer: &mut String, lines: &mut Vec<String>) {
        if self.count > 0 {
            lines.push(format!("{} ({})", buffer, self.count));
        }

        for (ch, child) in self.children() {
            buffer.push(ch);
            child.render_helper(buffer, lines);
            buffer.pop();
        }
    }

    /// `word` followed by up to `n` predicted words.
    ///
    /// Each prediction is the most frequent follower of the previous word. The
    /// sequence stops early at a word with no recorded followers.
    pub fn predict(&self, word: &str, n: usize) -> Vec<String> {
        let mut sequence = vec![word.to_string()];
        let mut current = self.lookup(word);

        for _ in 0..n {
            let Some(followers) = current.and_then(TrieNode::subtrie) else {
                break;
            };
            let next = followers.most_frequent_word();
            if next.is_empty() {
                break;
            }
            current = self.lookup(&next);
            sequence.push(next);
        }
        sequence
    }
}

#[derive(Debug, Default)]
struct Best {
    word: String,
    count: u32,
}

impl Best {
    fn loses_to(&self, word: &str, count: u32) -> bool {
        // String ordering puts a strict prefix before its extensions.
        count > self.count || (count == self.count && word < self.word.as_str())
    }
}
