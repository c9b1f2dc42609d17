//! Open-addressing dictionary table with a sparse binary snapshot format.
//!
//! Snapshot layout, all integers little-endian `i32`:
//!
//! ```text
//! size | occupied | occupied x (index | length incl. NUL | bytes .. NUL)
//! ```
//!
//! Records carry their absolute slot index, so loading restores the exact probe
//! layout without re-hashing.

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Read, Write};
use std::path::Path;

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

use crate::error::DictionaryError;

const HASH_MULTIPLIER: u64 = 31;

/// Largest table a snapshot may declare.
pub const MAX_TABLE_SIZE: usize = 1 << 24;

/// Smallest prime no lower than twice `elements`, keeping the load factor at or below 0.5.
pub fn optimal_size(elements: usize) -> usize {
    let mut size = (elements * 2).max(2);
    while !is_prime(size) {
        size += 1;
    }
    size
}

fn is_prime(n: usize) -> bool {
    if n < 2 {
        return false;
    }
    (2..).take_while(|d| d * d <= n).all(|d| n % d != 0)
}

/// Only non-empty lowercase a-z words are stored and hashed.
pub fn is_valid_word(word: &str) -> bool {
    !word.is_empty() && word.bytes().all(|b| b.is_ascii_lowercase())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashTable {
    slots: Vec<Option<String>>,
}

impl HashTable {
    /// An empty table sized for `expected` words.
    pub fn with_capacity(expected: usize) -> Self {
        Self::with_size(optimal_size(expected))
    }

    fn with_size(size: usize) -> Self {
        HashTable {
            slots: vec![None; size],
        }
    }

    pub fn size(&self) -> usize {
        self.slots.len()
    }

    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    pub fn slots(&self) -> &[Option<String>] {
        &self.slots
    }

    pub fn slot(&self, index: usize) -> Option<&str> {
        self.slots.get(index).and_then(|slot| slot.as_deref())
    }

    /// Occupied slots in index order.
    pub fn occupied(&self) -> impl Iterator<Item = (usize, &str)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| slot.as_deref().map(|word| (index, word)))
    }

    /// Horner-style polynomial hash of a lowercase word, reduced modulo the table size.
    pub fn hash(&self, word: &str) -> Result<usize, DictionaryError> {
        if !is_valid_word(word) {
            return Err(DictionaryError::InvalidWord(word.to_string()));
        }
        let size = self.size() as u64;
        let addr = word.bytes().fold(0u64, |addr, b| {
            (addr * HASH_MULTIPLIER + u64::from(b - b'a' + 1)) % size
        });
        Ok(addr as usize)
    }

    /// Linear-probe sequence starting at `start`, visiting every slot once.
    fn probe(&self, start: usize) -> impl Iterator<Item = usize> {
        let size = self.size();
        (0..size).map(move |step| (start + step) % size)
    }

    /// Stores `word` in the first free slot of its probe sequence.
    pub fn insert(&mut self, word: &str) -> Result<usize, DictionaryError> {
        let start = self.hash(word)?;
        let index = self
            .probe(start)
            .find(|&index| self.slots[index].is_none())
            .ok_or(DictionaryError::TableFull(self.size()))?;
        self.slots[index] = Some(word.to_string());
        Ok(index)
    }

    /// Slot holding `word`, probing until a match, an empty slot or `size` probes.
    pub fn find_key(&self, word: &str) -> Option<usize> {
        let start = self.hash(word).ok()?;
        for index in self.probe(start) {
            match self.slots[index].as_deref() {
                None => return None,
                Some(stored) if stored == word => return Some(index),
                Some(_) => {}
            }
        }
        None
    }

    pub fn contains(&self, word: &str) -> bool {
        self.find_key(word).is_some()
    }

    /// Builds a table from a text dictionary holding one word per line.
    ///
    /// Only the first token of each line is used, lowercased; lines whose token has
    /// characters outside a-z are skipped.
    pub fn load_from_text<R: BufRead>(reader: R) -> Result<Self, DictionaryError> {
        // Raw bytes, so a stray non-UTF-8 line is skipped instead of failing the load.
        let lines = reader.split(b'\n').collect::<Result<Vec<_>, _>>()?;
        let mut table = Self::with_capacity(lines.len());

        let mut skipped = 0;
        for line in &lines {
            let line = String::from_utf8_lossy(line);
            let Some(token) = line.split_whitespace().next() else {
                continue;
            };
            let word = token.to_ascii_lowercase();
            if !is_valid_word(&word) {
                skipped += 1;
                log::trace!("skipping dictionary entry ({})", token);
                continue;
            }
            table.insert(&word)?;
        }

        if skipped > 0 {
            log::warn!("skipped {} dictionary entries with non-letter characters", skipped);
        }
        log::debug!(
            "loaded {} words into a table of size {}",
            table.len(),
            table.size()
        );
        Ok(table)
    }

    pub fn load_from_text_file<P: AsRef<Path>>(path: P) -> Result<Self, DictionaryError> {
        let file = File::open(path)?;
        Self::load_from_text(BufReader::new(file))
    }

    pub fn write_binary<W: Write>(&self, writer: &mut W) -> Result<(), DictionaryError> {
        writer.write_i32::<LittleEndian>(to_field(self.size())?)?;
        writer.write_i32::<LittleEndian>(to_field(self.len())?)?;

        for (index, word) in self.occupied() {
            writer.write_i32::<LittleEndian>(to_field(index)?)?;
            writer.write_i32::<LittleEndian>(to_field(word.len() + 1)?)?;
            writer.write_all(word.as_bytes())?;
            writer.write_u8(0)?;
        }
        Ok(())
    }

    pub fn save_as_binary<P: AsRef<Path>>(&self, path: P) -> Result<(), DictionaryError> {
        let path = path.as_ref();
        let mut writer = BufWriter::new(File::create(path)?);
        self.write_binary(&mut writer)?;
        writer.flush()?;
        log::info!("saved {} words to {}", self.len(), path.display());
        Ok(())
    }

    /// Restores a table from a snapshot, placing each word at its recorded slot.
    pub fn read_binary<R: Read>(reader: &mut R) -> Result<Self, DictionaryError> {
        let size = read_field(reader, "size")?;
        let occupied = read_field(reader, "occupied count")?;
        if size == 0 {
            return Err(corrupt("table size is zero"));
        }
        if size > MAX_TABLE_SIZE {
            return Err(corrupt(format!("table size {} exceeds {}", size, MAX_TABLE_SIZE)));
        }
        if occupied > size {
            return Err(corrupt(format!(
                "{} records for a table of size {}",
                occupied, size
            )));
        }

        let mut table = Self::with_size(size);
        for _ in 0..occupied {
            let index = read_field(reader, "slot index")?;
            let len = read_field(reader, "word length")?;
            if index >= size {
                return Err(corrupt(format!("slot {} out of range", index)));
            }
            if table.slots[index].is_some() {
                return Err(corrupt(format!("slot {} written twice", index)));
            }

            let mut bytes = Vec::with_capacity(len.min(64));
            reader.by_ref().take(len as u64).read_to_end(&mut bytes)?;
            if bytes.len() != len {
                return Err(corrupt("truncated word"));
            }
            if bytes.pop() != Some(0) {
                return Err(corrupt(format!("word at slot {} is not terminated", index)));
            }
            let word = String::from_utf8(bytes)
                .ok()
                .filter(|word| is_valid_word(word))
                .ok_or_else(|| corrupt(format!("invalid word at slot {}", index)))?;
            table.slots[index] = Some(word);
        }
        Ok(table)
    }

    pub fn load_from_binary<P: AsRef<Path>>(path: P) -> Result<Self, DictionaryError> {
        let path = path.as_ref();
        let mut reader = BufReader::new(File::open(path)?);
        let table = Self::read_binary(&mut reader)?;
        log::info!(
            "loaded {} words (table size {}) from {}",
            table.len(),
            table.size(),
            path.display()
        );
        Ok(table)
    }
}

fn corrupt<S: Into<String>>(reason: S) -> DictionaryError {
    DictionaryError::CorruptSnapshot(reason.into())
}

fn to_field(value: usize) -> Result<i32, DictionaryError> {
    i32::try_from(value).map_err(|_| DictionaryError::TooLarge(value))
}

/// Reads one non-negative header field.
fn read_field<R: Read>(reader: &mut R, what: &str) -> Result<usize, DictionaryError> {
    let value = match reader.read_i32::<LittleEndian>() {
        Ok(value) => value,
        Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
            return Err(corrupt(format!("truncated before {}", what)));
        }
        Err(e) => return Err(e.into()),
    };
    usize::try_from(value).map_err(|_| corrupt(format!("negative {} ({})", what, value)))
}
