use rayon::prelude::*;
use std::path::Path;

use crate::config::{CheckerConfig, DEFAULT_MAX_EDIT_DISTANCE};
use crate::edit::{
    DEFAULT_SUBSTITUTION_COST, EditPath, edit_distance_with_cost, edit_path_with_cost,
};
use crate::error::DictionaryError;
use crate::hash_table::HashTable;

/// Closest dictionary entry found by [`find_nearest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Nearest<'a> {
    pub index: usize,
    pub word: &'a str,
    pub distance: usize,
}

/// Scans every occupied slot for the word closest to `key`.
///
/// Ties keep the entry in the lowest slot, so the winner among equally close words
/// depends on the table's insertion history rather than on alphabetical order.
/// Returns `None` for an empty table.
pub fn find_nearest<'a>(
    table: &'a HashTable,
    key: &str,
    substitution_cost: usize,
) -> Option<Nearest<'a>> {
    table
        .slots()
        .par_iter()
        .enumerate()
        .filter_map(|(index, slot)| {
            slot.as_deref().map(|word| Nearest {
                index,
                word,
                distance: edit_distance_with_cost(word, key, substitution_cost),
            })
        })
        .min_by_key(|nearest| (nearest.distance, nearest.index))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    pub word: String,
    pub distance: usize,
    pub path: EditPath,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuggestedCorrection {
    Correct,
    NoSuggestions,
    Suggestion(Suggestion),
}

#[derive(Debug, Clone)]
pub struct SpellCorrector {
    dictionary: HashTable,
    max_edit_distance: usize, // maximum edit distance to consider
    substitution_cost: usize,
}

impl SpellCorrector {
    pub fn new(dictionary: HashTable, max_edit_distance: usize) -> Self {
        SpellCorrector {
            dictionary,
            max_edit_distance,
            substitution_cost: DEFAULT_SUBSTITUTION_COST,
        }
    }

    pub fn with_substitution_cost(mut self, substitution_cost: usize) -> Self {
        self.substitution_cost = substitution_cost;
        self
    }

    pub fn dictionary(&self) -> &HashTable {
        &self.dictionary
    }

    pub fn max_edit_distance(&self) -> usize {
        self.max_edit_distance
    }

    pub fn from_word_list_file<P: AsRef<Path>>(
        file_path: P,
        max_edit_distance: usize,
    ) -> Result<Self, DictionaryError> {
        let dictionary = HashTable::load_from_text_file(file_path)?;
        Ok(Self::new(dictionary, max_edit_distance))
    }

    pub fn save_spell_corrector<P: AsRef<Path>>(
        &self,
        file_path: P,
    ) -> Result<(), DictionaryError> {
        self.dictionary.save_as_binary(file_path)
    }

    pub fn load_spell_corrector<P: AsRef<Path>>(
        file_path: P,
        max_edit_distance: usize,
    ) -> Result<Self, DictionaryError> {
        let dictionary = HashTable::load_from_binary(file_path)?;
        Ok(Self::new(dictionary, max_edit_distance))
    }

    /// Loads the snapshot named by `config`, or `None` if it does not exist yet.
    pub fn load_cached(config: &CheckerConfig) -> Result<Option<Self>, DictionaryError> {
        if !config.snapshot_path.exists() {
            return Ok(None);
        }
        let corrector =
            Self::load_spell_corrector(&config.snapshot_path, config.max_edit_distance)?;
        Ok(Some(corrector.with_substitution_cost(config.substitution_cost)))
    }

    /// Builds from a text word list and caches the result at the configured snapshot path.
    pub fn build_and_cache<P: AsRef<Path>>(
        config: &CheckerConfig,
        word_list: P,
    ) -> Result<Self, DictionaryError> {
        let corrector = Self::from_word_list_file(word_list, config.max_edit_distance)?
            .with_substitution_cost(config.substitution_cost);
        corrector.save_spell_corrector(&config.snapshot_path)?;
        Ok(corrector)
    }

    pub fn is_correct(&self, word: &str) -> bool {
        self.dictionary.contains(&word.to_ascii_lowercase())
    }

    pub fn suggest_single_word_correction(&self, word: &str) -> SuggestedCorrection {
        let word = word.to_ascii_lowercase();
        if self.dictionary.contains(&word) {
            return SuggestedCorrection::Correct;
        }

        match find_nearest(&self.dictionary, &word, self.substitution_cost) {
            Some(nearest) if nearest.distance <= self.max_edit_distance => {
                log::trace!(
                    "{} -> {} (slot {}, distance {})",
                    word,
                    nearest.word,
                    nearest.index,
                    nearest.distance
                );
                SuggestedCorrection::Suggestion(Suggestion {
                    word: nearest.word.to_string(),
                    distance: nearest.distance,
                    path: edit_path_with_cost(nearest.word, &word, self.substitution_cost),
                })
            }
            _ => SuggestedCorrection::NoSuggestions,
        }
    }

    pub fn suggest_word_corrections(&self, words: &[String]) -> Vec<SuggestedCorrection> {
        words
            .par_iter()
            .map(|word| self.suggest_single_word_correction(word))
            .collect()
    }
}

impl Default for SpellCorrector {
    fn default() -> Self {
        Self::new(HashTable::with_capacity(0), DEFAULT_MAX_EDIT_DISTANCE)
    }
}
