// File: src/fuzzy/symspell.rs
use crate::core::stores::LexicalStores;
use crate::core::types::WordId;
use crate::fuzzy::{edit_distance, SpellCorrector};
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Spelling correction based on the Symmetric Delete (SymSpell) algorithm.
/// It pre-calculates a dictionary of "deletes" for O(1) lookup complexity
/// (relative to dictionary size).
///
/// Results follow a tiered policy: a known word corrects to itself, otherwise
/// every known word at the smallest edit distance is returned, otherwise the
/// input comes back unchanged with frequency 0.
#[derive(Clone)]
pub struct SymSpell {
    /// Maps a delete variant (e.g., "helo") to the ids of the vocabulary
    /// words it could have come from (e.g., [id_for_hello]).
    deletes: HashMap<String, Vec<WordId>>,
    words: Vec<String>,
    frequencies: Vec<u64>,
    index: HashMap<String, WordId>,
    max_edit_distance: usize,
}

impl SymSpell {
    pub fn new(max_edit_distance: usize) -> Self {
        Self {
            deletes: HashMap::new(),
            words: Vec::new(),
            frequencies: Vec::new(),
            index: HashMap::new(),
            max_edit_distance,
        }
    }

    /// Indexes every vocabulary word of `stores` with its frequency.
    pub fn from_stores(stores: &LexicalStores, max_edit_distance: usize) -> Self {
        let mut symspell = Self::new(max_edit_distance);
        for word in stores.trie().words() {
            symspell.add_word(word, stores.frequency_of(word));
        }
        debug!(
            words = symspell.words.len(),
            deletes = symspell.deletes.len(),
            "spelling index built"
        );
        symspell
    }

    /// Adds a word by generating all its delete variants up to the
    /// configured edit distance and mapping them back to the word's id.
    /// Complexity: Amortized O(k^2) where k is the word length.
    pub fn add_word(&mut self, word: &str, frequency: u64) {
        if let Some(&id) = self.index.get(word) {
            self.frequencies[id] = self.frequencies[id].max(frequency);
            return;
        }
        let word_id = self.words.len();
        self.words.push(word.to_string());
        self.frequencies.push(frequency);
        self.index.insert(word.to_string(), word_id);

        for edit in self.generate_edits(word) {
            self.deletes.entry(edit).or_default().push(word_id);
        }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.index.contains_key(word)
    }

    /// Every known word within the edit distance, paired with its distance.
    /// Complexity: O(k^2) where k is the input length, independent of the
    /// dictionary size.
    pub fn lookup(&self, input: &str) -> Vec<(WordId, usize)> {
        let mut seen = HashSet::new();
        let mut hits = Vec::new();
        for edit in self.generate_edits(input) {
            let Some(word_ids) = self.deletes.get(&edit) else {
                continue;
            };
            for &id in word_ids {
                if !seen.insert(id) {
                    continue;
                }
                let distance = edit_distance(input, &self.words[id]);
                if distance <= self.max_edit_distance {
                    hits.push((id, distance));
                }
            }
        }
        hits
    }

    /// Generates all unique string variants within the max_edit_distance.
    /// This includes the original string itself.
    fn generate_edits(&self, word: &str) -> HashSet<String> {
        let mut edits = HashSet::new();
        edits.insert(word.to_string()); // Distance 0

        let mut current_edits = edits.clone();

        for _ in 0..self.max_edit_distance {
            let mut next_edits = HashSet::new();
            for edit in current_edits {
                for (i, _) in edit.char_indices() {
                    let mut deleted_variant = edit.clone();
                    deleted_variant.remove(i);
                    next_edits.insert(deleted_variant);
                }
            }
            edits.extend(next_edits.iter().cloned());
            current_edits = next_edits;
        }

        edits
    }
}

impl SpellCorrector for SymSpell {
    fn candidates(&self, word: &str) -> Vec<(u64, String)> {
        if let Some(&id) = self.index.get(word) {
            return vec![(self.frequencies[id], word.to_string())];
        }

        let hits = self.lookup(word);
        let Some(best) = hits.iter().map(|&(_, d)| d).min() else {
            return vec![(0, word.to_string())];
        };

        let mut closest: Vec<(u64, String)> = hits
            .into_iter()
            .filter(|&(_, d)| d == best)
            .map(|(id, _)| (self.frequencies[id], self.words[id].clone()))
            .collect();
        closest.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(&b.1)));
        closest
    }
}
