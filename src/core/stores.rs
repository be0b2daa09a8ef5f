// File: src/core/stores.rs
use crate::core::trie::PrefixTrie;
use crate::core::types::FrequencyEntry;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// The immutable lookup structures every ranking call reads from.
///
/// Built once at start-up (see [`StoreBuilder`] and `persistence::load_stores`)
/// and then shared by reference across sessions. Nothing mutates it after
/// construction, so it needs no synchronization.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct LexicalStores {
    trie: PrefixTrie,
    frequencies: HashMap<String, FrequencyEntry>,
    /// phonetic code -> words sharing that code
    phonetic_index: HashMap<String, Vec<String>>,
    /// literal token -> transliteration candidates
    transliterations: HashMap<String, Vec<String>>,
    /// Loaded from the user's file, never part of a snapshot.
    #[serde(skip)]
    substitutions: HashMap<String, String>,
}

impl LexicalStores {
    pub fn builder() -> StoreBuilder {
        StoreBuilder::default()
    }

    pub fn trie(&self) -> &PrefixTrie {
        &self.trie
    }

    pub fn entry(&self, word: &str) -> Option<&FrequencyEntry> {
        self.frequencies.get(word)
    }

    /// Words without a frequency entry rank as 0.
    pub fn frequency_of(&self, word: &str) -> u64 {
        self.entry(word).map_or(0, |e| e.frequency)
    }

    pub fn phonetic_matches(&self, code: &str) -> &[String] {
        self.phonetic_index.get(code).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn transliterations(&self, token: &str) -> &[String] {
        self.transliterations.get(token).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn substitution(&self, token: &str) -> Option<&str> {
        self.substitutions.get(token).map(String::as_str).filter(|s| !s.is_empty())
    }

    /// Space-joined translations of `word` (looked up lowercased).
    pub fn translation_message(&self, word: &str) -> String {
        self.entry(&word.to_lowercase())
            .map(|e| e.translation.join(" "))
            .unwrap_or_default()
    }

    pub fn vocabulary_len(&self) -> usize {
        self.trie.len()
    }

    /// Replaces the user substitution table. Only used while assembling
    /// the stores at start-up, before they are shared.
    pub(crate) fn set_substitutions(&mut self, substitutions: HashMap<String, String>) {
        self.substitutions = substitutions;
    }
}

/// Assembles a [`LexicalStores`]. Vocabulary words are inserted into the
/// trie at [`StoreBuilder::build`] time, after all frequencies are known.
#[derive(Default)]
pub struct StoreBuilder {
    vocabulary: Vec<String>,
    frequencies: HashMap<String, FrequencyEntry>,
    phonetic_index: HashMap<String, Vec<String>>,
    transliterations: HashMap<String, Vec<String>>,
    substitutions: HashMap<String, String>,
}

impl StoreBuilder {
    pub fn vocabulary<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.vocabulary.extend(words.into_iter().map(Into::into));
        self
    }

    pub fn word(mut self, word: &str, frequency: u64) -> Self {
        self.vocabulary.push(word.to_string());
        self.frequencies.entry(word.to_string()).or_default().frequency = frequency;
        self
    }

    pub fn frequencies(mut self, frequencies: HashMap<String, FrequencyEntry>) -> Self {
        self.frequencies.extend(frequencies);
        self
    }

    pub fn entry(mut self, word: &str, entry: FrequencyEntry) -> Self {
        self.frequencies.insert(word.to_string(), entry);
        self
    }

    pub fn phonetic_index(mut self, index: HashMap<String, Vec<String>>) -> Self {
        self.phonetic_index.extend(index);
        self
    }

    pub fn phonetic(mut self, code: &str, words: &[&str]) -> Self {
        self.phonetic_index
            .insert(code.to_string(), words.iter().map(|w| w.to_string()).collect());
        self
    }

    pub fn transliterations(mut self, table: HashMap<String, Vec<String>>) -> Self {
        self.transliterations.extend(table);
        self
    }

    pub fn transliteration(mut self, token: &str, targets: &[&str]) -> Self {
        self.transliterations
            .insert(token.to_string(), targets.iter().map(|w| w.to_string()).collect());
        self
    }

    pub fn substitutions(mut self, table: HashMap<String, String>) -> Self {
        self.substitutions.extend(table);
        self
    }

    pub fn substitution(mut self, token: &str, replacement: &str) -> Self {
        self.substitutions.insert(token.to_string(), replacement.to_string());
        self
    }

    pub fn build(self) -> LexicalStores {
        let mut trie = PrefixTrie::new();
        for word in &self.vocabulary {
            let freq = self.frequencies.get(word).map_or(0, |e| e.frequency);
            trie.insert(word, freq);
        }
        debug!(
            vocabulary = trie.len(),
            frequencies = self.frequencies.len(),
            phonetic_codes = self.phonetic_index.len(),
            transliterations = self.transliterations.len(),
            substitutions = self.substitutions.len(),
            "lexical stores built"
        );
        LexicalStores {
            trie,
            frequencies: self.frequencies,
            phonetic_index: self.phonetic_index,
            transliterations: self.transliterations,
            substitutions: self.substitutions,
        }
    }
}
