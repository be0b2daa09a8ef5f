// File: src/fuzzy/mod.rs
//! Fuzzy matching used by the ranking fallback stage: spelling correction
//! and a coarse phonetic key for sound-alike lookups.

pub mod phonetic;
pub mod symspell;

pub use phonetic::FuzzySoundex;
pub use symspell::SymSpell;

/// Produces spelling corrections for a token as `(frequency, word)` pairs.
pub trait SpellCorrector: Send + Sync {
    fn candidates(&self, word: &str) -> Vec<(u64, String)>;
}

/// Maps a word to a phonetic code; words that sound alike share a code.
pub trait PhoneticEncoder: Send + Sync {
    fn encode(&self, word: &str) -> String;
}

/// Damerau-Levenshtein distance between two words.
pub fn edit_distance(a: &str, b: &str) -> usize {
    strsim::damerau_levenshtein(a, b)
}
