// src/core/types.rs
use serde::{Deserialize, Serialize};

/// A unique identifier for a vocabulary word inside the prefix trie.
pub type WordId = usize;

/// Display strings handed to the host are cut to this many characters.
pub const MAX_DISPLAY_CHARS: usize = 50;

/// Delimiter that starts the phonetic annotation inside a display string.
pub const ANNOTATION_DELIMITER: char = '[';

/// Frequency, pronunciation and translations for one dictionary word.
/// Shared read-only by every session for the life of the process.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrequencyEntry {
    #[serde(default)]
    pub frequency: u64,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub ipa: Option<String>,
    #[serde(default)]
    pub translation: Vec<String>,
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()))
}

/// One ranked suggestion, kept parsed into headword, bracketed annotation
/// and trailing translation.
///
/// The host only ever sees [`Candidate::display`]; everything inside the
/// engine and the session works on the headword directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub headword: String,
    pub annotation: Option<String>,
    /// Only rendered after an annotation.
    pub translation: Option<String>,
}

impl Candidate {
    pub fn plain(headword: impl Into<String>) -> Self {
        Self { headword: headword.into(), annotation: None, translation: None }
    }

    pub fn annotated(headword: impl Into<String>, annotation: impl Into<String>) -> Self {
        Self { annotation: Some(annotation.into()), ..Self::plain(headword) }
    }

    /// Empty translations are dropped.
    pub fn with_translation(mut self, translation: impl Into<String>) -> Self {
        self.translation = Some(translation.into()).filter(|t| !t.is_empty());
        self
    }

    /// Wire form: `headword` or `headword [annotation] translation`,
    /// cut to 50 chars.
    pub fn display(&self) -> String {
        let full = match (&self.annotation, &self.translation) {
            (Some(annotation), Some(translation)) => {
                format!("{} [{}] {}", self.headword, annotation, translation)
            }
            (Some(annotation), None) => format!("{} [{}]", self.headword, annotation),
            (None, _) => self.headword.clone(),
        };
        truncate_chars(&full, MAX_DISPLAY_CHARS)
    }

    /// Parses a display string back into its headword, annotation and
    /// translation. A truncated display may lose the closing `]`.
    pub fn parse(display: &str) -> Self {
        let Some((word, rest)) = display.split_once(ANNOTATION_DELIMITER) else {
            return Self::plain(display.trim());
        };
        let (annotation, translation) = match rest.split_once(']') {
            Some((annotation, tail)) => (annotation, tail.trim()),
            None => (rest.trim_end(), ""),
        };
        Self::annotated(word.trim(), annotation).with_translation(translation)
    }
}

/// The text committed when a candidate display string is chosen:
/// everything before the first `[`, trimmed.
pub fn output_from_candidate(display: &str) -> String {
    Candidate::parse(display).headword
}

pub(crate) fn truncate_chars(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => s[..idx].to_string(),
        None => s.to_string(),
    }
}
