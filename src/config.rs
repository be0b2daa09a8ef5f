// File: src/config.rs
use crate::error::{ImeError, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// File name of the user substitution table in the user's home directory.
pub const USER_SUBSTITUTIONS_FILE: &str = "hallelujah.json";

/// Where the lexical data lives and how candidates are displayed.
/// Every field has a default, so a config file only lists what it changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImeConfig {
    pub data_dir: PathBuf,
    /// Newline-separated word list, or a JSON array when it ends in `.json`.
    pub vocabulary_file: String,
    /// `word -> {frequency, ipa, translation}`
    pub frequency_file: String,
    /// `token -> [transliteration]`
    pub transliteration_file: String,
    /// `phonetic code -> [word]`
    pub phonetic_file: String,
    /// Compiled bincode snapshot of the tables above; `None` disables it.
    pub snapshot_file: Option<String>,
    /// Overrides the default `$USERPROFILE/hallelujah.json`.
    pub user_substitutions: Option<PathBuf>,
    pub show_annotations: bool,
}

impl Default for ImeConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("dict"),
            vocabulary_file: "google_227800_words.txt".to_string(),
            frequency_file: "words_with_frequency_and_translation_and_ipa.json".to_string(),
            transliteration_file: "cedict.json".to_string(),
            phonetic_file: "fuzzy_soundex_encoded_words.json".to_string(),
            snapshot_file: Some("lexicon.bin".to_string()),
            user_substitutions: None,
            show_annotations: false,
        }
    }
}

impl ImeConfig {
    /// Reads a JSON config. A missing file yields the defaults; a file that
    /// exists but does not parse is an error.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(e.into()),
        };
        let config: Self = serde_json::from_str(&text)
            .map_err(|source| ImeError::Json { path: path.to_path_buf(), source })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.vocabulary_file.is_empty() {
            return Err(ImeError::Config("vocabulary_file must not be empty".to_string()));
        }
        Ok(())
    }

    pub fn vocabulary_path(&self) -> PathBuf {
        self.data_dir.join(&self.vocabulary_file)
    }

    pub fn frequency_path(&self) -> PathBuf {
        self.data_dir.join(&self.frequency_file)
    }

    pub fn transliteration_path(&self) -> PathBuf {
        self.data_dir.join(&self.transliteration_file)
    }

    pub fn phonetic_path(&self) -> PathBuf {
        self.data_dir.join(&self.phonetic_file)
    }

    pub fn snapshot_path(&self) -> Option<PathBuf> {
        self.snapshot_file.as_ref().map(|f| self.data_dir.join(f))
    }

    /// The configured substitution file, else `hallelujah.json` in
    /// `$USERPROFILE` (falling back to `$HOME`).
    pub fn user_substitutions_path(&self) -> Option<PathBuf> {
        if let Some(path) = &self.user_substitutions {
            return Some(path.clone());
        }
        env::var_os("USERPROFILE")
            .or_else(|| env::var_os("HOME"))
            .map(|home| PathBuf::from(home).join(USER_SUBSTITUTIONS_FILE))
    }
}
