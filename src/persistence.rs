// File: src/persistence.rs
//! Loading the lexical stores from their JSON sources, and the compiled
//! bincode snapshot that makes later start-ups fast.

use crate::config::ImeConfig;
use crate::core::stores::LexicalStores;
use crate::core::types::FrequencyEntry;
use crate::error::{ImeError, Result};
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::{info, warn};

const MAGIC: &[u8; 4] = b"HLXS";
const VERSION: u8 = 1;

/// Writes the stores atomically: a temp file in the same directory is
/// filled and then renamed over `path`.
pub fn save_snapshot(stores: &LexicalStores, path: &Path) -> Result<()> {
    let parent_dir = path.parent().unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(parent_dir)?;

    let temp_file = NamedTempFile::new_in(parent_dir)?;
    {
        let mut writer = BufWriter::new(&temp_file);
        writer.write_all(MAGIC)?;
        writer.write_all(&[VERSION])?;
        bincode::serialize_into(&mut writer, stores)
            .map_err(|e| ImeError::SnapshotEncode(e.to_string()))?;
        writer.flush()?;
    }

    temp_file.persist(path).map_err(|e| ImeError::Io(e.error))?;
    Ok(())
}

pub fn load_snapshot(path: &Path) -> Result<LexicalStores> {
    let mut reader = BufReader::new(File::open(path)?);

    let mut header = [0u8; 5];
    reader.read_exact(&mut header).map_err(|e| match e.kind() {
        io::ErrorKind::UnexpectedEof => ImeError::InvalidSnapshotHeader,
        _ => ImeError::Io(e),
    })?;
    if &header[..4] != MAGIC {
        return Err(ImeError::InvalidSnapshotHeader);
    }
    if header[4] != VERSION {
        return Err(ImeError::UnsupportedSnapshotVersion(header[4]));
    }

    bincode::deserialize_from(reader).map_err(|e| ImeError::SnapshotDecode(e.to_string()))
}

/// Builds the stores from the JSON / word-list sources named in `config`.
/// The vocabulary is required; a missing table is treated as empty.
pub fn load_sources(config: &ImeConfig) -> Result<LexicalStores> {
    let vocabulary = load_vocabulary(&config.vocabulary_path())?;
    let frequencies: HashMap<String, FrequencyEntry> =
        read_optional_json(&config.frequency_path())?.unwrap_or_default();
    let transliterations: HashMap<String, Vec<String>> =
        read_optional_json(&config.transliteration_path())?.unwrap_or_default();
    let phonetic_index: HashMap<String, Vec<String>> =
        read_optional_json(&config.phonetic_path())?.unwrap_or_default();

    Ok(LexicalStores::builder()
        .vocabulary(vocabulary)
        .frequencies(frequencies)
        .transliterations(transliterations)
        .phonetic_index(phonetic_index)
        .build())
}

/// Prefers a valid snapshot; otherwise compiles the sources and refreshes
/// the snapshot. User substitutions are always read fresh.
pub fn load_stores(config: &ImeConfig) -> Result<LexicalStores> {
    let snapshot_path = config.snapshot_path();

    let cached = snapshot_path.as_deref().filter(|p| p.exists()).and_then(|path| {
        load_snapshot(path)
            .inspect_err(|e| warn!(path = %path.display(), error = %e, "ignoring snapshot"))
            .ok()
    });

    let mut stores = match cached {
        Some(stores) => {
            info!(vocabulary = stores.vocabulary_len(), "loaded lexicon snapshot");
            stores
        }
        None => {
            let stores = load_sources(config)?;
            info!(vocabulary = stores.vocabulary_len(), "compiled lexicon from sources");
            if let Some(path) = &snapshot_path {
                if let Err(e) = save_snapshot(&stores, path) {
                    warn!(path = %path.display(), error = %e, "could not write snapshot");
                }
            }
            stores
        }
    };

    let substitutions = config
        .user_substitutions_path()
        .map(|path| load_user_substitutions(&path))
        .unwrap_or_default();
    stores.set_substitutions(substitutions);
    Ok(stores)
}

/// Reads the user's `token -> replacement` file. A missing or malformed
/// file gives an empty table; it never fails.
pub fn load_user_substitutions(path: &Path) -> HashMap<String, String> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            info!(path = %path.display(), "no user substitutions file");
            return HashMap::new();
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "could not read user substitutions");
            return HashMap::new();
        }
    };
    match serde_json::from_str(&text) {
        Ok(table) => table,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to parse user substitutions");
            HashMap::new()
        }
    }
}

fn load_vocabulary(path: &Path) -> Result<Vec<String>> {
    let text = fs::read_to_string(path)?;
    if path.extension().is_some_and(|ext| ext == "json") {
        return serde_json::from_str(&text)
            .map_err(|source| ImeError::Json { path: path.to_path_buf(), source });
    }
    Ok(text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

fn read_optional_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            warn!(path = %path.display(), "lexical table missing, using an empty one");
            return Ok(None);
        }
        Err(e) => return Err(e.into()),
    };
    serde_json::from_reader(BufReader::new(file))
        .map(Some)
        .map_err(|source| ImeError::Json { path: path.to_path_buf(), source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn write(dir: &Path, name: &str, contents: &str) {
        fs::write(dir.join(name), contents).unwrap();
    }

    fn config_in(dir: &Path) -> ImeConfig {
        ImeConfig {
            data_dir: dir.to_path_buf(),
            user_substitutions: Some(dir.join("subs.json")),
            ..Default::default()
        }
    }

    #[test]
    fn sources_compile_and_snapshot_round_trips() {
        let dir = tempdir().unwrap();
        write(dir.path(), "google_227800_words.txt", "cat\ncar\n\ncare\n");
        write(
            dir.path(),
            "words_with_frequency_and_translation_and_ipa.json",
            r#"{"car": {"frequency": 9, "ipa": "kɑr", "translation": ["车"]}}"#,
        );
        write(dir.path(), "cedict.json", r#"{"mao": ["猫"]}"#);

        let config = config_in(dir.path());
        let stores = load_stores(&config).unwrap();
        assert_eq!(stores.vocabulary_len(), 3);
        assert_eq!(stores.frequency_of("car"), 9);
        assert_eq!(stores.transliterations("mao"), ["猫".to_string()]);

        let snapshot = config.snapshot_path().unwrap();
        assert!(snapshot.exists());
        let reloaded = load_snapshot(&snapshot).unwrap();
        assert_eq!(reloaded.vocabulary_len(), 3);
        assert_eq!(reloaded.entry("car").unwrap().ipa.as_deref(), Some("kɑr"));
    }

    #[test]
    fn missing_vocabulary_is_an_error() {
        let dir = tempdir().unwrap();
        assert!(matches!(load_sources(&config_in(dir.path())), Err(ImeError::Io(_))));
    }

    #[test]
    fn bad_snapshot_header_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("lexicon.bin");
        fs::write(&path, b"NOPE\x01rest").unwrap();
        assert!(matches!(load_snapshot(&path), Err(ImeError::InvalidSnapshotHeader)));
        fs::write(&path, b"HL").unwrap();
        assert!(matches!(load_snapshot(&path), Err(ImeError::InvalidSnapshotHeader)));
    }

    #[test]
    fn corrupt_snapshot_falls_back_to_sources() {
        let dir = tempdir().unwrap();
        write(dir.path(), "google_227800_words.txt", "hello\n");
        fs::write(dir.path().join("lexicon.bin"), b"HLXS\x01garbage").unwrap();
        let stores = load_stores(&config_in(dir.path())).unwrap();
        assert!(stores.trie().contains("hello"));
    }

    #[test]
    fn user_substitutions_tolerate_bad_files() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("subs.json");
        assert!(load_user_substitutions(&path).is_empty());

        fs::write(&path, "{ broken").unwrap();
        assert!(load_user_substitutions(&path).is_empty());

        fs::write(&path, r#"{"teh": "the"}"#).unwrap();
        assert_eq!(load_user_substitutions(&path).get("teh").map(String::as_str), Some("the"));
    }

    #[test]
    fn substitutions_are_attached_to_loaded_stores() {
        let dir = tempdir().unwrap();
        write(dir.path(), "google_227800_words.txt", "the\n");
        write(dir.path(), "subs.json", r#"{"teh": "the"}"#);
        let stores = load_stores(&config_in(dir.path())).unwrap();
        assert_eq!(stores.substitution("teh"), Some("the"));
    }
}
