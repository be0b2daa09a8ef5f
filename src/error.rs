// File: src/error.rs
use std::io;
use std::path::PathBuf;

/// Errors raised while loading configuration and lexical data.
///
/// Ranking and key handling never fail; only the loading side of the
/// engine returns these.
#[derive(Debug, thiserror::Error)]
pub enum ImeError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("snapshot encode error: {0}")]
    SnapshotEncode(String),

    #[error("snapshot decode error: {0}")]
    SnapshotDecode(String),

    #[error("invalid snapshot header")]
    InvalidSnapshotHeader,

    #[error("unsupported snapshot version: {0}")]
    UnsupportedSnapshotVersion(u8),

    #[error("invalid config: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, ImeError>;
