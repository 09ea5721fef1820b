//! Error types
//!
//! Rejected moves and out-of-range numbers are not errors in this crate;
//! they resolve to "no change" or a clamped value. What remains are broken
//! shape definitions and failures of the files the front end persists.

use std::path::PathBuf;

/// A shape matrix that cannot describe a tetromino.
///
/// Hitting one of these means a catalog entry is wrong, there is no
/// fallback geometry to use instead.
#[derive(Debug, thiserror::Error, PartialEq, Eq, Clone, Copy)]
pub enum ShapeError {
    #[error("shape has no rows or an empty first row")]
    Empty,
    #[error("shape row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("shape is {rows}x{cols}, larger than the 4x4 maximum")]
    TooLarge { rows: usize, cols: usize },
    #[error("shape has {found} filled cells, a tetromino has exactly 4")]
    BadCellCount { found: usize },
}

/// Failure reading or writing settings and high scores.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("could not determine a config directory")]
    NoConfigDir,
    #[error("i/o error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse TOML: {0}")]
    TomlDe(#[from] toml::de::Error),
    #[error("failed to serialize TOML: {0}")]
    TomlSer(#[from] toml::ser::Error),
    #[error("failed to (de)serialize JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl StorageError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StorageError::Io {
            path: path.into(),
            source,
        }
    }
}
