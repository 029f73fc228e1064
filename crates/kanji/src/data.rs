//! Loading kanji records from JSON files.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use kanji_query::Kanji;
use thiserror::Error;
use tracing::debug;

/// Errors from reading a record file.
#[derive(Debug, Error)]
pub enum DataError {
    /// The file could not be read.
    #[error("failed to read data file {path}: {source}")]
    Read {
        /// File that failed.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// The file is not a JSON array of records.
    #[error("failed to parse data file {path}: {source}")]
    Json {
        /// File that failed.
        path: PathBuf,
        /// Underlying JSON error.
        source: serde_json::Error,
    },
}

/// Reads one file holding a JSON array of records.
pub fn load_records(path: &Path) -> Result<Vec<Kanji>, DataError> {
    let contents = fs::read_to_string(path).map_err(|source| DataError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let records: Vec<Kanji> =
        serde_json::from_str(&contents).map_err(|source| DataError::Json {
            path: path.to_path_buf(),
            source,
        })?;

    debug!(path = %path.display(), records = records.len(), "loaded data file");
    Ok(records)
}

/// Reads several files and concatenates their records in order.
pub fn load_all(paths: &[PathBuf]) -> Result<Vec<Kanji>, DataError> {
    let mut records = Vec::new();
    for path in paths {
        records.extend(load_records(path)?);
    }
    Ok(records)
}
