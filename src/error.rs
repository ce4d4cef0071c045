//! Error types for save file persistence
//!
//! Counter mutations are total and never fail; only the save file
//! boundary can go wrong.

use std::path::PathBuf;
use thiserror::Error;

/// Failures while saving or loading the timer record
#[derive(Error, Debug)]
pub enum PersistError {
    /// Load attempted before anything was saved.
    #[error("Save file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// File content is not a valid timer record.
    #[error("Malformed save file {path}: {source}")]
    MalformedRecord {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Any other read or write failure.
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl PersistError {
    /// Classify an IO error, mapping a missing file to [`PersistError::FileNotFound`]
    pub fn io(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        let path = path.into();
        if err.kind() == std::io::ErrorKind::NotFound {
            Self::FileNotFound { path }
        } else {
            Self::Io { path, source: err }
        }
    }

    pub fn malformed(path: impl Into<PathBuf>, err: serde_json::Error) -> Self {
        Self::MalformedRecord {
            path: path.into(),
            source: err,
        }
    }
}

pub type Result<T> = std::result::Result<T, PersistError>;
