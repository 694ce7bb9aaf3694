//! Store Errors
//!
//! Error types for the JSON-file backed stores.

use std::path::PathBuf;

/// Errors that can occur reading or writing a backing collection
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Reading or writing the backing file failed
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The backing file holds something other than the expected records
    #[error("Serialization error on {path}: {source}")]
    Serialization {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// No account with this login name
    #[error("Account not found: {0}")]
    AccountNotFound(String),

    /// Login name already taken
    #[error("Username already exists: {0}")]
    DuplicateUsername(String),
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn serialization(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Serialization {
            path: path.into(),
            source,
        }
    }
}
