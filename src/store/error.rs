//! Record store error definitions.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while persisting or loading the store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Snapshot file could not be written.
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Tables could not be encoded.
    #[error("Serialize error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Snapshot file exists and is readable but does not decode.
    #[error("Corrupt snapshot at {path}: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
