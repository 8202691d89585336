//! Error types shared by the storage layer and the task store.

use std::io;

use thiserror::Error;

/// Failure while reading or writing the key-value storage medium.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("storage file is not a valid key-value document: {0}")]
    Format(#[from] serde_json::Error),
}

/// Top-level failure of a command or of the TUI session.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),
}

/// Failure while persisting the task collection.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("could not encode tasks: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("no task ids left")]
    IdSpaceExhausted,
}
