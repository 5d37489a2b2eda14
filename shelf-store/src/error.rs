//! Storage layer errors

use std::fmt::Display;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur in the storage layer
#[derive(Debug, Error)]
pub enum StoreError {
    /// Backing resource could not be created, read or written
    #[error("Storage unavailable at {path}: {message}")]
    StorageUnavailable {
        /// Where the resource lives (file path, or "memory")
        path: String,
        /// Underlying failure
        message: String,
    },

    /// Backing resource is readable but does not hold a product sequence
    #[error("Corrupt data at {path}: {message}")]
    CorruptData {
        /// Where the resource lives
        path: String,
        /// Parser diagnostics
        message: String,
    },
}

impl StoreError {
    /// Create a storage unavailable error
    pub fn unavailable(path: impl AsRef<Path>, err: impl Display) -> Self {
        Self::StorageUnavailable {
            path: path.as_ref().display().to_string(),
            message: err.to_string(),
        }
    }

    /// Create a corrupt data error
    pub fn corrupt(path: impl AsRef<Path>, err: impl Display) -> Self {
        Self::CorruptData {
            path: path.as_ref().display().to_string(),
            message: err.to_string(),
        }
    }
}
