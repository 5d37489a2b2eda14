//! Daemon error types.

use shelf_engine::EngineError;
use shelf_store::StoreError;
use thiserror::Error;

/// Daemon-level errors.
#[derive(Debug, Error)]
pub enum DaemonError {
    /// Engine error
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    /// Store error
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Path id does not name any product
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Request body could not be read as JSON
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    /// Query string could not be decoded
    #[error("Invalid query string: {0}")]
    InvalidQuery(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Anything else
    #[error("Unexpected failure: {0}")]
    Unexpected(String),
}

/// Result type for daemon operations.
pub type DaemonResult<T> = Result<T, DaemonError>;
