//! Engine error types.

use shelf_domain::{DomainError, ProductId};
use shelf_store::StoreError;
use thiserror::Error;

/// Errors that can occur while querying or mutating the catalog.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Missing or invalid query input
    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    /// Create/update payload is missing required fields or cannot be coerced
    #[error("Validation failed: {0}")]
    InvalidProduct(#[from] DomainError),

    /// Referenced product does not exist
    #[error("Product not found: {0}")]
    NotFound(ProductId),

    /// A text filter was supplied with an empty value
    #[error("Filter value for {field} must not be empty")]
    EmptyFilterValue {
        /// Query parameter name
        field: &'static str,
    },

    /// Minimum-price filter left nothing
    #[error("No products found with price at or above {min}")]
    NoResultsAboveMin {
        /// The minimum as supplied
        min: String,
    },

    /// The largest stored id leaves no room for another
    #[error("No product id available after {max}")]
    IdSpaceExhausted {
        /// Largest id in the collection
        max: ProductId,
    },

    /// Store error
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;
