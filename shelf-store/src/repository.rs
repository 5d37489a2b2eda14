//! Record store trait definition (Port)
//!
//! The engine only ever sees the whole collection: it loads everything,
//! computes the next state, and hands the full sequence back. An indexed
//! backend can replace the file store behind this trait without touching
//! the engine.

use crate::error::StoreError;
use async_trait::async_trait;
use shelf_domain::Product;
use std::sync::Arc;

/// Whole-collection persistence for products
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Create the backing resource holding an empty sequence if it is absent.
    ///
    /// Idempotent: an existing resource is left untouched.
    async fn ensure_initialized(&self) -> Result<(), StoreError>;

    /// Read and deserialize the full collection, in stored order
    async fn load_all(&self) -> Result<Vec<Product>, StoreError>;

    /// Serialize and overwrite the full collection
    async fn save_all(&self, products: &[Product]) -> Result<(), StoreError>;
}

#[async_trait]
impl<S: RecordStore + ?Sized> RecordStore for Arc<S> {
    async fn ensure_initialized(&self) -> Result<(), StoreError> {
        (**self).ensure_initialized().await
    }

    async fn load_all(&self) -> Result<Vec<Product>, StoreError> {
        (**self).load_all().await
    }

    async fn save_all(&self, products: &[Product]) -> Result<(), StoreError> {
        (**self).save_all(products).await
    }
}
