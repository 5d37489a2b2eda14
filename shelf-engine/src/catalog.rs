//! Catalog: the query & mutation engine over a record store.
//!
//! Every operation loads the full collection, computes the answer or the
//! next collection state, and (for mutations) persists the whole sequence.
//! Mutations are serialized by an in-process lock, so concurrent writers
//! inside one process cannot clobber each other's edits.

use std::sync::Arc;

use serde_json::Value;
use tokio::sync::Mutex;
use tracing::{debug, info};

use shelf_domain::{Product, ProductDraft, ProductId};
use shelf_store::RecordStore;

use crate::error::{EngineError, EngineResult};
use crate::query::ProductQuery;

// =============================================================================
// Configuration
// =============================================================================

/// Engine configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Treat an empty result after the `priceMin` filter as a client error.
    ///
    /// `priceMax` never behaves this way; clearing this flag makes the two
    /// bounds symmetric.
    pub empty_price_min_is_error: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            empty_price_min_is_error: true,
        }
    }
}

// =============================================================================
// Catalog
// =============================================================================

/// Next id to assign: one past the largest existing id, or 1 for an empty
/// collection. Gaps left by deletions are never reused.
///
/// # Errors
/// `EngineError::IdSpaceExhausted` when the largest id is already `u64::MAX`.
pub fn next_id(products: &[Product]) -> EngineResult<ProductId> {
    match products.iter().map(|p| p.id).max() {
        None => Ok(1),
        Some(max) => max
            .checked_add(1)
            .ok_or(EngineError::IdSpaceExhausted { max }),
    }
}

/// Query & mutation engine.
pub struct Catalog<S: RecordStore> {
    store: Arc<S>,
    config: EngineConfig,
    write_lock: Mutex<()>,
}

impl<S: RecordStore> Catalog<S> {
    /// Create an engine over `store`.
    pub fn new(store: Arc<S>, config: EngineConfig) -> Self {
        Self {
            store,
            config,
            write_lock: Mutex::new(()),
        }
    }

    /// The underlying store
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Engine configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Make sure the backing resource exists.
    pub async fn initialize(&self) -> EngineResult<()> {
        self.store.ensure_initialized().await?;
        Ok(())
    }

    /// Filtered, paginated view of the collection.
    pub async fn list(&self, query: &ProductQuery) -> EngineResult<Vec<Product>> {
        let products = self.store.load_all().await?;
        let total = products.len();

        let result = query.apply(products, &self.config)?;
        debug!(total, returned = result.len(), "Listed products");
        Ok(result)
    }

    /// First product with the given id.
    pub async fn get(&self, id: ProductId) -> EngineResult<Product> {
        self.store
            .load_all()
            .await?
            .into_iter()
            .find(|p| p.id == id)
            .ok_or(EngineError::NotFound(id))
    }

    /// Validate `payload`, assign the next id, append and persist.
    pub async fn create(&self, payload: &Value) -> EngineResult<Product> {
        let draft = ProductDraft::from_value(payload)?;

        let _guard = self.write_lock.lock().await;
        let mut products = self.store.load_all().await?;

        let product = Product::from_draft(next_id(&products)?, draft);
        products.push(product.clone());
        self.store.save_all(&products).await?;

        info!(id = product.id, name = %product.name, "Created product");
        Ok(product)
    }

    /// Validate `payload` and replace the product with `id` wholesale.
    ///
    /// The id is taken from the caller, never from the payload.
    pub async fn update(&self, id: ProductId, payload: &Value) -> EngineResult<Product> {
        let draft = ProductDraft::from_value(payload)?;

        let _guard = self.write_lock.lock().await;
        let mut products = self.store.load_all().await?;

        let slot = products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(EngineError::NotFound(id))?;
        *slot = Product::from_draft(id, draft);
        let product = slot.clone();

        self.store.save_all(&products).await?;

        info!(id, name = %product.name, "Updated product");
        Ok(product)
    }

    /// Remove the product with `id` and persist the reduced collection.
    pub async fn delete(&self, id: ProductId) -> EngineResult<()> {
        let _guard = self.write_lock.lock().await;
        let mut products = self.store.load_all().await?;

        let before = products.len();
        products.retain(|p| p.id != id);
        if products.len() == before {
            return Err(EngineError::NotFound(id));
        }

        self.store.save_all(&products).await?;

        info!(id, remaining = products.len(), "Deleted product");
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================
