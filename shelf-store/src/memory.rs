//! In-memory store implementation
//!
//! Used for testing and development without touching the filesystem.
//! Holds the serialized document rather than typed records, so corrupt
//! content and storage outages can be simulated.

use crate::error::StoreError;
use crate::repository::RecordStore;
use async_trait::async_trait;
use shelf_domain::Product;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tokio::sync::RwLock;

const LOCATION: &str = "memory";

/// In-memory store for testing
pub struct MemoryStore {
    document: RwLock<Option<String>>,
    unavailable: AtomicBool,
    saves: AtomicUsize,
}

impl MemoryStore {
    /// Create a new store with no document (as if the file were absent)
    pub fn new() -> Self {
        Self {
            document: RwLock::new(None),
            unavailable: AtomicBool::new(false),
            saves: AtomicUsize::new(0),
        }
    }

    /// Create a store already holding `products`
    pub fn with_products(products: &[Product]) -> Self {
        let document = serde_json::to_string(products).ok();
        Self {
            document: RwLock::new(document),
            ..Self::new()
        }
    }

    /// Create a store holding arbitrary raw content
    pub fn with_raw(content: impl Into<String>) -> Self {
        Self {
            document: RwLock::new(Some(content.into())),
            ..Self::new()
        }
    }

    /// Make every subsequent operation fail with `StorageUnavailable`
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of successful `save_all` calls
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    /// Current raw document, if any
    pub async fn raw(&self) -> Option<String> {
        self.document.read().await.clone()
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::unavailable(LOCATION, "store marked unavailable"));
        }
        Ok(())
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn ensure_initialized(&self) -> Result<(), StoreError> {
        self.check_available()?;
        let mut document = self.document.write().await;
        if document.is_none() {
            *document = Some("[]".to_string());
        }
        Ok(())
    }

    async fn load_all(&self) -> Result<Vec<Product>, StoreError> {
        self.check_available()?;
        let document = self.document.read().await;
        let content = document
            .as_deref()
            .ok_or_else(|| StoreError::unavailable(LOCATION, "document not initialized"))?;

        serde_json::from_str(content).map_err(|e| StoreError::corrupt(LOCATION, e))
    }

    async fn save_all(&self, products: &[Product]) -> Result<(), StoreError> {
        self.check_available()?;
        let content = serde_json::to_string(products).map_err(|e| StoreError::corrupt(LOCATION, e))?;

        *self.document.write().await = Some(content);
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================
