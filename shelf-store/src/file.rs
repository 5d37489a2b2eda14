//! JSON file store
//!
//! Persists the product collection as one pretty-printed JSON array.
//! Writes go to a sibling temporary file that is renamed over the target,
//! so a crash mid-write leaves the previous document intact.

use crate::config::StoreConfig;
use crate::error::StoreError;
use crate::repository::RecordStore;
use async_trait::async_trait;
use shelf_domain::Product;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// File-backed record store
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Create a store over the document at `path`.
    ///
    /// Nothing is touched on disk until [`RecordStore::ensure_initialized`]
    /// or the first load/save.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Create a store over the configured data file.
    pub fn from_config(config: &StoreConfig) -> Self {
        Self::new(config.data_file.clone())
    }

    /// Path of the backing document
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(OsString::from)
            .unwrap_or_else(|| OsString::from("products.json"));
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    async fn create_parent_dir(&self) -> Result<(), StoreError> {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| StoreError::unavailable(parent, e)),
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl RecordStore for JsonFileStore {
    async fn ensure_initialized(&self) -> Result<(), StoreError> {
        let exists = tokio::fs::try_exists(&self.path)
            .await
            .map_err(|e| StoreError::unavailable(&self.path, e))?;

        if exists {
            debug!(path = %self.path.display(), "Data file present");
            return Ok(());
        }

        self.create_parent_dir().await?;
        tokio::fs::write(&self.path, "[]")
            .await
            .map_err(|e| StoreError::unavailable(&self.path, e))?;

        info!(path = %self.path.display(), "Created empty data file");
        Ok(())
    }

    async fn load_all(&self) -> Result<Vec<Product>, StoreError> {
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| StoreError::unavailable(&self.path, e))?;

        let products: Vec<Product> =
            serde_json::from_str(&content).map_err(|e| StoreError::corrupt(&self.path, e))?;

        debug!(path = %self.path.display(), count = products.len(), "Loaded products");
        Ok(products)
    }

    async fn save_all(&self, products: &[Product]) -> Result<(), StoreError> {
        let content = serde_json::to_string_pretty(products)
            .map_err(|e| StoreError::corrupt(&self.path, e))?;

        let temp = self.temp_path();
        tokio::fs::write(&temp, content)
            .await
            .map_err(|e| StoreError::unavailable(&temp, e))?;
        tokio::fs::rename(&temp, &self.path)
            .await
            .map_err(|e| StoreError::unavailable(&self.path, e))?;

        debug!(path = %self.path.display(), count = products.len(), "Saved products");
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use shelf_domain::ProductDraft;
    use tempfile::TempDir;

    fn product(id: u64, name: &str) -> Product {
        let draft = ProductDraft::from_value(&serde_json::json!({
            "name": name,
            "category": "Fruits",
            "price": 2.5,
            "inStock": true,
            "quantity": 10,
            "brand": "FarmFresh"
        }))
        .unwrap();
        Product::from_draft(id, draft)
    }

    #[tokio::test]
    async fn test_ensure_initialized_creates_empty_document() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("nested/products.json"));

        store.ensure_initialized().await.unwrap();

        let content = std::fs::read_to_string(store.path()).unwrap();
        assert_eq!(content, "[]");
        assert!(store.load_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_ensure_initialized_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("products.json"));

        store.ensure_initialized().await.unwrap();
        store.save_all(&[product(1, "Apple")]).await.unwrap();
        store.ensure_initialized().await.unwrap();

        assert_eq!(store.load_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_save_then_load_preserves_order() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("products.json"));
        let products = vec![product(3, "Cherry"), product(1, "Apple"), product(2, "Banana")];

        store.save_all(&products).await.unwrap();

        assert_eq!(store.load_all().await.unwrap(), products);
        assert!(!store.temp_path().exists());
    }

    #[tokio::test]
    async fn test_load_corrupt_document() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("products.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = JsonFileStore::new(&path).load_all().await.unwrap_err();
        assert!(matches!(err, StoreError::CorruptData { .. }));
    }

    #[tokio::test]
    async fn test_load_wrapped_document_is_corrupt() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("products.json");
        std::fs::write(&path, r#"{"products": []}"#).unwrap();

        let err = JsonFileStore::new(&path).load_all().await.unwrap_err();
        assert!(matches!(err, StoreError::CorruptData { .. }));
    }

    #[tokio::test]
    async fn test_load_missing_document() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("absent.json"));

        let err = store.load_all().await.unwrap_err();
        assert!(matches!(err, StoreError::StorageUnavailable { .. }));
    }

    #[test]
    fn test_temp_path_is_sibling() {
        let store = JsonFileStore::new("data/products.json");
        assert_eq!(store.temp_path(), PathBuf::from("data/products.json.tmp"));
    }
}
