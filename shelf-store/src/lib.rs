//! Shelf Storage Layer
//!
//! Whole-collection persistence for products, plus the append-only request log.
//!
//! # Architecture
//!
//! - **RecordStore trait**: Defines the storage interface (port)
//! - **JSON file store**: Production implementation over a single document
//! - **In-memory store**: Fast implementation for testing
//! - **Request log**: Plain-text, one line per handled request
//!
//! # Usage
//!
//! ```rust
//! use shelf_store::{MemoryStore, RecordStore};
//!
//! #[tokio::main]
//! async fn main() {
//!     let store = MemoryStore::new();
//!     store.ensure_initialized().await.unwrap();
//!
//!     let products = store.load_all().await.unwrap();
//!     println!("Products: {}", products.len());
//! }
//! ```

#![warn(clippy::all)]

// Modules
mod config;
mod error;
mod file;
mod memory;
mod repository;
mod request_log;

// Re-exports
pub use config::StoreConfig;
pub use error::StoreError;
pub use file::JsonFileStore;
pub use memory::MemoryStore;
pub use repository::RecordStore;
pub use request_log::RequestLog;
