//! Shelf Daemon Library
//!
//! HTTP shell around the product catalog engine.
//!
//! # Architecture
//!
//! ```text
//! HTTP → Request Log middleware → API handlers → Catalog (engine) → RecordStore → products.json
//!                  ↓
//!            requests.log
//! ```
//!
//! # Components
//!
//! - **Daemon**: Process lifecycle (initialize store, bind, serve, shutdown)
//! - **API**: Product CRUD and health endpoints
//! - **Request Log**: Append-only per-request log, failures never fail a request
//! - **Config**: Environment-based configuration
//!
//! # Example
//!
//! ```rust,ignore
//! use shelfd::{Config, Daemon};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = Config::from_env().expect("Failed to load config");
//!     let daemon = Daemon::from_config(config);
//!     daemon.run().await.expect("Daemon error");
//! }
//! ```

#![warn(clippy::all)]

pub mod api;
pub mod config;
pub mod daemon;
pub mod error;
pub mod request_log;

// Re-exports for convenience
pub use config::{ApiConfig, Config, Environment};
pub use daemon::Daemon;
pub use error::{DaemonError, DaemonResult};
