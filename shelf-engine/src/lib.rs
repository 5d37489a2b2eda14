//! Shelf Query & Mutation Engine
//!
//! Turns request parameters into a view of, or an edit to, the full product
//! collection loaded from a [`RecordStore`](shelf_store::RecordStore).
//!
//! - **Query**: filter pipeline and pagination over an in-memory sequence
//! - **Catalog**: load → compute → persist cycles for list/get/create/update/delete

#![warn(clippy::all)]

mod catalog;
mod error;
pub mod query;

pub use catalog::{next_id, Catalog, EngineConfig};
pub use error::{EngineError, EngineResult};
pub use query::{Pagination, ProductQuery};
