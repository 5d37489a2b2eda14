//! Shelf Domain Layer
//!
//! Pure domain logic with zero I/O dependencies.
//! Contains the product entity, the draft it is built from, and the
//! coercion rules that turn loosely-typed request payloads into typed fields.

#![warn(missing_docs)]
#![warn(clippy::all)]

// Public modules
pub mod entities;
pub mod value_objects;

// Re-export commonly used types
pub use entities::{Product, ProductDraft, ProductId, REQUIRED_FIELDS};
pub use value_objects::{parse_integer, parse_number, truthy, DomainError};
