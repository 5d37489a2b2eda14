//! Domain Entities for Shelf
//!
//! The product record and the validated draft it is built from.

use crate::value_objects::{coerce_integer, coerce_price, coerce_text, truthy, DomainError};
use serde::{Deserialize, Serialize};
use serde_json::Value;

// =============================================================================
// Product ID
// =============================================================================

/// Unique identifier for a Product
pub type ProductId = u64;

/// Fields every create or update payload must carry, in payload order.
pub const REQUIRED_FIELDS: [&str; 6] = ["name", "category", "price", "inStock", "quantity", "brand"];

// =============================================================================
// Product
// =============================================================================

/// A catalog record.
///
/// # Invariants
/// - `id` is unique within a collection and assigned by the engine
/// - `name`, `category` and `brand` are non-empty
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique identifier
    pub id: ProductId,
    /// Display name
    pub name: String,
    /// Category, matched case-insensitively
    pub category: String,
    /// Unit price
    pub price: f64,
    /// Whether the product is available
    pub in_stock: bool,
    /// Units on hand
    pub quantity: i64,
    /// Brand, matched case-insensitively
    pub brand: String,
}

impl Product {
    /// Give a draft its identity.
    pub fn from_draft(id: ProductId, draft: ProductDraft) -> Self {
        Self {
            id,
            name: draft.name,
            category: draft.category,
            price: draft.price,
            in_stock: draft.in_stock,
            quantity: draft.quantity,
            brand: draft.brand,
        }
    }

    /// Case-insensitive category match
    pub fn in_category(&self, category: &str) -> bool {
        self.category.to_lowercase() == category.to_lowercase()
    }

    /// Case-insensitive brand match
    pub fn of_brand(&self, brand: &str) -> bool {
        self.brand.to_lowercase() == brand.to_lowercase()
    }
}

// =============================================================================
// Product Draft
// =============================================================================

/// A validated, coerced product without an id.
///
/// Built from a raw JSON payload by [`ProductDraft::from_value`]. Create and
/// update share this path, so both enforce the same presence rules.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDraft {
    /// Display name
    pub name: String,
    /// Category
    pub category: String,
    /// Unit price
    pub price: f64,
    /// Availability
    pub in_stock: bool,
    /// Units on hand
    pub quantity: i64,
    /// Brand
    pub brand: String,
}

impl ProductDraft {
    /// Validate and coerce a raw payload.
    ///
    /// `name`, `category` and `brand` must be present and truthy. `price`,
    /// `inStock` and `quantity` only need to be present, so `0` and `false`
    /// are accepted (and so is `null`, which coerces like any other value).
    ///
    /// # Errors
    /// - `DomainError::NotAnObject` if the payload is not an object
    /// - `DomainError::MissingFields` listing every absent or empty field
    /// - `DomainError::InvalidField` if `price` or `quantity` cannot be coerced
    pub fn from_value(payload: &Value) -> Result<Self, DomainError> {
        let fields = payload.as_object().ok_or(DomainError::NotAnObject)?;

        let name = coerce_text(fields.get("name"));
        let category = coerce_text(fields.get("category"));
        let brand = coerce_text(fields.get("brand"));
        let price = fields.get("price");
        let in_stock = fields.get("inStock");
        let quantity = fields.get("quantity");

        let missing: Vec<&'static str> = [
            ("name", name.is_some()),
            ("category", category.is_some()),
            ("price", price.is_some()),
            ("inStock", in_stock.is_some()),
            ("quantity", quantity.is_some()),
            ("brand", brand.is_some()),
        ]
        .into_iter()
        .filter(|(_, present)| !present)
        .map(|(field, _)| field)
        .collect();

        match (name, category, price, in_stock, quantity, brand) {
            (Some(name), Some(category), Some(price), Some(in_stock), Some(quantity), Some(brand)) => {
                Ok(Self {
                    name,
                    category,
                    price: coerce_price("price", price)?,
                    in_stock: truthy(in_stock),
                    quantity: coerce_integer("quantity", quantity)?,
                    brand,
                })
            }
            _ => Err(DomainError::MissingFields(missing)),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
