//! List query: filter pipeline and pagination.
//!
//! Filters run in a fixed order, each narrowing the working set:
//! category → brand → inStock → priceMin → priceMax, then the page window.

use std::ops::Range;

use serde::Deserialize;
use shelf_domain::{parse_integer, parse_number, Product};

use crate::catalog::EngineConfig;
use crate::error::{EngineError, EngineResult};

// =============================================================================
// Product Query
// =============================================================================

/// Raw list parameters as they arrive in the query string.
///
/// Values stay textual so that "supplied but empty" can be told apart from
/// "not supplied".
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductQuery {
    pub category: Option<String>,
    pub brand: Option<String>,
    pub in_stock: Option<String>,
    pub price_min: Option<String>,
    pub price_max: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

impl ProductQuery {
    /// Narrow `products` according to the query.
    ///
    /// # Errors
    /// - `EmptyFilterValue` for an empty `category`, `brand` or `priceMax`
    /// - `NoResultsAboveMin` when `priceMin` leaves nothing and
    ///   `config.empty_price_min_is_error` is set
    /// - `ValidationFailed` when `page`/`limit` are not integers
    pub fn apply(&self, mut products: Vec<Product>, config: &EngineConfig) -> EngineResult<Vec<Product>> {
        if let Some(category) = &self.category {
            products.retain(|p| p.in_category(category));
            if category.is_empty() {
                return Err(EngineError::EmptyFilterValue { field: "category" });
            }
        }

        if let Some(brand) = &self.brand {
            products.retain(|p| p.of_brand(brand));
            if brand.is_empty() {
                return Err(EngineError::EmptyFilterValue { field: "brand" });
            }
        }

        if let Some(in_stock) = &self.in_stock {
            let wanted = in_stock == "true";
            products.retain(|p| p.in_stock == wanted);
        }

        if let Some(raw) = &self.price_min {
            let min = parse_number(raw);
            products.retain(|p| p.price >= min);
            if products.is_empty() && config.empty_price_min_is_error {
                return Err(EngineError::NoResultsAboveMin { min: raw.clone() });
            }
        }

        if let Some(raw) = &self.price_max {
            if raw.is_empty() {
                return Err(EngineError::EmptyFilterValue { field: "priceMax" });
            }
            let max = parse_number(raw);
            products.retain(|p| p.price <= max);
        }

        match self.pagination()? {
            Some(pagination) => Ok(pagination.slice(products)),
            None => Ok(products),
        }
    }

    /// Page window, when both `page` and `limit` are supplied.
    pub fn pagination(&self) -> EngineResult<Option<Pagination>> {
        let (Some(page), Some(limit)) = (&self.page, &self.limit) else {
            return Ok(None);
        };

        let page = parse_integer(page)
            .ok_or_else(|| EngineError::ValidationFailed(format!("page must be an integer, got {:?}", page)))?;
        let limit = parse_integer(limit)
            .ok_or_else(|| EngineError::ValidationFailed(format!("limit must be an integer, got {:?}", limit)))?;

        Ok(Some(Pagination { page, limit }))
    }
}

// =============================================================================
// Pagination
// =============================================================================

/// One-based page of `limit` items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
}

impl Pagination {
    /// Index range `[(page-1)*limit, (page-1)*limit + limit)` clamped to `len`.
    ///
    /// A window starting before zero or a non-positive limit is empty.
    pub fn window(&self, len: usize) -> Range<usize> {
        let start = self
            .page
            .checked_sub(1)
            .and_then(|p| p.checked_mul(self.limit));

        match start {
            Some(start) if start >= 0 && self.limit > 0 => {
                let start = usize::try_from(start).unwrap_or(usize::MAX).min(len);
                let limit = usize::try_from(self.limit).unwrap_or(usize::MAX);
                start..start.saturating_add(limit).min(len)
            }
            _ => 0..0,
        }
    }

    /// Keep only the items inside the window.
    pub fn slice<T>(&self, items: Vec<T>) -> Vec<T> {
        let window = self.window(items.len());
        items
            .into_iter()
            .skip(window.start)
            .take(window.end - window.start)
            .collect()
    }
}

// =============================================================================
// Tests
// =============================================================================
