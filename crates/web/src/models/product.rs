//! Catalog products owned by a business.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use bizsphere_core::{Price, ProductCategory, ProductId};

/// Stock at or below this level is flagged in the product table.
pub const LOW_STOCK_THRESHOLD: i64 = 10;

/// A product as returned by the API.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(alias = "_id")]
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub price: Price,
    #[serde(default)]
    pub stock: i64,
    #[serde(default)]
    pub category: ProductCategory,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub images: Vec<String>,
}

const fn default_active() -> bool {
    true
}

impl Product {
    #[must_use]
    pub const fn is_low_stock(&self) -> bool {
        self.stock <= LOW_STOCK_THRESHOLD
    }

    /// First image, used as the table thumbnail.
    #[must_use]
    pub fn thumbnail(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }
}

/// Body of product create and full update requests.
///
/// The price is sent as the owner typed it (after numeric coercion); the API
/// is responsible for rejecting values it does not accept.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPayload {
    pub name: String,
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub stock: i64,
    pub category: ProductCategory,
    pub images: Vec<String>,
}

/// Partial update that only flips the active flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductStatusUpdate {
    pub is_active: bool,
}
