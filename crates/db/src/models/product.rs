//! Product model and DTOs.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use storefront_core::catalog;
use storefront_core::error::CoreError;
use storefront_core::status::ProductStatus;
use storefront_core::types::{DbId, Timestamp};

use crate::models::deserialize_some;

/// A row from the `products` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Product {
    pub id: DbId,
    pub name: String,
    pub slug: String,
    pub category_id: DbId,
    pub description: String,
    pub short_description: String,
    pub price: Decimal,
    pub discount_price: Option<Decimal>,
    pub image: String,
    pub thumbnail: Option<String>,
    pub display_order: i32,
    pub is_featured: bool,
    pub status: String,
    pub specifications: serde_json::Value,
    pub published_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Product {
    pub fn current_price(&self) -> Decimal {
        catalog::current_price(self.price, self.discount_price)
    }

    pub fn has_discount(&self) -> bool {
        catalog::has_discount(self.discount_price)
    }

    pub fn product_status(&self) -> Result<ProductStatus, CoreError> {
        ProductStatus::parse(&self.status)
    }
}

/// A published product joined with its category, as shown in public listings.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProductListItem {
    pub id: DbId,
    pub name: String,
    pub slug: String,
    pub category_id: DbId,
    pub category: String,
    pub category_type: String,
    pub short_description: String,
    pub price: Decimal,
    pub discount_price: Option<Decimal>,
    pub image: String,
    pub thumbnail: Option<String>,
    pub specifications: serde_json::Value,
    pub is_featured: bool,
    pub created_at: Timestamp,
}

impl ProductListItem {
    pub fn current_price(&self) -> Decimal {
        catalog::current_price(self.price, self.discount_price)
    }

    pub fn has_discount(&self) -> bool {
        catalog::has_discount(self.discount_price)
    }
}

/// DTO for creating a new product.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProduct {
    pub name: String,
    /// Derived from `name` when omitted.
    pub slug: Option<String>,
    pub category_id: DbId,
    pub description: String,
    pub short_description: String,
    pub price: Decimal,
    pub discount_price: Option<Decimal>,
    pub image: String,
    pub thumbnail: Option<String>,
    pub display_order: Option<i32>,
    pub is_featured: Option<bool>,
    /// Defaults to `draft`.
    pub status: Option<String>,
    /// Defaults to `{}`.
    pub specifications: Option<serde_json::Value>,
}

/// DTO for updating a product. All fields are optional.
///
/// `discount_price` and `thumbnail` accept an explicit `null` to clear them.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProduct {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub category_id: Option<DbId>,
    pub description: Option<String>,
    pub short_description: Option<String>,
    pub price: Option<Decimal>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub discount_price: Option<Option<Decimal>>,
    pub image: Option<String>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub thumbnail: Option<Option<String>>,
    pub display_order: Option<i32>,
    pub is_featured: Option<bool>,
    pub status: Option<String>,
    pub specifications: Option<serde_json::Value>,
}

/// Filters for the public product listing.
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    pub category_type: Option<String>,
    pub featured_only: bool,
}

impl ProductFilter {
    pub fn is_unfiltered(&self) -> bool {
        self.category_type.is_none() && !self.featured_only
    }
}
