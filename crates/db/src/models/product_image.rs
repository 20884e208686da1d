//! Product gallery image model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use storefront_core::types::{DbId, Timestamp};

/// A row from the `product_images` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProductImage {
    pub id: DbId,
    pub product_id: DbId,
    pub image: String,
    pub alt_text: String,
    pub display_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for adding an image to a product gallery.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProductImage {
    pub image: String,
    pub alt_text: Option<String>,
    pub display_order: Option<i32>,
}
