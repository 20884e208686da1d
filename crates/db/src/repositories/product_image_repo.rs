//! Repository for the `product_images` table.

use sqlx::PgPool;
use storefront_core::catalog;
use storefront_core::types::DbId;

use crate::error::DbError;
use crate::models::product_image::{CreateProductImage, ProductImage};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, product_id, image, alt_text, display_order, created_at, updated_at";

/// Provides gallery operations for product images.
pub struct ProductImageRepo;

impl ProductImageRepo {
    /// Add an image to a product's gallery.
    pub async fn create(
        pool: &PgPool,
        product_id: DbId,
        input: &CreateProductImage,
    ) -> Result<ProductImage, DbError> {
        let image = input.image.trim();
        let alt_text = input.alt_text.as_deref().map(str::trim).unwrap_or_default();
        catalog::validate_image(image, Some(alt_text))?;

        let query = format!(
            "INSERT INTO product_images (product_id, image, alt_text, display_order)
             VALUES ($1, $2, $3, COALESCE($4, 0))
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, ProductImage>(&query)
            .bind(product_id)
            .bind(image)
            .bind(alt_text)
            .bind(input.display_order)
            .fetch_one(pool)
            .await?;
        Ok(row)
    }

    /// List a product's images ordered by display order.
    pub async fn list_for_product(
        pool: &PgPool,
        product_id: DbId,
    ) -> Result<Vec<ProductImage>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM product_images
             WHERE product_id = $1
             ORDER BY display_order ASC, id ASC"
        );
        sqlx::query_as::<_, ProductImage>(&query)
            .bind(product_id)
            .fetch_all(pool)
            .await
    }

    /// Delete one image of a product. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, product_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM product_images WHERE id = $1 AND product_id = $2")
            .bind(id)
            .bind(product_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Count a product's images.
    pub async fn count_for_product(pool: &PgPool, product_id: DbId) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM product_images WHERE product_id = $1")
                .bind(product_id)
                .fetch_one(pool)
                .await?;
        Ok(count)
    }
}
