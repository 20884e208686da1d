//! Repository for the `categories` table.

use sqlx::PgPool;
use storefront_core::catalog;
use storefront_core::error::CoreError;
use storefront_core::types::DbId;

use crate::error::{is_unique_violation, DbError};
use crate::models::category::{Category, CategoryWithCount, CreateCategory, UpdateCategory};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, name, category_type, display_order, is_active, created_at, updated_at";

/// Category columns plus the count of its published products.
const COUNTED_COLUMNS: &str = "c.id, c.name, c.category_type, c.display_order, c.is_active, \
     c.created_at, c.updated_at, \
     (SELECT COUNT(*) FROM products p \
      WHERE p.category_id = c.id AND p.status = 'published') AS product_count";

const UNIQUE_NAME_TYPE: &str = "uq_categories_name_type";

/// Provides CRUD operations for product categories.
pub struct CategoryRepo;

impl CategoryRepo {
    /// Insert a new category.
    ///
    /// A duplicate `(name, category_type)` pair is a validation error,
    /// checked before the write.
    pub async fn create(pool: &PgPool, input: &CreateCategory) -> Result<Category, DbError> {
        let name = input.name.trim();
        let category_type = input.category_type.trim();
        catalog::validate_category(name, category_type)?;
        Self::ensure_unique(pool, name, category_type, None).await?;

        let query = format!(
            "INSERT INTO categories (name, category_type, display_order, is_active)
             VALUES ($1, $2, COALESCE($3, 0), COALESCE($4, true))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(name)
            .bind(category_type)
            .bind(input.display_order)
            .bind(input.is_active)
            .fetch_one(pool)
            .await
            .map_err(|e| Self::map_duplicate(e, name, category_type))
    }

    /// Find a category by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Category>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM categories WHERE id = $1");
        sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a category by ID together with its published product count.
    pub async fn find_with_count(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<CategoryWithCount>, sqlx::Error> {
        let query = format!("SELECT {COUNTED_COLUMNS} FROM categories c WHERE c.id = $1");
        sqlx::query_as::<_, CategoryWithCount>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List categories ordered by `(display_order, name)` with product counts.
    pub async fn list(
        pool: &PgPool,
        active_only: bool,
    ) -> Result<Vec<CategoryWithCount>, sqlx::Error> {
        let query = format!(
            "SELECT {COUNTED_COLUMNS} FROM categories c
             WHERE ($1 = false OR c.is_active = true)
             ORDER BY c.display_order ASC, c.name ASC"
        );
        sqlx::query_as::<_, CategoryWithCount>(&query)
            .bind(active_only)
            .fetch_all(pool)
            .await
    }

    /// Most recently created categories.
    pub async fn recent(pool: &PgPool, limit: i64) -> Result<Vec<Category>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM categories ORDER BY created_at DESC, id DESC LIMIT $1");
        sqlx::query_as::<_, Category>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Distinct category types in use, alphabetically.
    pub async fn list_types(pool: &PgPool) -> Result<Vec<String>, sqlx::Error> {
        let rows: Vec<(String,)> =
            sqlx::query_as("SELECT DISTINCT category_type FROM categories ORDER BY category_type")
                .fetch_all(pool)
                .await?;
        Ok(rows.into_iter().map(|(t,)| t).collect())
    }

    /// Update a category. Only non-`None` fields in `input` are applied.
    ///
    /// The merged `(name, category_type)` pair must not collide with any
    /// other category. Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateCategory,
    ) -> Result<Option<Category>, DbError> {
        let Some(existing) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };
        let name = input.name.as_deref().map(str::trim).unwrap_or(&existing.name);
        let category_type = input
            .category_type
            .as_deref()
            .map(str::trim)
            .unwrap_or(&existing.category_type);
        catalog::validate_category(name, category_type)?;
        Self::ensure_unique(pool, name, category_type, Some(id)).await?;

        let query = format!(
            "UPDATE categories SET
                name = $2,
                category_type = $3,
                display_order = COALESCE($4, display_order),
                is_active = COALESCE($5, is_active)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .bind(name)
            .bind(category_type)
            .bind(input.display_order)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
            .map_err(|e| Self::map_duplicate(e, name, category_type))
    }

    /// Delete a category and, by cascade, all of its products.
    ///
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn ensure_unique(
        pool: &PgPool,
        name: &str,
        category_type: &str,
        exclude_id: Option<DbId>,
    ) -> Result<(), DbError> {
        let (exists,): (bool,) = sqlx::query_as(
            "SELECT EXISTS(
                SELECT 1 FROM categories
                WHERE name = $1 AND category_type = $2
                  AND ($3::BIGINT IS NULL OR id <> $3)
             )",
        )
        .bind(name)
        .bind(category_type)
        .bind(exclude_id)
        .fetch_one(pool)
        .await?;
        if exists {
            return Err(CoreError::Validation(catalog::duplicate_category_message(
                name,
                category_type,
            ))
            .into());
        }
        Ok(())
    }

    /// A concurrent insert can still trip the constraint after the check.
    fn map_duplicate(err: sqlx::Error, name: &str, category_type: &str) -> DbError {
        if is_unique_violation(&err, UNIQUE_NAME_TYPE) {
            CoreError::Validation(catalog::duplicate_category_message(name, category_type)).into()
        } else {
            err.into()
        }
    }
}
