//! Repository for the `products` table.
//!
//! Slugs are derived from the product name when not supplied and probed
//! linearly (`widget`, `widget-1`, `widget-2`, ...) against the slugs that
//! currently exist. A concurrent insert that wins the same candidate trips
//! `uq_products_slug`, and the probe is repeated.

use chrono::Utc;
use sqlx::{PgExecutor, PgPool};
use storefront_core::catalog::{self, ProductFields};
use storefront_core::error::CoreError;
use storefront_core::pagination::PageRequest;
use storefront_core::slug;
use storefront_core::status::ProductStatus;
use storefront_core::types::{DbId, Timestamp};

use crate::error::{is_unique_violation, DbError};
use crate::models::product::{
    CreateProduct, Product, ProductFilter, ProductListItem, UpdateProduct,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, slug, category_id, description, short_description, price, \
     discount_price, image, thumbnail, display_order, is_featured, status, specifications, \
     published_at, created_at, updated_at";

/// Columns of a public listing row (`p` = products, `c` = categories).
const LIST_COLUMNS: &str = "p.id, p.name, p.slug, p.category_id, c.name AS category, \
     c.category_type, p.short_description, p.price, p.discount_price, p.image, p.thumbnail, \
     p.specifications, p.is_featured, p.created_at";

/// Filter shared by the published listing and its count.
const PUBLISHED_FILTER: &str = "p.status = 'published' \
     AND ($1::TEXT IS NULL OR c.category_type = $1) \
     AND ($2 = false OR p.is_featured = true)";

const UNIQUE_SLUG: &str = "uq_products_slug";

/// Probes attempted before a slug race is treated as fatal.
const MAX_SLUG_ATTEMPTS: u32 = 5;

/// Provides CRUD and listing operations for products.
pub struct ProductRepo;

/// Fully merged values of a product write.
struct ProductValues<'a> {
    name: &'a str,
    category_id: DbId,
    description: &'a str,
    short_description: &'a str,
    price: rust_decimal::Decimal,
    discount_price: Option<rust_decimal::Decimal>,
    image: &'a str,
    thumbnail: Option<&'a str>,
    display_order: i32,
    is_featured: bool,
    status: ProductStatus,
    specifications: &'a serde_json::Value,
    published_at: Option<Timestamp>,
}

impl ProductRepo {
    /// Create a product.
    ///
    /// Without an explicit slug one is derived from the name and probed for
    /// the first free numeric suffix. An explicit slug that is already taken
    /// is a validation error. Creating a product as `published` stamps
    /// `published_at`.
    pub async fn create(pool: &PgPool, input: &CreateProduct) -> Result<Product, DbError> {
        let status = match input.status.as_deref() {
            Some(s) => ProductStatus::parse(s)?,
            None => ProductStatus::Draft,
        };
        let empty_specs = serde_json::json!({});
        let specifications = input.specifications.as_ref().unwrap_or(&empty_specs);
        catalog::validate_specifications(specifications)?;

        let values = ProductValues {
            name: input.name.trim(),
            category_id: input.category_id,
            description: input.description.trim(),
            short_description: input.short_description.trim(),
            price: input.price,
            discount_price: input.discount_price,
            image: input.image.trim(),
            thumbnail: input.thumbnail.as_deref().map(str::trim).filter(|t| !t.is_empty()),
            display_order: input.display_order.unwrap_or(0),
            is_featured: input.is_featured.unwrap_or(false),
            status,
            specifications,
            published_at: catalog::resolve_published_at(status, None, Utc::now()),
        };
        Self::validate(&values)?;
        Self::ensure_category_exists(pool, values.category_id).await?;

        if let Some(explicit) = input.slug.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            slug::validate_slug(explicit)?;
            if Self::slug_taken(pool, explicit, None).await? {
                return Err(Self::slug_in_use(explicit).into());
            }
            return Self::insert(pool, explicit, &values).await.map_err(|e| {
                if is_unique_violation(&e, UNIQUE_SLUG) {
                    Self::slug_in_use(explicit).into()
                } else {
                    e.into()
                }
            });
        }

        let base = slug::slugify(values.name);
        for attempt in 1..=MAX_SLUG_ATTEMPTS {
            let taken = Self::slugs_with_base(pool, &base).await?;
            let candidate = slug::next_free_slug(&base, &taken);
            match Self::insert(pool, &candidate, &values).await {
                Ok(product) => return Ok(product),
                Err(e) if is_unique_violation(&e, UNIQUE_SLUG) => {
                    tracing::debug!(slug = %candidate, attempt, "Slug taken concurrently, re-probing");
                }
                Err(e) => return Err(e.into()),
            }
        }
        Err(CoreError::Internal(format!(
            "could not allocate a unique slug for '{base}' after {MAX_SLUG_ATTEMPTS} attempts"
        ))
        .into())
    }

    /// Find a product by its internal ID, in any status.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Product>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM products WHERE id = $1");
        sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a published product by ID.
    pub async fn find_published_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<Product>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM products WHERE id = $1 AND status = 'published'");
        sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a published product by slug.
    pub async fn find_published_by_slug(
        pool: &PgPool,
        slug: &str,
    ) -> Result<Option<Product>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM products WHERE slug = $1 AND status = 'published'");
        sqlx::query_as::<_, Product>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// List every product in any status, newest first.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Product>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM products ORDER BY created_at DESC, id DESC");
        sqlx::query_as::<_, Product>(&query).fetch_all(pool).await
    }

    /// Most recently created products in any status.
    pub async fn recent(pool: &PgPool, limit: i64) -> Result<Vec<Product>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM products ORDER BY created_at DESC, id DESC LIMIT $1");
        sqlx::query_as::<_, Product>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// One page of published products ordered by display order, newest first.
    pub async fn list_published(
        pool: &PgPool,
        filter: &ProductFilter,
        page: PageRequest,
    ) -> Result<Vec<ProductListItem>, sqlx::Error> {
        let query = format!(
            "SELECT {LIST_COLUMNS} FROM products p
             JOIN categories c ON c.id = p.category_id
             WHERE {PUBLISHED_FILTER}
             ORDER BY p.display_order ASC, p.created_at DESC, p.id DESC
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, ProductListItem>(&query)
            .bind(&filter.category_type)
            .bind(filter.featured_only)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(pool)
            .await
    }

    /// Count published products matching `filter`.
    pub async fn count_published(
        pool: &PgPool,
        filter: &ProductFilter,
    ) -> Result<i64, sqlx::Error> {
        let query = format!(
            "SELECT COUNT(*) FROM products p
             JOIN categories c ON c.id = p.category_id
             WHERE {PUBLISHED_FILTER}"
        );
        let (count,): (i64,) = sqlx::query_as(&query)
            .bind(&filter.category_type)
            .bind(filter.featured_only)
            .fetch_one(pool)
            .await?;
        Ok(count)
    }

    /// Other published products of the same category.
    pub async fn related(
        pool: &PgPool,
        product: &Product,
    ) -> Result<Vec<ProductListItem>, sqlx::Error> {
        let query = format!(
            "SELECT {LIST_COLUMNS} FROM products p
             JOIN categories c ON c.id = p.category_id
             WHERE p.status = 'published' AND p.category_id = $1 AND p.id <> $2
             ORDER BY p.display_order ASC, p.created_at DESC
             LIMIT $3"
        );
        sqlx::query_as::<_, ProductListItem>(&query)
            .bind(product.category_id)
            .bind(product.id)
            .bind(catalog::RELATED_PRODUCTS_LIMIT)
            .fetch_all(pool)
            .await
    }

    /// Update a product. Only fields present in `input` change.
    ///
    /// Entering `published` stamps `published_at` if it is unset; leaving
    /// `published` clears it. An empty `slug` re-derives one from the name.
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProduct,
    ) -> Result<Option<Product>, DbError> {
        let mut tx = pool.begin().await?;
        let query = format!("SELECT {COLUMNS} FROM products WHERE id = $1 FOR UPDATE");
        let Some(existing) = sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };

        let status = match input.status.as_deref() {
            Some(s) => ProductStatus::parse(s)?,
            None => existing.product_status()?,
        };
        let specifications = input
            .specifications
            .as_ref()
            .unwrap_or(&existing.specifications);
        catalog::validate_specifications(specifications)?;

        let values = ProductValues {
            name: input.name.as_deref().map(str::trim).unwrap_or(&existing.name),
            category_id: input.category_id.unwrap_or(existing.category_id),
            description: input
                .description
                .as_deref()
                .map(str::trim)
                .unwrap_or(&existing.description),
            short_description: input
                .short_description
                .as_deref()
                .map(str::trim)
                .unwrap_or(&existing.short_description),
            price: input.price.unwrap_or(existing.price),
            discount_price: input.discount_price.unwrap_or(existing.discount_price),
            image: input.image.as_deref().map(str::trim).unwrap_or(&existing.image),
            thumbnail: match &input.thumbnail {
                Some(t) => t.as_deref().map(str::trim).filter(|t| !t.is_empty()),
                None => existing.thumbnail.as_deref(),
            },
            display_order: input.display_order.unwrap_or(existing.display_order),
            is_featured: input.is_featured.unwrap_or(existing.is_featured),
            status,
            specifications,
            published_at: catalog::resolve_published_at(
                status,
                existing.published_at,
                Utc::now(),
            ),
        };
        Self::validate(&values)?;
        if values.category_id != existing.category_id {
            Self::ensure_category_exists(&mut *tx, values.category_id).await?;
        }

        let new_slug = match input.slug.as_deref().map(str::trim) {
            None => existing.slug.clone(),
            Some(s) if s == existing.slug => existing.slug.clone(),
            Some("") => {
                let base = slug::slugify(values.name);
                let taken = Self::slugs_with_base(&mut *tx, &base).await?;
                let taken: Vec<&str> = taken
                    .iter()
                    .map(String::as_str)
                    .filter(|s| *s != existing.slug)
                    .collect();
                slug::next_free_slug(&base, &taken)
            }
            Some(explicit) => {
                slug::validate_slug(explicit)?;
                if Self::slug_taken(&mut *tx, explicit, Some(id)).await? {
                    return Err(Self::slug_in_use(explicit).into());
                }
                explicit.to_string()
            }
        };

        let query = format!(
            "UPDATE products SET
                name = $2,
                slug = $3,
                category_id = $4,
                description = $5,
                short_description = $6,
                price = $7,
                discount_price = $8,
                image = $9,
                thumbnail = $10,
                display_order = $11,
                is_featured = $12,
                status = $13,
                specifications = $14,
                published_at = $15
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let updated = sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .bind(values.name)
            .bind(&new_slug)
            .bind(values.category_id)
            .bind(values.description)
            .bind(values.short_description)
            .bind(values.price)
            .bind(values.discount_price)
            .bind(values.image)
            .bind(values.thumbnail)
            .bind(values.display_order)
            .bind(values.is_featured)
            .bind(values.status.as_str())
            .bind(values.specifications)
            .bind(values.published_at)
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| -> DbError {
                if is_unique_violation(&e, UNIQUE_SLUG) {
                    Self::slug_in_use(&new_slug).into()
                } else {
                    e.into()
                }
            })?;
        tx.commit().await?;
        Ok(updated)
    }

    /// Delete a product and, by cascade, its gallery images.
    ///
    /// Fails with a foreign-key violation while order lines reference it.
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    fn validate(values: &ProductValues<'_>) -> Result<(), CoreError> {
        catalog::validate_product(&ProductFields {
            name: values.name,
            description: values.description,
            short_description: values.short_description,
            image: values.image,
            price: values.price,
            discount_price: values.discount_price,
        })
    }

    async fn insert(
        pool: &PgPool,
        slug: &str,
        values: &ProductValues<'_>,
    ) -> Result<Product, sqlx::Error> {
        let query = format!(
            "INSERT INTO products
                (name, slug, category_id, description, short_description, price,
                 discount_price, image, thumbnail, display_order, is_featured, status,
                 specifications, published_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(values.name)
            .bind(slug)
            .bind(values.category_id)
            .bind(values.description)
            .bind(values.short_description)
            .bind(values.price)
            .bind(values.discount_price)
            .bind(values.image)
            .bind(values.thumbnail)
            .bind(values.display_order)
            .bind(values.is_featured)
            .bind(values.status.as_str())
            .bind(values.specifications)
            .bind(values.published_at)
            .fetch_one(pool)
            .await
    }

    /// Existing slugs that could collide with probes of `base`.
    ///
    /// Slugs hold only `[a-z0-9-]`, so the prefix carries no LIKE wildcards.
    async fn slugs_with_base<'e, E: PgExecutor<'e>>(
        executor: E,
        base: &str,
    ) -> Result<Vec<String>, sqlx::Error> {
        let rows: Vec<(String,)> =
            sqlx::query_as("SELECT slug FROM products WHERE slug LIKE $1 || '%'")
                .bind(slug::probe_prefix(base))
                .fetch_all(executor)
                .await?;
        Ok(rows.into_iter().map(|(s,)| s).collect())
    }

    async fn slug_taken<'e, E: PgExecutor<'e>>(
        executor: E,
        slug: &str,
        exclude_id: Option<DbId>,
    ) -> Result<bool, sqlx::Error> {
        let (exists,): (bool,) = sqlx::query_as(
            "SELECT EXISTS(
                SELECT 1 FROM products WHERE slug = $1 AND ($2::BIGINT IS NULL OR id <> $2)
             )",
        )
        .bind(slug)
        .bind(exclude_id)
        .fetch_one(executor)
        .await?;
        Ok(exists)
    }

    async fn ensure_category_exists<'e, E: PgExecutor<'e>>(
        executor: E,
        category_id: DbId,
    ) -> Result<(), DbError> {
        let (exists,): (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM categories WHERE id = $1)")
                .bind(category_id)
                .fetch_one(executor)
                .await?;
        if !exists {
            return Err(CoreError::Validation(format!(
                "category_id: category {category_id} does not exist"
            ))
            .into());
        }
        Ok(())
    }

    fn slug_in_use(slug: &str) -> CoreError {
        CoreError::Validation(format!("slug: '{slug}' is already in use"))
    }
}
