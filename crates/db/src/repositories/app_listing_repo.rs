//! Repository for the `app_listings` table.

use sqlx::PgPool;
use storefront_core::types::DbId;
use storefront_core::validation::{require_max_length, required, validate_http_url};

use crate::error::DbError;
use crate::models::app_listing::{AppListing, CreateAppListing, UpdateAppListing};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, url, description, image, created_at, updated_at";

const MAX_APP_NAME_LENGTH: usize = 255;

/// Provides CRUD operations for the downloadable app showcase.
pub struct AppListingRepo;

impl AppListingRepo {
    /// Insert a new app listing. `name`, `url`, and `description` are required.
    pub async fn create(pool: &PgPool, input: &CreateAppListing) -> Result<AppListing, DbError> {
        let name = required("name", input.name.as_deref())?;
        require_max_length("name", name, MAX_APP_NAME_LENGTH)?;
        let url = required("url", input.url.as_deref())?;
        validate_http_url("url", url)?;
        let description = required("description", input.description.as_deref())?;
        let image = input.image.as_deref().map(str::trim).filter(|i| !i.is_empty());

        let query = format!(
            "INSERT INTO app_listings (name, url, description, image)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, AppListing>(&query)
            .bind(name)
            .bind(url)
            .bind(description)
            .bind(image)
            .fetch_one(pool)
            .await?;
        Ok(row)
    }

    /// Find an app listing by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<AppListing>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM app_listings WHERE id = $1");
        sqlx::query_as::<_, AppListing>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List app listings newest first, optionally filtered by a
    /// case-insensitive substring of the name.
    pub async fn list(pool: &PgPool, search: Option<&str>) -> Result<Vec<AppListing>, sqlx::Error> {
        let pattern = search
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| format!("%{}%", escape_like(s)));
        let query = format!(
            "SELECT {COLUMNS} FROM app_listings
             WHERE ($1::TEXT IS NULL OR name ILIKE $1)
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, AppListing>(&query)
            .bind(pattern)
            .fetch_all(pool)
            .await
    }

    /// Update an app listing. Only fields present in `input` change.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateAppListing,
    ) -> Result<Option<AppListing>, DbError> {
        let Some(existing) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };
        let name = input.name.as_deref().map(str::trim).unwrap_or(&existing.name);
        let url = input.url.as_deref().map(str::trim).unwrap_or(&existing.url);
        let description = input
            .description
            .as_deref()
            .map(str::trim)
            .unwrap_or(&existing.description);
        required("name", Some(name))?;
        require_max_length("name", name, MAX_APP_NAME_LENGTH)?;
        validate_http_url("url", url)?;
        required("description", Some(description))?;
        let image = match &input.image {
            Some(image) => image.as_deref().map(str::trim).filter(|i| !i.is_empty()),
            None => existing.image.as_deref(),
        };

        let query = format!(
            "UPDATE app_listings SET
                name = $2,
                url = $3,
                description = $4,
                image = $5
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, AppListing>(&query)
            .bind(id)
            .bind(name)
            .bind(url)
            .bind(description)
            .bind(image)
            .fetch_optional(pool)
            .await?;
        Ok(row)
    }

    /// Delete an app listing. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM app_listings WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

/// Escape `LIKE` wildcards so user input matches literally.
fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
