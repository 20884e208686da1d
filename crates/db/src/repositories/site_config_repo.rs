//! Repository for the `site_configs` table.
//!
//! At most one row is active at a time. Every write that may activate a row
//! takes a transaction-scoped advisory lock and deactivates all other rows
//! before persisting, so concurrent writers cannot leave two active rows.

use sqlx::{PgPool, Postgres, Transaction};
use storefront_core::currency::{DEFAULT_CURRENCY_CODE, DEFAULT_CURRENCY_SYMBOL};
use storefront_core::site_config::{
    self, ResolvedSiteConfig, DEFAULT_SITE_EMAIL, DEFAULT_SITE_NAME,
};
use storefront_core::types::DbId;

use crate::error::DbError;
use crate::models::site_config::{SaveSiteConfig, SiteConfig, UpdateSiteConfig};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, site_name, site_email, currency, currency_symbol, is_active, created_at, updated_at";

/// Advisory lock key serialising writes to the active configuration.
const ACTIVE_CONFIG_LOCK: i64 = 0x5354_4346;

/// Provides access to the single active site configuration.
pub struct SiteConfigRepo;

impl SiteConfigRepo {
    /// Default values for a freshly created configuration.
    pub fn defaults() -> ResolvedSiteConfig {
        ResolvedSiteConfig {
            site_name: DEFAULT_SITE_NAME.to_string(),
            site_email: DEFAULT_SITE_EMAIL.to_string(),
            currency: DEFAULT_CURRENCY_CODE.to_string(),
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
        }
    }

    /// Find the active configuration without creating one.
    pub async fn find_active(pool: &PgPool) -> Result<Option<SiteConfig>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM site_configs WHERE is_active = true \
             ORDER BY updated_at DESC, id DESC LIMIT 1"
        );
        sqlx::query_as::<_, SiteConfig>(&query)
            .fetch_optional(pool)
            .await
    }

    /// Return the active configuration, creating the default one if none exists.
    pub async fn get_active(pool: &PgPool) -> Result<SiteConfig, sqlx::Error> {
        if let Some(config) = Self::find_active(pool).await? {
            return Ok(config);
        }
        let mut tx = pool.begin().await?;
        let config = Self::get_or_create_active_tx(&mut tx).await?;
        tx.commit().await?;
        Ok(config)
    }

    /// Find a configuration row by ID, active or not.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<SiteConfig>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM site_configs WHERE id = $1");
        sqlx::query_as::<_, SiteConfig>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Insert a new configuration. If it is active, all others are deactivated first.
    pub async fn create(pool: &PgPool, input: &SaveSiteConfig) -> Result<SiteConfig, sqlx::Error> {
        let mut tx = pool.begin().await?;
        Self::lock(&mut tx).await?;
        if input.is_active {
            Self::deactivate_others(&mut tx, None).await?;
        }
        let query = format!(
            "INSERT INTO site_configs (site_name, site_email, currency, currency_symbol, is_active)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        let config = sqlx::query_as::<_, SiteConfig>(&query)
            .bind(&input.values.site_name)
            .bind(&input.values.site_email)
            .bind(&input.values.currency)
            .bind(&input.values.currency_symbol)
            .bind(input.is_active)
            .fetch_one(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(config)
    }

    /// Overwrite an existing configuration row.
    ///
    /// If the row is saved as active, every other row is deactivated in the
    /// same transaction. Returns `None` if no row with the given `id` exists.
    pub async fn save(
        pool: &PgPool,
        id: DbId,
        input: &SaveSiteConfig,
    ) -> Result<Option<SiteConfig>, sqlx::Error> {
        let mut tx = pool.begin().await?;
        Self::lock(&mut tx).await?;
        if input.is_active {
            Self::deactivate_others(&mut tx, Some(id)).await?;
        }
        let config = Self::write_tx(&mut tx, id, &input.values, input.is_active).await?;
        if config.is_none() {
            tx.rollback().await?;
            return Ok(None);
        }
        tx.commit().await?;
        Ok(config)
    }

    /// Apply a partial update to the active configuration, creating the
    /// default first if none exists.
    ///
    /// The currency symbol is re-resolved from the currency table unless
    /// the caller supplies one.
    pub async fn update_active(
        pool: &PgPool,
        input: &UpdateSiteConfig,
    ) -> Result<SiteConfig, DbError> {
        let mut tx = pool.begin().await?;
        let current = Self::get_or_create_active_tx(&mut tx).await?;
        let values = site_config::resolve_update(
            &current.resolved(),
            input.site_name.as_deref(),
            input.site_email.as_deref(),
            input.currency.as_deref(),
            input.currency_symbol.as_deref(),
        )?;
        Self::deactivate_others(&mut tx, Some(current.id)).await?;
        let updated = Self::write_tx(&mut tx, current.id, &values, true)
            .await?
            .ok_or(sqlx::Error::RowNotFound)?;
        tx.commit().await?;
        Ok(updated)
    }

    /// Count active rows. Always 0 or 1 after any write through this repository.
    pub async fn count_active(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM site_configs WHERE is_active = true")
                .fetch_one(pool)
                .await?;
        Ok(count)
    }

    async fn lock(tx: &mut Transaction<'_, Postgres>) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT pg_advisory_xact_lock($1)")
            .bind(ACTIVE_CONFIG_LOCK)
            .execute(&mut **tx)
            .await?;
        Ok(())
    }

    /// Lock, then return the active row or insert the default one.
    async fn get_or_create_active_tx(
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<SiteConfig, sqlx::Error> {
        Self::lock(tx).await?;
        let query = format!(
            "SELECT {COLUMNS} FROM site_configs WHERE is_active = true \
             ORDER BY updated_at DESC, id DESC LIMIT 1"
        );
        if let Some(config) = sqlx::query_as::<_, SiteConfig>(&query)
            .fetch_optional(&mut **tx)
            .await?
        {
            return Ok(config);
        }

        let defaults = Self::defaults();
        let insert = format!(
            "INSERT INTO site_configs (site_name, site_email, currency, currency_symbol, is_active)
             VALUES ($1, $2, $3, $4, true)
             RETURNING {COLUMNS}"
        );
        let config = sqlx::query_as::<_, SiteConfig>(&insert)
            .bind(&defaults.site_name)
            .bind(&defaults.site_email)
            .bind(&defaults.currency)
            .bind(&defaults.currency_symbol)
            .fetch_one(&mut **tx)
            .await?;
        tracing::info!(config_id = config.id, "Created default site configuration");
        Ok(config)
    }

    async fn deactivate_others(
        tx: &mut Transaction<'_, Postgres>,
        keep: Option<DbId>,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE site_configs SET is_active = false
             WHERE is_active = true AND ($1::BIGINT IS NULL OR id <> $1)",
        )
        .bind(keep)
        .execute(&mut **tx)
        .await?;
        Ok(result.rows_affected())
    }

    async fn write_tx(
        tx: &mut Transaction<'_, Postgres>,
        id: DbId,
        values: &ResolvedSiteConfig,
        is_active: bool,
    ) -> Result<Option<SiteConfig>, sqlx::Error> {
        let query = format!(
            "UPDATE site_configs SET
                site_name = $2,
                site_email = $3,
                currency = $4,
                currency_symbol = $5,
                is_active = $6
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SiteConfig>(&query)
            .bind(id)
            .bind(&values.site_name)
            .bind(&values.site_email)
            .bind(&values.currency)
            .bind(&values.currency_symbol)
            .bind(is_active)
            .fetch_optional(&mut **tx)
            .await
    }
}
