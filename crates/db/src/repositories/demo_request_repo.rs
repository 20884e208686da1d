//! Repository for the `demo_requests` table.

use chrono::Utc;
use sqlx::{PgPool, Postgres, Transaction};
use storefront_core::inquiry;
use storefront_core::status::DemoStatus;
use storefront_core::types::{DbId, Timestamp};
use storefront_core::validation::{
    require_max_length, required, validate_email_field, MAX_NAME_LENGTH, MAX_PHONE_LENGTH,
};

use crate::error::DbError;
use crate::models::demo_request::{CreateDemoRequest, DemoRequest, UpdateDemoStatus};

/// Demo request columns joined with the product name (`d` = demo_requests, `p` = products).
const COLUMNS: &str = "d.id, d.product_id, p.name AS product_name, d.full_name, d.email, \
     d.phone, d.company, d.message, d.interest_area, d.status, d.notes, d.requested_at, \
     d.contacted_at, d.updated_at";

const FROM: &str = "demo_requests d LEFT JOIN products p ON p.id = d.product_id";

/// Provides intake and follow-up operations for demo requests.
pub struct DemoRequestRepo;

impl DemoRequestRepo {
    /// Record a public demo request.
    ///
    /// `full_name` and `email` are required. The product link is kept only
    /// if the product exists and is published; otherwise it is dropped.
    pub async fn create(pool: &PgPool, input: &CreateDemoRequest) -> Result<DemoRequest, DbError> {
        let full_name = required("full_name", input.full_name.as_deref())?;
        require_max_length("full_name", full_name, MAX_NAME_LENGTH)?;
        let email = required("email", input.email.as_deref())?;
        validate_email_field("email", email)?;
        let phone = input.phone.as_deref().map(str::trim).unwrap_or_default();
        require_max_length("phone", phone, MAX_PHONE_LENGTH)?;
        let company = input.company.as_deref().map(str::trim).unwrap_or_default();
        require_max_length("company", company, MAX_NAME_LENGTH)?;
        let interest_area = input
            .interest_area
            .as_deref()
            .map(str::trim)
            .unwrap_or_default();
        require_max_length("interest_area", interest_area, 100)?;

        // The product row stays locked until the insert commits, so a
        // concurrent delete cannot break the foreign key.
        let mut tx = pool.begin().await?;
        let product_id = match input.product_id {
            Some(id) => Self::published_product(&mut tx, id).await?,
            None => None,
        };

        let (id,): (DbId,) = sqlx::query_as(
            "INSERT INTO demo_requests
                (product_id, full_name, email, phone, company, message, interest_area)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING id",
        )
        .bind(product_id)
        .bind(full_name)
        .bind(email)
        .bind(phone)
        .bind(company)
        .bind(input.message.as_deref().map(str::trim).unwrap_or_default())
        .bind(interest_area)
        .fetch_one(&mut *tx)
        .await?;
        tx.commit().await?;

        Self::find_by_id(pool, id)
            .await?
            .ok_or_else(|| sqlx::Error::RowNotFound.into())
    }

    /// Find a demo request by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<DemoRequest>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM {FROM} WHERE d.id = $1");
        sqlx::query_as::<_, DemoRequest>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List demo requests newest first, optionally filtered by status.
    pub async fn list(
        pool: &PgPool,
        status: Option<DemoStatus>,
    ) -> Result<Vec<DemoRequest>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM {FROM}
             WHERE ($1::TEXT IS NULL OR d.status = $1)
             ORDER BY d.requested_at DESC, d.id DESC"
        );
        sqlx::query_as::<_, DemoRequest>(&query)
            .bind(status.map(DemoStatus::as_str))
            .fetch_all(pool)
            .await
    }

    /// Most recent demo requests.
    pub async fn recent(pool: &PgPool, limit: i64) -> Result<Vec<DemoRequest>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM {FROM} ORDER BY d.requested_at DESC, d.id DESC LIMIT $1"
        );
        sqlx::query_as::<_, DemoRequest>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Count demo requests in the given status.
    pub async fn count_by_status(pool: &PgPool, status: DemoStatus) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM demo_requests WHERE status = $1")
                .bind(status.as_str())
                .fetch_one(pool)
                .await?;
        Ok(count)
    }

    /// Change a demo request's status and optionally its notes.
    ///
    /// `contacted_at` is stamped the first time the request becomes
    /// `contacted` and kept afterwards. Returns `None` if no row with the
    /// given `id` exists.
    pub async fn update_status(
        pool: &PgPool,
        id: DbId,
        input: &UpdateDemoStatus,
    ) -> Result<Option<DemoRequest>, DbError> {
        let status = DemoStatus::parse(&input.status)?;

        let mut tx = pool.begin().await?;
        let current: Option<(Option<Timestamp>,)> =
            sqlx::query_as("SELECT contacted_at FROM demo_requests WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
        let Some((contacted_at,)) = current else {
            return Ok(None);
        };

        sqlx::query(
            "UPDATE demo_requests SET
                status = $2,
                notes = COALESCE($3, notes),
                contacted_at = $4
             WHERE id = $1",
        )
        .bind(id)
        .bind(status.as_str())
        .bind(input.notes.as_deref())
        .bind(inquiry::resolve_contacted_at(status, contacted_at, Utc::now()))
        .execute(&mut *tx)
        .await?;
        tx.commit().await?;

        Ok(Self::find_by_id(pool, id).await?)
    }

    /// Delete a demo request. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM demo_requests WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// `product_id` if it names a published product, locked `FOR SHARE`.
    async fn published_product(
        tx: &mut Transaction<'_, Postgres>,
        product_id: DbId,
    ) -> Result<Option<DbId>, sqlx::Error> {
        let row: Option<(DbId,)> = sqlx::query_as(
            "SELECT id FROM products
             WHERE id = $1 AND status = 'published'
             FOR SHARE",
        )
        .bind(product_id)
        .fetch_optional(&mut **tx)
        .await?;
        Ok(row.map(|(id,)| id))
    }
}
