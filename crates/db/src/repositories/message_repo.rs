//! Repository for the `messages` table.
//!
//! Contact and portfolio submissions share one table; every operation takes
//! the [`MessageKind`] it applies to.

use sqlx::PgPool;
use storefront_core::status::MessageKind;
use storefront_core::types::DbId;
use storefront_core::validation::{
    require_max_length, required, validate_email_field, MAX_PHONE_LENGTH,
};

use crate::error::DbError;
use crate::models::message::{CreateMessage, Message};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, kind, name, email, phone, service, message, is_read, created_at, updated_at";

const MAX_SENDER_NAME_LENGTH: usize = 100;
const MAX_SERVICE_LENGTH: usize = 100;

/// Provides intake and inbox operations for inbound messages.
pub struct MessageRepo;

impl MessageRepo {
    /// Record a form submission. `name`, `email`, and `message` are required.
    pub async fn create(
        pool: &PgPool,
        kind: MessageKind,
        input: &CreateMessage,
    ) -> Result<Message, DbError> {
        let name = required("name", input.name.as_deref())?;
        require_max_length("name", name, MAX_SENDER_NAME_LENGTH)?;
        let email = required("email", input.email.as_deref())?;
        validate_email_field("email", email)?;
        let message = required("message", input.message.as_deref())?;
        let phone = input.phone.as_deref().map(str::trim).unwrap_or_default();
        require_max_length("phone", phone, MAX_PHONE_LENGTH)?;
        let service = input.service.as_deref().map(str::trim).unwrap_or_default();
        require_max_length("service", service, MAX_SERVICE_LENGTH)?;

        let query = format!(
            "INSERT INTO messages (kind, name, email, phone, service, message)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, Message>(&query)
            .bind(kind.as_str())
            .bind(name)
            .bind(email)
            .bind(phone)
            .bind(service)
            .bind(message)
            .fetch_one(pool)
            .await?;
        Ok(row)
    }

    /// Find a message of the given kind by ID.
    pub async fn find(
        pool: &PgPool,
        kind: MessageKind,
        id: DbId,
    ) -> Result<Option<Message>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM messages WHERE id = $1 AND kind = $2");
        sqlx::query_as::<_, Message>(&query)
            .bind(id)
            .bind(kind.as_str())
            .fetch_optional(pool)
            .await
    }

    /// List messages newest first, optionally restricted to one kind.
    pub async fn list(
        pool: &PgPool,
        kind: Option<MessageKind>,
        limit: i64,
    ) -> Result<Vec<Message>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM messages
             WHERE ($1::TEXT IS NULL OR kind = $1)
             ORDER BY created_at DESC, id DESC
             LIMIT $2"
        );
        sqlx::query_as::<_, Message>(&query)
            .bind(kind.map(MessageKind::as_str))
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Most recent unread messages of one kind.
    pub async fn recent_unread(
        pool: &PgPool,
        kind: MessageKind,
        limit: i64,
    ) -> Result<Vec<Message>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM messages
             WHERE kind = $1 AND is_read = false
             ORDER BY created_at DESC, id DESC
             LIMIT $2"
        );
        sqlx::query_as::<_, Message>(&query)
            .bind(kind.as_str())
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Count messages, optionally of one kind. Returns `(total, unread)`.
    pub async fn counts(
        pool: &PgPool,
        kind: Option<MessageKind>,
    ) -> Result<(i64, i64), sqlx::Error> {
        sqlx::query_as(
            "SELECT COUNT(*), COUNT(*) FILTER (WHERE is_read = false)
             FROM messages
             WHERE ($1::TEXT IS NULL OR kind = $1)",
        )
        .bind(kind.map(MessageKind::as_str))
        .fetch_one(pool)
        .await
    }

    /// Mark a message read. Returns `None` if no such message exists.
    pub async fn mark_read(
        pool: &PgPool,
        kind: MessageKind,
        id: DbId,
    ) -> Result<Option<Message>, sqlx::Error> {
        let query = format!(
            "UPDATE messages SET is_read = true
             WHERE id = $1 AND kind = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Message>(&query)
            .bind(id)
            .bind(kind.as_str())
            .fetch_optional(pool)
            .await
    }

    /// Delete one message. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, kind: MessageKind, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM messages WHERE id = $1 AND kind = $2")
            .bind(id)
            .bind(kind.as_str())
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete every message of one kind, or of all kinds when `kind` is
    /// `None`. Returns the number of rows removed.
    pub async fn clear(pool: &PgPool, kind: Option<MessageKind>) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM messages WHERE ($1::TEXT IS NULL OR kind = $1)")
            .bind(kind.map(MessageKind::as_str))
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
