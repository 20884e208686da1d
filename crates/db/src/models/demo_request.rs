//! Demo request model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use storefront_core::types::{DbId, Timestamp};

/// A row from the `demo_requests` table joined with the product name.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DemoRequest {
    pub id: DbId,
    pub product_id: Option<DbId>,
    pub product_name: Option<String>,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub company: String,
    pub message: String,
    pub interest_area: String,
    pub status: String,
    pub notes: String,
    pub requested_at: Timestamp,
    pub contacted_at: Option<Timestamp>,
    pub updated_at: Timestamp,
}

/// DTO for a public demo request submission.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateDemoRequest {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub message: Option<String>,
    pub interest_area: Option<String>,
    /// Linked only if the product exists and is published.
    pub product_id: Option<DbId>,
}

/// DTO for the admin status update.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateDemoStatus {
    pub status: String,
    /// Replaces the notes when present.
    pub notes: Option<String>,
}
