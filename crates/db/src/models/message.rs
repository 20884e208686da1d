//! Inbound contact and portfolio messages.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use storefront_core::inquiry;
use storefront_core::types::{DbId, Timestamp};

/// A row from the `messages` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Message {
    pub id: DbId,
    pub kind: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub service: String,
    pub message: String,
    pub is_read: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Message {
    pub fn preview(&self) -> String {
        inquiry::message_preview(&self.message)
    }
}

/// DTO for a public contact or portfolio form submission.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateMessage {
    pub name: Option<String>,
    pub email: Option<String>,
    pub message: Option<String>,
    pub phone: Option<String>,
    pub service: Option<String>,
}
