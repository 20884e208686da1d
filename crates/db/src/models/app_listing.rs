//! Downloadable app showcase model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use storefront_core::types::{DbId, Timestamp};

use crate::models::deserialize_some;

/// A row from the `app_listings` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AppListing {
    pub id: DbId,
    pub name: String,
    pub url: String,
    pub description: String,
    pub image: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating an app listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateAppListing {
    pub name: Option<String>,
    pub url: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
}

/// DTO for updating an app listing. `image` accepts `null` to clear it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateAppListing {
    pub name: Option<String>,
    pub url: Option<String>,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub image: Option<Option<String>>,
}
