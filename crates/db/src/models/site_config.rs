//! Site configuration model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use storefront_core::site_config::ResolvedSiteConfig;
use storefront_core::types::{DbId, Timestamp};

/// A row from the `site_configs` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SiteConfig {
    pub id: DbId,
    pub site_name: String,
    pub site_email: String,
    pub currency: String,
    pub currency_symbol: String,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl SiteConfig {
    pub fn resolved(&self) -> ResolvedSiteConfig {
        ResolvedSiteConfig {
            site_name: self.site_name.clone(),
            site_email: self.site_email.clone(),
            currency: self.currency.clone(),
            currency_symbol: self.currency_symbol.clone(),
        }
    }
}

/// Full set of values written by [`SiteConfigRepo::create`] and
/// [`SiteConfigRepo::save`].
///
/// [`SiteConfigRepo::create`]: crate::repositories::SiteConfigRepo::create
/// [`SiteConfigRepo::save`]: crate::repositories::SiteConfigRepo::save
#[derive(Debug, Clone)]
pub struct SaveSiteConfig {
    pub values: ResolvedSiteConfig,
    pub is_active: bool,
}

/// DTO for updating the active configuration. All fields are optional.
///
/// When `currency` changes and `currency_symbol` is omitted, the symbol is
/// resolved from the currency table.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateSiteConfig {
    pub site_name: Option<String>,
    pub site_email: Option<String>,
    pub currency: Option<String>,
    pub currency_symbol: Option<String>,
}
