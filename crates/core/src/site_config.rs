//! Site configuration defaults and validation.

use crate::currency::{self, MAX_SYMBOL_LENGTH};
use crate::error::CoreError;
use crate::validation::{require_max_length, require_non_empty, validate_email_field};

pub const DEFAULT_SITE_NAME: &str = "DravTech Marketplace";
pub const DEFAULT_SITE_EMAIL: &str = "admin@dravtech.com";

/// Maximum length of a currency code (`site_configs.currency`).
pub const MAX_CURRENCY_CODE_LENGTH: usize = 10;

/// Maximum length of the site name.
pub const MAX_SITE_NAME_LENGTH: usize = 200;

/// Fully resolved values to write for the active configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSiteConfig {
    pub site_name: String,
    pub site_email: String,
    pub currency: String,
    pub currency_symbol: String,
}

/// Merge a partial update onto the current values.
///
/// Missing fields keep their current value. The currency symbol is always
/// re-resolved: an explicit symbol wins, otherwise the table entry for the
/// (possibly new) currency code, otherwise `$`.
pub fn resolve_update(
    current: &ResolvedSiteConfig,
    site_name: Option<&str>,
    site_email: Option<&str>,
    currency_code: Option<&str>,
    currency_symbol: Option<&str>,
) -> Result<ResolvedSiteConfig, CoreError> {
    let site_name = site_name.map(str::trim).unwrap_or(&current.site_name);
    require_non_empty("site_name", site_name)?;
    require_max_length("site_name", site_name, MAX_SITE_NAME_LENGTH)?;

    let site_email = site_email.map(str::trim).unwrap_or(&current.site_email);
    validate_email_field("site_email", site_email)?;

    let currency = currency_code
        .map(|c| c.trim().to_uppercase())
        .unwrap_or_else(|| current.currency.clone());
    require_non_empty("currency", &currency)?;
    require_max_length("currency", &currency, MAX_CURRENCY_CODE_LENGTH)?;

    let currency_symbol = currency::resolve_currency_symbol(&currency, currency_symbol);
    require_max_length("currency_symbol", &currency_symbol, MAX_SYMBOL_LENGTH)?;

    Ok(ResolvedSiteConfig {
        site_name: site_name.to_string(),
        site_email: site_email.to_string(),
        currency,
        currency_symbol,
    })
}
