//! Field-level input validation shared by every write path.
//!
//! Every error names the offending field as `field: reason` so callers can
//! surface it unchanged.

use rust_decimal::Decimal;
use validator::{ValidateEmail, ValidateUrl};

use crate::error::CoreError;

/// Maximum length of a person's name on public forms.
pub const MAX_NAME_LENGTH: usize = 200;

/// Maximum length of a phone number.
pub const MAX_PHONE_LENGTH: usize = 20;

/// Require a value that is non-empty after trimming.
pub fn require_non_empty(field: &str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("{field}: is required")));
    }
    Ok(())
}

/// Require an optional submitted value to be present and non-empty.
///
/// Returns the trimmed value.
pub fn required<'a>(field: &str, value: Option<&'a str>) -> Result<&'a str, CoreError> {
    let value = value.map(str::trim).unwrap_or_default();
    require_non_empty(field, value)?;
    Ok(value)
}

/// Reject values longer than `max` characters.
pub fn require_max_length(field: &str, value: &str, max: usize) -> Result<(), CoreError> {
    if value.chars().count() > max {
        return Err(CoreError::Validation(format!(
            "{field}: must be at most {max} characters"
        )));
    }
    Ok(())
}

/// Require a syntactically valid email address.
pub fn validate_email_field(field: &str, value: &str) -> Result<(), CoreError> {
    require_non_empty(field, value)?;
    if !value.validate_email() {
        return Err(CoreError::Validation(format!(
            "{field}: must be a valid email address"
        )));
    }
    Ok(())
}

/// Require an absolute `http` or `https` URL.
pub fn validate_http_url(field: &str, value: &str) -> Result<(), CoreError> {
    require_non_empty(field, value)?;
    let has_scheme = value.starts_with("http://") || value.starts_with("https://");
    if !has_scheme || !value.validate_url() {
        return Err(CoreError::Validation(format!(
            "{field}: must be an absolute http(s) URL"
        )));
    }
    Ok(())
}

/// Require a non-negative monetary amount with at most two decimal places
/// that fits `NUMERIC(10,2)`.
pub fn validate_money(field: &str, value: Decimal) -> Result<(), CoreError> {
    if value.is_sign_negative() {
        return Err(CoreError::Validation(format!(
            "{field}: must not be negative"
        )));
    }
    if value.normalize().scale() > 2 {
        return Err(CoreError::Validation(format!(
            "{field}: must have at most 2 decimal places"
        )));
    }
    if value >= Decimal::new(100_000_000, 0) {
        return Err(CoreError::Validation(format!(
            "{field}: must be less than 100000000"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn whitespace_only_is_missing() {
        let err = require_non_empty("full_name", "   ").unwrap_err();
        assert_matches!(err, CoreError::Validation(ref msg) if msg == "full_name: is required");
    }

    #[test]
    fn required_trims_and_rejects_absent() {
        assert_eq!(required("name", Some("  Ann ")).unwrap(), "Ann");
        assert!(required("name", None).is_err());
    }

    #[test]
    fn max_length_counts_characters() {
        assert!(require_max_length("name", "ééé", 3).is_ok());
        assert!(require_max_length("name", "éééé", 3).is_err());
    }

    #[test]
    fn email_is_checked() {
        assert!(validate_email_field("email", "ann@example.com").is_ok());
        let err = validate_email_field("email", "not-an-email").unwrap_err();
        assert!(err.to_string().contains("email:"));
    }

    #[test]
    fn url_requires_http_scheme() {
        assert!(validate_http_url("url", "https://example.com/app.apk").is_ok());
        assert!(validate_http_url("url", "ftp://example.com").is_err());
        assert!(validate_http_url("url", "example.com").is_err());
    }

    #[test]
    fn money_bounds() {
        assert!(validate_money("price", Decimal::from_str("100.00").unwrap()).is_ok());
        assert!(validate_money("price", Decimal::from_str("-1").unwrap()).is_err());
        assert!(validate_money("price", Decimal::from_str("1.005").unwrap()).is_err());
        assert!(validate_money("price", Decimal::from_str("100000000").unwrap()).is_err());
    }
}
