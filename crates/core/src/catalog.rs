//! Catalog rules: effective price, publish timestamps, and field checks for
//! products, categories, and gallery images.

use crate::error::CoreError;
use crate::status::ProductStatus;
use crate::types::{Money, Timestamp};
use crate::validation::{require_max_length, require_non_empty, validate_money};

pub const MAX_PRODUCT_NAME_LENGTH: usize = 200;
pub const MAX_SHORT_DESCRIPTION_LENGTH: usize = 300;
pub const MAX_CATEGORY_NAME_LENGTH: usize = 100;
pub const MAX_CATEGORY_TYPE_LENGTH: usize = 100;
pub const MAX_ALT_TEXT_LENGTH: usize = 200;

/// Number of related products shown next to a product detail.
pub const RELATED_PRODUCTS_LIMIT: i64 = 4;

// ---------------------------------------------------------------------------
// Pricing
// ---------------------------------------------------------------------------

/// The price a customer pays: the discount price when set, else the base price.
pub fn current_price(price: Money, discount_price: Option<Money>) -> Money {
    discount_price.unwrap_or(price)
}

pub fn has_discount(discount_price: Option<Money>) -> bool {
    discount_price.is_some()
}

// ---------------------------------------------------------------------------
// Publishing
// ---------------------------------------------------------------------------

/// Compute `published_at` after a write with the given status.
///
/// Entering `published` stamps `now` unless a timestamp already exists.
/// Any other status clears it, so a later republish stamps again.
pub fn resolve_published_at(
    status: ProductStatus,
    current: Option<Timestamp>,
    now: Timestamp,
) -> Option<Timestamp> {
    match status {
        ProductStatus::Published => Some(current.unwrap_or(now)),
        ProductStatus::Draft | ProductStatus::Archived => None,
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Product fields every create or update must satisfy once merged.
pub struct ProductFields<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub short_description: &'a str,
    pub image: &'a str,
    pub price: Money,
    pub discount_price: Option<Money>,
}

pub fn validate_product(fields: &ProductFields<'_>) -> Result<(), CoreError> {
    require_non_empty("name", fields.name)?;
    require_max_length("name", fields.name, MAX_PRODUCT_NAME_LENGTH)?;
    require_non_empty("description", fields.description)?;
    require_non_empty("short_description", fields.short_description)?;
    require_max_length(
        "short_description",
        fields.short_description,
        MAX_SHORT_DESCRIPTION_LENGTH,
    )?;
    require_non_empty("image", fields.image)?;
    validate_money("price", fields.price)?;
    if let Some(discount) = fields.discount_price {
        validate_money("discount_price", discount)?;
    }
    Ok(())
}

/// Specifications must be a JSON object (string keys, arbitrary values).
pub fn validate_specifications(value: &serde_json::Value) -> Result<(), CoreError> {
    if !value.is_object() {
        return Err(CoreError::Validation(
            "specifications: must be a JSON object".into(),
        ));
    }
    Ok(())
}

pub fn validate_category(name: &str, category_type: &str) -> Result<(), CoreError> {
    require_non_empty("name", name)?;
    require_max_length("name", name, MAX_CATEGORY_NAME_LENGTH)?;
    require_non_empty("category_type", category_type)?;
    require_max_length("category_type", category_type, MAX_CATEGORY_TYPE_LENGTH)?;
    Ok(())
}

pub fn validate_image(image: &str, alt_text: Option<&str>) -> Result<(), CoreError> {
    require_non_empty("image", image)?;
    if let Some(alt) = alt_text {
        require_max_length("alt_text", alt, MAX_ALT_TEXT_LENGTH)?;
    }
    Ok(())
}

/// The message reported when a `(name, category_type)` pair already exists.
pub fn duplicate_category_message(name: &str, category_type: &str) -> String {
    format!("name: a category named '{name}' already exists for type '{category_type}'")
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use chrono::{Duration, Utc};

    use super::*;

    fn money(s: &str) -> Money {
        Money::from_str(s).unwrap()
    }

    #[test]
    fn current_price_prefers_discount() {
        assert_eq!(current_price(money("100.00"), None), money("100.00"));
        assert_eq!(
            current_price(money("100.00"), Some(money("79.99"))),
            money("79.99")
        );
        assert!(has_discount(Some(money("79.99"))));
        assert!(!has_discount(None));
    }

    #[test]
    fn publishing_stamps_once() {
        let first = Utc::now() - Duration::hours(2);
        let later = Utc::now();

        let stamped = resolve_published_at(ProductStatus::Published, None, first);
        assert_eq!(stamped, Some(first));

        // Re-saving while still published keeps the original stamp.
        let kept = resolve_published_at(ProductStatus::Published, stamped, later);
        assert_eq!(kept, Some(first));
    }

    #[test]
    fn leaving_published_clears_and_republish_restamps() {
        let first = Utc::now() - Duration::hours(2);
        let later = Utc::now();

        let archived = resolve_published_at(ProductStatus::Archived, Some(first), later);
        assert_eq!(archived, None);

        let republished = resolve_published_at(ProductStatus::Published, archived, later);
        assert_eq!(republished, Some(later));
    }

    #[test]
    fn draft_never_has_timestamp() {
        assert_eq!(
            resolve_published_at(ProductStatus::Draft, None, Utc::now()),
            None
        );
    }

    #[test]
    fn product_validation_names_field() {
        let fields = ProductFields {
            name: "Widget",
            description: "A widget",
            short_description: "",
            image: "products/widget.png",
            price: money("10.00"),
            discount_price: None,
        };
        let err = validate_product(&fields).unwrap_err();
        assert!(err.to_string().contains("short_description"));
    }

    #[test]
    fn negative_discount_is_rejected() {
        let fields = ProductFields {
            name: "Widget",
            description: "A widget",
            short_description: "Widget",
            image: "products/widget.png",
            price: money("10.00"),
            discount_price: Some(money("-1.00")),
        };
        let err = validate_product(&fields).unwrap_err();
        assert!(err.to_string().contains("discount_price"));
    }

    #[test]
    fn specifications_must_be_object() {
        assert!(validate_specifications(&serde_json::json!({"ram": "8GB"})).is_ok());
        assert!(validate_specifications(&serde_json::json!(["ram"])).is_err());
    }

    #[test]
    fn category_requires_type() {
        let err = validate_category("Software", " ").unwrap_err();
        assert!(err.to_string().contains("category_type"));
    }
}
