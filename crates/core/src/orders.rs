//! Order ledger rules: order numbers, line totals, and checkout field checks.

use uuid::Uuid;

use crate::error::CoreError;
use crate::types::Money;
use crate::validation::{
    require_max_length, require_non_empty, validate_email_field, validate_money, MAX_NAME_LENGTH,
    MAX_PHONE_LENGTH,
};

/// Prefix of every generated order number.
pub const ORDER_NUMBER_PREFIX: &str = "ORD-";

/// Hex characters of randomness in an order number (48 bits).
pub const ORDER_NUMBER_HEX_LENGTH: usize = 12;

/// Attempts at placing an order before a number collision is treated as fatal.
pub const MAX_ORDER_NUMBER_ATTEMPTS: u32 = 5;

/// Default quantity of a line item when none is supplied.
pub const DEFAULT_QUANTITY: i32 = 1;

/// Generate a fresh order number such as `ORD-3F9A0C12B7E4`.
///
/// Uniqueness is enforced by the `uq_orders_order_number` constraint; callers
/// retry with a new number on collision.
pub fn generate_order_number() -> String {
    let hex = Uuid::new_v4().simple().to_string().to_uppercase();
    format!("{ORDER_NUMBER_PREFIX}{}", &hex[..ORDER_NUMBER_HEX_LENGTH])
}

/// Line total: quantity times unit price. Computed on read, never stored.
pub fn line_total(quantity: i32, unit_price: Money) -> Money {
    Money::from(quantity) * unit_price
}

/// Customer contact fields of a checkout submission.
pub struct CustomerFields<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub phone: &'a str,
    pub address: &'a str,
}

pub fn validate_customer(fields: &CustomerFields<'_>) -> Result<(), CoreError> {
    require_non_empty("customer_name", fields.name)?;
    require_max_length("customer_name", fields.name, MAX_NAME_LENGTH)?;
    validate_email_field("customer_email", fields.email)?;
    require_non_empty("customer_phone", fields.phone)?;
    require_max_length("customer_phone", fields.phone, MAX_PHONE_LENGTH)?;
    require_non_empty("customer_address", fields.address)?;
    Ok(())
}

/// Validate caller-supplied totals. They are stored as given and never
/// recomputed from the line items.
pub fn validate_totals(subtotal: Money, tax: Money, total: Money) -> Result<(), CoreError> {
    validate_money("subtotal", subtotal)?;
    validate_money("tax", tax)?;
    validate_money("total", total)?;
    Ok(())
}

pub fn validate_quantity(index: usize, quantity: i32) -> Result<(), CoreError> {
    if quantity < 1 {
        return Err(CoreError::Validation(format!(
            "products[{index}].quantity: must be at least 1"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::str::FromStr;

    use super::*;

    #[test]
    fn order_number_shape() {
        let number = generate_order_number();
        assert!(number.starts_with(ORDER_NUMBER_PREFIX));
        assert_eq!(number.len(), ORDER_NUMBER_PREFIX.len() + ORDER_NUMBER_HEX_LENGTH);
        assert!(number.len() <= 20);
        assert!(number[ORDER_NUMBER_PREFIX.len()..]
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_uppercase()));
    }

    #[test]
    fn thousand_order_numbers_are_distinct() {
        let numbers: HashSet<String> = (0..1000).map(|_| generate_order_number()).collect();
        assert_eq!(numbers.len(), 1000);
    }

    #[test]
    fn line_total_multiplies() {
        let total = line_total(2, Money::from_str("10.00").unwrap());
        assert_eq!(total, Money::from_str("20.00").unwrap());
        assert_eq!(total.to_string(), "20.00");
    }

    #[test]
    fn customer_phone_is_required() {
        let fields = CustomerFields {
            name: "Ann",
            email: "ann@example.com",
            phone: "",
            address: "1 Main St",
        };
        let err = validate_customer(&fields).unwrap_err();
        assert!(err.to_string().contains("customer_phone"));
    }

    #[test]
    fn zero_quantity_names_line() {
        let err = validate_quantity(1, 0).unwrap_err();
        assert!(err.to_string().contains("products[1].quantity"));
    }
}
