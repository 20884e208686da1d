//! Order and order line models and DTOs.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use storefront_core::orders;
use storefront_core::types::{DbId, Timestamp};

/// A row from the `orders` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Order {
    pub id: DbId,
    pub order_number: String,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub customer_address: String,
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
    pub status: String,
    pub payment_method: String,
    pub payment_received: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `order_items` table joined with the product name.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct OrderItem {
    pub id: DbId,
    pub order_id: DbId,
    pub product_id: DbId,
    pub product_name: String,
    pub quantity: i32,
    pub price: Decimal,
}

impl OrderItem {
    pub fn line_total(&self) -> Decimal {
        orders::line_total(self.quantity, self.price)
    }
}

/// An order together with the line items that were persisted for it.
#[derive(Debug, Clone, Serialize)]
pub struct PlacedOrder {
    pub order: Order,
    pub items: Vec<OrderItem>,
}

/// One requested line of a checkout submission.
#[derive(Debug, Clone, Deserialize)]
pub struct NewOrderItem {
    pub product_id: DbId,
    /// Defaults to 1.
    pub quantity: Option<i32>,
    /// Defaults to the product's current price.
    pub price: Option<Decimal>,
}

/// DTO for placing an order.
#[derive(Debug, Clone)]
pub struct PlaceOrder {
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub customer_address: String,
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
    pub payment_method: String,
    pub items: Vec<NewOrderItem>,
}

/// Order count and revenue summary for the admin listing.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct OrderTotals {
    pub total_orders: i64,
    pub pending_orders: i64,
    /// Sum of totals of completed orders.
    pub revenue: Decimal,
}
