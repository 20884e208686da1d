//! Dashboard statistics.

use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;

/// Aggregate counters shown on the admin dashboard.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DashboardStats {
    pub total_products: i64,
    pub published_products: i64,
    pub draft_products: i64,
    pub archived_products: i64,
    pub total_categories: i64,
    pub active_categories: i64,
    pub total_demo_requests: i64,
    pub pending_demos: i64,
    pub contacted_demos: i64,
    pub completed_demos: i64,
    pub total_orders: i64,
    pub pending_orders: i64,
    pub processing_orders: i64,
    pub completed_orders: i64,
    pub cancelled_orders: i64,
    pub revenue_total: Decimal,
    pub unread_contacts: i64,
    pub unread_portfolio: i64,
    pub total_messages: i64,
    pub products_last_24h: i64,
    pub orders_last_24h: i64,
    pub demos_last_24h: i64,
}
