//! Aggregate queries for the admin dashboard.

use sqlx::PgPool;

use crate::models::dashboard::DashboardStats;

/// Provides dashboard counters.
pub struct DashboardRepo;

impl DashboardRepo {
    /// Compute every dashboard counter in one round trip.
    ///
    /// Revenue sums the totals of completed orders only.
    pub async fn stats(pool: &PgPool) -> Result<DashboardStats, sqlx::Error> {
        sqlx::query_as::<_, DashboardStats>(
            "SELECT
                (SELECT COUNT(*) FROM products) AS total_products,
                (SELECT COUNT(*) FROM products WHERE status = 'published') AS published_products,
                (SELECT COUNT(*) FROM products WHERE status = 'draft') AS draft_products,
                (SELECT COUNT(*) FROM products WHERE status = 'archived') AS archived_products,
                (SELECT COUNT(*) FROM categories) AS total_categories,
                (SELECT COUNT(*) FROM categories WHERE is_active) AS active_categories,
                (SELECT COUNT(*) FROM demo_requests) AS total_demo_requests,
                (SELECT COUNT(*) FROM demo_requests WHERE status = 'pending') AS pending_demos,
                (SELECT COUNT(*) FROM demo_requests WHERE status = 'contacted') AS contacted_demos,
                (SELECT COUNT(*) FROM demo_requests WHERE status = 'completed') AS completed_demos,
                (SELECT COUNT(*) FROM orders) AS total_orders,
                (SELECT COUNT(*) FROM orders WHERE status = 'pending') AS pending_orders,
                (SELECT COUNT(*) FROM orders WHERE status = 'processing') AS processing_orders,
                (SELECT COUNT(*) FROM orders WHERE status = 'completed') AS completed_orders,
                (SELECT COUNT(*) FROM orders WHERE status = 'cancelled') AS cancelled_orders,
                (SELECT COALESCE(SUM(total), 0) FROM orders WHERE status = 'completed')
                    AS revenue_total,
                (SELECT COUNT(*) FROM messages WHERE kind = 'contact' AND NOT is_read)
                    AS unread_contacts,
                (SELECT COUNT(*) FROM messages WHERE kind = 'portfolio' AND NOT is_read)
                    AS unread_portfolio,
                (SELECT COUNT(*) FROM messages) AS total_messages,
                (SELECT COUNT(*) FROM products WHERE created_at >= NOW() - INTERVAL '24 hours')
                    AS products_last_24h,
                (SELECT COUNT(*) FROM orders WHERE created_at >= NOW() - INTERVAL '24 hours')
                    AS orders_last_24h,
                (SELECT COUNT(*) FROM demo_requests
                    WHERE requested_at >= NOW() - INTERVAL '24 hours') AS demos_last_24h",
        )
        .fetch_one(pool)
        .await
    }
}
