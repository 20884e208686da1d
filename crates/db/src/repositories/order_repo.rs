//! Repository for the `orders` and `order_items` tables.

use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, Transaction};
use storefront_core::catalog;
use storefront_core::error::CoreError;
use storefront_core::orders::{
    self, CustomerFields, DEFAULT_QUANTITY, MAX_ORDER_NUMBER_ATTEMPTS,
};
use storefront_core::status::OrderStatus;
use storefront_core::types::DbId;
use storefront_core::validation::{require_max_length, validate_money};

use crate::error::{is_unique_violation, DbError};
use crate::models::order::{Order, OrderItem, OrderTotals, PlaceOrder, PlacedOrder};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, order_number, customer_name, customer_email, customer_phone, \
     customer_address, subtotal, tax, total, status, payment_method, payment_received, \
     created_at, updated_at";

/// Order line columns joined with the product name (`i` = order_items, `p` = products).
const ITEM_COLUMNS: &str = "i.id, i.order_id, i.product_id, p.name AS product_name, \
     i.quantity, i.price";

const UNIQUE_ORDER_NUMBER: &str = "uq_orders_order_number";

/// Maximum length of `orders.payment_method`.
const MAX_PAYMENT_METHOD_LENGTH: usize = 50;

/// Provides order placement and fulfilment operations.
pub struct OrderRepo;

impl OrderRepo {
    /// Place an order with its line items in one transaction.
    ///
    /// A line referencing a missing or unpublished product is skipped; the
    /// order is still created, possibly with no lines at all. A line without
    /// a price uses the product's current price. Totals are stored as given.
    ///
    /// The order number is random; on the rare collision the whole
    /// transaction is retried with a fresh number.
    pub async fn place(pool: &PgPool, input: &PlaceOrder) -> Result<PlacedOrder, DbError> {
        orders::validate_customer(&CustomerFields {
            name: input.customer_name.trim(),
            email: input.customer_email.trim(),
            phone: input.customer_phone.trim(),
            address: input.customer_address.trim(),
        })?;
        orders::validate_totals(input.subtotal, input.tax, input.total)?;
        require_max_length(
            "payment_method",
            &input.payment_method,
            MAX_PAYMENT_METHOD_LENGTH,
        )?;
        for (index, item) in input.items.iter().enumerate() {
            orders::validate_quantity(index, item.quantity.unwrap_or(DEFAULT_QUANTITY))?;
            if let Some(price) = item.price {
                validate_money(&format!("products[{index}].price"), price)?;
            }
        }

        for attempt in 1..=MAX_ORDER_NUMBER_ATTEMPTS {
            let order_number = orders::generate_order_number();
            match Self::place_once(pool, &order_number, input).await {
                Ok(placed) => return Ok(placed),
                Err(e) if is_unique_violation(&e, UNIQUE_ORDER_NUMBER) => {
                    tracing::warn!(
                        order_number = %order_number,
                        attempt,
                        "Order number collision, retrying"
                    );
                }
                Err(e) => return Err(e.into()),
            }
        }
        Err(CoreError::Internal(format!(
            "could not allocate a unique order number after {MAX_ORDER_NUMBER_ATTEMPTS} attempts"
        ))
        .into())
    }

    /// Find an order by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Order>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM orders WHERE id = $1");
        sqlx::query_as::<_, Order>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an order by its public order number.
    pub async fn find_by_number(
        pool: &PgPool,
        order_number: &str,
    ) -> Result<Option<Order>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM orders WHERE order_number = $1");
        sqlx::query_as::<_, Order>(&query)
            .bind(order_number)
            .fetch_optional(pool)
            .await
    }

    /// List orders newest first, optionally filtered by status.
    pub async fn list(
        pool: &PgPool,
        status: Option<OrderStatus>,
    ) -> Result<Vec<Order>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM orders
             WHERE ($1::TEXT IS NULL OR status = $1)
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Order>(&query)
            .bind(status.map(OrderStatus::as_str))
            .fetch_all(pool)
            .await
    }

    /// Most recently placed orders.
    pub async fn recent(pool: &PgPool, limit: i64) -> Result<Vec<Order>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM orders ORDER BY created_at DESC, id DESC LIMIT $1");
        sqlx::query_as::<_, Order>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Line items of an order, in insertion order.
    pub async fn items(pool: &PgPool, order_id: DbId) -> Result<Vec<OrderItem>, sqlx::Error> {
        let query = format!(
            "SELECT {ITEM_COLUMNS} FROM order_items i
             JOIN products p ON p.id = i.product_id
             WHERE i.order_id = $1
             ORDER BY i.id ASC"
        );
        sqlx::query_as::<_, OrderItem>(&query)
            .bind(order_id)
            .fetch_all(pool)
            .await
    }

    /// Order counts and revenue from completed orders.
    pub async fn totals(pool: &PgPool) -> Result<OrderTotals, sqlx::Error> {
        sqlx::query_as::<_, OrderTotals>(
            "SELECT
                COUNT(*) AS total_orders,
                COUNT(*) FILTER (WHERE status = 'pending') AS pending_orders,
                COALESCE(SUM(total) FILTER (WHERE status = 'completed'), 0) AS revenue
             FROM orders",
        )
        .fetch_one(pool)
        .await
    }

    /// Set an order's status. Any status may move to any other.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update_status(
        pool: &PgPool,
        id: DbId,
        status: OrderStatus,
    ) -> Result<Option<Order>, sqlx::Error> {
        let query = format!("UPDATE orders SET status = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Order>(&query)
            .bind(id)
            .bind(status.as_str())
            .fetch_optional(pool)
            .await
    }

    async fn place_once(
        pool: &PgPool,
        order_number: &str,
        input: &PlaceOrder,
    ) -> Result<PlacedOrder, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO orders
                (order_number, customer_name, customer_email, customer_phone,
                 customer_address, subtotal, tax, total, payment_method)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        let order = sqlx::query_as::<_, Order>(&query)
            .bind(order_number)
            .bind(input.customer_name.trim())
            .bind(input.customer_email.trim())
            .bind(input.customer_phone.trim())
            .bind(input.customer_address.trim())
            .bind(input.subtotal)
            .bind(input.tax)
            .bind(input.total)
            .bind(input.payment_method.trim())
            .fetch_one(&mut *tx)
            .await?;

        let mut items = Vec::with_capacity(input.items.len());
        for line in &input.items {
            let Some((name, price, discount_price)) =
                Self::published_price(&mut tx, line.product_id).await?
            else {
                tracing::debug!(
                    order_number = %order_number,
                    product_id = line.product_id,
                    "Skipping line for missing or unpublished product"
                );
                continue;
            };
            let unit_price = line
                .price
                .unwrap_or_else(|| catalog::current_price(price, discount_price));
            let quantity = line.quantity.unwrap_or(DEFAULT_QUANTITY);

            let (id,): (DbId,) = sqlx::query_as(
                "INSERT INTO order_items (order_id, product_id, quantity, price)
                 VALUES ($1, $2, $3, $4)
                 RETURNING id",
            )
            .bind(order.id)
            .bind(line.product_id)
            .bind(quantity)
            .bind(unit_price)
            .fetch_one(&mut *tx)
            .await?;

            items.push(OrderItem {
                id,
                order_id: order.id,
                product_id: line.product_id,
                product_name: name,
                quantity,
                price: unit_price,
            });
        }

        tx.commit().await?;
        Ok(PlacedOrder { order, items })
    }

    /// Name and prices of a published product, locked against deletion
    /// until the order commits.
    async fn published_price(
        tx: &mut Transaction<'_, Postgres>,
        product_id: DbId,
    ) -> Result<Option<(String, Decimal, Option<Decimal>)>, sqlx::Error> {
        sqlx::query_as(
            "SELECT name, price, discount_price FROM products
             WHERE id = $1 AND status = 'published'
             FOR SHARE",
        )
        .bind(product_id)
        .fetch_optional(&mut **tx)
        .await
    }
}
