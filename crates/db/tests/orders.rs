//! Integration tests for order placement and fulfilment.

use std::collections::HashSet;
use std::str::FromStr;

use assert_matches::assert_matches;
use rust_decimal::Decimal;
use sqlx::PgPool;
use storefront_core::error::CoreError;
use storefront_core::status::OrderStatus;
use storefront_db::models::category::CreateCategory;
use storefront_db::models::order::{NewOrderItem, PlaceOrder};
use storefront_db::models::product::CreateProduct;
use storefront_db::repositories::{CategoryRepo, OrderRepo, ProductRepo};
use storefront_db::DbError;

fn money(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

async fn published_product(pool: &PgPool, name: &str, price: &str) -> i64 {
    let category = CategoryRepo::create(
        pool,
        &CreateCategory {
            name: format!("{name} category"),
            category_type: "System".into(),
            display_order: None,
            is_active: None,
        },
    )
    .await
    .unwrap();
    ProductRepo::create(
        pool,
        &CreateProduct {
            name: name.to_string(),
            slug: None,
            category_id: category.id,
            description: "desc".into(),
            short_description: "short".into(),
            price: money(price),
            discount_price: None,
            image: "products/p.png".into(),
            thumbnail: None,
            display_order: None,
            is_featured: None,
            status: Some("published".into()),
            specifications: None,
        },
    )
    .await
    .unwrap()
    .id
}

fn checkout(items: Vec<NewOrderItem>) -> PlaceOrder {
    PlaceOrder {
        customer_name: "Ann Buyer".into(),
        customer_email: "ann@example.com".into(),
        customer_phone: "+254700000000".into(),
        customer_address: "1 Main St, Nairobi".into(),
        subtotal: money("20.00"),
        tax: money("0.00"),
        total: money("20.00"),
        payment_method: String::new(),
        items,
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn missing_product_line_is_skipped(pool: PgPool) {
    let product_id = published_product(&pool, "Widget", "10.00").await;

    let placed = OrderRepo::place(
        &pool,
        &checkout(vec![
            NewOrderItem {
                product_id,
                quantity: Some(2),
                price: Some(money("10.00")),
            },
            NewOrderItem {
                product_id: 999_999,
                quantity: Some(1),
                price: Some(money("5.00")),
            },
        ]),
    )
    .await
    .unwrap();

    assert_eq!(placed.items.len(), 1);
    assert_eq!(placed.items[0].line_total().to_string(), "20.00");

    let stored = OrderRepo::items(&pool, placed.order.id).await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].product_name, "Widget");
    assert_eq!(stored[0].line_total(), money("20.00"));
    assert_eq!(placed.order.status, "pending");
    assert!(placed.order.order_number.starts_with("ORD-"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn line_defaults_to_current_price_and_quantity_one(pool: PgPool) {
    let product_id = published_product(&pool, "Widget", "12.50").await;
    let placed = OrderRepo::place(
        &pool,
        &checkout(vec![NewOrderItem {
            product_id,
            quantity: None,
            price: None,
        }]),
    )
    .await
    .unwrap();
    assert_eq!(placed.items[0].quantity, 1);
    assert_eq!(placed.items[0].price, money("12.50"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn order_with_no_valid_lines_is_still_created(pool: PgPool) {
    let placed = OrderRepo::place(
        &pool,
        &checkout(vec![NewOrderItem {
            product_id: 42,
            quantity: Some(1),
            price: None,
        }]),
    )
    .await
    .unwrap();
    assert!(placed.items.is_empty());
    // Totals are stored exactly as supplied.
    assert_eq!(placed.order.total, money("20.00"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn missing_customer_field_persists_nothing(pool: PgPool) {
    let mut input = checkout(vec![]);
    input.customer_phone = "  ".into();
    let err = OrderRepo::place(&pool, &input).await.unwrap_err();
    assert_matches!(err, DbError::Core(CoreError::Validation(ref msg)) if msg.starts_with("customer_phone:"));
    assert!(OrderRepo::list(&pool, None).await.unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn thousand_orders_have_distinct_numbers(pool: PgPool) {
    let mut numbers = HashSet::new();
    for _ in 0..1000 {
        let placed = OrderRepo::place(&pool, &checkout(vec![])).await.unwrap();
        numbers.insert(placed.order.order_number);
    }
    assert_eq!(numbers.len(), 1000);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn status_moves_freely_and_revenue_counts_completed(pool: PgPool) {
    let first = OrderRepo::place(&pool, &checkout(vec![])).await.unwrap().order;
    OrderRepo::place(&pool, &checkout(vec![])).await.unwrap();

    let completed = OrderRepo::update_status(&pool, first.id, OrderStatus::Completed)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(completed.status, "completed");
    assert_eq!(completed.order_number, first.order_number);

    let totals = OrderRepo::totals(&pool).await.unwrap();
    assert_eq!(totals.total_orders, 2);
    assert_eq!(totals.pending_orders, 1);
    assert_eq!(totals.revenue, money("20.00"));

    // Completed back to pending is allowed.
    let reopened = OrderRepo::update_status(&pool, first.id, OrderStatus::Pending)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(reopened.status, "pending");

    let pending = OrderRepo::list(&pool, Some(OrderStatus::Pending)).await.unwrap();
    assert_eq!(pending.len(), 2);
    assert!(OrderRepo::update_status(&pool, 999_999, OrderStatus::Pending)
        .await
        .unwrap()
        .is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn ordered_product_cannot_be_deleted(pool: PgPool) {
    let product_id = published_product(&pool, "Widget", "10.00").await;
    OrderRepo::place(
        &pool,
        &checkout(vec![NewOrderItem {
            product_id,
            quantity: Some(1),
            price: None,
        }]),
    )
    .await
    .unwrap();

    let err = ProductRepo::delete(&pool, product_id).await.unwrap_err();
    let db_err = err.as_database_error().expect("database error");
    assert_eq!(db_err.code().as_deref(), Some("23503"));
}
