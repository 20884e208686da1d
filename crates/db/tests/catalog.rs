//! Integration tests for categories, products, slugs, and publishing.

use std::str::FromStr;

use assert_matches::assert_matches;
use rust_decimal::Decimal;
use sqlx::PgPool;
use storefront_core::error::CoreError;
use storefront_core::pagination::PageRequest;
use storefront_db::models::category::{CreateCategory, UpdateCategory};
use storefront_db::models::product::{CreateProduct, ProductFilter, UpdateProduct};
use storefront_db::models::product_image::CreateProductImage;
use storefront_db::repositories::{CategoryRepo, ProductImageRepo, ProductRepo};
use storefront_db::DbError;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn money(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn new_category(name: &str, category_type: &str) -> CreateCategory {
    CreateCategory {
        name: name.to_string(),
        category_type: category_type.to_string(),
        display_order: None,
        is_active: None,
    }
}

fn new_product(category_id: i64, name: &str) -> CreateProduct {
    CreateProduct {
        name: name.to_string(),
        slug: None,
        category_id,
        description: format!("{name} description"),
        short_description: format!("{name} summary"),
        price: money("100.00"),
        discount_price: None,
        image: "products/widget.png".to_string(),
        thumbnail: None,
        display_order: None,
        is_featured: None,
        status: None,
        specifications: None,
    }
}

fn status_update(status: &str) -> UpdateProduct {
    UpdateProduct {
        status: Some(status.to_string()),
        ..Default::default()
    }
}

async fn software_category(pool: &PgPool) -> i64 {
    CategoryRepo::create(pool, &new_category("Software", "System"))
        .await
        .unwrap()
        .id
}

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn duplicate_category_is_validation_error(pool: PgPool) {
    CategoryRepo::create(&pool, &new_category("Software", "System"))
        .await
        .unwrap();
    let err = CategoryRepo::create(&pool, &new_category("Software", "System"))
        .await
        .unwrap_err();
    assert_matches!(err, DbError::Core(CoreError::Validation(ref msg)) if msg.starts_with("name:"));

    let all = CategoryRepo::list(&pool, false).await.unwrap();
    assert_eq!(all.len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn same_name_different_type_is_allowed(pool: PgPool) {
    CategoryRepo::create(&pool, &new_category("Software", "System"))
        .await
        .unwrap();
    CategoryRepo::create(&pool, &new_category("Software", "Mobile"))
        .await
        .unwrap();
    assert_eq!(CategoryRepo::list(&pool, false).await.unwrap().len(), 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn editing_category_into_duplicate_is_rejected(pool: PgPool) {
    CategoryRepo::create(&pool, &new_category("Software", "System"))
        .await
        .unwrap();
    let other = CategoryRepo::create(&pool, &new_category("Apps", "System"))
        .await
        .unwrap();

    // Saving a category with its own values is not a duplicate.
    let same = UpdateCategory {
        name: Some("Apps".into()),
        ..Default::default()
    };
    assert!(CategoryRepo::update(&pool, other.id, &same)
        .await
        .unwrap()
        .is_some());

    let clash = UpdateCategory {
        name: Some("Software".into()),
        ..Default::default()
    };
    let err = CategoryRepo::update(&pool, other.id, &clash).await.unwrap_err();
    assert_matches!(err, DbError::Core(CoreError::Validation(_)));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn active_listing_counts_published_products(pool: PgPool) {
    let category_id = software_category(&pool).await;
    let mut published = new_product(category_id, "Shown");
    published.status = Some("published".into());
    ProductRepo::create(&pool, &published).await.unwrap();
    ProductRepo::create(&pool, &new_product(category_id, "Hidden"))
        .await
        .unwrap();

    let mut hidden = new_category("Retired", "System");
    hidden.is_active = Some(false);
    CategoryRepo::create(&pool, &hidden).await.unwrap();

    let active = CategoryRepo::list(&pool, true).await.unwrap();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].product_count, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn deleting_category_cascades_to_products(pool: PgPool) {
    let category_id = software_category(&pool).await;
    let product = ProductRepo::create(&pool, &new_product(category_id, "Widget"))
        .await
        .unwrap();

    assert!(CategoryRepo::delete(&pool, category_id).await.unwrap());
    assert!(ProductRepo::find_by_id(&pool, product.id)
        .await
        .unwrap()
        .is_none());
}

// ---------------------------------------------------------------------------
// Products
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn widget_lifecycle(pool: PgPool) {
    let category_id = software_category(&pool).await;
    let product = ProductRepo::create(&pool, &new_product(category_id, "Widget"))
        .await
        .unwrap();

    assert_eq!(product.slug, "widget");
    assert_eq!(product.current_price().to_string(), "100.00");
    assert!(!product.has_discount());
    assert!(product.published_at.is_none());

    let published = ProductRepo::update(&pool, product.id, &status_update("published"))
        .await
        .unwrap()
        .unwrap();
    assert!(published.published_at.is_some());

    let archived = ProductRepo::update(&pool, product.id, &status_update("archived"))
        .await
        .unwrap()
        .unwrap();
    assert!(archived.published_at.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn republish_keeps_stamp_until_unpublished(pool: PgPool) {
    let category_id = software_category(&pool).await;
    let mut input = new_product(category_id, "Widget");
    input.status = Some("published".into());
    let product = ProductRepo::create(&pool, &input).await.unwrap();
    let first = product.published_at.unwrap();

    // Editing a published product keeps its original timestamp.
    let edit = UpdateProduct {
        name: Some("Widget Pro".into()),
        status: Some("published".into()),
        ..Default::default()
    };
    let edited = ProductRepo::update(&pool, product.id, &edit)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(edited.published_at, Some(first));
    assert_eq!(edited.slug, "widget");

    ProductRepo::update(&pool, product.id, &status_update("draft"))
        .await
        .unwrap();
    let republished = ProductRepo::update(&pool, product.id, &status_update("published"))
        .await
        .unwrap()
        .unwrap();
    assert!(republished.published_at.unwrap() >= first);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn derived_slugs_get_increasing_suffixes(pool: PgPool) {
    let category_id = software_category(&pool).await;
    let mut slugs = Vec::new();
    for _ in 0..4 {
        let product = ProductRepo::create(&pool, &new_product(category_id, "Widget"))
            .await
            .unwrap();
        slugs.push(product.slug);
    }
    assert_eq!(slugs, ["widget", "widget-1", "widget-2", "widget-3"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn longest_names_still_get_suffixed_slugs(pool: PgPool) {
    let category_id = software_category(&pool).await;
    let name = "a".repeat(200);

    let first = ProductRepo::create(&pool, &new_product(category_id, &name))
        .await
        .unwrap();
    assert_eq!(first.slug, name);

    let second = ProductRepo::create(&pool, &new_product(category_id, &name))
        .await
        .unwrap();
    assert_eq!(second.slug.len(), 200);
    assert_eq!(second.slug, format!("{}-1", "a".repeat(198)));

    let third = ProductRepo::create(&pool, &new_product(category_id, &name))
        .await
        .unwrap();
    assert_eq!(third.slug, format!("{}-2", "a".repeat(198)));

    // Re-deriving on edit skips the product's own slug.
    let edited = ProductRepo::update(
        &pool,
        second.id,
        &UpdateProduct {
            slug: Some(String::new()),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(edited.slug, format!("{}-1", "a".repeat(198)));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn concurrent_creates_get_distinct_slugs(pool: PgPool) {
    let category_id = software_category(&pool).await;
    let mut handles = Vec::new();
    for _ in 0..4 {
        let pool = pool.clone();
        handles.push(tokio::spawn(async move {
            ProductRepo::create(&pool, &new_product(category_id, "Gadget"))
                .await
                .map(|p| p.slug)
        }));
    }
    let mut slugs = Vec::new();
    for handle in handles {
        slugs.push(handle.await.unwrap().unwrap());
    }
    slugs.sort();
    slugs.dedup();
    assert_eq!(slugs.len(), 4);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn explicit_taken_slug_is_rejected(pool: PgPool) {
    let category_id = software_category(&pool).await;
    ProductRepo::create(&pool, &new_product(category_id, "Widget"))
        .await
        .unwrap();

    let mut input = new_product(category_id, "Another");
    input.slug = Some("widget".into());
    let err = ProductRepo::create(&pool, &input).await.unwrap_err();
    assert_matches!(err, DbError::Core(CoreError::Validation(ref msg)) if msg.starts_with("slug:"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn discount_price_wins_and_can_be_cleared(pool: PgPool) {
    let category_id = software_category(&pool).await;
    let mut input = new_product(category_id, "Widget");
    input.discount_price = Some(money("79.99"));
    let product = ProductRepo::create(&pool, &input).await.unwrap();
    assert_eq!(product.current_price(), money("79.99"));
    assert!(product.has_discount());

    let clear: UpdateProduct = serde_json::from_value(serde_json::json!({
        "discount_price": null
    }))
    .unwrap();
    let cleared = ProductRepo::update(&pool, product.id, &clear)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(cleared.discount_price, None);
    assert_eq!(cleared.current_price(), money("100.00"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn invalid_status_is_rejected(pool: PgPool) {
    let category_id = software_category(&pool).await;
    let mut input = new_product(category_id, "Widget");
    input.status = Some("live".into());
    let err = ProductRepo::create(&pool, &input).await.unwrap_err();
    assert_matches!(err, DbError::Core(CoreError::Validation(ref msg)) if msg.starts_with("status:"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_category_is_rejected(pool: PgPool) {
    let err = ProductRepo::create(&pool, &new_product(9999, "Widget"))
        .await
        .unwrap_err();
    assert_matches!(err, DbError::Core(CoreError::Validation(ref msg)) if msg.starts_with("category_id:"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn published_listing_filters_and_orders(pool: PgPool) {
    let system = software_category(&pool).await;
    let mobile = CategoryRepo::create(&pool, &new_category("Apps", "Mobile"))
        .await
        .unwrap()
        .id;

    for (category_id, name, featured, status) in [
        (system, "Alpha", true, "published"),
        (system, "Beta", false, "published"),
        (mobile, "Gamma", true, "published"),
        (system, "Delta", true, "draft"),
    ] {
        let mut input = new_product(category_id, name);
        input.is_featured = Some(featured);
        input.status = Some(status.to_string());
        ProductRepo::create(&pool, &input).await.unwrap();
    }

    let page = PageRequest::new(None, None).unwrap();
    let everything = ProductFilter::default();
    assert_eq!(ProductRepo::count_published(&pool, &everything).await.unwrap(), 3);
    let listed = ProductRepo::list_published(&pool, &everything, page)
        .await
        .unwrap();
    // Same display order, so newest first.
    assert_eq!(listed[0].name, "Gamma");

    let system_featured = ProductFilter {
        category_type: Some("System".into()),
        featured_only: true,
    };
    let listed = ProductRepo::list_published(&pool, &system_featured, page)
        .await
        .unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].name, "Alpha");
    assert_eq!(listed[0].category_type, "System");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn deleting_product_removes_images(pool: PgPool) {
    let category_id = software_category(&pool).await;
    let product = ProductRepo::create(&pool, &new_product(category_id, "Widget"))
        .await
        .unwrap();
    for order in [2, 1] {
        ProductImageRepo::create(
            &pool,
            product.id,
            &CreateProductImage {
                image: format!("gallery/{order}.png"),
                alt_text: None,
                display_order: Some(order),
            },
        )
        .await
        .unwrap();
    }
    let images = ProductImageRepo::list_for_product(&pool, product.id)
        .await
        .unwrap();
    assert_eq!(images[0].display_order, 1);

    assert!(ProductRepo::delete(&pool, product.id).await.unwrap());
    assert_eq!(
        ProductImageRepo::count_for_product(&pool, product.id)
            .await
            .unwrap(),
        0
    );
    assert!(!ProductRepo::delete(&pool, product.id).await.unwrap());
}
