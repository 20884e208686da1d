//! Public storefront routes. No token required.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{apps, catalog, checkout, inquiry};
use crate::state::AppState;

/// Routes merged directly under `/api/v1`.
///
/// ```text
/// GET  /products                  -> list_products (paginated, cached when unfiltered)
/// GET  /products/{id}             -> get_product
/// GET  /products/by-slug/{slug}   -> get_product_by_slug (with related)
/// GET  /categories                -> list_categories (cached)
/// GET  /categories/{id}           -> get_category
/// GET  /currency                  -> get_currency
/// POST /demo-requests             -> submit_demo_request
/// POST /orders                    -> place_order
/// POST /contact                   -> submit_contact_message
/// POST /portfolio/messages        -> submit_portfolio_message
/// GET  /apps                      -> list_apps
/// GET  /apps/{id}                 -> get_app
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/products", get(catalog::list_products))
        .route("/products/{id}", get(catalog::get_product))
        .route("/products/by-slug/{slug}", get(catalog::get_product_by_slug))
        .route("/categories", get(catalog::list_categories))
        .route("/categories/{id}", get(catalog::get_category))
        .route("/currency", get(catalog::get_currency))
        .route("/demo-requests", post(inquiry::submit_demo_request))
        .route("/orders", post(checkout::place_order))
        .route("/contact", post(inquiry::submit_contact_message))
        .route("/portfolio/messages", post(inquiry::submit_portfolio_message))
        .route("/apps", get(apps::list_apps))
        .route("/apps/{id}", get(apps::get_app))
}
