//! Staff dashboard routes. Every handler takes [`RequireStaff`].
//!
//! [`RequireStaff`]: crate::middleware::rbac::RequireStaff

use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::handlers::{
    apps, categories, dashboard, demos, messages, orders, products, site_config,
};
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// ```text
/// GET             /stats                             -> dashboard::stats
/// GET             /recent                            -> dashboard::recent
///
/// GET, POST       /products                          -> list, create
/// GET, PUT, DEL   /products/{id}                     -> get, update, delete
/// GET, POST       /products/{id}/images              -> list, add
/// DELETE          /products/{id}/images/{image_id}   -> delete
///
/// GET, POST       /categories                        -> list, create
/// GET, PUT, DEL   /categories/{id}                   -> get, update, delete
///
/// GET, PUT        /config                            -> get, update
///
/// GET             /demos?status=                     -> list
/// GET, DEL        /demos/{id}                        -> get, delete
/// PUT             /demos/{id}/status                 -> update status
///
/// GET             /orders?status=                    -> list
/// GET             /orders/{id}                       -> get with lines
/// PUT             /orders/{id}/status                -> update status
///
/// GET             /messages?kind=                    -> inbox
/// POST            /messages/clear?kind=              -> clear
/// GET, DEL        /messages/{kind}/{id}              -> get (marks read), delete
/// POST            /messages/{kind}/{id}/read         -> mark read
///
/// POST            /apps                              -> create
/// PUT, DEL        /apps/{id}                         -> update, delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/stats", get(dashboard::stats))
        .route("/recent", get(dashboard::recent))
        // Products
        .route(
            "/products",
            get(products::list_products).post(products::create_product),
        )
        .route(
            "/products/{id}",
            get(products::get_product)
                .put(products::update_product)
                .delete(products::delete_product),
        )
        .route(
            "/products/{id}/images",
            get(products::list_images).post(products::add_image),
        )
        .route(
            "/products/{id}/images/{image_id}",
            delete(products::delete_image),
        )
        // Categories
        .route(
            "/categories",
            get(categories::list_categories).post(categories::create_category),
        )
        .route(
            "/categories/{id}",
            get(categories::get_category)
                .put(categories::update_category)
                .delete(categories::delete_category),
        )
        // Site configuration
        .route(
            "/config",
            get(site_config::get_config).put(site_config::update_config),
        )
        // Demo requests
        .route("/demos", get(demos::list_demos))
        .route(
            "/demos/{id}",
            get(demos::get_demo).delete(demos::delete_demo),
        )
        .route("/demos/{id}/status", put(demos::update_demo_status))
        // Orders
        .route("/orders", get(orders::list_orders))
        .route("/orders/{id}", get(orders::get_order))
        .route("/orders/{id}/status", put(orders::update_order_status))
        // Messages
        .route("/messages", get(messages::list_messages))
        .route("/messages/clear", post(messages::clear_messages))
        .route(
            "/messages/{kind}/{id}",
            get(messages::get_message).delete(messages::delete_message),
        )
        .route("/messages/{kind}/{id}/read", post(messages::mark_read))
        // App showcase
        .route("/apps", post(apps::create_app))
        .route("/apps/{id}", put(apps::update_app).delete(apps::delete_app))
}
