pub mod admin;
pub mod auth;
pub mod health;
pub mod storefront;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /auth/...        login, refresh, logout         (see routes::auth)
/// /...             public storefront              (see routes::storefront)
/// /admin/...       staff dashboard, token needed  (see routes::admin)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .merge(storefront::router())
        .nest("/admin", admin::router())
}
