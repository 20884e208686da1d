//! Staff login, token refresh, logout, lockout and dashboard access control.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, get_auth, post_json, post_json_auth, TEST_PASSWORD};
use sqlx::PgPool;
use storefront_api::auth::jwt::generate_access_token;
use storefront_api::bootstrap::{ensure_admin, BootstrapAdmin};
use storefront_db::repositories::{SessionRepo, UserRepo};

async fn login(app: axum::Router, username: &str, password: &str) -> axum::response::Response {
    post_json(
        app,
        "/api/v1/auth/login",
        serde_json::json!({ "username": username, "password": password }),
    )
    .await
}

// ---------------------------------------------------------------------------
// Login
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn login_returns_tokens_and_user(pool: PgPool) {
    let user = common::create_user(&pool, "manager", "admin").await;
    let app = common::build_test_app(pool);

    let response = login(app, "manager", TEST_PASSWORD).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert!(json["access_token"].is_string());
    assert!(json["refresh_token"].is_string());
    assert_eq!(json["expires_in"], 15 * 60);
    assert_eq!(json["user"]["id"], user.id);
    assert_eq!(json["user"]["role"], "admin");
    assert!(json["user"].get("password_hash").is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn wrong_password_and_unknown_user_are_401(pool: PgPool) {
    common::create_user(&pool, "manager", "staff").await;
    let app = common::build_test_app(pool);

    let response = login(app.clone(), "manager", "not-the-password").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = login(app, "nobody", TEST_PASSWORD).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn five_failures_lock_the_account(pool: PgPool) {
    let user = common::create_user(&pool, "manager", "staff").await;
    let app = common::build_test_app(pool.clone());

    for _ in 0..5 {
        let response = login(app.clone(), "manager", "wrong-password").await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    // Locked now, even with the right password.
    let response = login(app, "manager", TEST_PASSWORD).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let stored = UserRepo::find_by_id(&pool, user.id).await.unwrap().unwrap();
    assert_eq!(stored.failed_login_count, 5);
    assert!(stored.locked_until.is_some());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn successful_login_resets_failure_count(pool: PgPool) {
    let user = common::create_user(&pool, "manager", "staff").await;
    let app = common::build_test_app(pool.clone());

    login(app.clone(), "manager", "wrong-password").await;
    let response = login(app, "manager", TEST_PASSWORD).await;
    assert_eq!(response.status(), StatusCode::OK);

    let stored = UserRepo::find_by_id(&pool, user.id).await.unwrap().unwrap();
    assert_eq!(stored.failed_login_count, 0);
    assert!(stored.last_login_at.is_some());
}

// ---------------------------------------------------------------------------
// Refresh / logout
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn refresh_rotates_and_old_token_stops_working(pool: PgPool) {
    common::create_user(&pool, "manager", "staff").await;
    let app = common::build_test_app(pool);

    let json = body_json(login(app.clone(), "manager", TEST_PASSWORD).await).await;
    let original = json["refresh_token"].as_str().unwrap().to_string();

    let body = serde_json::json!({ "refresh_token": original });
    let response = post_json(app.clone(), "/api/v1/auth/refresh", body.clone()).await;
    assert_eq!(response.status(), StatusCode::OK);
    let rotated = body_json(response).await;
    assert_ne!(rotated["refresh_token"].as_str().unwrap(), original);

    let response = post_json(app, "/api/v1/auth/refresh", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn logout_revokes_refresh_tokens(pool: PgPool) {
    let user = common::create_user(&pool, "manager", "staff").await;
    let app = common::build_test_app(pool.clone());

    let json = body_json(login(app.clone(), "manager", TEST_PASSWORD).await).await;
    let access = json["access_token"].as_str().unwrap().to_string();
    let refresh = json["refresh_token"].as_str().unwrap().to_string();

    let response =
        post_json_auth(app.clone(), "/api/v1/auth/logout", serde_json::json!({}), &access).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_eq!(SessionRepo::count_live(&pool, user.id).await.unwrap(), 0);

    let response = post_json(
        app,
        "/api/v1/auth/refresh",
        serde_json::json!({ "refresh_token": refresh }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Access control
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn admin_routes_require_a_token(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(app.clone(), "/api/v1/admin/stats").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = get_auth(app, "/api/v1/admin/stats", "garbage").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn non_dashboard_role_is_forbidden(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = generate_access_token(99, "customer", &common::test_config().jwt).unwrap();

    let response = get_auth(app, "/api/v1/admin/stats", &token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn staff_token_reaches_dashboard(pool: PgPool) {
    let token = common::staff_token(&pool).await;
    let app = common::build_test_app(pool);

    let response = get_auth(app, "/api/v1/admin/stats", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
}

// ---------------------------------------------------------------------------
// Bootstrap admin
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn bootstrap_admin_is_created_once(pool: PgPool) {
    let admin = BootstrapAdmin {
        username: "owner".into(),
        email: "owner@storefront.test".into(),
        password: "a-long-enough-password".into(),
    };

    let created = ensure_admin(&pool, &admin).await.unwrap();
    assert_eq!(created.map(|u| u.role), Some("admin".to_string()));
    assert!(ensure_admin(&pool, &admin).await.unwrap().is_none());

    let app = common::build_test_app(pool);
    let response = login(app, "owner", "a-long-enough-password").await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn bootstrap_admin_rejects_short_password(pool: PgPool) {
    let admin = BootstrapAdmin {
        username: "owner".into(),
        email: "owner@storefront.test".into(),
        password: "short".into(),
    };
    assert!(ensure_admin(&pool, &admin).await.is_err());
    assert!(UserRepo::find_by_username(&pool, "owner").await.unwrap().is_none());
}
