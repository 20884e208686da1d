//! Integration tests for the single active site configuration.

use sqlx::PgPool;
use storefront_core::site_config::ResolvedSiteConfig;
use storefront_db::models::site_config::{SaveSiteConfig, UpdateSiteConfig};
use storefront_db::repositories::SiteConfigRepo;

fn values(name: &str) -> ResolvedSiteConfig {
    ResolvedSiteConfig {
        site_name: name.to_string(),
        site_email: "shop@example.com".into(),
        currency: "EUR".into(),
        currency_symbol: "€".into(),
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn get_active_creates_defaults_once(pool: PgPool) {
    let first = SiteConfigRepo::get_active(&pool).await.unwrap();
    assert_eq!(first.site_name, "DravTech Marketplace");
    assert_eq!(first.site_email, "admin@dravtech.com");
    assert_eq!(first.currency, "USD");
    assert_eq!(first.currency_symbol, "$");
    assert!(first.is_active);

    let second = SiteConfigRepo::get_active(&pool).await.unwrap();
    assert_eq!(first.id, second.id);
    assert_eq!(SiteConfigRepo::count_active(&pool).await.unwrap(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn saving_active_deactivates_all_others(pool: PgPool) {
    // Seed several active rows directly, bypassing the repository.
    for name in ["one", "two", "three"] {
        sqlx::query("INSERT INTO site_configs (site_name, is_active) VALUES ($1, true)")
            .bind(name)
            .execute(&pool)
            .await
            .unwrap();
    }
    assert_eq!(SiteConfigRepo::count_active(&pool).await.unwrap(), 3);

    let created = SiteConfigRepo::create(
        &pool,
        &SaveSiteConfig {
            values: values("fresh"),
            is_active: true,
        },
    )
    .await
    .unwrap();
    assert_eq!(SiteConfigRepo::count_active(&pool).await.unwrap(), 1);
    assert_eq!(
        SiteConfigRepo::get_active(&pool).await.unwrap().id,
        created.id
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn saving_inactive_leaves_active_alone(pool: PgPool) {
    let active = SiteConfigRepo::get_active(&pool).await.unwrap();
    let draft = SiteConfigRepo::create(
        &pool,
        &SaveSiteConfig {
            values: values("draft"),
            is_active: false,
        },
    )
    .await
    .unwrap();
    assert_eq!(SiteConfigRepo::get_active(&pool).await.unwrap().id, active.id);

    // Re-saving the draft as active swaps which row is active.
    SiteConfigRepo::save(
        &pool,
        draft.id,
        &SaveSiteConfig {
            values: values("draft"),
            is_active: true,
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(SiteConfigRepo::count_active(&pool).await.unwrap(), 1);
    assert_eq!(SiteConfigRepo::get_active(&pool).await.unwrap().id, draft.id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_active_resolves_currency_symbol(pool: PgPool) {
    let updated = SiteConfigRepo::update_active(
        &pool,
        &UpdateSiteConfig {
            currency: Some("KES".into()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(updated.currency, "KES");
    assert_eq!(updated.currency_symbol, "KSh");

    let custom = SiteConfigRepo::update_active(
        &pool,
        &UpdateSiteConfig {
            currency: Some("XYZ".into()),
            currency_symbol: Some("¤".into()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(custom.currency_symbol, "¤");
    assert_eq!(custom.id, updated.id);
    assert_eq!(SiteConfigRepo::count_active(&pool).await.unwrap(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn save_missing_row_returns_none(pool: PgPool) {
    let result = SiteConfigRepo::save(
        &pool,
        12345,
        &SaveSiteConfig {
            values: values("ghost"),
            is_active: true,
        },
    )
    .await
    .unwrap();
    assert!(result.is_none());
}
