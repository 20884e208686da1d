use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use storefront_api::app;
use storefront_api::bootstrap::{self, BootstrapAdmin};
use storefront_api::cache::ListingCache;
use storefront_api::config::ServerConfig;
use storefront_api::state::AppState;
use storefront_events::{EmailConfig, EmailDelivery, LogNotifier, Notifier};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "storefront_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env();
    tracing::info!(
        host = %config.host,
        port = config.port,
        product_cache_ttl_secs = config.product_cache_ttl_secs,
        category_cache_ttl_secs = config.category_cache_ttl_secs,
        "Loaded server configuration"
    );

    // --- Database ---
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool = storefront_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    storefront_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    storefront_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database ready, migrations applied");

    if let Some(admin) = BootstrapAdmin::from_env() {
        bootstrap::ensure_admin(&pool, &admin)
            .await
            .expect("Failed to create bootstrap admin account");
    }

    // --- Notifications ---
    let email_config = EmailConfig::from_env().expect("Invalid SMTP configuration");
    let notifier: Arc<dyn Notifier> = match email_config {
        Some(email_config) => {
            tracing::info!(smtp_host = %email_config.smtp_host, "Email delivery enabled");
            Arc::new(EmailDelivery::new(email_config).expect("Invalid SMTP configuration"))
        }
        None => {
            tracing::info!("SMTP_HOST not set, notifications will be logged only");
            Arc::new(LogNotifier)
        }
    };

    let cors = app::cors_layer(&config.cors_origins).expect("Invalid CORS_ORIGINS entry");
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );

    let state = AppState {
        pool,
        config: Arc::new(config),
        cache: Arc::new(ListingCache::new()),
        notifier,
    };
    let router = app::build_app(state, cors);

    tracing::info!(%addr, "Starting server");
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Graceful shutdown complete");
}

/// Resolve on Ctrl-C, or SIGTERM on Unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Ctrl-C handler failed");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "SIGTERM handler failed");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("Ctrl-C received, shutting down"),
        () = terminate => tracing::info!("SIGTERM received, shutting down"),
    }
}
