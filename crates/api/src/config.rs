use std::time::Duration;

use storefront_events::delivery::email::DEFAULT_FROM_ADDRESS;

use crate::auth::jwt::JwtConfig;

const DEFAULT_PRODUCT_CACHE_TTL_SECS: u64 = 300;
const DEFAULT_CATEGORY_CACHE_TTL_SECS: u64 = 600;

/// Server configuration loaded from environment variables.
///
/// Everything except the JWT secret has a development default.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Lifetime of cached public product pages.
    pub product_cache_ttl_secs: u64,
    /// Lifetime of the cached public category list.
    pub category_cache_ttl_secs: u64,
    /// Recipient of admin alert emails.
    pub admin_email: String,
    pub jwt: JwtConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                   | Default                      |
    /// |---------------------------|------------------------------|
    /// | `HOST`                    | `0.0.0.0`                    |
    /// | `PORT`                    | `3000`                       |
    /// | `CORS_ORIGINS`            | `http://localhost:5173`      |
    /// | `REQUEST_TIMEOUT_SECS`    | `30`                         |
    /// | `PRODUCT_CACHE_TTL_SECS`  | `300`                        |
    /// | `CATEGORY_CACHE_TTL_SECS` | `600`                        |
    /// | `ADMIN_EMAIL`             | `SMTP_FROM`, then `noreply@storefront.local` |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs = env_u64("REQUEST_TIMEOUT_SECS", 30);
        let product_cache_ttl_secs =
            env_u64("PRODUCT_CACHE_TTL_SECS", DEFAULT_PRODUCT_CACHE_TTL_SECS);
        let category_cache_ttl_secs =
            env_u64("CATEGORY_CACHE_TTL_SECS", DEFAULT_CATEGORY_CACHE_TTL_SECS);

        let admin_email = std::env::var("ADMIN_EMAIL")
            .or_else(|_| std::env::var("SMTP_FROM"))
            .unwrap_or_else(|_| DEFAULT_FROM_ADDRESS.to_string());

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            product_cache_ttl_secs,
            category_cache_ttl_secs,
            admin_email,
            jwt: JwtConfig::from_env(),
        }
    }

    pub fn product_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.product_cache_ttl_secs)
    }

    pub fn category_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.category_cache_ttl_secs)
    }
}

fn env_u64(name: &str, default: u64) -> u64 {
    match std::env::var(name) {
        Ok(value) => value
            .parse()
            .unwrap_or_else(|_| panic!("{name} must be a valid u64")),
        Err(_) => default,
    }
}
