use std::sync::Arc;

use storefront_events::Notifier;

use crate::cache::ListingCache;
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheap to clone; everything is behind an `Arc` or already `Clone`.
#[derive(Clone)]
pub struct AppState {
    pub pool: storefront_db::DbPool,
    pub config: Arc<ServerConfig>,
    /// Fixed-TTL cache of public listing responses.
    pub cache: Arc<ListingCache>,
    /// Outbound email channel (SMTP or log-only).
    pub notifier: Arc<dyn Notifier>,
}
