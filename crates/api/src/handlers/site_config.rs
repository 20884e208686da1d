//! Admin view and edit of the active site configuration.

use axum::extract::State;
use axum::Json;
use storefront_db::models::site_config::{SiteConfig, UpdateSiteConfig};
use storefront_db::repositories::SiteConfigRepo;

use crate::error::AppResult;
use crate::middleware::rbac::RequireStaff;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/admin/config
///
/// Creates the default configuration on first access.
pub async fn get_config(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<SiteConfig>>> {
    let config = SiteConfigRepo::get_active(&state.pool).await?;
    Ok(Json(DataResponse { data: config }))
}

/// PUT /api/v1/admin/config
///
/// Partial update of the active configuration. A new currency code without
/// an explicit symbol picks the symbol from the currency table.
pub async fn update_config(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    Json(input): Json<UpdateSiteConfig>,
) -> AppResult<Json<DataResponse<SiteConfig>>> {
    let config = SiteConfigRepo::update_active(&state.pool, &input).await?;
    tracing::info!(
        config_id = config.id,
        currency = %config.currency,
        symbol = %config.currency_symbol,
        user_id = user.user_id,
        "Site configuration updated"
    );
    Ok(Json(DataResponse { data: config }))
}
