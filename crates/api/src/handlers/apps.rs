//! Downloadable app showcase. Reads are public; writes need a staff token.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use storefront_core::types::DbId;
use storefront_db::models::app_listing::{AppListing, CreateAppListing, UpdateAppListing};
use storefront_db::repositories::AppListingRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireStaff;
use crate::query::SearchParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/apps?search=
pub async fn list_apps(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<DataResponse<Vec<AppListing>>>> {
    let search = params.search.as_deref().map(str::trim).filter(|s| !s.is_empty());
    let apps = AppListingRepo::list(&state.pool, search).await?;
    Ok(Json(DataResponse { data: apps }))
}

/// GET /api/v1/apps/{id}
pub async fn get_app(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<AppListing>>> {
    let app = AppListingRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("App", id))?;
    Ok(Json(DataResponse { data: app }))
}

/// POST /api/v1/admin/apps
pub async fn create_app(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    Json(input): Json<CreateAppListing>,
) -> AppResult<(StatusCode, Json<DataResponse<AppListing>>)> {
    let app = AppListingRepo::create(&state.pool, &input).await?;
    tracing::info!(app_id = app.id, user_id = user.user_id, "App listing created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: app })))
}

/// PUT /api/v1/admin/apps/{id}
pub async fn update_app(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateAppListing>,
) -> AppResult<Json<DataResponse<AppListing>>> {
    let app = AppListingRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::not_found("App", id))?;
    tracing::info!(app_id = id, user_id = user.user_id, "App listing updated");
    Ok(Json(DataResponse { data: app }))
}

/// DELETE /api/v1/admin/apps/{id}
pub async fn delete_app(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !AppListingRepo::delete(&state.pool, id).await? {
        return Err(AppError::not_found("App", id));
    }
    tracing::info!(app_id = id, user_id = user.user_id, "App listing deleted");
    Ok(StatusCode::NO_CONTENT)
}
