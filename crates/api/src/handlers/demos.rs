//! Admin follow-up of demo requests.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use storefront_core::status::DemoStatus;
use storefront_core::types::DbId;
use storefront_db::models::demo_request::{DemoRequest, UpdateDemoStatus};
use storefront_db::repositories::DemoRequestRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireStaff;
use crate::query::StatusFilterParams;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct DemoRequestList {
    pub demo_requests: Vec<DemoRequest>,
    /// Pending requests overall, not just in this listing.
    pub pending_count: i64,
}

/// GET /api/v1/admin/demos?status=
pub async fn list_demos(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Query(params): Query<StatusFilterParams>,
) -> AppResult<Json<DataResponse<DemoRequestList>>> {
    let status = params.demo_status()?;
    let demo_requests = DemoRequestRepo::list(&state.pool, status).await?;
    let pending_count = DemoRequestRepo::count_by_status(&state.pool, DemoStatus::Pending).await?;
    Ok(Json(DataResponse {
        data: DemoRequestList {
            demo_requests,
            pending_count,
        },
    }))
}

/// GET /api/v1/admin/demos/{id}
pub async fn get_demo(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<DemoRequest>>> {
    let demo = DemoRequestRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("DemoRequest", id))?;
    Ok(Json(DataResponse { data: demo }))
}

/// PUT /api/v1/admin/demos/{id}/status
///
/// The first move to `contacted` stamps `contacted_at`; later moves keep it.
pub async fn update_demo_status(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateDemoStatus>,
) -> AppResult<Json<DataResponse<DemoRequest>>> {
    let demo = DemoRequestRepo::update_status(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::not_found("DemoRequest", id))?;
    tracing::info!(
        demo_id = id,
        status = %demo.status,
        user_id = user.user_id,
        "Demo request status updated"
    );
    Ok(Json(DataResponse { data: demo }))
}

/// DELETE /api/v1/admin/demos/{id}
pub async fn delete_demo(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !DemoRequestRepo::delete(&state.pool, id).await? {
        return Err(AppError::not_found("DemoRequest", id));
    }
    tracing::info!(demo_id = id, user_id = user.user_id, "Demo request deleted");
    Ok(StatusCode::NO_CONTENT)
}
