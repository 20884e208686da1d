//! Admin order ledger.

use axum::extract::{Path, Query, State};
use axum::Json;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use storefront_core::currency::format_money;
use storefront_core::status::OrderStatus;
use storefront_core::types::DbId;
use storefront_db::models::order::{Order, OrderItem, OrderTotals};
use storefront_db::repositories::OrderRepo;

use super::catalog::active_currency;
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireStaff;
use crate::query::StatusFilterParams;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct OrderList {
    pub orders: Vec<Order>,
    #[serde(flatten)]
    pub totals: OrderTotals,
    pub formatted_revenue: String,
}

#[derive(Debug, Serialize)]
pub struct OrderLine {
    #[serde(flatten)]
    pub item: OrderItem,
    pub line_total: Decimal,
}

#[derive(Debug, Serialize)]
pub struct OrderDetail {
    #[serde(flatten)]
    pub order: Order,
    pub formatted_total: String,
    pub items: Vec<OrderLine>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateOrderStatus {
    pub status: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/orders?status=
pub async fn list_orders(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Query(params): Query<StatusFilterParams>,
) -> AppResult<Json<DataResponse<OrderList>>> {
    let status = params.order_status()?;
    let orders = OrderRepo::list(&state.pool, status).await?;
    let totals = OrderRepo::totals(&state.pool).await?;
    let currency = active_currency(&state.pool).await?;
    Ok(Json(DataResponse {
        data: OrderList {
            orders,
            formatted_revenue: format_money(&currency.symbol, totals.revenue),
            totals,
        },
    }))
}

/// GET /api/v1/admin/orders/{id}
pub async fn get_order(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<OrderDetail>>> {
    let order = OrderRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Order", id))?;
    let items = OrderRepo::items(&state.pool, id).await?;
    let currency = active_currency(&state.pool).await?;

    Ok(Json(DataResponse {
        data: OrderDetail {
            formatted_total: format_money(&currency.symbol, order.total),
            order,
            items: items
                .into_iter()
                .map(|item| OrderLine {
                    line_total: item.line_total(),
                    item,
                })
                .collect(),
        },
    }))
}

/// PUT /api/v1/admin/orders/{id}/status
///
/// Any status may follow any other.
pub async fn update_order_status(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateOrderStatus>,
) -> AppResult<Json<DataResponse<Order>>> {
    let status = OrderStatus::parse(input.status.trim())?;
    let order = OrderRepo::update_status(&state.pool, id, status)
        .await?
        .ok_or_else(|| AppError::not_found("Order", id))?;
    tracing::info!(order_id = id, status = %status, user_id = user.user_id, "Order status updated");
    Ok(Json(DataResponse { data: order }))
}
