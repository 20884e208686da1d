//! Admin dashboard overview.

use axum::extract::State;
use axum::Json;
use serde::Serialize;
use storefront_core::status::MessageKind;
use storefront_db::models::category::Category;
use storefront_db::models::dashboard::DashboardStats;
use storefront_db::models::demo_request::DemoRequest;
use storefront_db::models::order::Order;
use storefront_db::models::product::Product;
use storefront_db::DbPool;
use storefront_db::repositories::{
    CategoryRepo, DashboardRepo, DemoRequestRepo, MessageRepo, OrderRepo, ProductRepo,
};

use super::messages::MessageSummary;
use crate::error::AppResult;
use crate::middleware::rbac::RequireStaff;
use crate::response::DataResponse;
use crate::state::AppState;

const RECENT_LIMIT: i64 = 5;
const RECENT_UNREAD_LIMIT: i64 = 3;

#[derive(Debug, Serialize)]
pub struct RecentActivity {
    pub products: Vec<Product>,
    pub categories: Vec<Category>,
    pub demo_requests: Vec<DemoRequest>,
    pub orders: Vec<Order>,
    pub unread_contact_messages: Vec<MessageSummary>,
    pub unread_portfolio_messages: Vec<MessageSummary>,
}

/// GET /api/v1/admin/stats
pub async fn stats(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<DashboardStats>>> {
    let stats = DashboardRepo::stats(&state.pool).await?;
    Ok(Json(DataResponse { data: stats }))
}

/// GET /api/v1/admin/recent
pub async fn recent(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<RecentActivity>>> {
    let pool = &state.pool;
    let data = RecentActivity {
        products: ProductRepo::recent(pool, RECENT_LIMIT).await?,
        categories: CategoryRepo::recent(pool, RECENT_LIMIT).await?,
        demo_requests: DemoRequestRepo::recent(pool, RECENT_LIMIT).await?,
        orders: OrderRepo::recent(pool, RECENT_LIMIT).await?,
        unread_contact_messages: unread(pool, MessageKind::Contact).await?,
        unread_portfolio_messages: unread(pool, MessageKind::Portfolio).await?,
    };
    Ok(Json(DataResponse { data }))
}

async fn unread(pool: &DbPool, kind: MessageKind) -> Result<Vec<MessageSummary>, sqlx::Error> {
    let rows = MessageRepo::recent_unread(pool, kind, RECENT_UNREAD_LIMIT).await?;
    Ok(rows.into_iter().map(MessageSummary::from).collect())
}
