//! Public inquiry intake: demo requests, contact and portfolio messages.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use storefront_core::status::MessageKind;
use storefront_db::models::demo_request::CreateDemoRequest;
use storefront_db::models::message::CreateMessage;
use storefront_db::repositories::{DemoRequestRepo, MessageRepo};
use storefront_events::templates;

use crate::error::AppResult;
use crate::notifications::notify;
use crate::response::{CreatedId, DataResponse};
use crate::state::AppState;

type Created = (StatusCode, Json<DataResponse<CreatedId>>);

fn created(id: storefront_core::types::DbId) -> Created {
    (StatusCode::CREATED, Json(DataResponse { data: CreatedId { id } }))
}

/// POST /api/v1/demo-requests
pub async fn submit_demo_request(
    State(state): State<AppState>,
    Json(input): Json<CreateDemoRequest>,
) -> AppResult<Created> {
    let demo = DemoRequestRepo::create(&state.pool, &input).await?;
    tracing::info!(demo_id = demo.id, product_id = ?demo.product_id, "Demo request received");

    notify(&state, |site| templates::demo_request(site, &demo)).await;
    Ok(created(demo.id))
}

/// POST /api/v1/contact
pub async fn submit_contact_message(
    State(state): State<AppState>,
    Json(input): Json<CreateMessage>,
) -> AppResult<Created> {
    let message = MessageRepo::create(&state.pool, MessageKind::Contact, &input).await?;
    tracing::info!(message_id = message.id, "Contact message received");

    notify(&state, |site| templates::contact_message(site, &message)).await;
    Ok(created(message.id))
}

/// POST /api/v1/portfolio/messages
pub async fn submit_portfolio_message(
    State(state): State<AppState>,
    Json(input): Json<CreateMessage>,
) -> AppResult<Created> {
    let message = MessageRepo::create(&state.pool, MessageKind::Portfolio, &input).await?;
    tracing::info!(message_id = message.id, "Portfolio message received");

    notify(&state, |site| vec![templates::portfolio_message(site, &message)]).await;
    Ok(created(message.id))
}
