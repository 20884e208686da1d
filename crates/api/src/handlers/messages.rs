//! Admin inbox for contact and portfolio messages.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use storefront_core::inquiry::INBOX_LIMIT;
use storefront_core::status::MessageKind;
use storefront_core::types::DbId;
use storefront_db::models::message::Message;
use storefront_db::repositories::MessageRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireStaff;
use crate::query::KindFilterParams;
use crate::response::{DataResponse, DeletedCount};
use crate::state::AppState;

/// A message with its short preview.
#[derive(Debug, Serialize)]
pub struct MessageSummary {
    #[serde(flatten)]
    pub message: Message,
    pub preview: String,
}

impl From<Message> for MessageSummary {
    fn from(message: Message) -> Self {
        Self {
            preview: message.preview(),
            message,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct Inbox {
    pub messages: Vec<MessageSummary>,
    pub total: i64,
    pub unread: i64,
}

/// GET /api/v1/admin/messages?kind=
pub async fn list_messages(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Query(params): Query<KindFilterParams>,
) -> AppResult<Json<DataResponse<Inbox>>> {
    let kind = params.kind()?;
    let messages = MessageRepo::list(&state.pool, kind, INBOX_LIMIT).await?;
    let (total, unread) = MessageRepo::counts(&state.pool, kind).await?;
    Ok(Json(DataResponse {
        data: Inbox {
            messages: messages.into_iter().map(MessageSummary::from).collect(),
            total,
            unread,
        },
    }))
}

/// GET /api/v1/admin/messages/{kind}/{id}
///
/// Opening a message marks it read.
pub async fn get_message(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Path((kind, id)): Path<(String, DbId)>,
) -> AppResult<Json<DataResponse<MessageSummary>>> {
    let kind = MessageKind::parse(&kind)?;
    let message = MessageRepo::mark_read(&state.pool, kind, id)
        .await?
        .ok_or_else(|| AppError::not_found("Message", id))?;
    Ok(Json(DataResponse {
        data: MessageSummary::from(message),
    }))
}

/// POST /api/v1/admin/messages/{kind}/{id}/read
pub async fn mark_read(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    Path((kind, id)): Path<(String, DbId)>,
) -> AppResult<Json<DataResponse<MessageSummary>>> {
    let kind = MessageKind::parse(&kind)?;
    let message = MessageRepo::mark_read(&state.pool, kind, id)
        .await?
        .ok_or_else(|| AppError::not_found("Message", id))?;
    tracing::info!(message_id = id, kind = %kind, user_id = user.user_id, "Message marked read");
    Ok(Json(DataResponse {
        data: MessageSummary::from(message),
    }))
}

/// DELETE /api/v1/admin/messages/{kind}/{id}
pub async fn delete_message(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    Path((kind, id)): Path<(String, DbId)>,
) -> AppResult<StatusCode> {
    let kind = MessageKind::parse(&kind)?;
    if !MessageRepo::delete(&state.pool, kind, id).await? {
        return Err(AppError::not_found("Message", id));
    }
    tracing::info!(message_id = id, kind = %kind, user_id = user.user_id, "Message deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/admin/messages/clear?kind=
///
/// Deletes every message of one kind, or of both when `kind` is omitted.
pub async fn clear_messages(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    Query(params): Query<KindFilterParams>,
) -> AppResult<Json<DataResponse<DeletedCount>>> {
    let kind = params.kind()?;
    let deleted = MessageRepo::clear(&state.pool, kind).await?;
    tracing::info!(
        kind = kind.map(MessageKind::as_str).unwrap_or("all"),
        deleted,
        user_id = user.user_id,
        "Messages cleared"
    );
    Ok(Json(DataResponse {
        data: DeletedCount { deleted },
    }))
}
