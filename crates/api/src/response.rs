//! Shared response envelope types for API handlers.
//!
//! Every JSON response uses a `{ "data": ... }` envelope. Use
//! [`DataResponse`] instead of ad-hoc `json!({ "data": ... })`.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// `{ "id": .. }` body returned by create endpoints that do not echo the row.
#[derive(Debug, Serialize)]
pub struct CreatedId {
    pub id: storefront_core::types::DbId,
}

/// `{ "deleted": n }` body returned by bulk deletes.
#[derive(Debug, Serialize)]
pub struct DeletedCount {
    pub deleted: u64,
}
