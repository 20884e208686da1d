//! Public checkout.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use storefront_core::error::CoreError;
use storefront_core::types::DbId;
use storefront_db::models::order::{NewOrderItem, PlaceOrder};
use storefront_db::repositories::OrderRepo;
use storefront_events::templates;

use crate::error::AppResult;
use crate::notifications::notify;
use crate::response::DataResponse;
use crate::state::AppState;

/// Checkout submission. Field presence is checked by the order rules so
/// that a missing field is reported by name.
#[derive(Debug, Default, Deserialize)]
pub struct PlaceOrderRequest {
    pub customer_name: Option<String>,
    pub customer_email: Option<String>,
    pub customer_phone: Option<String>,
    pub customer_address: Option<String>,
    pub products: Option<Vec<NewOrderItem>>,
    /// Defaults to `total`.
    pub subtotal: Option<Decimal>,
    /// Defaults to 0.
    pub tax: Option<Decimal>,
    pub total: Option<Decimal>,
    pub payment_method: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PlacedOrderResponse {
    pub id: DbId,
    pub order_number: String,
    /// Lines that were actually recorded.
    pub item_count: usize,
}

impl PlaceOrderRequest {
    fn into_order(self) -> Result<PlaceOrder, CoreError> {
        let total = self
            .total
            .ok_or_else(|| CoreError::Validation("total: is required".into()))?;
        let items = self
            .products
            .ok_or_else(|| CoreError::Validation("products: is required".into()))?;

        Ok(PlaceOrder {
            customer_name: self.customer_name.unwrap_or_default(),
            customer_email: self.customer_email.unwrap_or_default(),
            customer_phone: self.customer_phone.unwrap_or_default(),
            customer_address: self.customer_address.unwrap_or_default(),
            subtotal: self.subtotal.unwrap_or(total),
            tax: self.tax.unwrap_or(Decimal::ZERO),
            total,
            payment_method: self.payment_method.unwrap_or_default(),
            items,
        })
    }
}

/// POST /api/v1/orders
///
/// Lines naming a missing or unpublished product are dropped; the order is
/// still created. The customer gets a confirmation email after commit.
pub async fn place_order(
    State(state): State<AppState>,
    Json(input): Json<PlaceOrderRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<PlacedOrderResponse>>)> {
    let order = input.into_order()?;
    let requested_lines = order.items.len();
    let placed = OrderRepo::place(&state.pool, &order).await?;

    tracing::info!(
        order_id = placed.order.id,
        order_number = %placed.order.order_number,
        requested_lines,
        recorded_lines = placed.items.len(),
        "Order placed"
    );

    notify(&state, |site| {
        vec![templates::order_confirmation(site, &placed.order)]
    })
    .await;

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: PlacedOrderResponse {
                id: placed.order.id,
                order_number: placed.order.order_number.clone(),
                item_count: placed.items.len(),
            },
        }),
    ))
}
