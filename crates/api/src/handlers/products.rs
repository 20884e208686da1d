//! Admin product management and product galleries.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use storefront_core::types::DbId;
use storefront_db::models::product::{CreateProduct, Product, UpdateProduct};
use storefront_db::models::product_image::{CreateProductImage, ProductImage};
use storefront_db::repositories::{ProductImageRepo, ProductRepo};

use super::catalog::{active_currency, ProductDetail};
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireStaff;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Products
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/products
///
/// Every product regardless of status, newest first.
pub async fn list_products(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Product>>>> {
    let products = ProductRepo::list_all(&state.pool).await?;
    Ok(Json(DataResponse { data: products }))
}

/// POST /api/v1/admin/products
pub async fn create_product(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    Json(input): Json<CreateProduct>,
) -> AppResult<(StatusCode, Json<DataResponse<Product>>)> {
    let product = ProductRepo::create(&state.pool, &input).await?;
    tracing::info!(
        product_id = product.id,
        slug = %product.slug,
        user_id = user.user_id,
        "Product created"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: product })))
}

/// GET /api/v1/admin/products/{id}
pub async fn get_product(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ProductDetail>>> {
    let product = ProductRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Product", id))?;
    let images = ProductImageRepo::list_for_product(&state.pool, id).await?;
    let currency = active_currency(&state.pool).await?;
    Ok(Json(DataResponse {
        data: ProductDetail::new(product, images, &currency.symbol),
    }))
}

/// PUT /api/v1/admin/products/{id}
pub async fn update_product(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProduct>,
) -> AppResult<Json<DataResponse<Product>>> {
    let product = ProductRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::not_found("Product", id))?;
    tracing::info!(
        product_id = id,
        status = %product.status,
        user_id = user.user_id,
        "Product updated"
    );
    Ok(Json(DataResponse { data: product }))
}

/// DELETE /api/v1/admin/products/{id}
///
/// Fails with 409 while an order line still references the product.
pub async fn delete_product(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !ProductRepo::delete(&state.pool, id).await? {
        return Err(AppError::not_found("Product", id));
    }
    tracing::info!(product_id = id, user_id = user.user_id, "Product deleted");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Gallery
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/products/{id}/images
pub async fn list_images(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<ProductImage>>>> {
    ensure_product_exists(&state, id).await?;
    let images = ProductImageRepo::list_for_product(&state.pool, id).await?;
    Ok(Json(DataResponse { data: images }))
}

/// POST /api/v1/admin/products/{id}/images
pub async fn add_image(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<CreateProductImage>,
) -> AppResult<(StatusCode, Json<DataResponse<ProductImage>>)> {
    ensure_product_exists(&state, id).await?;
    let image = ProductImageRepo::create(&state.pool, id, &input).await?;
    tracing::info!(
        product_id = id,
        image_id = image.id,
        user_id = user.user_id,
        "Product image added"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: image })))
}

/// DELETE /api/v1/admin/products/{id}/images/{image_id}
pub async fn delete_image(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    Path((id, image_id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    if !ProductImageRepo::delete(&state.pool, id, image_id).await? {
        return Err(AppError::not_found("ProductImage", image_id));
    }
    tracing::info!(product_id = id, image_id, user_id = user.user_id, "Product image deleted");
    Ok(StatusCode::NO_CONTENT)
}

async fn ensure_product_exists(state: &AppState, id: DbId) -> AppResult<()> {
    ProductRepo::find_by_id(&state.pool, id)
        .await?
        .map(|_| ())
        .ok_or_else(|| AppError::not_found("Product", id))
}
