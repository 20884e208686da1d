//! Public storefront catalog: product listing and detail, categories, currency.

use axum::extract::{Path, Query, State};
use axum::Json;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use storefront_core::currency::{format_money, DEFAULT_CURRENCY_CODE, DEFAULT_CURRENCY_SYMBOL};
use storefront_core::pagination::{PageInfo, PageRequest};
use storefront_core::types::DbId;
use storefront_db::models::category::CategoryWithCount;
use storefront_db::models::product::{Product, ProductFilter, ProductListItem};
use storefront_db::models::product_image::ProductImage;
use storefront_db::repositories::{CategoryRepo, ProductImageRepo, ProductRepo, SiteConfigRepo};
use storefront_db::DbPool;

use crate::cache::{product_page_key, CATEGORIES_KEY};
use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Query parameters for `GET /products`.
#[derive(Debug, Default, Deserialize)]
pub struct ProductListParams {
    pub category_type: Option<String>,
    pub featured: Option<bool>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

/// A listing entry with its derived prices.
#[derive(Debug, Serialize)]
pub struct ProductCard {
    #[serde(flatten)]
    pub item: ProductListItem,
    pub current_price: Decimal,
    pub has_discount: bool,
    pub formatted_price: String,
}

impl ProductCard {
    pub fn new(item: ProductListItem, symbol: &str) -> Self {
        let current_price = item.current_price();
        Self {
            has_discount: item.has_discount(),
            formatted_price: format_money(symbol, current_price),
            current_price,
            item,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ProductPage {
    pub products: Vec<ProductCard>,
    #[serde(flatten)]
    pub page: PageInfo,
}

/// A product with its gallery and derived prices.
#[derive(Debug, Serialize)]
pub struct ProductDetail {
    #[serde(flatten)]
    pub product: Product,
    pub current_price: Decimal,
    pub has_discount: bool,
    pub formatted_price: String,
    pub images: Vec<ProductImage>,
}

impl ProductDetail {
    pub fn new(product: Product, images: Vec<ProductImage>, symbol: &str) -> Self {
        let current_price = product.current_price();
        Self {
            has_discount: product.has_discount(),
            formatted_price: format_money(symbol, current_price),
            current_price,
            images,
            product,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ProductWithRelated {
    #[serde(flatten)]
    pub detail: ProductDetail,
    pub related: Vec<ProductCard>,
}

#[derive(Debug, Serialize)]
pub struct CurrencyInfo {
    pub currency: String,
    pub symbol: String,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Currency of the active configuration, or USD/$ when there is none.
pub(crate) async fn active_currency(pool: &DbPool) -> Result<CurrencyInfo, sqlx::Error> {
    Ok(match SiteConfigRepo::find_active(pool).await? {
        Some(config) => CurrencyInfo {
            currency: config.currency,
            symbol: config.currency_symbol,
        },
        None => CurrencyInfo {
            currency: DEFAULT_CURRENCY_CODE.to_string(),
            symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
        },
    })
}

fn to_json<T: Serialize>(data: T) -> AppResult<Value> {
    serde_json::to_value(DataResponse { data })
        .map_err(|e| AppError::InternalError(format!("Response serialization error: {e}")))
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/products
///
/// Published products, paginated. Unfiltered pages are served from the
/// listing cache.
pub async fn list_products(
    State(state): State<AppState>,
    Query(params): Query<ProductListParams>,
) -> AppResult<Json<Value>> {
    let request = PageRequest::new(params.page, params.per_page)?;
    let filter = ProductFilter {
        category_type: params
            .category_type
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty()),
        featured_only: params.featured.unwrap_or(false),
    };

    let cache_key = filter
        .is_unfiltered()
        .then(|| product_page_key(request.page, request.per_page));
    if let Some(key) = &cache_key {
        if let Some(hit) = state.cache.get(key).await {
            return Ok(Json(hit));
        }
    }

    let total = ProductRepo::count_published(&state.pool, &filter).await?;
    let page = PageInfo::compute(request, total)?;
    let items = ProductRepo::list_published(&state.pool, &filter, request).await?;
    let currency = active_currency(&state.pool).await?;

    let body = to_json(ProductPage {
        products: items
            .into_iter()
            .map(|item| ProductCard::new(item, &currency.symbol))
            .collect(),
        page,
    })?;

    if let Some(key) = cache_key {
        state
            .cache
            .set(key, body.clone(), state.config.product_cache_ttl())
            .await;
    }
    Ok(Json(body))
}

/// GET /api/v1/products/{id}
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ProductDetail>>> {
    let product = ProductRepo::find_published_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Product", id))?;
    let images = ProductImageRepo::list_for_product(&state.pool, product.id).await?;
    let currency = active_currency(&state.pool).await?;

    Ok(Json(DataResponse {
        data: ProductDetail::new(product, images, &currency.symbol),
    }))
}

/// GET /api/v1/products/by-slug/{slug}
///
/// Includes up to four related published products from the same category.
pub async fn get_product_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<DataResponse<ProductWithRelated>>> {
    // No numeric id to report, so a miss surfaces as the generic 404.
    let product = ProductRepo::find_published_by_slug(&state.pool, &slug)
        .await?
        .ok_or(AppError::Database(sqlx::Error::RowNotFound))?;
    let images = ProductImageRepo::list_for_product(&state.pool, product.id).await?;
    let related = ProductRepo::related(&state.pool, &product).await?;
    let currency = active_currency(&state.pool).await?;

    Ok(Json(DataResponse {
        data: ProductWithRelated {
            related: related
                .into_iter()
                .map(|item| ProductCard::new(item, &currency.symbol))
                .collect(),
            detail: ProductDetail::new(product, images, &currency.symbol),
        },
    }))
}

/// GET /api/v1/categories
///
/// Active categories with published product counts. Cached.
pub async fn list_categories(State(state): State<AppState>) -> AppResult<Json<Value>> {
    if let Some(hit) = state.cache.get(CATEGORIES_KEY).await {
        return Ok(Json(hit));
    }

    let categories = CategoryRepo::list(&state.pool, true).await?;
    let body = to_json(categories)?;
    state
        .cache
        .set(CATEGORIES_KEY, body.clone(), state.config.category_cache_ttl())
        .await;
    Ok(Json(body))
}

/// GET /api/v1/categories/{id}
///
/// Inactive categories are hidden from the storefront.
pub async fn get_category(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<CategoryWithCount>>> {
    let category = CategoryRepo::find_with_count(&state.pool, id)
        .await?
        .filter(|c| c.is_active)
        .ok_or_else(|| AppError::not_found("Category", id))?;
    Ok(Json(DataResponse { data: category }))
}

/// GET /api/v1/currency
pub async fn get_currency(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<CurrencyInfo>>> {
    let data = active_currency(&state.pool).await?;
    Ok(Json(DataResponse { data }))
}
