//! Request handlers for the backing service.

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequestParts, Path, Query, State};
use axum::http::request::Parts;
use axum::http::{StatusCode, Uri};
use axum::Json;
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, info};

use super::error::ApiError;
use super::state::ServiceState;
use super::store::{NewOrder, Order, Product, ProductFilter, PublicUser, StoreStats};

pub const API_KEY_HEADER: &str = "x-api-key";

fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub(super) async fn health(State(state): State<ServiceState>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": now_rfc3339(),
        "uptime": state.uptime().as_secs_f64(),
    }))
}

pub(super) async fn get_user(
    State(state): State<ServiceState>,
    Path(id): Path<String>,
) -> Result<Json<PublicUser>, ApiError> {
    state
        .store()
        .user(&id)
        .await
        .map(Json)
        .ok_or_else(|| ApiError::user_not_found(&id))
}

/// Raw query string values; bad numbers disable the filter instead of
/// rejecting the request.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ProductQuery {
    category: Option<String>,
    min_price: Option<String>,
    max_price: Option<String>,
    in_stock: Option<String>,
}

impl From<ProductQuery> for ProductFilter {
    fn from(query: ProductQuery) -> Self {
        let price = |raw: Option<String>| raw.and_then(|value| value.trim().parse::<f64>().ok());
        Self {
            category: query.category.filter(|c| !c.is_empty()),
            min_price: price(query.min_price),
            max_price: price(query.max_price),
            in_stock: query.in_stock.as_deref() == Some("true"),
        }
    }
}

#[derive(Debug, Serialize)]
pub(super) struct ProductList {
    count: usize,
    products: Vec<Product>,
}

pub(super) async fn list_products(
    State(state): State<ServiceState>,
    Query(query): Query<ProductQuery>,
) -> Json<ProductList> {
    let filter = ProductFilter::from(query);
    let products = state.store().products(&filter).await;
    debug!(?filter, count = products.len(), "listing products");
    Json(ProductList {
        count: products.len(),
        products,
    })
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct OrderRequest {
    user_id: Option<String>,
    product_id: Option<u32>,
    quantity: Option<u32>,
}

impl OrderRequest {
    fn into_new_order(self) -> Option<NewOrder> {
        let user_id = self.user_id.filter(|id| !id.is_empty())?;
        let product_id = self.product_id.filter(|id| *id != 0)?;
        let quantity = self.quantity.filter(|q| *q != 0)?;
        Some(NewOrder {
            user_id,
            product_id,
            quantity,
        })
    }
}

pub(super) async fn create_order(
    State(state): State<ServiceState>,
    payload: Result<Json<OrderRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Order>), ApiError> {
    let Json(request) = payload.map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;
    let request = request
        .into_new_order()
        .ok_or_else(|| ApiError::bad_request("userId, productId, and quantity are required"))?;

    let order = state.store().create_order(request).await?;
    info!(order_id = order.id, total = order.total_price, "order created");
    Ok((StatusCode::CREATED, Json(order)))
}

/// Extractor that only succeeds when `x-api-key` matches the configured key.
pub(super) struct RequireAdmin;

impl FromRequestParts<ServiceState> for RequireAdmin {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ServiceState,
    ) -> Result<Self, Self::Rejection> {
        let presented = parts
            .headers
            .get(API_KEY_HEADER)
            .and_then(|value| value.to_str().ok());
        match (state.api_key(), presented) {
            (Some(expected), Some(presented)) if expected == presented => Ok(Self),
            _ => Err(ApiError::forbidden()),
        }
    }
}

pub(super) async fn delete_user(
    _admin: RequireAdmin,
    State(state): State<ServiceState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    if !state.store().delete_user(&id).await {
        return Err(ApiError::user_not_found(&id));
    }
    info!(user_id = %id, "user deleted");
    Ok(Json(json!({ "message": "User deleted successfully", "userId": id })))
}

pub(super) async fn stats(_admin: RequireAdmin, State(state): State<ServiceState>) -> Json<StoreStats> {
    Json(state.store().stats().await)
}

pub(super) async fn reset(_admin: RequireAdmin, State(state): State<ServiceState>) -> Json<Value> {
    state.store().reset().await;
    info!("order data reset");
    Json(json!({ "message": "Database reset successfully", "timestamp": now_rfc3339() }))
}

pub(super) async fn not_found(uri: Uri) -> ApiError {
    ApiError::not_found(uri.path())
}
