//! Order listing endpoints

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use shared::error::{ApiError, ApiResult};

use crate::db;
use crate::state::AppState;

const MAX_PAGE_SIZE: i64 = 1000;

/// GET /api/orders?page=&limit=
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_page() -> i64 {
    1
}

fn default_limit() -> i64 {
    20
}

impl ListQuery {
    /// Clamp user-supplied paging to sane bounds.
    pub fn normalized(&self) -> (i64, i64) {
        (self.page.max(1), self.limit.clamp(1, MAX_PAGE_SIZE))
    }
}

pub async fn list_orders(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<db::orders::OrderPage>> {
    let (page, limit) = query.normalized();

    let orders = db::orders::list_orders(&state.pool, page, limit)
        .await
        .map_err(|e| {
            tracing::error!("Order listing query error: {e}");
            ApiError::database("Failed to fetch order data")
        })?;

    Ok(Json(orders))
}

/// GET /api/orders/{shopify_id}
pub async fn get_order(
    State(state): State<AppState>,
    Path(shopify_id): Path<String>,
) -> ApiResult<Json<shared::models::Order>> {
    let order = db::orders::get_order(&state.pool, &shopify_id)
        .await
        .map_err(|e| {
            tracing::error!("Order fetch query error: {e}");
            ApiError::database("Failed to fetch order data")
        })?
        .ok_or_else(|| ApiError::not_found("Order"))?;

    Ok(Json(order))
}
