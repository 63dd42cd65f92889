//! Product listing endpoint

use axum::{
    Json,
    extract::{Query, State},
};
use shared::error::{ApiError, ApiResult};

use super::orders::ListQuery;
use crate::db;
use crate::state::AppState;

/// GET /api/products?page=&limit=
pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<db::products::ProductPage>> {
    let (page, limit) = query.normalized();

    let products = db::products::list_products(&state.pool, page, limit)
        .await
        .map_err(|e| {
            tracing::error!("Product listing query error: {e}");
            ApiError::database("Failed to fetch product data")
        })?;

    Ok(Json(products))
}
