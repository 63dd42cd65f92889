//! Shopify sync endpoints: pull from the Admin API, upsert into Postgres

use axum::{Json, extract::State};
use chrono::Utc;
use serde::Serialize;
use shared::error::{ApiError, ApiResult};

use crate::db;
use crate::shopify::ShopifyClient;
use crate::state::AppState;

/// Sync outcome reported to the caller
#[derive(Debug, Serialize)]
pub struct SyncResult {
    pub success: bool,
    /// RFC 3339 instant of this sync
    pub sync_time: String,
    pub synced_count: usize,
}

fn require_shopify(state: &AppState) -> ApiResult<&ShopifyClient> {
    state
        .shopify
        .as_ref()
        .ok_or_else(|| ApiError::internal("Missing Shopify configuration"))
}

/// POST /api/sync/orders
pub async fn sync_orders(State(state): State<AppState>) -> ApiResult<Json<SyncResult>> {
    let client = require_shopify(&state)?;

    let orders = client
        .fetch_orders(state.config.sync_batch_size)
        .await
        .map_err(|e| {
            tracing::error!("Shopify order fetch error: {e}");
            ApiError::upstream("Failed to fetch orders from Shopify")
        })?;
    tracing::info!("Fetched {} orders from Shopify", orders.len());

    db::orders::upsert_orders(&state.pool, &orders)
        .await
        .map_err(|e| {
            tracing::error!("Order upsert error: {e}");
            ApiError::database("Failed to store synced orders")
        })?;

    Ok(Json(SyncResult {
        success: true,
        sync_time: Utc::now().to_rfc3339(),
        synced_count: orders.len(),
    }))
}

/// POST /api/sync/products
pub async fn sync_products(State(state): State<AppState>) -> ApiResult<Json<SyncResult>> {
    let client = require_shopify(&state)?;

    let products = client
        .fetch_products(state.config.sync_batch_size)
        .await
        .map_err(|e| {
            tracing::error!("Shopify product fetch error: {e}");
            ApiError::upstream("Failed to fetch products from Shopify")
        })?;
    tracing::info!("Fetched {} products from Shopify", products.len());

    db::products::upsert_products(&state.pool, &products)
        .await
        .map_err(|e| {
            tracing::error!("Product upsert error: {e}");
            ApiError::database("Failed to store synced products")
        })?;

    Ok(Json(SyncResult {
        success: true,
        sync_time: Utc::now().to_rfc3339(),
        synced_count: products.len(),
    }))
}
