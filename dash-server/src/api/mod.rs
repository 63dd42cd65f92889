//! API routes for dash-server

pub mod analytics;
pub mod health;
pub mod orders;
pub mod products;
pub mod sync;

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Create the combined router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/api/orders", get(orders::list_orders))
        .route("/api/orders/{shopify_id}", get(orders::get_order))
        .route("/api/products", get(products::list_products))
        .route("/api/sync/orders", post(sync::sync_orders))
        .route("/api/sync/products", post(sync::sync_products))
        .route("/api/analytics/series", get(analytics::get_series))
        .route("/api/analytics/summary", get(analytics::get_summary))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
