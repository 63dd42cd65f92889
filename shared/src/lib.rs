//! Shared types for the dashboard backend
//!
//! Common types used by the server crate: data models, error types,
//! response structures, and the pure order-analytics core.

pub mod analytics;
pub mod error;
pub mod models;
pub mod response;

// Re-exports
pub use axum::{Json, body};
pub use http;
pub use serde::{Deserialize, Serialize};

// Analytics re-exports (for convenient access)
pub use analytics::{Granularity, PeriodStats, PeriodSummary, TimeSeries, TimeSeriesPoint};
pub use error::{ApiError, ApiResult};
pub use response::ApiResponse;
