//! Analytics endpoints: time-bucketed series and period comparison
//!
//! Both endpoints run the pure analytics core over the most recent
//! orders. An unknown granularity is rejected with a validation error,
//! never silently defaulted. When the order fetch itself fails, the
//! series endpoint substitutes a synthetic series for display continuity
//! and says so via the `sample` flag; real and sample data never mix.

use axum::{
    Json,
    extract::{Query, State},
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use shared::analytics::{self, Granularity, PeriodSummary, TimeSeries};
use shared::error::{ApiError, ApiResult};

use crate::db;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AnalyticsQuery {
    pub granularity: String,
}

impl AnalyticsQuery {
    fn granularity(&self) -> ApiResult<Granularity> {
        Ok(self.granularity.parse::<Granularity>()?)
    }
}

/// Series response; `sample` marks a synthetic fallback series
#[derive(Debug, Serialize)]
pub struct SeriesResponse {
    pub granularity: Granularity,
    pub sample: bool,
    #[serde(flatten)]
    pub series: TimeSeries,
}

/// Summary response for the KPI cards
#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub granularity: Granularity,
    #[serde(flatten)]
    pub summary: PeriodSummary,
}

/// GET /api/analytics/series?granularity=
pub async fn get_series(
    State(state): State<AppState>,
    Query(query): Query<AnalyticsQuery>,
) -> ApiResult<Json<SeriesResponse>> {
    let granularity = query.granularity()?;
    let tz = state.config.timezone;

    match db::orders::list_recent(&state.pool, state.config.analytics_order_limit).await {
        Ok(orders) => {
            let series = analytics::aggregate(&orders, granularity, tz);
            if series.excluded > 0 {
                tracing::warn!(
                    excluded = series.excluded,
                    "Orders excluded from series for malformed created_at"
                );
            }
            Ok(Json(SeriesResponse { granularity, sample: false, series }))
        }
        Err(e) => {
            // Display continuity: serve a clearly-labeled synthetic series
            // instead of an empty chart when the database is unreachable.
            tracing::error!("Order fetch for series failed, serving sample data: {e}");
            let series = analytics::sample_series(granularity, Utc::now(), tz);
            Ok(Json(SeriesResponse { granularity, sample: true, series }))
        }
    }
}

/// GET /api/analytics/summary?granularity=
pub async fn get_summary(
    State(state): State<AppState>,
    Query(query): Query<AnalyticsQuery>,
) -> ApiResult<Json<SummaryResponse>> {
    let granularity = query.granularity()?;

    let orders = db::orders::list_recent(&state.pool, state.config.analytics_order_limit)
        .await
        .map_err(|e| {
            tracing::error!("Order fetch for summary failed: {e}");
            ApiError::database("Failed to fetch order data")
        })?;

    let summary = analytics::compare(&orders, granularity, Utc::now());
    if summary.excluded > 0 {
        tracing::warn!(
            excluded = summary.excluded,
            "Orders excluded from summary for malformed created_at"
        );
    }

    Ok(Json(SummaryResponse { granularity, summary }))
}
