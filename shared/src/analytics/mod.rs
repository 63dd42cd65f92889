//! Order analytics core
//!
//! Pure, stateless transformations over flattened order rows:
//!
//! - [`bucket`] — groups orders into a sorted time series per granularity
//! - [`period`] — current vs previous window comparison for KPI cards
//! - [`key`] — bucket key and display label formatting
//! - [`sample`] — synthetic fallback series for display continuity
//!
//! No I/O, no shared state; every call is a single bounded pass over an
//! in-memory slice. Rows with a missing or malformed `created_at` are
//! excluded from every aggregate and reported via an `excluded` count.

pub mod bucket;
pub mod granularity;
pub mod key;
pub mod period;
pub mod sample;

pub use bucket::{TimeSeries, TimeSeriesPoint, aggregate};
pub use granularity::{Granularity, InvalidGranularity};
pub use key::{bucket_key, bucket_label};
pub use period::{PeriodStats, PeriodSummary, compare};
pub use sample::sample_series;

/// Round a currency amount to 2 decimal places for output.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
