//! Synthetic fallback series
//!
//! Generates a plausible-looking series for display continuity when the
//! real order fetch fails. This lives outside the aggregation core on
//! purpose: [`super::aggregate`] never produces sample data, and callers
//! must label a sample series as such instead of blending it with real
//! results.

use chrono::{DateTime, Datelike, Duration, Months, Utc};
use chrono_tz::Tz;
use rand::Rng;

use super::bucket::{TimeSeries, TimeSeriesPoint};
use super::granularity::Granularity;
use super::key::{bucket_key, bucket_label};
use super::round2;

/// Number of synthetic points per granularity.
fn point_count(granularity: Granularity) -> usize {
    match granularity {
        Granularity::Hourly => 24,
        Granularity::Daily => 30,
        Granularity::Weekly => 12,
        Granularity::Monthly => 12,
        Granularity::Yearly => 5,
    }
}

/// Revenue divisor so per-bucket amounts stay proportional to bucket width.
fn revenue_scale(granularity: Granularity) -> f64 {
    match granularity {
        Granularity::Hourly => 24.0,
        Granularity::Daily => 30.0,
        Granularity::Weekly => 4.0,
        Granularity::Monthly => 1.0,
        Granularity::Yearly => 1.0 / 12.0,
    }
}

/// Step `steps` buckets back from `end`.
fn step_back(end: DateTime<Utc>, granularity: Granularity, steps: u32) -> DateTime<Utc> {
    match granularity {
        Granularity::Hourly => end - Duration::hours(steps as i64),
        Granularity::Daily => end - Duration::days(steps as i64),
        Granularity::Weekly => end - Duration::weeks(steps as i64),
        Granularity::Monthly => end
            .checked_sub_months(Months::new(steps))
            .unwrap_or(end - Duration::days(30 * steps as i64)),
        Granularity::Yearly => end
            .checked_sub_months(Months::new(12 * steps))
            .unwrap_or(end - Duration::days(365 * steps as i64)),
    }
}

/// Build a synthetic series ending at `now`.
///
/// Keys and labels come from the real formatters, so a sample series
/// renders exactly like a real one. Revenue follows a base level with a
/// seasonal curve, mild growth toward the past end of the range, and
/// random jitter; paid/unpaid counts split roughly 90/10.
pub fn sample_series(granularity: Granularity, now: DateTime<Utc>, tz: Tz) -> TimeSeries {
    let count = point_count(granularity);
    let scale = revenue_scale(granularity);
    let mut rng = rand::thread_rng();
    let mut points = Vec::with_capacity(count);

    for i in (0..count).rev() {
        let instant = step_back(now, granularity, i as u32);
        let key = bucket_key(instant, granularity, tz);

        let base = 5000.0 + rng.gen_range(0.0..3000.0);
        let month = instant.with_timezone(&tz).month() as f64;
        let seasonal = 1.0 + (month / 12.0 * std::f64::consts::PI).sin() * 0.3;
        let growth = 1.0 + i as f64 / 24.0;

        let revenue = base * seasonal * growth / scale;
        let received = revenue * rng.gen_range(0.9..1.0);
        let order_count = ((revenue / 100.0).round() as i64).max(1);
        let paid = ((order_count as f64) * 0.9).round() as i64;

        points.push(TimeSeriesPoint {
            label: bucket_label(&key, granularity),
            bucket_key: key,
            order_count,
            paid_order_count: paid,
            unpaid_order_count: order_count - paid,
            revenue: round2(revenue),
            received_revenue: round2(received),
            average_order_value: round2(revenue / order_count as f64),
        });
    }

    TimeSeries { points, excluded: 0 }
}
