//! Time-bucketed aggregation of orders
//!
//! Groups a flat order slice into a sorted, sparse time series. Buckets
//! with no orders are never materialized; the series only contains keys
//! that at least one order mapped to.

use std::collections::BTreeMap;

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::models::Order;

use super::granularity::Granularity;
use super::key::{bucket_key, bucket_label};
use super::round2;

/// One bucket of the aggregated series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesPoint {
    /// Sortable bucket key (see [`bucket_key`])
    pub bucket_key: String,
    /// Short display label (see [`bucket_label`])
    pub label: String,
    pub order_count: i64,
    pub paid_order_count: i64,
    pub unpaid_order_count: i64,
    /// Sum of `total_price` (absent price counts as 0)
    pub revenue: f64,
    /// Sum of `total_received`
    pub received_revenue: f64,
    /// `revenue / order_count`, 0 when the bucket would divide by zero
    pub average_order_value: f64,
}

/// Aggregated series plus data-quality counters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeries {
    /// Buckets in ascending key order
    pub points: Vec<TimeSeriesPoint>,
    /// Orders dropped for a missing or malformed `created_at`
    pub excluded: usize,
}

#[derive(Default)]
struct BucketAccum {
    order_count: i64,
    paid: i64,
    unpaid: i64,
    revenue: f64,
    received: f64,
}

/// Group orders into a time series at the given granularity.
///
/// Single pass; orders whose `created_at` does not parse are excluded
/// from every aggregate and counted in [`TimeSeries::excluded`]. An
/// empty input yields an empty series, never an error and never sample
/// data.
pub fn aggregate(orders: &[Order], granularity: Granularity, tz: Tz) -> TimeSeries {
    let mut buckets: BTreeMap<String, BucketAccum> = BTreeMap::new();
    let mut excluded = 0usize;

    for order in orders {
        let Some(instant) = order.created_at_instant() else {
            excluded += 1;
            continue;
        };

        let acc = buckets
            .entry(bucket_key(instant, granularity, tz))
            .or_default();
        acc.order_count += 1;
        if order.fully_paid {
            acc.paid += 1;
        } else {
            acc.unpaid += 1;
        }
        acc.revenue += order.total_price.unwrap_or(0.0);
        acc.received += order.total_received.unwrap_or(0.0);
    }

    // BTreeMap iteration is already ascending by key, which the key
    // format guarantees is chronological.
    let points = buckets
        .into_iter()
        .map(|(key, acc)| {
            let average = if acc.order_count > 0 {
                round2(acc.revenue / acc.order_count as f64)
            } else {
                0.0
            };
            TimeSeriesPoint {
                label: bucket_label(&key, granularity),
                bucket_key: key,
                order_count: acc.order_count,
                paid_order_count: acc.paid,
                unpaid_order_count: acc.unpaid,
                revenue: round2(acc.revenue),
                received_revenue: round2(acc.received),
                average_order_value: average,
            }
        })
        .collect();

    TimeSeries { points, excluded }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::Tz;

    fn order(created_at: &str, total_price: Option<f64>, fully_paid: bool) -> Order {
        Order {
            created_at: Some(created_at.to_string()),
            total_price,
            fully_paid,
            ..Default::default()
        }
    }

    #[test]
    fn empty_input_yields_empty_series() {
        let series = aggregate(&[], Granularity::Monthly, Tz::UTC);
        assert!(series.points.is_empty());
        assert_eq!(series.excluded, 0);
    }

    #[test]
    fn monthly_end_to_end_scenario() {
        let orders = [
            order("2024-01-05T10:00:00Z", Some(100.0), true),
            order("2024-01-20T10:00:00Z", Some(50.0), false),
            order("2024-02-01T10:00:00Z", Some(200.0), true),
        ];
        let series = aggregate(&orders, Granularity::Monthly, Tz::UTC);
        assert_eq!(series.points.len(), 2);
        assert_eq!(series.excluded, 0);

        let jan = &series.points[0];
        assert_eq!(jan.bucket_key, "2024-01");
        assert_eq!(jan.order_count, 2);
        assert_eq!(jan.paid_order_count, 1);
        assert_eq!(jan.unpaid_order_count, 1);
        assert_eq!(jan.revenue, 150.0);
        assert_eq!(jan.average_order_value, 75.0);

        let feb = &series.points[1];
        assert_eq!(feb.bucket_key, "2024-02");
        assert_eq!(feb.order_count, 1);
        assert_eq!(feb.paid_order_count, 1);
        assert_eq!(feb.unpaid_order_count, 0);
        assert_eq!(feb.revenue, 200.0);
        assert_eq!(feb.average_order_value, 200.0);
    }

    #[test]
    fn out_of_order_input_sorts_chronologically() {
        let orders = [
            order("2024-03-01T00:00:00Z", Some(1.0), true),
            order("2024-01-15T00:00:00Z", Some(1.0), true),
            order("2024-02-10T00:00:00Z", Some(1.0), true),
        ];
        let series = aggregate(&orders, Granularity::Monthly, Tz::UTC);
        let keys: Vec<&str> = series.points.iter().map(|p| p.bucket_key.as_str()).collect();
        assert_eq!(keys, ["2024-01", "2024-02", "2024-03"]);
    }

    #[test]
    fn malformed_timestamps_are_excluded_and_counted() {
        let orders = [
            order("2024-01-05T10:00:00Z", Some(100.0), true),
            Order {
                created_at: Some("not-a-date".to_string()),
                total_price: Some(999.0),
                ..Default::default()
            },
            Order::default(), // created_at missing
        ];
        let series = aggregate(&orders, Granularity::Daily, Tz::UTC);
        assert_eq!(series.excluded, 2);
        assert_eq!(series.points.len(), 1);
        assert_eq!(series.points[0].order_count, 1);
        assert_eq!(series.points[0].revenue, 100.0);
    }

    #[test]
    fn absent_price_counts_as_zero_revenue() {
        // The order still counts toward order_count; only its revenue is 0.
        let orders = [
            order("2024-01-05T10:00:00Z", Some(100.0), true),
            order("2024-01-06T10:00:00Z", None, false),
        ];
        let series = aggregate(&orders, Granularity::Monthly, Tz::UTC);
        assert_eq!(series.points.len(), 1);
        let point = &series.points[0];
        assert_eq!(point.order_count, 2);
        assert_eq!(point.revenue, 100.0);
        assert_eq!(point.average_order_value, 50.0);
    }

    #[test]
    fn zero_price_is_included_not_dropped() {
        let orders = [order("2024-01-05T10:00:00Z", Some(0.0), true)];
        let series = aggregate(&orders, Granularity::Monthly, Tz::UTC);
        assert_eq!(series.points[0].order_count, 1);
        assert_eq!(series.points[0].revenue, 0.0);
        assert_eq!(series.points[0].average_order_value, 0.0);
    }

    #[test]
    fn received_revenue_is_summed_separately() {
        let orders = [
            Order {
                created_at: Some("2024-01-05T10:00:00Z".to_string()),
                total_price: Some(100.0),
                total_received: Some(80.0),
                fully_paid: false,
                ..Default::default()
            },
            Order {
                created_at: Some("2024-01-06T10:00:00Z".to_string()),
                total_price: Some(50.0),
                total_received: None,
                fully_paid: true,
                ..Default::default()
            },
        ];
        let series = aggregate(&orders, Granularity::Monthly, Tz::UTC);
        assert_eq!(series.points[0].revenue, 150.0);
        assert_eq!(series.points[0].received_revenue, 80.0);
    }

    #[test]
    fn every_parseable_order_lands_in_exactly_one_bucket() {
        let orders: Vec<Order> = (0..50)
            .map(|i| {
                order(
                    &format!("2024-{:02}-{:02}T08:00:00Z", 1 + i % 12, 1 + i % 28),
                    Some(10.0),
                    i % 2 == 0,
                )
            })
            .collect();
        for g in [
            Granularity::Hourly,
            Granularity::Daily,
            Granularity::Weekly,
            Granularity::Monthly,
            Granularity::Yearly,
        ] {
            let series = aggregate(&orders, g, Tz::UTC);
            let total: i64 = series.points.iter().map(|p| p.order_count).sum();
            assert_eq!(total as usize + series.excluded, orders.len());
        }
    }

    #[test]
    fn aggregate_is_idempotent() {
        let orders = [
            order("2024-01-05T10:00:00Z", Some(100.0), true),
            order("2024-02-01T10:00:00Z", Some(200.0), false),
        ];
        let first = aggregate(&orders, Granularity::Monthly, Tz::UTC);
        let second = aggregate(&orders, Granularity::Monthly, Tz::UTC);
        assert_eq!(first, second);
    }

    #[test]
    fn averages_are_finite_and_non_negative() {
        let orders = [
            order("2024-01-05T10:00:00Z", Some(0.0), true),
            order("2024-01-05T11:00:00Z", None, false),
        ];
        let series = aggregate(&orders, Granularity::Hourly, Tz::UTC);
        for point in &series.points {
            assert!(point.average_order_value.is_finite());
            assert!(point.average_order_value >= 0.0);
        }
    }
}
