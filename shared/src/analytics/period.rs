//! Current vs previous period comparison
//!
//! Partitions orders into two contiguous, equal-length windows ending at
//! `now` and computes the headline aggregates for each. Window lengths
//! come from [`Granularity::window_start`].
//!
//! Membership is deliberately asymmetric so the boundary instant is
//! never double-counted:
//! - current: `created_at` in `[current_start, now]` (inclusive both ends)
//! - previous: `created_at` in `[previous_start, current_start)` (half-open)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::Order;

use super::granularity::Granularity;
use super::round2;

/// Headline aggregates for the current and previous windows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodStats {
    pub current_revenue: f64,
    pub previous_revenue: f64,
    pub current_order_count: i64,
    pub previous_order_count: i64,
    pub current_avg_value: f64,
    pub previous_avg_value: f64,
    /// Percentage of fully paid orders, 0 when the window is empty
    pub current_paid_rate: f64,
    pub previous_paid_rate: f64,
}

/// Comparison result plus data-quality counters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodSummary {
    pub stats: PeriodStats,
    /// Orders dropped for a missing or malformed `created_at`
    pub excluded: usize,
}

#[derive(Default)]
struct WindowAccum {
    revenue: f64,
    order_count: i64,
    paid: i64,
}

impl WindowAccum {
    fn add(&mut self, order: &Order) {
        self.revenue += order.total_price.unwrap_or(0.0);
        self.order_count += 1;
        if order.fully_paid {
            self.paid += 1;
        }
    }

    fn avg_value(&self) -> f64 {
        if self.order_count > 0 {
            round2(self.revenue / self.order_count as f64)
        } else {
            0.0
        }
    }

    fn paid_rate(&self) -> f64 {
        if self.order_count > 0 {
            round2(100.0 * self.paid as f64 / self.order_count as f64)
        } else {
            0.0
        }
    }
}

/// Compare the window ending at `now` with the window before it.
pub fn compare(orders: &[Order], granularity: Granularity, now: DateTime<Utc>) -> PeriodSummary {
    let current_start = granularity.window_start(now);
    let previous_start = granularity.window_start(current_start);

    let mut current = WindowAccum::default();
    let mut previous = WindowAccum::default();
    let mut excluded = 0usize;

    for order in orders {
        let Some(instant) = order.created_at_instant() else {
            excluded += 1;
            continue;
        };

        if instant >= current_start && instant <= now {
            current.add(order);
        } else if instant >= previous_start && instant < current_start {
            previous.add(order);
        }
        // Anything outside both windows is simply not part of the comparison.
    }

    PeriodSummary {
        stats: PeriodStats {
            current_revenue: round2(current.revenue),
            previous_revenue: round2(previous.revenue),
            current_order_count: current.order_count,
            previous_order_count: previous.order_count,
            current_avg_value: current.avg_value(),
            previous_avg_value: previous.avg_value(),
            current_paid_rate: current.paid_rate(),
            previous_paid_rate: previous.paid_rate(),
        },
        excluded,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn order(created_at: &str, total_price: Option<f64>, fully_paid: bool) -> Order {
        Order {
            created_at: Some(created_at.to_string()),
            total_price,
            fully_paid,
            ..Default::default()
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 8, 0, 0, 0).unwrap()
    }

    #[test]
    fn empty_input_yields_zeroed_stats() {
        let summary = compare(&[], Granularity::Daily, now());
        assert_eq!(summary.stats.current_order_count, 0);
        assert_eq!(summary.stats.previous_order_count, 0);
        assert_eq!(summary.stats.current_avg_value, 0.0);
        assert_eq!(summary.stats.previous_paid_rate, 0.0);
        assert_eq!(summary.excluded, 0);
    }

    #[test]
    fn boundary_instant_counts_in_current_period() {
        // Daily window is 7 days; an order at exactly now - 7d belongs to
        // the current window, not the previous one.
        let summary = compare(
            &[order("2024-06-01T00:00:00Z", Some(10.0), true)],
            Granularity::Daily,
            now(),
        );
        assert_eq!(summary.stats.current_order_count, 1);
        assert_eq!(summary.stats.previous_order_count, 0);
    }

    #[test]
    fn previous_window_is_half_open() {
        // Just before the boundary falls into the previous window.
        let summary = compare(
            &[order("2024-05-31T23:59:59Z", Some(10.0), true)],
            Granularity::Daily,
            now(),
        );
        assert_eq!(summary.stats.current_order_count, 0);
        assert_eq!(summary.stats.previous_order_count, 1);
    }

    #[test]
    fn orders_older_than_both_windows_are_ignored() {
        // Previous daily window starts at 2024-05-25; this is older.
        let summary = compare(
            &[order("2024-05-01T00:00:00Z", Some(10.0), true)],
            Granularity::Daily,
            now(),
        );
        assert_eq!(summary.stats.current_order_count, 0);
        assert_eq!(summary.stats.previous_order_count, 0);
    }

    #[test]
    fn future_orders_are_ignored() {
        let summary = compare(
            &[order("2024-06-09T00:00:00Z", Some(10.0), true)],
            Granularity::Daily,
            now(),
        );
        assert_eq!(summary.stats.current_order_count, 0);
        assert_eq!(summary.stats.previous_order_count, 0);
    }

    #[test]
    fn aggregates_are_computed_per_window() {
        let orders = [
            // current window (last 7 days)
            order("2024-06-05T12:00:00Z", Some(100.0), true),
            order("2024-06-06T12:00:00Z", Some(50.0), false),
            // previous window (7..14 days back)
            order("2024-05-28T12:00:00Z", Some(200.0), true),
        ];
        let summary = compare(&orders, Granularity::Daily, now());
        let stats = &summary.stats;
        assert_eq!(stats.current_revenue, 150.0);
        assert_eq!(stats.current_order_count, 2);
        assert_eq!(stats.current_avg_value, 75.0);
        assert_eq!(stats.current_paid_rate, 50.0);
        assert_eq!(stats.previous_revenue, 200.0);
        assert_eq!(stats.previous_order_count, 1);
        assert_eq!(stats.previous_avg_value, 200.0);
        assert_eq!(stats.previous_paid_rate, 100.0);
    }

    #[test]
    fn paid_rate_stays_within_bounds() {
        let orders: Vec<Order> = (0..10)
            .map(|i| order("2024-06-05T12:00:00Z", Some(10.0), i % 3 == 0))
            .collect();
        let summary = compare(&orders, Granularity::Daily, now());
        assert!(summary.stats.current_paid_rate >= 0.0);
        assert!(summary.stats.current_paid_rate <= 100.0);
    }

    #[test]
    fn malformed_timestamps_are_excluded_and_counted() {
        let orders = [
            order("2024-06-05T12:00:00Z", Some(10.0), true),
            Order {
                created_at: Some("yesterday-ish".to_string()),
                total_price: Some(10.0),
                ..Default::default()
            },
            Order::default(),
        ];
        let summary = compare(&orders, Granularity::Daily, now());
        assert_eq!(summary.excluded, 2);
        assert_eq!(summary.stats.current_order_count, 1);
    }

    #[test]
    fn monthly_windows_use_calendar_months() {
        // now = 2024-06-08: current window [2024-03-08, now],
        // previous window [2023-12-08, 2024-03-08).
        let orders = [
            order("2024-03-08T00:00:00Z", Some(10.0), true), // boundary -> current
            order("2024-03-07T23:59:59Z", Some(20.0), true), // previous
            order("2023-12-08T00:00:00Z", Some(30.0), true), // previous start, inclusive
            order("2023-12-07T23:59:59Z", Some(40.0), true), // before both
        ];
        let summary = compare(&orders, Granularity::Monthly, now());
        assert_eq!(summary.stats.current_order_count, 1);
        assert_eq!(summary.stats.previous_order_count, 2);
        assert_eq!(summary.stats.previous_revenue, 50.0);
    }

    #[test]
    fn compare_is_idempotent() {
        let orders = [
            order("2024-06-05T12:00:00Z", Some(100.0), true),
            order("2024-05-28T12:00:00Z", Some(200.0), false),
        ];
        let first = compare(&orders, Granularity::Weekly, now());
        let second = compare(&orders, Granularity::Weekly, now());
        assert_eq!(first, second);
    }
}
