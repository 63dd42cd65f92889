//! End-to-end exercise of the analytics surface the server consumes:
//! same order batch through the bucketer and the period comparator.

use chrono::{TimeZone, Utc};
use chrono_tz::Tz;
use shared::analytics::{self, Granularity};
use shared::models::Order;

fn order(created_at: &str, total_price: f64, total_received: f64, fully_paid: bool) -> Order {
    Order {
        shopify_id: format!("gid://shopify/Order/{created_at}"),
        order_name: "#1001".to_string(),
        created_at: Some(created_at.to_string()),
        total_price: Some(total_price),
        total_received: Some(total_received),
        fully_paid,
        ..Default::default()
    }
}

fn batch() -> Vec<Order> {
    vec![
        // A quiet January, a busy February, one bad row.
        order("2024-01-10T09:00:00Z", 120.0, 120.0, true),
        order("2024-02-02T14:00:00Z", 80.0, 40.0, false),
        order("2024-02-14T18:30:00Z", 60.0, 60.0, true),
        order("2024-02-28T23:59:00Z", 40.0, 0.0, false),
        Order {
            created_at: Some("corrupted".to_string()),
            total_price: Some(500.0),
            ..Default::default()
        },
        // Recent orders for the daily comparison windows.
        order("2024-06-05T10:00:00Z", 200.0, 200.0, true),
        order("2024-05-30T10:00:00Z", 100.0, 100.0, true),
    ]
}

#[test]
fn series_and_summary_agree_on_exclusions() {
    let orders = batch();
    let now = Utc.with_ymd_and_hms(2024, 6, 8, 0, 0, 0).unwrap();

    let series = analytics::aggregate(&orders, Granularity::Monthly, Tz::UTC);
    let summary = analytics::compare(&orders, Granularity::Daily, now);

    assert_eq!(series.excluded, 1);
    assert_eq!(summary.excluded, 1);

    let counted: i64 = series.points.iter().map(|p| p.order_count).sum();
    assert_eq!(counted as usize, orders.len() - series.excluded);
}

#[test]
fn monthly_series_shape() {
    let series = analytics::aggregate(&batch(), Granularity::Monthly, Tz::UTC);
    let keys: Vec<&str> = series.points.iter().map(|p| p.bucket_key.as_str()).collect();
    assert_eq!(keys, ["2024-01", "2024-02", "2024-05", "2024-06"]);

    let feb = &series.points[1];
    assert_eq!(feb.order_count, 3);
    assert_eq!(feb.paid_order_count, 1);
    assert_eq!(feb.unpaid_order_count, 2);
    assert_eq!(feb.revenue, 180.0);
    assert_eq!(feb.received_revenue, 100.0);
    assert_eq!(feb.average_order_value, 60.0);
    assert_eq!(feb.label, "Feb 2024");
}

#[test]
fn daily_summary_shape() {
    let now = Utc.with_ymd_and_hms(2024, 6, 8, 0, 0, 0).unwrap();
    let summary = analytics::compare(&batch(), Granularity::Daily, now);
    let stats = &summary.stats;

    // Current window [06-01, 06-08]: the 200.0 order.
    assert_eq!(stats.current_order_count, 1);
    assert_eq!(stats.current_revenue, 200.0);
    assert_eq!(stats.current_paid_rate, 100.0);

    // Previous window [05-25, 06-01): the 100.0 order.
    assert_eq!(stats.previous_order_count, 1);
    assert_eq!(stats.previous_revenue, 100.0);
    assert_eq!(stats.previous_avg_value, 100.0);
}

#[test]
fn sample_series_renders_like_a_real_one() {
    let now = Utc.with_ymd_and_hms(2024, 6, 8, 0, 0, 0).unwrap();
    let sample = analytics::sample_series(Granularity::Weekly, now, Tz::UTC);
    assert_eq!(sample.points.len(), 12);
    for point in &sample.points {
        // Same key/label scheme as the real aggregation output.
        assert!(point.bucket_key.contains("-W"), "key {}", point.bucket_key);
        assert!(point.label.starts_with("Week "), "label {}", point.label);
    }
}
