//! Bucket key and display label formatting
//!
//! A bucket key is uniquely determined by (instant, granularity) and is
//! zero-padded so that lexicographic order coincides with chronological
//! order. Keys are derived from the wall clock in the business timezone.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use chrono_tz::Tz;

use super::granularity::Granularity;

/// Format an instant into its sortable bucket key.
///
/// | Granularity | Key format         |
/// |-------------|--------------------|
/// | hourly      | `YYYY-MM-DD HH:00` |
/// | daily       | `YYYY-MM-DD`       |
/// | weekly      | `YYYY-Www` (ISO)   |
/// | monthly     | `YYYY-MM`          |
/// | yearly      | `YYYY`             |
///
/// Weekly keys use the ISO-8601 week-based year and week number, so keys
/// around a year boundary stay unambiguous and sortable.
pub fn bucket_key(instant: DateTime<Utc>, granularity: Granularity, tz: Tz) -> String {
    let local = instant.with_timezone(&tz);
    match granularity {
        Granularity::Hourly => local.format("%Y-%m-%d %H:00").to_string(),
        Granularity::Daily => local.format("%Y-%m-%d").to_string(),
        Granularity::Weekly => {
            let iso = local.iso_week();
            format!("{:04}-W{:02}", iso.year(), iso.week())
        }
        Granularity::Monthly => local.format("%Y-%m").to_string(),
        Granularity::Yearly => local.format("%Y").to_string(),
    }
}

/// Format a bucket key into a short display label.
///
/// Total over every key [`bucket_key`] can produce for the same
/// granularity; a foreign key is echoed back unchanged instead of
/// panicking.
pub fn bucket_label(key: &str, granularity: Granularity) -> String {
    match granularity {
        // "2024-06-08 14:00" -> "14:00"
        Granularity::Hourly => key
            .split_once(' ')
            .map(|(_, time)| time.to_string())
            .unwrap_or_else(|| key.to_string()),
        // "2024-06-08" -> "Jun 8"
        Granularity::Daily => NaiveDate::parse_from_str(key, "%Y-%m-%d")
            .map(|d| d.format("%b %-d").to_string())
            .unwrap_or_else(|_| key.to_string()),
        // "2024-W23" -> "Week 23"
        Granularity::Weekly => key
            .split_once("-W")
            .and_then(|(_, week)| week.parse::<u32>().ok())
            .map(|week| format!("Week {week}"))
            .unwrap_or_else(|| key.to_string()),
        // "2024-06" -> "Jun 2024"
        Granularity::Monthly => key
            .split_once('-')
            .and_then(|(year, month)| {
                let year: i32 = year.parse().ok()?;
                let month: u32 = month.parse().ok()?;
                NaiveDate::from_ymd_opt(year, month, 1)
            })
            .map(|d| d.format("%b %Y").to_string())
            .unwrap_or_else(|| key.to_string()),
        // "2024" -> "2024"
        Granularity::Yearly => key.to_string(),
    }
}
