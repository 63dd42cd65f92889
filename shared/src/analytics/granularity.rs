//! Time granularity for bucketing and period comparison

use chrono::{DateTime, Duration, Months, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Time resolution for charts and KPI windows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

/// Rejected granularity input
///
/// An unrecognized granularity is a request-level validation error; it is
/// never silently defaulted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid granularity '{0}', expected one of: hourly, daily, weekly, monthly, yearly")]
pub struct InvalidGranularity(pub String);

impl FromStr for Granularity {
    type Err = InvalidGranularity;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hourly" => Ok(Self::Hourly),
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            "yearly" => Ok(Self::Yearly),
            other => Err(InvalidGranularity(other.to_string())),
        }
    }
}

impl Granularity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hourly => "hourly",
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
        }
    }

    /// Start of a comparison window ending at `end`.
    ///
    /// Window lengths: hourly = 24h, daily = 7d, weekly = 4w,
    /// monthly = 3 calendar months, yearly = 1 calendar year. Applying
    /// this twice yields the previous window start.
    pub fn window_start(&self, end: DateTime<Utc>) -> DateTime<Utc> {
        match self {
            Self::Hourly => end - Duration::hours(24),
            Self::Daily => end - Duration::days(7),
            Self::Weekly => end - Duration::weeks(4),
            Self::Monthly => end
                .checked_sub_months(Months::new(3))
                .unwrap_or(end - Duration::days(90)),
            Self::Yearly => end
                .checked_sub_months(Months::new(12))
                .unwrap_or(end - Duration::days(365)),
        }
    }
}

impl std::fmt::Display for Granularity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
