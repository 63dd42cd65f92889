//! Order Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Order line item (stored inside the `line_items` JSON column)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItem {
    pub id: String,
    pub name: String,
    pub quantity: i64,
    pub vendor: String,
}

/// Flattened Shopify order, one row per order
///
/// `created_at` keeps the RFC 3339 text the Admin API returns. The
/// analytics core owns parsing it; a row whose timestamp is missing or
/// malformed is excluded from aggregation, never from storage.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Order {
    /// Shopify GID (e.g. `gid://shopify/Order/123`)
    pub shopify_id: String,
    /// Display name (e.g. `#1001`)
    pub order_name: String,
    /// Creation instant, RFC 3339
    pub created_at: Option<String>,
    pub item_quantity: i64,
    /// Total price in currency unit; absent means unknown, counted as 0
    pub total_price: Option<f64>,
    pub total_price_currency: Option<String>,
    /// Amount actually received so far
    pub total_received: Option<f64>,
    pub total_received_currency: Option<String>,
    pub total_refunded: Option<f64>,
    pub total_refunded_currency: Option<String>,
    pub unpaid: bool,
    pub confirmed: bool,
    pub currency_code: Option<String>,
    pub fully_paid: bool,
    pub refundable: bool,
    pub requires_shipping: bool,
    pub restockable: bool,
    pub email: Option<String>,
    /// Line items as JSON (array of [`LineItem`])
    pub line_items: serde_json::Value,
}

impl Order {
    /// Parse `created_at` into an instant.
    ///
    /// Returns `None` for a missing or malformed timestamp; callers treat
    /// such rows as excluded from aggregation.
    pub fn created_at_instant(&self) -> Option<DateTime<Utc>> {
        let raw = self.created_at.as_deref()?;
        DateTime::parse_from_rfc3339(raw)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }
}

impl Default for Order {
    fn default() -> Self {
        Self {
            shopify_id: String::new(),
            order_name: String::new(),
            created_at: None,
            item_quantity: 0,
            total_price: None,
            total_price_currency: None,
            total_received: None,
            total_received_currency: None,
            total_refunded: None,
            total_refunded_currency: None,
            unpaid: false,
            confirmed: false,
            currency_code: None,
            fully_paid: false,
            refundable: false,
            requires_shipping: false,
            restockable: false,
            email: None,
            line_items: serde_json::Value::Array(vec![]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rfc3339_created_at() {
        let order = Order {
            created_at: Some("2024-06-08T12:30:00Z".to_string()),
            ..Default::default()
        };
        let instant = order.created_at_instant().unwrap();
        assert_eq!(instant.to_rfc3339(), "2024-06-08T12:30:00+00:00");
    }

    #[test]
    fn parses_offset_created_at() {
        let order = Order {
            created_at: Some("2024-06-08T12:30:00-04:00".to_string()),
            ..Default::default()
        };
        let instant = order.created_at_instant().unwrap();
        assert_eq!(instant.to_rfc3339(), "2024-06-08T16:30:00+00:00");
    }

    #[test]
    fn missing_or_malformed_created_at_is_none() {
        let missing = Order::default();
        assert!(missing.created_at_instant().is_none());

        let malformed = Order {
            created_at: Some("last tuesday".to_string()),
            ..Default::default()
        };
        assert!(malformed.created_at_instant().is_none());
    }
}
