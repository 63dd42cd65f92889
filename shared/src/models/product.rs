//! Product Model

use serde::{Deserialize, Serialize};

/// Flattened Shopify product, one row per product
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Product {
    /// Shopify GID (e.g. `gid://shopify/Product/123`)
    pub shopify_id: String,
    pub product_name: String,
    pub handle: String,
    pub vendor: Option<String>,
    pub variant_count: i64,
    pub total_inventory: i64,
    pub product_type: Option<String>,
    pub max_price: f64,
    pub min_price: f64,
    pub currency: Option<String>,
    pub preview_url: Option<String>,
    /// ACTIVE | ARCHIVED | DRAFT
    pub status: String,
    pub description: Option<String>,
    /// Creation instant, RFC 3339
    pub created_at: Option<String>,
    /// First media image URL, if any
    pub image_url: Option<String>,
    pub image_alt_text: Option<String>,
    /// Media entries as JSON (alt/image_id/image_url objects)
    pub media: serde_json::Value,
}

impl Default for Product {
    fn default() -> Self {
        Self {
            shopify_id: String::new(),
            product_name: String::new(),
            handle: String::new(),
            vendor: None,
            variant_count: 0,
            total_inventory: 0,
            product_type: None,
            max_price: 0.0,
            min_price: 0.0,
            currency: None,
            preview_url: None,
            status: "ACTIVE".to_string(),
            description: None,
            created_at: None,
            image_url: None,
            image_alt_text: None,
            media: serde_json::Value::Array(vec![]),
        }
    }
}
