//! Shopify GraphQL response shapes and flattening
//!
//! Deserialized straight from the Admin API payloads (camelCase), then
//! flattened into the mirror-row models with the same defaulting rules
//! throughout: absent money stays `None`, absent flags default to false.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Deserialize;
use shared::models::{LineItem, Order, Product};

/// Rewrite an RFC 3339 timestamp into its UTC `Z` form.
///
/// Shopify may return mixed UTC offsets; the `created_at` column is TEXT
/// and listing queries sort on it, so all rows must share one offset for
/// text order to be chronological. Unparseable input passes through and
/// is excluded downstream by the analytics core.
fn normalize_created_at(raw: Option<String>) -> Option<String> {
    raw.map(|s| {
        DateTime::parse_from_rfc3339(&s)
            .map(|dt| dt.with_timezone(&Utc).to_rfc3339_opts(SecondsFormat::Secs, true))
            .unwrap_or(s)
    })
}

/// `{ shopMoney { amount currencyCode } }`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoneyBag {
    #[serde(default)]
    pub shop_money: Option<ShopMoney>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShopMoney {
    /// Decimal amount serialized as a string by Shopify
    pub amount: String,
    #[serde(default)]
    pub currency_code: Option<String>,
}

impl MoneyBag {
    fn amount(&self) -> Option<f64> {
        self.shop_money.as_ref().map(|m| m.amount.parse().unwrap_or(0.0))
    }

    fn currency(&self) -> Option<String> {
        self.shop_money.as_ref().and_then(|m| m.currency_code.clone())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NodeList<T> {
    #[serde(default = "Vec::new")]
    pub nodes: Vec<T>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItemNode {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub quantity: Option<i64>,
    #[serde(default)]
    pub vendor: Option<String>,
}

/// One order node of the recent-orders query
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderNode {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub current_subtotal_line_items_quantity: Option<i64>,
    #[serde(default)]
    pub total_price_set: Option<MoneyBag>,
    #[serde(default)]
    pub total_received_set: Option<MoneyBag>,
    #[serde(default)]
    pub total_refunded_set: Option<MoneyBag>,
    #[serde(default)]
    pub unpaid: Option<bool>,
    #[serde(default)]
    pub confirmed: Option<bool>,
    #[serde(default)]
    pub currency_code: Option<String>,
    #[serde(default)]
    pub fully_paid: Option<bool>,
    #[serde(default)]
    pub refundable: Option<bool>,
    #[serde(default)]
    pub requires_shipping: Option<bool>,
    #[serde(default)]
    pub restockable: Option<bool>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub line_items: Option<NodeList<LineItemNode>>,
}

impl OrderNode {
    /// Flatten the GraphQL node into a mirror row.
    pub fn flatten(self) -> Order {
        let line_items: Vec<LineItem> = self
            .line_items
            .map(|list| list.nodes)
            .unwrap_or_default()
            .into_iter()
            .map(|item| LineItem {
                id: item.id.unwrap_or_default(),
                name: item.name.unwrap_or_default(),
                quantity: item.quantity.unwrap_or(0),
                vendor: item.vendor.unwrap_or_default(),
            })
            .collect();

        let currency_code = self.currency_code.clone();
        let price = self.total_price_set.unwrap_or_default();
        let received = self.total_received_set.unwrap_or_default();
        let refunded = self.total_refunded_set.unwrap_or_default();

        Order {
            shopify_id: self.id,
            order_name: self.name.unwrap_or_default(),
            created_at: normalize_created_at(self.created_at),
            item_quantity: self.current_subtotal_line_items_quantity.unwrap_or(0),
            total_price: price.amount(),
            total_price_currency: price.currency().or_else(|| currency_code.clone()),
            total_received: received.amount(),
            total_received_currency: received.currency().or_else(|| currency_code.clone()),
            total_refunded: refunded.amount(),
            total_refunded_currency: refunded.currency().or_else(|| currency_code.clone()),
            unpaid: self.unpaid.unwrap_or(false),
            confirmed: self.confirmed.unwrap_or(false),
            currency_code,
            fully_paid: self.fully_paid.unwrap_or(false),
            refundable: self.refundable.unwrap_or(false),
            requires_shipping: self.requires_shipping.unwrap_or(false),
            restockable: self.restockable.unwrap_or(false),
            email: self.email,
            line_items: serde_json::to_value(line_items)
                .unwrap_or(serde_json::Value::Array(vec![])),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct VariantsCount {
    #[serde(default)]
    pub count: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceRange {
    #[serde(default)]
    pub max_variant_price: Option<ShopMoney>,
    #[serde(default)]
    pub min_variant_price: Option<ShopMoney>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MediaImage {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MediaPreview {
    #[serde(default)]
    pub image: Option<MediaImage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MediaNode {
    #[serde(default)]
    pub alt: Option<String>,
    #[serde(default)]
    pub preview: Option<MediaPreview>,
}

/// One product node of the catalog query
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductNode {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub handle: Option<String>,
    #[serde(default)]
    pub vendor: Option<String>,
    #[serde(default)]
    pub variants_count: Option<VariantsCount>,
    #[serde(default)]
    pub total_inventory: Option<i64>,
    #[serde(default)]
    pub product_type: Option<String>,
    #[serde(default)]
    pub price_range_v2: Option<PriceRange>,
    #[serde(default)]
    pub online_store_preview_url: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub media: Option<NodeList<MediaNode>>,
}

impl ProductNode {
    /// Flatten the GraphQL node into a mirror row.
    pub fn flatten(self) -> Product {
        let price_range = self.price_range_v2.unwrap_or_default();
        let parse_amount = |money: &Option<ShopMoney>| {
            money
                .as_ref()
                .map(|m| m.amount.parse().unwrap_or(0.0))
                .unwrap_or(0.0)
        };
        let max_price = parse_amount(&price_range.max_variant_price);
        let min_price = parse_amount(&price_range.min_variant_price);
        let currency = price_range
            .max_variant_price
            .as_ref()
            .and_then(|m| m.currency_code.clone());

        let media_nodes = self.media.map(|list| list.nodes).unwrap_or_default();
        let media: Vec<serde_json::Value> = media_nodes
            .iter()
            .map(|node| {
                let image = node.preview.as_ref().and_then(|p| p.image.as_ref());
                serde_json::json!({
                    "alt": node.alt.clone().unwrap_or_default(),
                    "image_id": image.and_then(|i| i.id.clone()).unwrap_or_default(),
                    "image_url": image.and_then(|i| i.url.clone()).unwrap_or_default(),
                })
            })
            .collect();

        let first_image = media_nodes
            .first()
            .and_then(|node| node.preview.as_ref())
            .and_then(|preview| preview.image.as_ref());

        Product {
            shopify_id: self.id,
            product_name: self.title.unwrap_or_default(),
            handle: self.handle.unwrap_or_default(),
            vendor: self.vendor,
            variant_count: self.variants_count.map(|v| v.count).unwrap_or(0),
            total_inventory: self.total_inventory.unwrap_or(0),
            product_type: self.product_type,
            max_price,
            min_price,
            currency,
            preview_url: self.online_store_preview_url,
            status: self.status.unwrap_or_else(|| "ACTIVE".to_string()),
            description: self.description,
            created_at: normalize_created_at(self.created_at),
            image_url: first_image.and_then(|i| i.url.clone()),
            image_alt_text: media_nodes.first().and_then(|n| n.alt.clone()),
            media: serde_json::Value::Array(media),
        }
    }
}
