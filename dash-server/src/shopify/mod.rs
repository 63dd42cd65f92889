//! Shopify Admin API integration via GraphQL over REST (no SDK dependency)

mod types;

pub use types::{OrderNode, ProductNode};

use shared::models::{Order, Product};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// GraphQL document for the recent-orders query
const ORDERS_QUERY: &str = r#"
query RecentOrders($first: Int!) {
  orders(sortKey: CREATED_AT, reverse: true, first: $first) {
    nodes {
      id
      name
      createdAt
      currentSubtotalLineItemsQuantity
      totalPriceSet { shopMoney { amount currencyCode } }
      totalReceivedSet { shopMoney { amount currencyCode } }
      totalRefundedSet { shopMoney { amount currencyCode } }
      unpaid
      confirmed
      currencyCode
      fullyPaid
      refundable
      requiresShipping
      restockable
      email
      lineItems(first: 50) { nodes { id name quantity vendor } }
    }
  }
}
"#;

/// GraphQL document for the product catalog query
const PRODUCTS_QUERY: &str = r#"
query Products($first: Int!) {
  products(first: $first) {
    nodes {
      id
      title
      handle
      vendor
      variantsCount { count }
      totalInventory
      productType
      priceRangeV2 {
        maxVariantPrice { amount currencyCode }
        minVariantPrice { amount currencyCode }
      }
      onlineStorePreviewUrl
      status
      description(truncateAt: 1000)
      createdAt
      media(first: 10) { nodes { alt preview { image { id url } } } }
    }
  }
}
"#;

/// Shopify Admin API client
#[derive(Clone)]
pub struct ShopifyClient {
    http: reqwest::Client,
    endpoint: String,
    access_token: String,
}

impl ShopifyClient {
    pub fn new(store_name: &str, access_token: &str, api_version: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: format!(
                "https://{store_name}.myshopify.com/admin/api/{api_version}/graphql.json"
            ),
            access_token: access_token.to_string(),
        }
    }

    /// Fetch the most recent orders, flattened into mirror rows.
    pub async fn fetch_orders(&self, first: u32) -> Result<Vec<Order>, BoxError> {
        let data = self
            .graphql(ORDERS_QUERY, serde_json::json!({ "first": first }))
            .await?;
        let nodes: Vec<OrderNode> =
            serde_json::from_value(data["orders"]["nodes"].clone())
                .map_err(|e| format!("Unexpected Shopify orders payload: {e}"))?;
        Ok(nodes.into_iter().map(OrderNode::flatten).collect())
    }

    /// Fetch the product catalog, flattened into mirror rows.
    pub async fn fetch_products(&self, first: u32) -> Result<Vec<Product>, BoxError> {
        let data = self
            .graphql(PRODUCTS_QUERY, serde_json::json!({ "first": first }))
            .await?;
        let nodes: Vec<ProductNode> =
            serde_json::from_value(data["products"]["nodes"].clone())
                .map_err(|e| format!("Unexpected Shopify products payload: {e}"))?;
        Ok(nodes.into_iter().map(ProductNode::flatten).collect())
    }

    /// POST one GraphQL document and return the `data` object.
    async fn graphql(
        &self,
        query: &str,
        variables: serde_json::Value,
    ) -> Result<serde_json::Value, BoxError> {
        let resp = self
            .http
            .post(&self.endpoint)
            .header("X-Shopify-Access-Token", &self.access_token)
            .json(&serde_json::json!({ "query": query, "variables": variables }))
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(format!("Shopify API returned HTTP {status}").into());
        }

        let body: serde_json::Value = resp.json().await?;
        if let Some(errors) = body.get("errors").and_then(|e| e.as_array()) {
            if !errors.is_empty() {
                return Err(format!("Shopify GraphQL errors: {errors:?}").into());
            }
        }

        body.get("data")
            .cloned()
            .ok_or_else(|| "Shopify response has no data object".into())
    }
}
