//! Server configuration

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Shopify Admin API credentials
#[derive(Debug, Clone)]
pub struct ShopifyConfig {
    /// Store subdomain (the `{shop}` in `{shop}.myshopify.com`)
    pub store_name: String,
    /// Admin API access token
    pub access_token: String,
    /// Admin API version (e.g. `2025-01`)
    pub api_version: String,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// PostgreSQL connection URL
    pub database_url: String,
    /// HTTP port
    pub http_port: u16,
    /// Shopify credentials; `None` disables the sync endpoints
    pub shopify: Option<ShopifyConfig>,
    /// Business timezone used for bucket keys (env: TIMEZONE)
    pub timezone: chrono_tz::Tz,
    /// How many recent orders feed the analytics endpoints
    pub analytics_order_limit: i64,
    /// How many orders/products one sync pulls from Shopify
    pub sync_batch_size: u32,
    /// Hours between keep-alive DB pings
    pub keepalive_interval_hours: u64,
    /// Environment: development | staging | production
    pub environment: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, BoxError> {
        let environment = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let shopify = match (
            std::env::var("SHOPIFY_STORE_NAME").ok().filter(|s| !s.is_empty()),
            std::env::var("SHOPIFY_ACCESS_TOKEN").ok().filter(|s| !s.is_empty()),
        ) {
            (Some(store_name), Some(access_token)) => Some(ShopifyConfig {
                store_name,
                access_token,
                api_version: std::env::var("SHOPIFY_API_VERSION")
                    .unwrap_or_else(|_| "2025-01".into()),
            }),
            _ => {
                if environment != "development" {
                    return Err(
                        "SHOPIFY_STORE_NAME and SHOPIFY_ACCESS_TOKEN must be set in \
                         non-development environments"
                            .into(),
                    );
                }
                None
            }
        };

        let timezone = match std::env::var("TIMEZONE") {
            Ok(raw) => raw
                .parse::<chrono_tz::Tz>()
                .map_err(|_| format!("Invalid TIMEZONE: {raw}"))?,
            Err(_) => chrono_tz::Tz::UTC,
        };

        Ok(Self {
            database_url: std::env::var("DATABASE_URL").map_err(|_| "DATABASE_URL must be set")?,
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            shopify,
            timezone,
            analytics_order_limit: std::env::var("ANALYTICS_ORDER_LIMIT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1000),
            sync_batch_size: std::env::var("SYNC_BATCH_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(250),
            keepalive_interval_hours: std::env::var("KEEPALIVE_INTERVAL_HOURS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(4),
            environment,
        })
    }
}
