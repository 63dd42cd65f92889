//! Application state for dash-server

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use crate::config::Config;
use crate::shopify::ShopifyClient;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// PostgreSQL connection pool
    pub pool: PgPool,
    /// Shopify Admin API client; `None` when credentials are not configured
    pub shopify: Option<ShopifyClient>,
    /// Server configuration
    pub config: Config,
}

impl AppState {
    pub async fn new(config: Config) -> Result<Self, BoxError> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(&config.database_url)
            .await?;

        db_migrate(&pool).await?;

        let shopify = config.shopify.as_ref().map(|cfg| {
            ShopifyClient::new(&cfg.store_name, &cfg.access_token, &cfg.api_version)
        });
        if shopify.is_none() {
            tracing::warn!(
                "Shopify credentials not configured; /api/sync endpoints are disabled"
            );
        }

        Ok(Self { pool, shopify, config })
    }
}

async fn db_migrate(pool: &PgPool) -> Result<(), BoxError> {
    crate::db::init_schema(pool).await?;
    Ok(())
}
