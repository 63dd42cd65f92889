//! dash-server — Shopify order dashboard backend
//!
//! Long-running service that:
//! - Mirrors orders and products from the Shopify Admin API into Postgres
//! - Serves paginated order/product listings
//! - Computes time-bucketed series and period comparisons for the dashboard
//! - Keeps the hosted database warm with a periodic ping

mod api;
mod config;
mod db;
mod keepalive;
mod shopify;
mod state;

use config::Config;
use state::AppState;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    // Load .env file
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dash_server=info,tower_http=info".into()),
        )
        .init();

    let config = Config::from_env()?;

    tracing::info!(
        "Starting dash-server (env: {}, tz: {})",
        config.environment,
        config.timezone
    );

    // Initialize application state
    let state = AppState::new(config.clone()).await?;

    // Keep-alive ping owned by the process lifecycle, not a module singleton
    keepalive::spawn(
        state.pool.clone(),
        std::time::Duration::from_secs(config.keepalive_interval_hours * 3600),
    );

    // Start HTTP server
    let app = api::create_router(state);
    let http_addr = format!("0.0.0.0:{}", config.http_port);
    let listener = tokio::net::TcpListener::bind(&http_addr).await?;
    tracing::info!("dash-server HTTP listening on {http_addr}");

    axum::serve(listener, app).await?;

    Ok(())
}
