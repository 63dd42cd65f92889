//! Keep-alive DB ping
//!
//! Hosted Postgres tiers idle out after a few hours without traffic. A
//! periodic trivial round-trip keeps the instance warm. The task is
//! spawned explicitly from `main` and owned by the process lifecycle.

use sqlx::PgPool;
use std::time::Duration;
use tokio::task::JoinHandle;

pub fn spawn(pool: PgPool, every: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(every);
        // First tick fires immediately; that doubles as a startup probe.
        loop {
            interval.tick().await;
            match crate::db::ping(&pool).await {
                Ok(()) => tracing::debug!("Keep-alive ping ok"),
                Err(e) => tracing::warn!("Keep-alive ping failed: {e}"),
            }
        }
    })
}
