//! Database access layer (PostgreSQL)

pub mod orders;
pub mod products;

use sqlx::PgPool;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Create the mirror tables when they do not exist yet.
pub async fn init_schema(pool: &PgPool) -> Result<(), BoxError> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS orders (
            shopify_id              TEXT PRIMARY KEY,
            order_name              TEXT NOT NULL,
            created_at              TEXT,
            item_quantity           BIGINT NOT NULL DEFAULT 0,
            total_price             DOUBLE PRECISION,
            total_price_currency    TEXT,
            total_received          DOUBLE PRECISION,
            total_received_currency TEXT,
            total_refunded          DOUBLE PRECISION,
            total_refunded_currency TEXT,
            unpaid                  BOOLEAN NOT NULL DEFAULT FALSE,
            confirmed               BOOLEAN NOT NULL DEFAULT FALSE,
            currency_code           TEXT,
            fully_paid              BOOLEAN NOT NULL DEFAULT FALSE,
            refundable              BOOLEAN NOT NULL DEFAULT FALSE,
            requires_shipping       BOOLEAN NOT NULL DEFAULT FALSE,
            restockable             BOOLEAN NOT NULL DEFAULT FALSE,
            email                   TEXT,
            line_items              JSONB NOT NULL DEFAULT '[]'::jsonb
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_orders_created_at ON orders (created_at DESC)")
        .execute(pool)
        .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS products (
            shopify_id      TEXT PRIMARY KEY,
            product_name    TEXT NOT NULL,
            handle          TEXT NOT NULL,
            vendor          TEXT,
            variant_count   BIGINT NOT NULL DEFAULT 0,
            total_inventory BIGINT NOT NULL DEFAULT 0,
            product_type    TEXT,
            max_price       DOUBLE PRECISION NOT NULL DEFAULT 0,
            min_price       DOUBLE PRECISION NOT NULL DEFAULT 0,
            currency        TEXT,
            preview_url     TEXT,
            status          TEXT NOT NULL DEFAULT 'ACTIVE',
            description     TEXT,
            created_at      TEXT,
            image_url       TEXT,
            image_alt_text  TEXT,
            media           JSONB NOT NULL DEFAULT '[]'::jsonb
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Trivial round-trip used by the keep-alive task.
pub async fn ping(pool: &PgPool) -> Result<(), BoxError> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}
