//! Order queries

use shared::models::Order;
use sqlx::PgPool;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

const ORDER_COLUMNS: &str = "shopify_id, order_name, created_at, item_quantity, \
     total_price, total_price_currency, total_received, total_received_currency, \
     total_refunded, total_refunded_currency, unpaid, confirmed, currency_code, \
     fully_paid, refundable, requires_shipping, restockable, email, line_items";

/// One page of orders, newest first
#[derive(Debug, serde::Serialize)]
pub struct OrderPage {
    pub orders: Vec<Order>,
    pub total_count: i64,
    pub page: i64,
    pub limit: i64,
    pub total_pages: i64,
}

/// Upsert a batch of flattened orders on `shopify_id`.
pub async fn upsert_orders(pool: &PgPool, orders: &[Order]) -> Result<(), BoxError> {
    let mut tx = pool.begin().await?;
    for order in orders {
        sqlx::query(
            r#"
            INSERT INTO orders (
                shopify_id, order_name, created_at, item_quantity,
                total_price, total_price_currency, total_received, total_received_currency,
                total_refunded, total_refunded_currency, unpaid, confirmed, currency_code,
                fully_paid, refundable, requires_shipping, restockable, email, line_items
            ) VALUES (
                $1, $2, $3, $4, $5, $6, $7, $8, $9, $10,
                $11, $12, $13, $14, $15, $16, $17, $18, $19
            )
            ON CONFLICT (shopify_id) DO UPDATE SET
                order_name = EXCLUDED.order_name,
                created_at = EXCLUDED.created_at,
                item_quantity = EXCLUDED.item_quantity,
                total_price = EXCLUDED.total_price,
                total_price_currency = EXCLUDED.total_price_currency,
                total_received = EXCLUDED.total_received,
                total_received_currency = EXCLUDED.total_received_currency,
                total_refunded = EXCLUDED.total_refunded,
                total_refunded_currency = EXCLUDED.total_refunded_currency,
                unpaid = EXCLUDED.unpaid,
                confirmed = EXCLUDED.confirmed,
                currency_code = EXCLUDED.currency_code,
                fully_paid = EXCLUDED.fully_paid,
                refundable = EXCLUDED.refundable,
                requires_shipping = EXCLUDED.requires_shipping,
                restockable = EXCLUDED.restockable,
                email = EXCLUDED.email,
                line_items = EXCLUDED.line_items
            "#,
        )
        .bind(&order.shopify_id)
        .bind(&order.order_name)
        .bind(&order.created_at)
        .bind(order.item_quantity)
        .bind(order.total_price)
        .bind(&order.total_price_currency)
        .bind(order.total_received)
        .bind(&order.total_received_currency)
        .bind(order.total_refunded)
        .bind(&order.total_refunded_currency)
        .bind(order.unpaid)
        .bind(order.confirmed)
        .bind(&order.currency_code)
        .bind(order.fully_paid)
        .bind(order.refundable)
        .bind(order.requires_shipping)
        .bind(order.restockable)
        .bind(&order.email)
        .bind(&order.line_items)
        .execute(&mut *tx)
        .await?;
    }
    tx.commit().await?;
    Ok(())
}

/// List orders newest first with total count for pagination.
pub async fn list_orders(pool: &PgPool, page: i64, limit: i64) -> Result<OrderPage, BoxError> {
    let offset = (page - 1) * limit;

    let total_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders")
        .fetch_one(pool)
        .await?;

    let orders: Vec<Order> = sqlx::query_as(&format!(
        "SELECT {ORDER_COLUMNS} FROM orders ORDER BY created_at DESC NULLS LAST LIMIT $1 OFFSET $2"
    ))
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    let total_pages = if total_count > 0 {
        (total_count + limit - 1) / limit
    } else {
        0
    };

    Ok(OrderPage { orders, total_count, page, limit, total_pages })
}

/// Fetch a single order by Shopify GID.
pub async fn get_order(pool: &PgPool, shopify_id: &str) -> Result<Option<Order>, BoxError> {
    let row: Option<Order> = sqlx::query_as(&format!(
        "SELECT {ORDER_COLUMNS} FROM orders WHERE shopify_id = $1"
    ))
    .bind(shopify_id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// Most recent orders for the analytics endpoints.
pub async fn list_recent(pool: &PgPool, limit: i64) -> Result<Vec<Order>, BoxError> {
    let rows: Vec<Order> = sqlx::query_as(&format!(
        "SELECT {ORDER_COLUMNS} FROM orders ORDER BY created_at DESC NULLS LAST LIMIT $1"
    ))
    .bind(limit)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}
