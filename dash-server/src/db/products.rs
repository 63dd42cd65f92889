//! Product queries

use shared::models::Product;
use sqlx::PgPool;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

const PRODUCT_COLUMNS: &str = "shopify_id, product_name, handle, vendor, variant_count, \
     total_inventory, product_type, max_price, min_price, currency, preview_url, \
     status, description, created_at, image_url, image_alt_text, media";

/// One page of products, newest first
#[derive(Debug, serde::Serialize)]
pub struct ProductPage {
    pub products: Vec<Product>,
    pub total_count: i64,
    pub page: i64,
    pub limit: i64,
    pub total_pages: i64,
}

/// Upsert a batch of flattened products on `shopify_id`.
pub async fn upsert_products(pool: &PgPool, products: &[Product]) -> Result<(), BoxError> {
    let mut tx = pool.begin().await?;
    for product in products {
        sqlx::query(
            r#"
            INSERT INTO products (
                shopify_id, product_name, handle, vendor, variant_count,
                total_inventory, product_type, max_price, min_price, currency,
                preview_url, status, description, created_at, image_url,
                image_alt_text, media
            ) VALUES (
                $1, $2, $3, $4, $5, $6, $7, $8, $9, $10,
                $11, $12, $13, $14, $15, $16, $17
            )
            ON CONFLICT (shopify_id) DO UPDATE SET
                product_name = EXCLUDED.product_name,
                handle = EXCLUDED.handle,
                vendor = EXCLUDED.vendor,
                variant_count = EXCLUDED.variant_count,
                total_inventory = EXCLUDED.total_inventory,
                product_type = EXCLUDED.product_type,
                max_price = EXCLUDED.max_price,
                min_price = EXCLUDED.min_price,
                currency = EXCLUDED.currency,
                preview_url = EXCLUDED.preview_url,
                status = EXCLUDED.status,
                description = EXCLUDED.description,
                created_at = EXCLUDED.created_at,
                image_url = EXCLUDED.image_url,
                image_alt_text = EXCLUDED.image_alt_text,
                media = EXCLUDED.media
            "#,
        )
        .bind(&product.shopify_id)
        .bind(&product.product_name)
        .bind(&product.handle)
        .bind(&product.vendor)
        .bind(product.variant_count)
        .bind(product.total_inventory)
        .bind(&product.product_type)
        .bind(product.max_price)
        .bind(product.min_price)
        .bind(&product.currency)
        .bind(&product.preview_url)
        .bind(&product.status)
        .bind(&product.description)
        .bind(&product.created_at)
        .bind(&product.image_url)
        .bind(&product.image_alt_text)
        .bind(&product.media)
        .execute(&mut *tx)
        .await?;
    }
    tx.commit().await?;
    Ok(())
}

/// List products newest first with total count for pagination.
pub async fn list_products(pool: &PgPool, page: i64, limit: i64) -> Result<ProductPage, BoxError> {
    let offset = (page - 1) * limit;

    let total_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
        .fetch_one(pool)
        .await?;

    let products: Vec<Product> = sqlx::query_as(&format!(
        "SELECT {PRODUCT_COLUMNS} FROM products ORDER BY created_at DESC NULLS LAST LIMIT $1 OFFSET $2"
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

    Ok(ProductPage { products, total_count, page, limit, total_pages })
}
