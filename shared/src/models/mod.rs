//! Data models
//!
//! Flattened mirrors of the Shopify Admin API objects, one row per order
//! or product. These are the shapes stored in Postgres and returned by
//! the listing endpoints.

pub mod order;
pub mod product;

pub use order::{LineItem, Order};
pub use product::Product;
