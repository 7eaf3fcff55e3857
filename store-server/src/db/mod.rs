//! Storage collaborator contracts
//!
//! The pricing core reaches persistence through these narrow async
//! traits, keyed by natural identifiers (product reference, client email).
//! Production wiring points them at the hosted backend; tests and the
//! default server state use the in-memory implementation.

mod memory;

pub use memory::MemoryStore;

use async_trait::async_trait;
use shared::error::AppResult;
use shared::models::{Client, Coupon, Order, OrderLine, Product};
use uuid::Uuid;

/// Catalog persistence, keyed by product reference
#[async_trait]
pub trait CatalogStore: Send + Sync {
    async fn list_products(&self) -> AppResult<Vec<Product>>;

    async fn find_by_reference(&self, reference: &str) -> AppResult<Option<Product>>;

    /// Insert-or-replace on the reference conflict key. Returns the number
    /// of rows written.
    async fn upsert_products(&self, products: Vec<Product>) -> AppResult<usize>;

    async fn delete_all_products(&self) -> AppResult<()>;
}

/// Client account persistence, keyed by email
#[async_trait]
pub trait ClientStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<Client>>;

    async fn find_by_username(&self, username: &str) -> AppResult<Option<Client>>;

    /// Insert-or-replace on the email conflict key
    async fn upsert_client(&self, client: Client) -> AppResult<Client>;
}

/// Coupon persistence, keyed by uppercase-normalized code
#[async_trait]
pub trait CouponStore: Send + Sync {
    async fn find_by_code(&self, code: &str) -> AppResult<Option<Coupon>>;

    async fn save_coupon(&self, coupon: Coupon) -> AppResult<()>;
}

/// Order persistence
#[async_trait]
pub trait OrderStore: Send + Sync {
    async fn insert_order(&self, order: Order) -> AppResult<Order>;

    async fn insert_order_lines(&self, lines: Vec<OrderLine>) -> AppResult<Vec<OrderLine>>;

    /// Look up an order by its submission idempotency key
    async fn find_by_checkout_key(&self, key: Uuid) -> AppResult<Option<Order>>;
}
