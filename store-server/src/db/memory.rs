//! In-memory store
//!
//! DashMap-backed implementation of every storage contract. Backs the
//! default server wiring and the test suite; data does not survive a
//! restart.

use super::{CatalogStore, ClientStore, CouponStore, OrderStore};
use async_trait::async_trait;
use dashmap::DashMap;
use shared::error::AppResult;
use shared::models::{Client, Coupon, Order, OrderLine, Product};
use uuid::Uuid;

#[derive(Default)]
pub struct MemoryStore {
    products: DashMap<String, Product>,
    clients: DashMap<String, Client>,
    coupons: DashMap<String, Coupon>,
    orders: DashMap<Uuid, Order>,
    order_lines: DashMap<Uuid, Vec<OrderLine>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a coupon (admin tooling / tests)
    pub fn seed_coupon(&self, coupon: Coupon) {
        self.coupons.insert(coupon.code.clone(), coupon);
    }

    /// Seed a client (admin tooling / tests)
    pub fn seed_client(&self, client: Client) {
        self.clients.insert(client.email.clone(), client);
    }
}

#[async_trait]
impl CatalogStore for MemoryStore {
    async fn list_products(&self) -> AppResult<Vec<Product>> {
        Ok(self.products.iter().map(|e| e.value().clone()).collect())
    }

    async fn find_by_reference(&self, reference: &str) -> AppResult<Option<Product>> {
        Ok(self.products.get(reference).map(|e| e.value().clone()))
    }

    async fn upsert_products(&self, products: Vec<Product>) -> AppResult<usize> {
        let count = products.len();
        for product in products {
            self.products.insert(product.reference.clone(), product);
        }
        Ok(count)
    }

    async fn delete_all_products(&self) -> AppResult<()> {
        self.products.clear();
        Ok(())
    }
}

#[async_trait]
impl ClientStore for MemoryStore {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<Client>> {
        Ok(self.clients.get(email).map(|e| e.value().clone()))
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<Client>> {
        Ok(self
            .clients
            .iter()
            .find(|e| e.value().username == username)
            .map(|e| e.value().clone()))
    }

    async fn upsert_client(&self, client: Client) -> AppResult<Client> {
        self.clients.insert(client.email.clone(), client.clone());
        Ok(client)
    }
}

#[async_trait]
impl CouponStore for MemoryStore {
    async fn find_by_code(&self, code: &str) -> AppResult<Option<Coupon>> {
        Ok(self.coupons.get(code).map(|e| e.value().clone()))
    }

    async fn save_coupon(&self, coupon: Coupon) -> AppResult<()> {
        self.coupons.insert(coupon.code.clone(), coupon);
        Ok(())
    }
}

#[async_trait]
impl OrderStore for MemoryStore {
    async fn insert_order(&self, order: Order) -> AppResult<Order> {
        self.orders.insert(order.id, order.clone());
        Ok(order)
    }

    async fn insert_order_lines(&self, lines: Vec<OrderLine>) -> AppResult<Vec<OrderLine>> {
        if let Some(order_id) = lines.first().map(|l| l.order_id) {
            self.order_lines.insert(order_id, lines.clone());
        }
        Ok(lines)
    }

    async fn find_by_checkout_key(&self, key: Uuid) -> AppResult<Option<Order>> {
        Ok(self
            .orders
            .iter()
            .find(|e| e.value().checkout_key == key)
            .map(|e| e.value().clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use shared::models::{DiscountType, ProductCategory};

    fn make_product(reference: &str) -> Product {
        Product {
            reference: reference.to_string(),
            name: format!("Product {}", reference),
            category: ProductCategory::Rigid,
            subcategory: None,
            is_flexible: false,
            price: Decimal::new(100, 0),
            price_per_m2: Decimal::ZERO,
            width: None,
            length: None,
            unit: "ud".to_string(),
            in_stock: true,
            brand: None,
            finish: None,
            backing: None,
            adhesive: None,
            material_type: None,
            description: None,
            weight: None,
        }
    }

    #[tokio::test]
    async fn test_upsert_replaces_on_reference() {
        let store = MemoryStore::new();
        store.upsert_products(vec![make_product("A")]).await.unwrap();

        let mut updated = make_product("A");
        updated.price = Decimal::new(200, 0);
        store.upsert_products(vec![updated]).await.unwrap();

        let products = store.list_products().await.unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].price, Decimal::new(200, 0));
    }

    #[tokio::test]
    async fn test_delete_all_products() {
        let store = MemoryStore::new();
        store
            .upsert_products(vec![make_product("A"), make_product("B")])
            .await
            .unwrap();
        store.delete_all_products().await.unwrap();
        assert!(store.list_products().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_coupon_roundtrip() {
        let store = MemoryStore::new();
        store.seed_coupon(Coupon {
            code: "RAPPEL3".into(),
            discount_type: DiscountType::Percentage,
            value: Decimal::new(3, 0),
            min_order_amount: Decimal::new(901, 0),
            max_uses: 10,
            uses_count: 0,
            one_per_client: true,
            is_active: true,
            expires_at: None,
        });

        let found = store.find_by_code("RAPPEL3").await.unwrap();
        assert!(found.is_some());
        assert!(store.find_by_code("NOPE").await.unwrap().is_none());
    }
}
