//! Order Model

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Order status
///
/// Transitions past `Pending` are made by external fulfillment processes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Processing,
    Completed,
    Cancelled,
}

/// Shipping method (flat binary choice)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ShippingMethod {
    /// Picked up / delivered by the company fleet, free
    #[serde(rename = "own-delivery")]
    OwnDelivery,
    /// 24h courier agency, flat 6.00 fee
    #[serde(rename = "agency-24h")]
    Agency24h,
}

/// Order header entity
///
/// Immutable once created except for `status`. Line items are stored
/// separately as [`OrderLine`] rows keyed by `order_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: Uuid,
    pub client_id: Uuid,
    pub client_email: String,
    pub created_at: DateTime<Utc>,
    pub status: OrderStatus,
    pub shipping_method: ShippingMethod,
    pub sales_rep: Option<String>,
    /// Coupon code applied, uppercase-normalized
    pub coupon_code: Option<String>,
    pub subtotal: Decimal,
    pub coupon_discount: Decimal,
    pub rappel_discount: Decimal,
    pub tax: Decimal,
    pub shipping_cost: Decimal,
    pub total: Decimal,
    pub observations: Option<String>,
    /// Idempotency key: the originating checkout draft id. A retry of the
    /// same draft must not insert a second order.
    pub checkout_key: Uuid,
}

/// Frozen order line (cart line snapshot at submission time)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLine {
    pub id: Uuid,
    pub order_id: Uuid,
    pub reference: String,
    pub name: String,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub line_total: Decimal,
}
