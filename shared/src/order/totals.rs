//! Order totals breakdown

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Full breakdown of an order total
///
/// Produced by the totals composer in a fixed sequence: discounts come off
/// the subtotal, tax is charged on the net amount, shipping is untaxed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TotalsBreakdown {
    pub subtotal: Decimal,
    pub coupon_discount: Decimal,
    pub rappel_discount: Decimal,
    /// subtotal - coupon_discount - rappel_discount, clamped at zero
    pub net_subtotal: Decimal,
    pub tax: Decimal,
    pub shipping_cost: Decimal,
    pub total: Decimal,
}

impl TotalsBreakdown {
    /// An all-zero breakdown (empty cart)
    pub fn zero() -> Self {
        Self {
            subtotal: Decimal::ZERO,
            coupon_discount: Decimal::ZERO,
            rappel_discount: Decimal::ZERO,
            net_subtotal: Decimal::ZERO,
            tax: Decimal::ZERO,
            shipping_cost: Decimal::ZERO,
            total: Decimal::ZERO,
        }
    }
}
