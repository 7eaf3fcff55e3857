//! Coupon Model

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Discount type
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DiscountType {
    Percentage,
    Fixed,
}

/// Promotional coupon entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coupon {
    /// Unique, uppercase-normalized code
    pub code: String,
    pub discount_type: DiscountType,
    /// Percentage points for [`DiscountType::Percentage`], currency amount
    /// for [`DiscountType::Fixed`]
    pub value: Decimal,
    pub min_order_amount: Decimal,
    pub max_uses: u32,
    pub uses_count: u32,
    /// One redemption per client when set
    pub one_per_client: bool,
    pub is_active: bool,
    pub expires_at: Option<DateTime<Utc>>,
}

impl Coupon {
    /// Normalize a user-entered code for lookup (trim + uppercase)
    pub fn normalize_code(raw: &str) -> String {
        raw.trim().to_uppercase()
    }

    /// Whether the coupon is past its expiry date at `now`
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|exp| now > exp)
    }

    /// Whether the usage cap has been reached
    pub fn is_exhausted(&self) -> bool {
        self.uses_count >= self.max_uses
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_code() {
        assert_eq!(Coupon::normalize_code("  rappel3 "), "RAPPEL3");
        assert_eq!(Coupon::normalize_code("Bienvenida10"), "BIENVENIDA10");
    }

    #[test]
    fn test_expiry() {
        let coupon = Coupon {
            code: "RAPPEL3".into(),
            discount_type: DiscountType::Percentage,
            value: Decimal::new(3, 0),
            min_order_amount: Decimal::new(900, 0),
            max_uses: 100,
            uses_count: 0,
            one_per_client: false,
            is_active: true,
            expires_at: Some(Utc::now() - chrono::Duration::days(1)),
        };
        assert!(coupon.is_expired(Utc::now()));
        assert!(!coupon.is_exhausted());
    }
}
