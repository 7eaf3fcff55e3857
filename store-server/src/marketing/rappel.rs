//! Rappel (Loyalty Credit) Ledger
//!
//! Clients accrue a fixed percentage of each completed order into a
//! running balance and may redeem the accumulated balance against a future
//! order's subtotal. Both calculators are pure; the checkout workflow
//! applies them to the persisted balance exactly once, when order creation
//! is confirmed.

use rust_decimal::Decimal;
use shared::models::{Coupon, DiscountType};

/// Share of the net subtotal credited back on every finalized order (3%)
pub const ACCRUAL_RATE: Decimal = Decimal::from_parts(3, 0, 0, false, 2);

/// Amount credited for a finalized order.
///
/// Computed on the pre-tax, pre-shipping subtotal after all other
/// discounts are applied.
pub fn accrual(net_subtotal: Decimal) -> Decimal {
    net_subtotal.max(Decimal::ZERO) * ACCRUAL_RATE
}

/// Whether rappel redemption is offered for this checkout.
///
/// Redemption is only available while an active percentage coupon is
/// applied. This mirrors longstanding storefront behavior (redemption on
/// promotional orders only); whether it is intentional policy is an open
/// product question, tracked in DESIGN.md.
pub fn redemption_eligible(applied_coupon: Option<&Coupon>) -> bool {
    applied_coupon
        .is_some_and(|c| c.is_active && c.discount_type == DiscountType::Percentage)
}

/// Redemption applied to an order, capped so it can never exceed what is
/// owed nor drive the balance negative. Always succeeds up to the cap.
pub fn redemption(balance: Decimal, subtotal_after_other_discounts: Decimal) -> Decimal {
    balance
        .min(subtotal_after_other_discounts)
        .max(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_percentage_coupon() -> Coupon {
        Coupon {
            code: "RAPPEL3".into(),
            discount_type: DiscountType::Percentage,
            value: Decimal::new(3, 0),
            min_order_amount: Decimal::new(901, 0),
            max_uses: 100,
            uses_count: 0,
            one_per_client: true,
            is_active: true,
            expires_at: None,
        }
    }

    #[test]
    fn test_accrual_is_three_percent_of_net() {
        assert_eq!(accrual(Decimal::new(900, 0)), Decimal::new(27, 0));
        assert_eq!(accrual(Decimal::new(92450, 2)), Decimal::new(277350, 4));
    }

    #[test]
    fn test_accrual_never_negative() {
        assert_eq!(accrual(Decimal::new(-50, 0)), Decimal::ZERO);
    }

    #[test]
    fn test_redemption_capped_by_subtotal() {
        // balance 45.50 against 40 owed: redeem 40, not 45.50
        assert_eq!(
            redemption(Decimal::new(4550, 2), Decimal::new(40, 0)),
            Decimal::new(40, 0)
        );
    }

    #[test]
    fn test_redemption_capped_by_balance() {
        assert_eq!(
            redemption(Decimal::new(4550, 2), Decimal::new(900, 0)),
            Decimal::new(4550, 2)
        );
    }

    #[test]
    fn test_redemption_never_negative() {
        assert_eq!(redemption(Decimal::ZERO, Decimal::new(40, 0)), Decimal::ZERO);
        assert_eq!(
            redemption(Decimal::new(10, 0), Decimal::new(-5, 0)),
            Decimal::ZERO
        );
    }

    #[test]
    fn test_eligibility_requires_percentage_coupon() {
        let percentage = make_percentage_coupon();
        assert!(redemption_eligible(Some(&percentage)));

        let mut fixed = make_percentage_coupon();
        fixed.discount_type = DiscountType::Fixed;
        assert!(!redemption_eligible(Some(&fixed)));

        let mut inactive = make_percentage_coupon();
        inactive.is_active = false;
        assert!(!redemption_eligible(Some(&inactive)));

        assert!(!redemption_eligible(None));
    }
}
