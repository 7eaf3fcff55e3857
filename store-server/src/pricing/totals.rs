//! Order Total Composer
//!
//! Combines subtotal, discounts, rappel redemption, tax and shipping into
//! the final payable total. The sequence is fixed: discounts come off the
//! subtotal first, tax is charged on the net amount, shipping is untaxed
//! and added last. No intermediate rounding is applied.

use rust_decimal::Decimal;
use shared::models::ShippingMethod;
use shared::order::TotalsBreakdown;

/// Spanish IVA, charged on the net subtotal
pub const TAX_RATE: Decimal = Decimal::from_parts(21, 0, 0, false, 2);

/// Flat fee for the 24h courier agency
pub const AGENCY_24H_FEE: Decimal = Decimal::from_parts(6, 0, 0, false, 0);

/// Flat shipping cost for a method
pub fn shipping_cost(method: ShippingMethod) -> Decimal {
    match method {
        ShippingMethod::OwnDelivery => Decimal::ZERO,
        ShippingMethod::Agency24h => AGENCY_24H_FEE,
    }
}

/// Compose the final order totals.
///
/// ```text
/// net_subtotal = subtotal - coupon_discount - rappel_discount   (>= 0)
/// tax          = net_subtotal * 0.21
/// total        = net_subtotal + tax + shipping
/// ```
pub fn compose_totals(
    subtotal: Decimal,
    coupon_discount: Decimal,
    rappel_discount: Decimal,
    method: ShippingMethod,
) -> TotalsBreakdown {
    let net_subtotal = (subtotal - coupon_discount - rappel_discount).max(Decimal::ZERO);
    let tax = net_subtotal * TAX_RATE;
    let shipping = shipping_cost(method);

    TotalsBreakdown {
        subtotal,
        coupon_discount,
        rappel_discount,
        net_subtotal,
        tax,
        shipping_cost: shipping,
        total: net_subtotal + tax + shipping,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_totals_own_delivery() {
        let totals = compose_totals(
            Decimal::new(100, 0),
            Decimal::ZERO,
            Decimal::ZERO,
            ShippingMethod::OwnDelivery,
        );
        assert_eq!(totals.net_subtotal, Decimal::new(100, 0));
        assert_eq!(totals.tax, Decimal::new(21, 0));
        assert_eq!(totals.shipping_cost, Decimal::ZERO);
        assert_eq!(totals.total, Decimal::new(121, 0));
    }

    #[test]
    fn test_agency_shipping_is_untaxed() {
        let totals = compose_totals(
            Decimal::new(100, 0),
            Decimal::ZERO,
            Decimal::ZERO,
            ShippingMethod::Agency24h,
        );
        assert_eq!(totals.shipping_cost, Decimal::new(6, 0));
        // 100 + 21 + 6, not (100 + 6) * 1.21
        assert_eq!(totals.total, Decimal::new(127, 0));
    }

    #[test]
    fn test_discounts_reduce_taxable_base() {
        // subtotal 1000, coupon 30, rappel 45.50
        let totals = compose_totals(
            Decimal::new(1000, 0),
            Decimal::new(30, 0),
            Decimal::new(4550, 2),
            ShippingMethod::OwnDelivery,
        );
        assert_eq!(totals.net_subtotal, Decimal::new(92450, 2));
        assert_eq!(totals.tax, Decimal::new(194145, 3));
        assert_eq!(totals.total, Decimal::new(1118645, 3));
    }

    #[test]
    fn test_net_subtotal_clamped_at_zero() {
        // fixed discount 50 on a 30 cart: net 0, tax 0
        let totals = compose_totals(
            Decimal::new(30, 0),
            Decimal::new(30, 0),
            Decimal::ZERO,
            ShippingMethod::OwnDelivery,
        );
        assert_eq!(totals.net_subtotal, Decimal::ZERO);
        assert_eq!(totals.tax, Decimal::ZERO);
        assert_eq!(totals.total, Decimal::ZERO);

        // over-discount can never push the order negative
        let totals = compose_totals(
            Decimal::new(30, 0),
            Decimal::new(50, 0),
            Decimal::ZERO,
            ShippingMethod::OwnDelivery,
        );
        assert_eq!(totals.net_subtotal, Decimal::ZERO);
        assert_eq!(totals.total, Decimal::ZERO);
    }
}
