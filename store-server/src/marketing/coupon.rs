//! Promotion/Coupon Engine
//!
//! Validates a promotional code against the current cart/client state and
//! computes the discount it yields. Validation short-circuits on the first
//! failing rule so the client sees the most specific rejection.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{Client, Coupon, DiscountType};

/// Validate a coupon for a client and cart subtotal.
///
/// Rules, in order: active, unexpired, under its usage cap, not already
/// consumed by this client (one-per-client coupons), and the cart reaches
/// the coupon minimum.
pub fn validate(
    coupon: &Coupon,
    client: &Client,
    cart_subtotal: Decimal,
    now: DateTime<Utc>,
) -> AppResult<()> {
    if !coupon.is_active {
        return Err(AppError::new(ErrorCode::CouponInactive));
    }
    if coupon.is_expired(now) {
        return Err(AppError::new(ErrorCode::CouponExpired));
    }
    if coupon.is_exhausted() {
        return Err(AppError::new(ErrorCode::CouponExhausted));
    }
    if coupon.one_per_client && client.used_coupons.contains(&coupon.code) {
        return Err(AppError::new(ErrorCode::CouponAlreadyUsed));
    }
    if cart_subtotal < coupon.min_order_amount {
        return Err(AppError::with_message(
            ErrorCode::CouponMinOrderNotMet,
            format!("Minimum order amount is {}", coupon.min_order_amount),
        )
        .with_detail("min_order_amount", coupon.min_order_amount.to_string()));
    }
    Ok(())
}

/// Discount a coupon yields on a subtotal.
///
/// Percentage coupons take their cut of the subtotal; fixed coupons are
/// clamped to the subtotal so the discounted amount can never go negative.
pub fn discount_amount(coupon: &Coupon, subtotal: Decimal) -> Decimal {
    match coupon.discount_type {
        DiscountType::Percentage => subtotal * coupon.value / Decimal::ONE_HUNDRED,
        DiscountType::Fixed => coupon.value.min(subtotal),
    }
}
