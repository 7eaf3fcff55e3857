//! Marketing Module
//!
//! Promotional coupon validation, the rappel loyalty ledger and the
//! vinyl/laminate cross-sell bundling. All calculators here are pure;
//! persisted balances and usage counters are only touched by the checkout
//! workflow at finalize time.

pub mod coupon;
pub mod cross_sell;
pub mod rappel;
