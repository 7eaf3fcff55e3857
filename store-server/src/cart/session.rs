//! Cart session aggregate

use crate::pricing::effective_product;
use crate::pricing::money::{round_money, to_decimal};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{Client, Coupon, Product};
use shared::order::{CartLine, LineConfig};
use uuid::Uuid;

/// One client's in-progress checkout state.
///
/// Coupon selection and the rappel opt-in are speculative: they only touch
/// persisted balances and usage counters when the order is finalized.
/// `draft_id` doubles as the idempotency key for order submission and is
/// rotated after each successful finalize.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartSession {
    pub session_id: Uuid,
    /// Owning client, when the session is authenticated
    pub client_email: Option<String>,
    lines: Vec<CartLine>,
    applied_coupon: Option<Coupon>,
    redeem_rappel: bool,
    draft_id: Uuid,
}

impl CartSession {
    pub fn new() -> Self {
        Self {
            session_id: Uuid::new_v4(),
            client_email: None,
            lines: Vec::new(),
            applied_coupon: None,
            redeem_rappel: false,
            draft_id: Uuid::new_v4(),
        }
    }

    pub fn for_client(email: impl Into<String>) -> Self {
        let mut session = Self::new();
        session.client_email = Some(email.into());
        session
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn applied_coupon(&self) -> Option<&Coupon> {
        self.applied_coupon.as_ref()
    }

    pub fn redeem_rappel(&self) -> bool {
        self.redeem_rappel
    }

    pub fn draft_id(&self) -> Uuid {
        self.draft_id
    }

    /// Cart subtotal: Σ calculated_price × quantity.
    ///
    /// Derived on every read, never stored, so it cannot drift from the
    /// lines.
    pub fn subtotal(&self) -> Decimal {
        self.lines
            .iter()
            .fold(Decimal::ZERO, |acc, line| acc + line.line_total())
    }

    /// Add a product to the cart.
    ///
    /// Resolves the client's effective product, computes the locked-in
    /// unit price (per-m² rate × width × length for flexible products),
    /// then merges into an existing line with the same reference and
    /// configuration, or opens a new one. Differently configured variants
    /// of the same base product stay distinct lines.
    pub fn add_item(
        &mut self,
        product: &Product,
        client: Option<&Client>,
        quantity: i32,
        config: LineConfig,
    ) -> AppResult<&CartLine> {
        if quantity <= 0 {
            return Err(AppError::new(ErrorCode::InvalidQuantity));
        }

        let effective = effective_product(product, client);
        let (calculated_price, rate, width, length) = if effective.is_flexible {
            let width = config.width.or(effective.width).ok_or_else(|| {
                AppError::with_message(
                    ErrorCode::ProductInvalidPrice,
                    format!("{} has no width to price by area", effective.reference),
                )
            })?;
            let length = effective.length.ok_or_else(|| {
                AppError::with_message(
                    ErrorCode::ProductInvalidPrice,
                    format!("{} has no length to price by area", effective.reference),
                )
            })?;
            let rate = effective.price_per_m2;
            let unit_price = round_money(rate * to_decimal(width) * to_decimal(length));
            (unit_price, Some(rate), Some(width), Some(length))
        } else {
            (effective.price, None, None, None)
        };

        if let Some(pos) = self
            .lines
            .iter()
            .position(|l| l.matches(&effective.reference, &config))
        {
            self.lines[pos].quantity += quantity;
            return Ok(&self.lines[pos]);
        }

        self.lines.push(CartLine {
            line_id: Uuid::new_v4(),
            reference: effective.reference,
            name: effective.name,
            subcategory: effective.subcategory,
            brand: effective.brand,
            is_flexible: effective.is_flexible,
            quantity,
            calculated_price,
            rate_per_m2: rate,
            width,
            length,
            config,
        });
        let idx = self.lines.len() - 1;
        Ok(&self.lines[idx])
    }

    /// Adjust a line quantity by a signed delta.
    ///
    /// A line whose quantity reaches zero or below is removed entirely,
    /// never retained at zero.
    pub fn update_quantity(&mut self, line_id: Uuid, delta: i32) -> AppResult<()> {
        let pos = self
            .lines
            .iter()
            .position(|l| l.line_id == line_id)
            .ok_or_else(|| AppError::new(ErrorCode::CartLineNotFound))?;

        let new_quantity = self.lines[pos].quantity + delta;
        if new_quantity <= 0 {
            self.lines.remove(pos);
        } else {
            self.lines[pos].quantity = new_quantity;
        }
        Ok(())
    }

    /// Push an already-priced line without merging. Cross-sell acceptance
    /// uses this: the discounted laminate must never collapse into an
    /// existing full-rate line of the same product.
    pub(crate) fn push_line(&mut self, line: CartLine) {
        self.lines.push(line);
    }

    pub(crate) fn line_mut(&mut self, line_id: Uuid) -> Option<&mut CartLine> {
        self.lines.iter_mut().find(|l| l.line_id == line_id)
    }

    /// Apply a validated coupon, replacing any previous one. Exactly one
    /// coupon contributes to the total at a time.
    pub fn set_coupon(&mut self, coupon: Coupon) {
        self.applied_coupon = Some(coupon);
    }

    pub fn remove_coupon(&mut self) {
        self.applied_coupon = None;
    }

    pub fn set_redeem_rappel(&mut self, enable: bool) {
        self.redeem_rappel = enable;
    }

    /// Empty the cart and reset all speculative checkout state. Called
    /// after successful order submission and on logout.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.applied_coupon = None;
        self.redeem_rappel = false;
        self.draft_id = Uuid::new_v4();
    }
}

impl Default for CartSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{Finish, ProductCategory};

    fn make_rigid(reference: &str, price: Decimal) -> Product {
        Product {
            reference: reference.to_string(),
            name: format!("Product {}", reference),
            category: ProductCategory::Rigid,
            subcategory: None,
            is_flexible: false,
            price,
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

    fn make_vinyl(reference: &str, rate: Decimal) -> Product {
        let mut p = make_rigid(reference, Decimal::ZERO);
        p.category = ProductCategory::Flexible;
        p.is_flexible = true;
        p.price_per_m2 = rate;
        p.width = Some(1.22);
        p.length = Some(50.0);
        p.subcategory = Some("vinilo_monomerico".to_string());
        p
    }

    #[test]
    fn test_add_merges_same_reference_and_config() {
        let mut cart = CartSession::new();
        let product = make_rigid("RIG-001", Decimal::new(1000, 2));

        cart.add_item(&product, None, 2, LineConfig::default()).unwrap();
        cart.add_item(&product, None, 3, LineConfig::default()).unwrap();

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].quantity, 5);
        assert_eq!(cart.subtotal(), Decimal::new(5000, 2));
    }

    #[test]
    fn test_configured_variants_stay_distinct() {
        let mut cart = CartSession::new();
        let product = make_vinyl("VIN-12250", Decimal::new(450, 2));

        cart.add_item(&product, None, 1, LineConfig::default()).unwrap();
        let gloss = LineConfig {
            finish: Some(Finish::Gloss),
            ..LineConfig::default()
        };
        cart.add_item(&product, None, 1, gloss).unwrap();

        assert_eq!(cart.lines().len(), 2);
    }

    #[test]
    fn test_flexible_unit_price_is_area_times_rate() {
        let mut cart = CartSession::new();
        let product = make_vinyl("VIN-12250", Decimal::new(450, 2));

        let line = cart
            .add_item(&product, None, 1, LineConfig::default())
            .unwrap();
        // 4.50 * 1.22 * 50 = 274.50
        assert_eq!(line.calculated_price, Decimal::new(27450, 2));
        assert_eq!(line.rate_per_m2, Some(Decimal::new(450, 2)));
    }

    #[test]
    fn test_configured_width_overrides_default() {
        let mut cart = CartSession::new();
        let product = make_vinyl("VIN-12250", Decimal::new(400, 2));
        let narrow = LineConfig {
            width: Some(1.0),
            ..LineConfig::default()
        };

        let line = cart.add_item(&product, None, 1, narrow).unwrap();
        // 4.00 * 1.00 * 50 = 200.00
        assert_eq!(line.calculated_price, Decimal::new(20000, 2));
        assert_eq!(line.width, Some(1.0));
    }

    #[test]
    fn test_calculated_price_survives_catalog_changes() {
        let mut cart = CartSession::new();
        let mut product = make_rigid("RIG-001", Decimal::new(1000, 2));
        cart.add_item(&product, None, 1, LineConfig::default()).unwrap();

        // catalog price changes after the line was locked in
        product.price = Decimal::new(9999, 2);
        assert_eq!(cart.lines()[0].calculated_price, Decimal::new(1000, 2));
    }

    #[test]
    fn test_update_quantity_removes_at_zero() {
        let mut cart = CartSession::new();
        let product = make_rigid("RIG-001", Decimal::new(1000, 2));
        cart.add_item(&product, None, 2, LineConfig::default()).unwrap();
        let line_id = cart.lines()[0].line_id;

        cart.update_quantity(line_id, -1).unwrap();
        assert_eq!(cart.lines()[0].quantity, 1);

        cart.update_quantity(line_id, -1).unwrap();
        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_quantity_removes_below_zero() {
        let mut cart = CartSession::new();
        let product = make_rigid("RIG-001", Decimal::new(1000, 2));
        cart.add_item(&product, None, 2, LineConfig::default()).unwrap();
        let line_id = cart.lines()[0].line_id;

        cart.update_quantity(line_id, -5).unwrap();
        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_quantity_unknown_line() {
        let mut cart = CartSession::new();
        let err = cart.update_quantity(Uuid::new_v4(), 1).unwrap_err();
        assert_eq!(err.code, ErrorCode::CartLineNotFound);
    }

    #[test]
    fn test_rejects_non_positive_quantity() {
        let mut cart = CartSession::new();
        let product = make_rigid("RIG-001", Decimal::new(1000, 2));
        let err = cart
            .add_item(&product, None, 0, LineConfig::default())
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidQuantity);
    }

    #[test]
    fn test_clear_resets_speculative_state() {
        let mut cart = CartSession::new();
        let product = make_rigid("RIG-001", Decimal::new(1000, 2));
        cart.add_item(&product, None, 1, LineConfig::default()).unwrap();
        cart.set_redeem_rappel(true);
        let old_draft = cart.draft_id();

        cart.clear();
        assert!(cart.is_empty());
        assert!(!cart.redeem_rappel());
        assert!(cart.applied_coupon().is_none());
        assert_ne!(cart.draft_id(), old_draft);
    }
}
