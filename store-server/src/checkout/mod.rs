//! Checkout Workflow
//!
//! Owns the coupon application, rappel opt-in, totals computation and the
//! order submission sequence. Everything up to [`CheckoutService::finalize`]
//! is speculative session state; persisted balances and usage counters are
//! only touched once order creation is confirmed.

use crate::cart::CartSession;
use crate::db::{ClientStore, CouponStore, OrderStore};
use crate::marketing::{coupon, rappel};
use crate::pricing::{compose_totals, money::round_money};
use crate::services::Mailer;
use chrono::Utc;
use rust_decimal::Decimal;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{Client, Coupon, Order, OrderLine, OrderStatus, ShippingMethod};
use shared::order::TotalsBreakdown;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

pub struct CheckoutService {
    clients: Arc<dyn ClientStore>,
    coupons: Arc<dyn CouponStore>,
    orders: Arc<dyn OrderStore>,
    mailer: Arc<dyn Mailer>,
}

impl CheckoutService {
    pub fn new(
        clients: Arc<dyn ClientStore>,
        coupons: Arc<dyn CouponStore>,
        orders: Arc<dyn OrderStore>,
        mailer: Arc<dyn Mailer>,
    ) -> Self {
        Self {
            clients,
            coupons,
            orders,
            mailer,
        }
    }

    /// Validate and apply a promotional code to the session, replacing any
    /// previously applied coupon. Returns the discount at the current
    /// subtotal.
    pub async fn apply_coupon(
        &self,
        session: &mut CartSession,
        client: &Client,
        code: &str,
    ) -> AppResult<Decimal> {
        let normalized = Coupon::normalize_code(code);
        let found = self
            .coupons
            .find_by_code(&normalized)
            .await?
            .ok_or_else(|| AppError::new(ErrorCode::CouponNotFound))?;

        let subtotal = session.subtotal();
        coupon::validate(&found, client, subtotal, Utc::now())?;
        let amount = coupon::discount_amount(&found, subtotal);
        session.set_coupon(found);
        Ok(amount)
    }

    /// Opt in or out of redeeming the accumulated rappel balance on this
    /// checkout. Selection is session-local and reversible; the balance is
    /// only debited at finalize time.
    pub fn toggle_rappel(
        &self,
        session: &mut CartSession,
        client: &Client,
        enable: bool,
    ) -> AppResult<()> {
        if enable {
            if !rappel::redemption_eligible(session.applied_coupon()) {
                return Err(AppError::new(ErrorCode::RappelNotEligible));
            }
            if client.rappel_accumulated <= Decimal::ZERO {
                return Err(AppError::new(ErrorCode::RappelBalanceEmpty));
            }
        }
        session.set_redeem_rappel(enable);
        Ok(())
    }

    /// Compute the totals breakdown for the session's current state.
    ///
    /// Pure and side-effect free; safe to call on every render.
    pub fn compute_totals(
        &self,
        session: &CartSession,
        client: Option<&Client>,
        method: ShippingMethod,
    ) -> TotalsBreakdown {
        let subtotal = session.subtotal();

        let coupon_discount = session
            .applied_coupon()
            .map(|c| coupon::discount_amount(c, subtotal))
            .unwrap_or(Decimal::ZERO);

        let rappel_discount = match client {
            Some(client)
                if session.redeem_rappel()
                    && rappel::redemption_eligible(session.applied_coupon()) =>
            {
                rappel::redemption(client.rappel_accumulated, subtotal - coupon_discount)
            }
            _ => Decimal::ZERO,
        };

        compose_totals(subtotal, coupon_discount, rappel_discount, method)
    }

    /// Submit the order.
    ///
    /// Sequence: client upsert, order header, order lines, loyalty
    /// settlement, confirmation email. There is no compensating rollback:
    /// a failed step is surfaced with its name so the submission can be
    /// retried manually, and the session's draft id makes that retry
    /// idempotent: an order already persisted for this draft is returned
    /// instead of inserted twice.
    pub async fn finalize(
        &self,
        session: &mut CartSession,
        client: &Client,
        method: ShippingMethod,
        observations: Option<String>,
    ) -> AppResult<Order> {
        if session.is_empty() {
            return Err(AppError::new(ErrorCode::CartEmpty));
        }

        if let Some(existing) = self.orders.find_by_checkout_key(session.draft_id()).await? {
            tracing::warn!(order_id = %existing.id, "checkout retried after persistence; returning existing order");
            session.clear();
            return Ok(existing);
        }

        let totals = self.compute_totals(session, Some(client), method);

        // 1. client upsert
        let persisted = self
            .clients
            .upsert_client(client.clone())
            .await
            .map_err(|e| e.with_detail("step", "client-upsert"))?;

        // 2. order header
        let order = Order {
            id: Uuid::new_v4(),
            client_id: persisted.id,
            client_email: persisted.email.clone(),
            created_at: Utc::now(),
            status: OrderStatus::Pending,
            shipping_method: method,
            sales_rep: persisted.sales_rep.clone(),
            coupon_code: session.applied_coupon().map(|c| c.code.clone()),
            subtotal: totals.subtotal,
            coupon_discount: totals.coupon_discount,
            rappel_discount: totals.rappel_discount,
            tax: totals.tax,
            shipping_cost: totals.shipping_cost,
            total: totals.total,
            observations,
            checkout_key: session.draft_id(),
        };
        let order = self
            .orders
            .insert_order(order)
            .await
            .map_err(|e| e.with_detail("step", "order-insert"))?;

        // 3. order lines
        let lines: Vec<OrderLine> = session
            .lines()
            .iter()
            .map(|l| OrderLine {
                id: Uuid::new_v4(),
                order_id: order.id,
                reference: l.reference.clone(),
                name: l.name.clone(),
                quantity: l.quantity,
                unit_price: l.calculated_price,
                line_total: l.line_total(),
            })
            .collect();
        self.orders
            .insert_order_lines(lines)
            .await
            .map_err(|e| {
                e.with_detail("step", "lines-insert")
                    .with_detail("order_id", order.id.to_string())
            })?;

        // 4. loyalty settlement. Order creation is confirmed at this
        // point, so accrual, redemption debit and coupon usage are applied
        // now, exactly once. A failure here is logged, not surfaced: the
        // order stands, and there is no transactional coordination with
        // the store (at-most-once).
        self.settle_loyalty(session, &persisted, &totals).await;

        // 5. confirmation email
        let fields = confirmation_fields(&order, &persisted);
        if let Err(e) = self
            .mailer
            .send_order_confirmation(&order.client_email, &fields)
            .await
        {
            return Err(e.with_detail("step", "email").with_detail("order_id", order.id.to_string()));
        }

        session.clear();
        Ok(order)
    }

    async fn settle_loyalty(
        &self,
        session: &CartSession,
        client: &Client,
        totals: &TotalsBreakdown,
    ) {
        let mut updated = client.clone();

        // redemption debit, capped at finalize time so the balance can
        // never go negative
        updated.rappel_accumulated =
            (updated.rappel_accumulated - totals.rappel_discount).max(Decimal::ZERO);
        // accrual on the post-discount, pre-tax subtotal
        updated.rappel_accumulated += rappel::accrual(totals.net_subtotal);

        if let Some(applied) = session.applied_coupon() {
            let mut used = applied.clone();
            used.uses_count += 1;
            if used.one_per_client {
                updated.used_coupons.insert(used.code.clone());
            }
            if let Err(e) = self.coupons.save_coupon(used).await {
                tracing::error!(error = %e, "coupon usage marking failed after order persistence");
            }
        }

        if let Err(e) = self.clients.upsert_client(updated).await {
            tracing::error!(error = %e, "rappel settlement failed after order persistence");
        }
    }
}

/// Flat field map handed to the mail template
fn confirmation_fields(order: &Order, client: &Client) -> HashMap<String, String> {
    let money = |v: Decimal| round_money(v).to_string();
    HashMap::from([
        ("order_id".to_string(), order.id.to_string()),
        ("client_name".to_string(), client.name.clone()),
        ("subtotal".to_string(), money(order.subtotal)),
        ("coupon_discount".to_string(), money(order.coupon_discount)),
        ("rappel_discount".to_string(), money(order.rappel_discount)),
        ("tax".to_string(), money(order.tax)),
        ("shipping".to_string(), money(order.shipping_cost)),
        ("total".to_string(), money(order.total)),
    ])
}
