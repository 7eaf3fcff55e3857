//! Cross-Sell Bundling
//!
//! Pairs cart vinyl lines with matching protective laminates (same width,
//! same brand) at a small per-m² discount on both rolls. A presentation-
//! time offer: nothing changes unless the client explicitly accepts.

use crate::cart::CartSession;
use crate::pricing::money::{round_money, to_decimal};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{Finish, Product};
use shared::order::{CartLine, LineConfig};
use uuid::Uuid;

/// Per-m² discount applied to both the vinyl and the laminate on
/// acceptance (0.10 currency units)
pub const PAIR_DISCOUNT_PER_M2: Decimal = Decimal::from_parts(10, 0, 0, false, 2);

/// Laminate candidates for one eligible vinyl cart line
#[derive(Debug, Clone, Serialize)]
pub struct LaminateOffer {
    pub vinyl_line_id: Uuid,
    pub candidates: Vec<Product>,
}

/// A client's accepted pairing
#[derive(Debug, Clone, Deserialize)]
pub struct BundleChoice {
    pub vinyl_line_id: Uuid,
    pub laminate_reference: String,
    pub finish: Finish,
}

fn is_vinyl_line(line: &CartLine) -> bool {
    line.is_flexible && contains_keyword(&line.name, line.subcategory.as_deref(), "vinil")
}

fn is_laminate(product: &Product) -> bool {
    product.is_flexible
        && contains_keyword(&product.name, product.subcategory.as_deref(), "laminad")
}

fn contains_keyword(name: &str, subcategory: Option<&str>, keyword: &str) -> bool {
    name.to_lowercase().contains(keyword)
        || subcategory.unwrap_or_default().to_lowercase().contains(keyword)
}

fn widths_match(a: Option<f64>, b: Option<f64>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => (a - b).abs() < 1e-9,
        _ => false,
    }
}

/// Find, per cart vinyl line, the catalog laminates sharing its width and
/// brand. Lines with no candidates produce no offer.
pub fn find_offers(session: &CartSession, catalog: &[Product]) -> Vec<LaminateOffer> {
    session
        .lines()
        .iter()
        .filter(|line| is_vinyl_line(line))
        .filter_map(|line| {
            let candidates: Vec<Product> = catalog
                .iter()
                .filter(|p| {
                    is_laminate(p)
                        && p.brand == line.brand
                        && widths_match(p.width, line.width)
                })
                .cloned()
                .collect();
            (!candidates.is_empty()).then(|| LaminateOffer {
                vinyl_line_id: line.line_id,
                candidates,
            })
        })
        .collect()
}

/// Materialize an accepted pairing.
///
/// The chosen laminate becomes a new, distinct cart line (never merged:
/// its discounted per-m² rate differs from a regular line of the same
/// product), and both the vinyl line and the new laminate line are
/// re-rated at per-m² minus [`PAIR_DISCOUNT_PER_M2`], floored at zero.
/// The vinyl line's quantity is untouched.
pub fn accept_bundle(
    session: &mut CartSession,
    laminate: &Product,
    choice: &BundleChoice,
) -> AppResult<()> {
    if laminate.reference != choice.laminate_reference {
        return Err(AppError::new(ErrorCode::LaminateNotFound));
    }

    // Validate everything before touching the cart: a rejected acceptance
    // must leave it unchanged.
    let (vinyl_quantity, vinyl_rate, vinyl_width, vinyl_length) = {
        let vinyl = session
            .lines()
            .iter()
            .find(|l| l.line_id == choice.vinyl_line_id)
            .ok_or_else(|| AppError::new(ErrorCode::CartLineNotFound))?;
        if !is_vinyl_line(vinyl) {
            return Err(AppError::new(ErrorCode::CrossSellNotEligible));
        }

        let rate = vinyl
            .rate_per_m2
            .ok_or_else(|| AppError::new(ErrorCode::CrossSellNotEligible))?;
        let (width, length) = match (vinyl.width, vinyl.length) {
            (Some(w), Some(l)) => (w, l),
            _ => return Err(AppError::new(ErrorCode::CrossSellNotEligible)),
        };

        if !is_laminate(laminate)
            || laminate.brand != vinyl.brand
            || !widths_match(laminate.width, vinyl.width)
        {
            return Err(AppError::new(ErrorCode::LaminateNotFound));
        }

        (vinyl.quantity, rate, width, length)
    };
    let (lam_width, lam_length) = match (laminate.width, laminate.length) {
        (Some(w), Some(l)) => (w, l),
        _ => return Err(AppError::new(ErrorCode::LaminateNotFound)),
    };

    if let Some(vinyl) = session.line_mut(choice.vinyl_line_id) {
        let discounted = (vinyl_rate - PAIR_DISCOUNT_PER_M2).max(Decimal::ZERO);
        vinyl.rate_per_m2 = Some(discounted);
        vinyl.calculated_price =
            round_money(discounted * to_decimal(vinyl_width) * to_decimal(vinyl_length));
    }

    let lam_rate = (laminate.price_per_m2 - PAIR_DISCOUNT_PER_M2).max(Decimal::ZERO);
    session.push_line(CartLine {
        line_id: Uuid::new_v4(),
        reference: laminate.reference.clone(),
        name: laminate.name.clone(),
        subcategory: laminate.subcategory.clone(),
        brand: laminate.brand.clone(),
        is_flexible: true,
        quantity: vinyl_quantity,
        calculated_price: round_money(lam_rate * to_decimal(lam_width) * to_decimal(lam_length)),
        rate_per_m2: Some(lam_rate),
        width: Some(lam_width),
        length: Some(lam_length),
        config: LineConfig {
            finish: Some(choice.finish),
            ..LineConfig::default()
        },
    });

    Ok(())
}
