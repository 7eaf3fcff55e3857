//! Cart line types

use crate::models::{Adhesive, Backing, Finish};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Per-line configuration chosen at add time
///
/// Participates in the line identity: differently configured variants of
/// the same base product stay distinct cart lines.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LineConfig {
    pub finish: Option<Finish>,
    pub backing: Option<Backing>,
    pub adhesive: Option<Adhesive>,
    /// Configured roll width in meters (flexible products only)
    pub width: Option<f64>,
}

/// A cart line: product snapshot + quantity + locked-in unit price
///
/// `calculated_price` is computed once at add time from the effective
/// product and the chosen configuration, and held fixed regardless of
/// later catalog or override changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartLine {
    pub line_id: Uuid,
    pub reference: String,
    pub name: String,
    pub subcategory: Option<String>,
    pub brand: Option<String>,
    pub is_flexible: bool,
    pub quantity: i32,
    /// Unit price actually charged, frozen at add time
    pub calculated_price: Decimal,
    /// Per-m² rate the unit price was derived from (flexible lines only);
    /// cross-sell re-rating works on this figure
    pub rate_per_m2: Option<Decimal>,
    /// Effective width used for pricing, meters (flexible lines only)
    pub width: Option<f64>,
    /// Roll length used for pricing, meters (flexible lines only)
    pub length: Option<f64>,
    pub config: LineConfig,
}

impl CartLine {
    /// Line total: unit price × quantity
    pub fn line_total(&self) -> Decimal {
        self.calculated_price * Decimal::from(self.quantity)
    }

    /// Whether another add-to-cart request targets this same line
    /// (same product reference and identical configuration)
    pub fn matches(&self, reference: &str, config: &LineConfig) -> bool {
        self.reference == reference && self.config == *config
    }
}
