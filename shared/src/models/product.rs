//! Product Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Product category (fixed enumeration)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ProductCategory {
    Flexible,
    Rigid,
    Ink,
    Accessory,
    Display,
}

/// Surface finish for flexible materials
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Finish {
    Gloss,
    Matte,
}

/// Backing color for flexible materials
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Backing {
    White,
    Gray,
    Black,
}

/// Adhesive type for flexible materials
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Adhesive {
    Permanent,
    Removable,
}

/// Product entity
///
/// A flexible (roll-format) product is priced by `price_per_m2`; any other
/// product is priced by `price`. Exactly one of the two drives pricing,
/// selected by `is_flexible`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Stable business key (supplier reference code)
    pub reference: String,
    pub name: String,
    pub category: ProductCategory,
    /// Normalized to lowercase/underscored ASCII, e.g. "vinilo_monomerico"
    pub subcategory: Option<String>,
    pub is_flexible: bool,
    /// Unit price (meaningful when not flexible)
    pub price: Decimal,
    /// Price per square meter (meaningful when flexible)
    pub price_per_m2: Decimal,
    /// Roll width in meters (flexible products)
    pub width: Option<f64>,
    /// Roll length in meters (flexible products)
    pub length: Option<f64>,
    /// Unit label shown next to quantities ("ud", "rollo", "bote")
    pub unit: String,
    pub in_stock: bool,
    pub brand: Option<String>,
    pub finish: Option<Finish>,
    pub backing: Option<Backing>,
    pub adhesive: Option<Adhesive>,
    /// Material family, e.g. "monomeric", "polymeric", "cast"
    pub material_type: Option<String>,
    /// Free-text supplier description (grammage source for canvas)
    pub description: Option<String>,
    /// Shipping weight in kilograms
    pub weight: Option<f64>,
}

impl Product {
    /// The rate that drives pricing for this product
    pub fn priced_rate(&self) -> Decimal {
        if self.is_flexible {
            self.price_per_m2
        } else {
            self.price
        }
    }
}

/// Bulk import/edit payload (catalog maintenance)
///
/// Raw supplier feed row. Subcategory arrives unnormalized; width/length
/// and weight may be absent and are inferred from the reference or name
/// where possible.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductImport {
    pub reference: String,
    pub name: String,
    pub category: ProductCategory,
    pub subcategory: Option<String>,
    pub is_flexible: bool,
    #[serde(default)]
    pub price: Decimal,
    #[serde(default)]
    pub price_per_m2: Decimal,
    pub width: Option<f64>,
    pub length: Option<f64>,
    pub unit: Option<String>,
    #[serde(default = "default_in_stock")]
    pub in_stock: bool,
    pub brand: Option<String>,
    pub finish: Option<Finish>,
    pub backing: Option<Backing>,
    pub adhesive: Option<Adhesive>,
    pub material_type: Option<String>,
    pub description: Option<String>,
    pub weight: Option<f64>,
}

fn default_in_stock() -> bool {
    true
}
