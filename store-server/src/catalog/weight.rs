//! Weight Estimator
//!
//! Derives shipping weight for roll-format materials from dimensions and a
//! material-family grammage table. Feeds logistics tooling at catalog
//! maintenance time; checkout never consults it.

use super::dimensions::extract_dimensions;
use regex::Regex;
use rust_decimal::prelude::*;
use shared::models::Product;
use std::sync::LazyLock;

/// Grammage for self-adhesive vinyl, g/m²
const VINYL_GSM: u32 = 130;
/// Grammage for protective laminate, g/m²
const LAMINATE_GSM: u32 = 100;

/// "440 gr", "440gr" in a supplier description
static GRAMMAGE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\d+)\s*gr").unwrap());

/// Estimate a product's shipping weight in kilograms, 3-decimal precision.
///
/// Dimensions come from the stored width/length when present, otherwise
/// from the dimension extractor run over the reference and then the name
/// (first success wins). Without dimensions, or when the grammage resolves
/// to zero, the previously stored weight is returned unchanged; a real
/// value is never overwritten with a zero estimate.
pub fn estimate_weight(product: &Product) -> f64 {
    let stored = product.weight.unwrap_or(0.0);

    let dims = match (product.width, product.length) {
        (Some(w), Some(l)) => Some((w, l)),
        _ => extract_dimensions(&product.reference)
            .or_else(|| extract_dimensions(&product.name))
            .map(|d| (d.width_m, d.length_m)),
    };
    let Some((width, length)) = dims else {
        return stored;
    };

    let gsm = grams_per_m2(product);
    if gsm == 0 {
        return stored;
    }

    let area = width * length;
    let kg = Decimal::from_f64(area * f64::from(gsm)).unwrap_or_default() / Decimal::new(1000, 0);
    kg.round_dp_with_strategy(3, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

/// Resolve grammage by keyword match against name or subcategory.
///
/// Canvas ("lona") grammage varies per article and is read from the
/// supplier description; no match means unknown (0).
fn grams_per_m2(product: &Product) -> u32 {
    let name = product.name.to_lowercase();
    let subcategory = product
        .subcategory
        .as_deref()
        .unwrap_or_default()
        .to_lowercase();
    let matches_keyword = |kw: &str| name.contains(kw) || subcategory.contains(kw);

    if matches_keyword("vinil") {
        VINYL_GSM
    } else if matches_keyword("laminad") {
        LAMINATE_GSM
    } else if matches_keyword("lona") {
        product
            .description
            .as_deref()
            .and_then(|d| GRAMMAGE_RE.captures(d))
            .and_then(|caps| caps[1].parse().ok())
            .unwrap_or(0)
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use shared::models::ProductCategory;

    fn make_flexible(name: &str, reference: &str) -> Product {
        Product {
            reference: reference.to_string(),
            name: name.to_string(),
            category: ProductCategory::Flexible,
            subcategory: None,
            is_flexible: true,
            price: Decimal::ZERO,
            price_per_m2: Decimal::new(450, 2),
            width: None,
            length: None,
            unit: "rollo".to_string(),
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

    #[test]
    fn test_vinyl_weight_from_stored_dimensions() {
        let mut product = make_flexible("Vinilo monomerico brillo", "VIN-001");
        product.width = Some(1.22);
        product.length = Some(50.0);
        // 61 m2 * 130 g/m2 = 7930 g
        assert_eq!(estimate_weight(&product), 7.93);
    }

    #[test]
    fn test_dimensions_recovered_from_reference() {
        let product = make_flexible("Vinilo polimerico", "VIN-12250");
        assert_eq!(estimate_weight(&product), 7.93);
    }

    #[test]
    fn test_dimensions_recovered_from_name() {
        let product = make_flexible("Vinilo impresion 1,22x50", "V-GLOSS");
        assert_eq!(estimate_weight(&product), 7.93);
    }

    #[test]
    fn test_laminate_grammage() {
        let mut product = make_flexible("Laminado pvc mate", "LAM-001");
        product.width = Some(1.52);
        product.length = Some(50.0);
        // 76 m2 * 100 g/m2 = 7600 g
        assert_eq!(estimate_weight(&product), 7.6);
    }

    #[test]
    fn test_canvas_grammage_from_description() {
        let mut product = make_flexible("Lona frontlit", "LON-001");
        product.width = Some(1.6);
        product.length = Some(50.0);
        product.description = Some("Lona frontlit 440 gr blanco brillo".to_string());
        // 80 m2 * 440 g/m2 = 35200 g
        assert_eq!(estimate_weight(&product), 35.2);
    }

    #[test]
    fn test_canvas_without_grammage_keeps_stored_weight() {
        let mut product = make_flexible("Lona frontlit", "LON-002");
        product.width = Some(1.6);
        product.length = Some(50.0);
        product.weight = Some(32.5);
        assert_eq!(estimate_weight(&product), 32.5);
    }

    #[test]
    fn test_unknown_material_keeps_stored_weight() {
        let mut product = make_flexible("Papel fotografico", "PAP-001");
        product.width = Some(1.0);
        product.length = Some(30.0);
        product.weight = Some(4.2);
        assert_eq!(estimate_weight(&product), 4.2);
    }

    #[test]
    fn test_no_dimensions_returns_stored_or_zero() {
        let product = make_flexible("Vinilo de corte", "SIN-REF");
        assert_eq!(estimate_weight(&product), 0.0);

        let mut with_weight = make_flexible("Vinilo de corte", "SIN-REF");
        with_weight.weight = Some(5.0);
        assert_eq!(estimate_weight(&with_weight), 5.0);
    }
}
