//! Effective Price Resolver
//!
//! Applies a client's per-reference price overrides to a catalog product,
//! producing the rate actually charged to that client. Resolution happens
//! at the moment an item is added to the cart; the resulting rate is what
//! gets frozen into the line's `calculated_price`, never re-derived later.

use rust_decimal::Decimal;
use shared::models::{Client, Product};

/// Resolve the product a given client is actually charged for.
///
/// With no client or no override for this reference, the product is
/// returned unchanged. Otherwise the override replaces `price_per_m2` for
/// flexible products (and zeroes `price`, since flexible items are priced
/// per area, not per unit) or `price` for unit-priced ones.
pub fn effective_product(product: &Product, client: Option<&Client>) -> Product {
    let Some(override_rate) = client.and_then(|c| c.custom_prices.get(&product.reference)) else {
        return product.clone();
    };

    let mut effective = product.clone();
    if effective.is_flexible {
        effective.price_per_m2 = *override_rate;
        effective.price = Decimal::ZERO;
    } else {
        effective.price = *override_rate;
    }
    effective
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{ClientRole, ProductCategory};
    use std::collections::{HashMap, HashSet};
    use uuid::Uuid;

    fn make_product(reference: &str, is_flexible: bool) -> Product {
        Product {
            reference: reference.to_string(),
            name: format!("Product {}", reference),
            category: if is_flexible {
                ProductCategory::Flexible
            } else {
                ProductCategory::Rigid
            },
            subcategory: None,
            is_flexible,
            price: Decimal::new(2500, 2),
            price_per_m2: Decimal::new(450, 2),
            width: is_flexible.then_some(1.22),
            length: is_flexible.then_some(50.0),
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

    fn make_client(overrides: &[(&str, Decimal)]) -> Client {
        Client {
            id: Uuid::new_v4(),
            name: "Rotulos Sur".into(),
            email: "compras@rotulossur.es".into(),
            username: "rotulossur".into(),
            password_hash: String::new(),
            role: ClientRole::Client,
            rappel_accumulated: Decimal::ZERO,
            custom_prices: overrides
                .iter()
                .map(|(r, p)| (r.to_string(), *p))
                .collect::<HashMap<_, _>>(),
            used_coupons: HashSet::new(),
            sales_rep: None,
            delegation: None,
            address: None,
            hide_prices: false,
        }
    }

    #[test]
    fn test_no_client_returns_unchanged() {
        let product = make_product("RIG-001", false);
        let effective = effective_product(&product, None);
        assert_eq!(effective.price, product.price);
        assert_eq!(effective.price_per_m2, product.price_per_m2);
    }

    #[test]
    fn test_no_override_returns_unchanged() {
        let product = make_product("RIG-001", false);
        let client = make_client(&[("OTHER-REF", Decimal::new(999, 2))]);
        let effective = effective_product(&product, Some(&client));
        assert_eq!(effective.price, Decimal::new(2500, 2));
    }

    #[test]
    fn test_rigid_override_replaces_price() {
        let product = make_product("RIG-001", false);
        let client = make_client(&[("RIG-001", Decimal::new(1999, 2))]);
        let effective = effective_product(&product, Some(&client));
        assert_eq!(effective.price, Decimal::new(1999, 2));
        // per-m2 rate untouched for unit-priced products
        assert_eq!(effective.price_per_m2, Decimal::new(450, 2));
    }

    #[test]
    fn test_flexible_override_replaces_rate_and_zeroes_price() {
        let product = make_product("VIN-12250", true);
        let client = make_client(&[("VIN-12250", Decimal::new(399, 2))]);
        let effective = effective_product(&product, Some(&client));
        assert_eq!(effective.price_per_m2, Decimal::new(399, 2));
        assert_eq!(effective.price, Decimal::ZERO);
    }
}
