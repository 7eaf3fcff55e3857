//! Client Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

/// Client role
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ClientRole {
    Admin,
    Client,
}

/// Client (B2B account) entity
///
/// `rappel_accumulated` is a running loyalty balance in currency units and
/// must never go negative. `custom_prices` maps a product reference to the
/// rate actually charged to this client: a `price` override for unit-priced
/// products, a `price_per_m2` override for flexible ones.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Client {
    pub id: Uuid,
    pub name: String,
    /// Natural key for upserts
    pub email: String,
    pub username: String,
    /// Argon2 PHC string
    pub password_hash: String,
    pub role: ClientRole,
    pub rappel_accumulated: Decimal,
    #[serde(default)]
    pub custom_prices: HashMap<String, Decimal>,
    /// One-time coupon codes already consumed (uppercase-normalized)
    #[serde(default)]
    pub used_coupons: HashSet<String>,
    pub sales_rep: Option<String>,
    pub delegation: Option<String>,
    pub address: Option<String>,
    #[serde(default)]
    pub hide_prices: bool,
}

impl Client {
    /// Verify a password against the stored argon2 hash
    pub fn verify_password(&self, password: &str) -> Result<bool, argon2::password_hash::Error> {
        use argon2::{
            Argon2,
            password_hash::{PasswordHash, PasswordVerifier},
        };

        let parsed_hash = PasswordHash::new(&self.password_hash)?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// Hash a password using argon2
    pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
        use argon2::{
            Argon2,
            password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
        };

        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        let password_hash = argon2.hash_password(password.as_bytes(), &salt)?;
        Ok(password_hash.to_string())
    }
}
