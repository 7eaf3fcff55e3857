//! Store Server - B2B storefront pricing and ordering engine
//!
//! # Module structure
//!
//! ```text
//! store-server/src/
//! ├── core/       # config, state, server bootstrap
//! ├── catalog/    # dimension recovery, weight estimation
//! ├── pricing/    # effective prices, money helpers, totals composer
//! ├── cart/       # session-scoped cart aggregate
//! ├── marketing/  # coupons, rappel ledger, cross-sell bundling
//! ├── checkout/   # order submission workflow
//! ├── db/         # storage collaborator contracts + in-memory impl
//! ├── services/   # transactional email
//! ├── api/        # HTTP routes and handlers
//! └── utils/      # logging, shared error re-exports
//! ```

pub mod api;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod core;
pub mod db;
pub mod marketing;
pub mod pricing;
pub mod services;
pub mod utils;

// Re-export public types
pub use cart::CartSession;
pub use checkout::CheckoutService;
pub use core::{Config, Server, ServerState};
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// Load .env and prepare the process environment
pub fn setup_environment() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    Ok(())
}

pub fn print_banner() {
    println!(
        r#"
   _____ __
  / ___// /_____  ________
  \__ \/ __/ __ \/ ___/ _ \
 ___/ / /_/ /_/ / /  /  __/
/____/\__/\____/_/   \___/
   _____
  / ___/___  ______   _____  _____
  \__ \/ _ \/ ___/ | / / _ \/ ___/
 ___/ /  __/ /   | |/ /  __/ /
/____/\___/_/    |___/\___/_/
    "#
    );
}
