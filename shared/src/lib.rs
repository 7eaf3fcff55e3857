//! Shared types for the storefront workspace
//!
//! Common types used across crates: domain models, unified error
//! codes/types, the API response envelope and cart/order value types.

pub mod error;
pub mod models;
pub mod order;
pub mod response;
pub mod util;

// Re-exports
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{AppError, AppResult, ErrorCode};
pub use response::ApiResponse;
