//! Unified error system for the storefront workspace
//!
//! - [`ErrorCode`]: standardized numeric error codes
//! - [`AppError`]: rich error type with code, message and details
//! - HTTP status mapping and axum response conversion
//!
//! # Error Code Ranges
//!
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Client account errors
//! - 3xxx: Coupon / rappel errors
//! - 4xxx: Cart / order errors
//! - 5xxx: Product errors
//! - 9xxx: System errors

mod codes;
mod http;
mod types;

pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{AppError, AppResult};
