//! Utilities

pub mod logger;

pub use shared::error::{AppError, AppResult, ErrorCode};
