//! Unified error codes for the storefront workspace
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Client account errors
//! - 3xxx: Coupon / rappel errors
//! - 4xxx: Cart / order errors
//! - 5xxx: Product errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient
/// serialization and cross-language compatibility (Rust, TypeScript, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Required field missing
    RequiredField = 6,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Invalid credentials (username/password)
    InvalidCredentials = 1002,
    /// Account is disabled
    AccountDisabled = 1003,

    // ==================== 2xxx: Client ====================
    /// Client not found
    ClientNotFound = 2001,
    /// Client email already registered
    ClientEmailExists = 2002,

    // ==================== 3xxx: Coupon / Rappel ====================
    /// Coupon code not recognized
    CouponNotFound = 3001,
    /// Coupon is deactivated
    CouponInactive = 3002,
    /// Coupon is past its expiry date
    CouponExpired = 3003,
    /// Coupon usage cap reached
    CouponExhausted = 3004,
    /// One-time coupon already consumed by this client
    CouponAlreadyUsed = 3005,
    /// Cart subtotal below the coupon minimum
    CouponMinOrderNotMet = 3006,
    /// Rappel redemption requires an active percentage coupon
    RappelNotEligible = 3101,
    /// Rappel balance is empty
    RappelBalanceEmpty = 3102,

    // ==================== 4xxx: Cart / Order ====================
    /// Order not found
    OrderNotFound = 4001,
    /// Cart is empty
    CartEmpty = 4002,
    /// Cart line not found
    CartLineNotFound = 4003,
    /// Quantity must be positive
    InvalidQuantity = 4004,
    /// Cart session not found
    SessionNotFound = 4005,

    // ==================== 5xxx: Product ====================
    /// Product not found
    ProductNotFound = 5001,
    /// Product has invalid price
    ProductInvalidPrice = 5002,
    /// No matching laminate candidate for cross-sell
    LaminateNotFound = 5101,
    /// Cart line is not eligible for cross-sell
    CrossSellNotEligible = 5102,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Network error
    NetworkError = 9003,
    /// Operation timeout
    TimeoutError = 9004,
    /// Configuration error
    ConfigError = 9005,
    /// Confirmation email could not be sent
    MailError = 9101,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::RequiredField => "Required field is missing",

            // Auth
            ErrorCode::NotAuthenticated => "User is not authenticated",
            ErrorCode::InvalidCredentials => "Invalid username or password",
            ErrorCode::AccountDisabled => "Account is disabled",

            // Client
            ErrorCode::ClientNotFound => "Client not found",
            ErrorCode::ClientEmailExists => "Client email already registered",

            // Coupon / rappel
            ErrorCode::CouponNotFound => "Invalid coupon",
            ErrorCode::CouponInactive => "Coupon is not active",
            ErrorCode::CouponExpired => "Coupon has expired",
            ErrorCode::CouponExhausted => "Coupon usage limit reached",
            ErrorCode::CouponAlreadyUsed => "Coupon already used",
            ErrorCode::CouponMinOrderNotMet => "Order does not reach the coupon minimum",
            ErrorCode::RappelNotEligible => {
                "Rappel redemption requires an active percentage coupon"
            }
            ErrorCode::RappelBalanceEmpty => "No rappel balance available",

            // Cart / order
            ErrorCode::OrderNotFound => "Order not found",
            ErrorCode::CartEmpty => "Cart is empty",
            ErrorCode::CartLineNotFound => "Cart line not found",
            ErrorCode::InvalidQuantity => "Quantity must be positive",
            ErrorCode::SessionNotFound => "Cart session not found",

            // Product
            ErrorCode::ProductNotFound => "Product not found",
            ErrorCode::ProductInvalidPrice => "Product has invalid price",
            ErrorCode::LaminateNotFound => "No matching laminate found",
            ErrorCode::CrossSellNotEligible => "Line is not eligible for cross-sell",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::NetworkError => "Network error",
            ErrorCode::TimeoutError => "Operation timed out",
            ErrorCode::ConfigError => "Configuration error",
            ErrorCode::MailError => "Failed to send confirmation email",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),
            6 => Ok(ErrorCode::RequiredField),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),
            1002 => Ok(ErrorCode::InvalidCredentials),
            1003 => Ok(ErrorCode::AccountDisabled),

            // Client
            2001 => Ok(ErrorCode::ClientNotFound),
            2002 => Ok(ErrorCode::ClientEmailExists),

            // Coupon / rappel
            3001 => Ok(ErrorCode::CouponNotFound),
            3002 => Ok(ErrorCode::CouponInactive),
            3003 => Ok(ErrorCode::CouponExpired),
            3004 => Ok(ErrorCode::CouponExhausted),
            3005 => Ok(ErrorCode::CouponAlreadyUsed),
            3006 => Ok(ErrorCode::CouponMinOrderNotMet),
            3101 => Ok(ErrorCode::RappelNotEligible),
            3102 => Ok(ErrorCode::RappelBalanceEmpty),

            // Cart / order
            4001 => Ok(ErrorCode::OrderNotFound),
            4002 => Ok(ErrorCode::CartEmpty),
            4003 => Ok(ErrorCode::CartLineNotFound),
            4004 => Ok(ErrorCode::InvalidQuantity),
            4005 => Ok(ErrorCode::SessionNotFound),

            // Product
            5001 => Ok(ErrorCode::ProductNotFound),
            5002 => Ok(ErrorCode::ProductInvalidPrice),
            5101 => Ok(ErrorCode::LaminateNotFound),
            5102 => Ok(ErrorCode::CrossSellNotEligible),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),
            9003 => Ok(ErrorCode::NetworkError),
            9004 => Ok(ErrorCode::TimeoutError),
            9005 => Ok(ErrorCode::ConfigError),
            9101 => Ok(ErrorCode::MailError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_conversion() {
        let codes = [
            ErrorCode::Success,
            ErrorCode::CouponNotFound,
            ErrorCode::RappelNotEligible,
            ErrorCode::CartLineNotFound,
            ErrorCode::LaminateNotFound,
            ErrorCode::ConfigError,
        ];
        for code in codes {
            let raw: u16 = code.into();
            assert_eq!(ErrorCode::try_from(raw), Ok(code));
        }
    }

    #[test]
    fn test_invalid_code_rejected() {
        assert_eq!(ErrorCode::try_from(777), Err(InvalidErrorCode(777)));
        assert_eq!(ErrorCode::try_from(10000), Err(InvalidErrorCode(10000)));
    }

    #[test]
    fn test_serde_as_number() {
        let json = serde_json::to_string(&ErrorCode::CouponExpired).unwrap();
        assert_eq!(json, "3003");
        let back: ErrorCode = serde_json::from_str("3003").unwrap();
        assert_eq!(back, ErrorCode::CouponExpired);
    }
}
