//! Unified error codes for the Brew platform
//!
//! This module defines all error codes used across brew-server, brew-client
//! and the storefront/back-office frontends. Error codes are organized by
//! category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 3xxx: Menu errors
//! - 4xxx: Order errors
//! - 5xxx: Booking errors
//! - 6xxx: Event / ticket errors
//! - 7xxx: Payment errors
//! - 8xxx: Content errors (blog, messages, uploads)
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript, etc.)
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
    /// Value out of range
    ValueOutOfRange = 7,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Invalid credentials (username/password)
    InvalidCredentials = 1002,
    /// Token has expired
    TokenExpired = 1003,
    /// Token is invalid
    TokenInvalid = 1004,
    /// Account is disabled
    AccountDisabled = 1005,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,
    /// Admin role required
    AdminRequired = 2002,

    // ==================== 3xxx: Menu ====================
    /// Menu item not found
    MenuItemNotFound = 3001,
    /// Menu item is not available
    MenuItemUnavailable = 3002,
    /// Menu item has invalid price
    MenuItemInvalidPrice = 3003,
    /// Menu category not found
    MenuCategoryNotFound = 3101,
    /// Menu category name already exists
    MenuCategoryNameExists = 3102,
    /// Menu category has items
    MenuCategoryHasItems = 3103,

    // ==================== 4xxx: Order ====================
    /// Order not found
    OrderNotFound = 4001,
    /// Order has no items
    OrderEmpty = 4002,
    /// Status transition not allowed
    OrderInvalidTransition = 4003,
    /// Delivery address required for delivery orders
    OrderDeliveryAddressRequired = 4004,

    // ==================== 5xxx: Booking ====================
    /// Booking not found
    BookingNotFound = 5001,
    /// Party size out of range
    BookingInvalidPartySize = 5002,
    /// Booking date is in the past
    BookingDateInPast = 5003,
    /// Status transition not allowed
    BookingInvalidTransition = 5004,

    // ==================== 6xxx: Event / Ticket ====================
    /// Event not found
    EventNotFound = 6001,
    /// Event is not published
    EventNotPublished = 6002,
    /// Event is sold out
    EventSoldOut = 6003,
    /// Not enough tickets remaining
    EventInsufficientCapacity = 6004,
    /// Tickets are not sold for this event
    EventTicketsNotSold = 6005,
    /// Ticket quantity out of range
    TicketInvalidQuantity = 6006,
    /// Ticket sale not found
    TicketSaleNotFound = 6007,
    /// Event category not found
    EventCategoryNotFound = 6101,

    // ==================== 7xxx: Payment ====================
    /// Payment processing failed
    PaymentFailed = 7001,
    /// Payment has not been completed
    PaymentNotCompleted = 7002,
    /// Payment provider request failed
    PaymentProviderError = 7003,
    /// Payment intent not found
    PaymentIntentNotFound = 7004,

    // ==================== 8xxx: Content ====================
    /// Blog post not found
    BlogPostNotFound = 8001,
    /// Blog category not found
    BlogCategoryNotFound = 8002,
    /// Blog slug already exists
    BlogSlugExists = 8003,
    /// Message not found
    MessageNotFound = 8101,

    // ==================== 85xx: File Upload ====================
    /// File too large
    FileTooLarge = 8501,
    /// Unsupported file format
    UnsupportedFileFormat = 8502,
    /// Invalid/corrupted image file
    InvalidImageFile = 8503,
    /// Empty file provided
    EmptyFile = 8504,
    /// Image processing failed
    ImageProcessingFailed = 8505,
    /// File storage failed
    FileStorageFailed = 8506,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Network error
    NetworkError = 9003,
    /// Configuration error
    ConfigError = 9004,
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
            ErrorCode::ValueOutOfRange => "Value is out of range",

            // Auth
            ErrorCode::NotAuthenticated => "User is not authenticated",
            ErrorCode::InvalidCredentials => "Invalid username or password",
            ErrorCode::TokenExpired => "Authentication token has expired",
            ErrorCode::TokenInvalid => "Authentication token is invalid",
            ErrorCode::AccountDisabled => "Account is disabled",

            // Permission
            ErrorCode::PermissionDenied => "Permission denied",
            ErrorCode::AdminRequired => "Administrator role is required",

            // Menu
            ErrorCode::MenuItemNotFound => "Menu item not found",
            ErrorCode::MenuItemUnavailable => "Menu item is not available",
            ErrorCode::MenuItemInvalidPrice => "Menu item has invalid price",
            ErrorCode::MenuCategoryNotFound => "Menu category not found",
            ErrorCode::MenuCategoryNameExists => "Menu category name already exists",
            ErrorCode::MenuCategoryHasItems => "Menu category has associated items",

            // Order
            ErrorCode::OrderNotFound => "Order not found",
            ErrorCode::OrderEmpty => "Order has no items",
            ErrorCode::OrderInvalidTransition => "Status transition not allowed",
            ErrorCode::OrderDeliveryAddressRequired => {
                "Delivery address is required for delivery orders"
            }

            // Booking
            ErrorCode::BookingNotFound => "Booking not found",
            ErrorCode::BookingInvalidPartySize => "Party size is out of range",
            ErrorCode::BookingDateInPast => "Booking date is in the past",
            ErrorCode::BookingInvalidTransition => "Status transition not allowed",

            // Event / Ticket
            ErrorCode::EventNotFound => "Event not found",
            ErrorCode::EventNotPublished => "Event is not available",
            ErrorCode::EventSoldOut => "This event is sold out",
            ErrorCode::EventInsufficientCapacity => "Not enough tickets remaining",
            ErrorCode::EventTicketsNotSold => "Tickets are not sold for this event",
            ErrorCode::TicketInvalidQuantity => "Quantity must be between 1 and 10",
            ErrorCode::TicketSaleNotFound => "Ticket sale not found",
            ErrorCode::EventCategoryNotFound => "Event category not found",

            // Payment
            ErrorCode::PaymentFailed => "Payment processing failed",
            ErrorCode::PaymentNotCompleted => "Payment has not been completed",
            ErrorCode::PaymentProviderError => "Payment provider request failed",
            ErrorCode::PaymentIntentNotFound => "Payment intent not found",

            // Content
            ErrorCode::BlogPostNotFound => "Blog post not found",
            ErrorCode::BlogCategoryNotFound => "Blog category not found",
            ErrorCode::BlogSlugExists => "Blog slug already exists",
            ErrorCode::MessageNotFound => "Message not found",

            // File Upload
            ErrorCode::FileTooLarge => "File too large",
            ErrorCode::UnsupportedFileFormat => "Unsupported file format",
            ErrorCode::InvalidImageFile => "Invalid image file",
            ErrorCode::EmptyFile => "Empty file provided",
            ErrorCode::ImageProcessingFailed => "Image processing failed",
            ErrorCode::FileStorageFailed => "File storage failed",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::NetworkError => "Network error",
            ErrorCode::ConfigError => "Configuration error",
        }
    }

    /// Get the HTTP status code for this error code
    pub fn http_status(&self) -> http::StatusCode {
        use http::StatusCode;

        match self {
            ErrorCode::Success => StatusCode::OK,

            // Auth -> 401
            ErrorCode::NotAuthenticated
            | ErrorCode::InvalidCredentials
            | ErrorCode::TokenExpired
            | ErrorCode::TokenInvalid => StatusCode::UNAUTHORIZED,

            // Permission -> 403
            ErrorCode::PermissionDenied
            | ErrorCode::AdminRequired
            | ErrorCode::AccountDisabled => StatusCode::FORBIDDEN,

            // Not found -> 404
            ErrorCode::NotFound
            | ErrorCode::MenuItemNotFound
            | ErrorCode::MenuCategoryNotFound
            | ErrorCode::OrderNotFound
            | ErrorCode::BookingNotFound
            | ErrorCode::EventNotFound
            | ErrorCode::EventCategoryNotFound
            | ErrorCode::TicketSaleNotFound
            | ErrorCode::PaymentIntentNotFound
            | ErrorCode::BlogPostNotFound
            | ErrorCode::BlogCategoryNotFound
            | ErrorCode::MessageNotFound => StatusCode::NOT_FOUND,

            // Conflict -> 409
            ErrorCode::AlreadyExists
            | ErrorCode::MenuCategoryNameExists
            | ErrorCode::BlogSlugExists => StatusCode::CONFLICT,

            // Business rules -> 422
            ErrorCode::OrderInvalidTransition
            | ErrorCode::BookingInvalidTransition
            | ErrorCode::EventSoldOut
            | ErrorCode::EventInsufficientCapacity
            | ErrorCode::EventTicketsNotSold
            | ErrorCode::EventNotPublished
            | ErrorCode::MenuItemUnavailable
            | ErrorCode::MenuCategoryHasItems
            | ErrorCode::PaymentNotCompleted => StatusCode::UNPROCESSABLE_ENTITY,

            // Payment provider -> 502
            ErrorCode::PaymentProviderError => StatusCode::BAD_GATEWAY,

            // System -> 500
            ErrorCode::InternalError
            | ErrorCode::DatabaseError
            | ErrorCode::NetworkError
            | ErrorCode::ConfigError
            | ErrorCode::ImageProcessingFailed
            | ErrorCode::FileStorageFailed
            | ErrorCode::Unknown => StatusCode::INTERNAL_SERVER_ERROR,

            // File too large -> 413
            ErrorCode::FileTooLarge => StatusCode::PAYLOAD_TOO_LARGE,

            // Everything else -> 400
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

impl TryFrom<u16> for ErrorCode {
    type Error = String;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        // Exhaustive mapping keeps serde round-trips in sync with the enum
        let code = match value {
            0 => ErrorCode::Success,
            1 => ErrorCode::Unknown,
            2 => ErrorCode::ValidationFailed,
            3 => ErrorCode::NotFound,
            4 => ErrorCode::AlreadyExists,
            5 => ErrorCode::InvalidRequest,
            6 => ErrorCode::RequiredField,
            7 => ErrorCode::ValueOutOfRange,

            1001 => ErrorCode::NotAuthenticated,
            1002 => ErrorCode::InvalidCredentials,
            1003 => ErrorCode::TokenExpired,
            1004 => ErrorCode::TokenInvalid,
            1005 => ErrorCode::AccountDisabled,

            2001 => ErrorCode::PermissionDenied,
            2002 => ErrorCode::AdminRequired,

            3001 => ErrorCode::MenuItemNotFound,
            3002 => ErrorCode::MenuItemUnavailable,
            3003 => ErrorCode::MenuItemInvalidPrice,
            3101 => ErrorCode::MenuCategoryNotFound,
            3102 => ErrorCode::MenuCategoryNameExists,
            3103 => ErrorCode::MenuCategoryHasItems,

            4001 => ErrorCode::OrderNotFound,
            4002 => ErrorCode::OrderEmpty,
            4003 => ErrorCode::OrderInvalidTransition,
            4004 => ErrorCode::OrderDeliveryAddressRequired,

            5001 => ErrorCode::BookingNotFound,
            5002 => ErrorCode::BookingInvalidPartySize,
            5003 => ErrorCode::BookingDateInPast,
            5004 => ErrorCode::BookingInvalidTransition,

            6001 => ErrorCode::EventNotFound,
            6002 => ErrorCode::EventNotPublished,
            6003 => ErrorCode::EventSoldOut,
            6004 => ErrorCode::EventInsufficientCapacity,
            6005 => ErrorCode::EventTicketsNotSold,
            6006 => ErrorCode::TicketInvalidQuantity,
            6007 => ErrorCode::TicketSaleNotFound,
            6101 => ErrorCode::EventCategoryNotFound,

            7001 => ErrorCode::PaymentFailed,
            7002 => ErrorCode::PaymentNotCompleted,
            7003 => ErrorCode::PaymentProviderError,
            7004 => ErrorCode::PaymentIntentNotFound,

            8001 => ErrorCode::BlogPostNotFound,
            8002 => ErrorCode::BlogCategoryNotFound,
            8003 => ErrorCode::BlogSlugExists,
            8101 => ErrorCode::MessageNotFound,

            8501 => ErrorCode::FileTooLarge,
            8502 => ErrorCode::UnsupportedFileFormat,
            8503 => ErrorCode::InvalidImageFile,
            8504 => ErrorCode::EmptyFile,
            8505 => ErrorCode::ImageProcessingFailed,
            8506 => ErrorCode::FileStorageFailed,

            9001 => ErrorCode::InternalError,
            9002 => ErrorCode::DatabaseError,
            9003 => ErrorCode::NetworkError,
            9004 => ErrorCode::ConfigError,

            other => return Err(format!("unknown error code: {}", other)),
        };
        Ok(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_values() {
        assert_eq!(ErrorCode::Success.code(), 0);
        assert_eq!(ErrorCode::NotAuthenticated.code(), 1001);
        assert_eq!(ErrorCode::EventSoldOut.code(), 6003);
        assert_eq!(ErrorCode::PaymentNotCompleted.code(), 7002);
        assert_eq!(ErrorCode::InternalError.code(), 9001);
    }

    #[test]
    fn test_round_trip() {
        for code in [
            ErrorCode::Success,
            ErrorCode::InvalidCredentials,
            ErrorCode::EventInsufficientCapacity,
            ErrorCode::PaymentProviderError,
            ErrorCode::FileTooLarge,
            ErrorCode::DatabaseError,
        ] {
            let value: u16 = code.into();
            assert_eq!(ErrorCode::try_from(value).unwrap(), code);
        }
        assert!(ErrorCode::try_from(65535).is_err());
    }

    #[test]
    fn test_http_status() {
        use http::StatusCode;
        assert_eq!(ErrorCode::NotAuthenticated.http_status(), StatusCode::UNAUTHORIZED);
        assert_eq!(ErrorCode::EventNotFound.http_status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ErrorCode::EventSoldOut.http_status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(ErrorCode::PaymentProviderError.http_status(), StatusCode::BAD_GATEWAY);
        assert_eq!(ErrorCode::ValidationFailed.http_status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_serialize_as_u16() {
        let json = serde_json::to_string(&ErrorCode::EventSoldOut).unwrap();
        assert_eq!(json, "6003");
        let code: ErrorCode = serde_json::from_str("7002").unwrap();
        assert_eq!(code, ErrorCode::PaymentNotCompleted);
    }
}
