//! Unified error codes for the Lotus Salon suite
//!
//! Error codes are shared across the API server, the client crates and the
//! app frontends, organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 3xxx: Tenant errors
//! - 8xxx: Staff errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Unified error code enum
///
/// Represented as u16 values for efficient serialization and cross-language
/// compatibility (Rust, TypeScript, etc.)
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

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Invalid credentials (username/password)
    InvalidCredentials = 1002,
    /// Token has expired
    TokenExpired = 1003,
    /// Token is invalid
    TokenInvalid = 1004,
    /// Session has expired
    SessionExpired = 1005,
    /// Account is disabled
    AccountDisabled = 1006,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,
    /// Owner role required
    OwnerRequired = 2002,
    /// Page access denied by the staff permission schema
    PageAccessDenied = 2003,

    // ==================== 3xxx: Tenant ====================
    /// Tenant not selected
    TenantNotSelected = 3001,
    /// Tenant not found
    TenantNotFound = 3002,

    // ==================== 8xxx: Staff ====================
    /// Staff member not found
    StaffNotFound = 8001,
    /// Staff member already exists
    StaffAlreadyExists = 8002,
    /// Staff member has no login capability
    StaffLoginDisabled = 8003,

    // ==================== 9xxx: System ====================
    /// Internal error
    Internal = 9001,
    /// IO error
    Io = 9002,
    /// Serialization error
    Serialization = 9003,
}

impl ErrorCode {
    /// Numeric value of the code
    pub fn code(&self) -> u16 {
        *self as u16
    }

    /// Default human-readable message
    pub fn message(&self) -> &'static str {
        match self {
            ErrorCode::Success => "Success",
            ErrorCode::Unknown => "Unknown error",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::NotAuthenticated => "Authentication required",
            ErrorCode::InvalidCredentials => "Invalid username or password",
            ErrorCode::TokenExpired => "Token expired",
            ErrorCode::TokenInvalid => "Invalid token",
            ErrorCode::SessionExpired => "Session expired",
            ErrorCode::AccountDisabled => "Account is disabled",
            ErrorCode::PermissionDenied => "Permission denied",
            ErrorCode::OwnerRequired => "Owner role required",
            ErrorCode::PageAccessDenied => "Page access denied",
            ErrorCode::TenantNotSelected => "Tenant not selected",
            ErrorCode::TenantNotFound => "Tenant not found",
            ErrorCode::StaffNotFound => "Staff member not found",
            ErrorCode::StaffAlreadyExists => "Staff member already exists",
            ErrorCode::StaffLoginDisabled => "Staff member has no login capability",
            ErrorCode::Internal => "Internal error",
            ErrorCode::Io => "IO error",
            ErrorCode::Serialization => "Serialization error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{:04}", self.code())
    }
}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> u16 {
        code.code()
    }
}

/// Error returned when converting an unrecognized u16 value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid error code: {0}")]
pub struct InvalidErrorCode(pub u16);

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        let code = match value {
            0 => ErrorCode::Success,
            1 => ErrorCode::Unknown,
            2 => ErrorCode::ValidationFailed,
            3 => ErrorCode::NotFound,
            4 => ErrorCode::AlreadyExists,
            5 => ErrorCode::InvalidRequest,
            1001 => ErrorCode::NotAuthenticated,
            1002 => ErrorCode::InvalidCredentials,
            1003 => ErrorCode::TokenExpired,
            1004 => ErrorCode::TokenInvalid,
            1005 => ErrorCode::SessionExpired,
            1006 => ErrorCode::AccountDisabled,
            2001 => ErrorCode::PermissionDenied,
            2002 => ErrorCode::OwnerRequired,
            2003 => ErrorCode::PageAccessDenied,
            3001 => ErrorCode::TenantNotSelected,
            3002 => ErrorCode::TenantNotFound,
            8001 => ErrorCode::StaffNotFound,
            8002 => ErrorCode::StaffAlreadyExists,
            8003 => ErrorCode::StaffLoginDisabled,
            9001 => ErrorCode::Internal,
            9002 => ErrorCode::Io,
            9003 => ErrorCode::Serialization,
            other => return Err(InvalidErrorCode(other)),
        };
        Ok(code)
    }
}

/// Application error carrying a code and an optional custom message
#[derive(Debug, Clone)]
pub struct AppError {
    pub code: ErrorCode,
    custom_message: Option<String>,
}

impl AppError {
    /// Create an error with the code's default message
    pub fn new(code: ErrorCode) -> Self {
        Self {
            code,
            custom_message: None,
        }
    }

    /// Create an error with a custom message
    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            custom_message: Some(message.into()),
        }
    }

    /// The effective message (custom if set, otherwise the code default)
    pub fn message(&self) -> &str {
        self.custom_message
            .as_deref()
            .unwrap_or_else(|| self.code.message())
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message())
    }
}

impl std::error::Error for AppError {}

impl From<ErrorCode> for AppError {
    fn from(code: ErrorCode) -> Self {
        AppError::new(code)
    }
}

/// Result type for application operations
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::Success.code(), 0);
        assert_eq!(ErrorCode::ValidationFailed.code(), 2);
        assert_eq!(ErrorCode::NotAuthenticated.code(), 1001);
        assert_eq!(ErrorCode::SessionExpired.code(), 1005);
        assert_eq!(ErrorCode::PermissionDenied.code(), 2001);
        assert_eq!(ErrorCode::PageAccessDenied.code(), 2003);
        assert_eq!(ErrorCode::TenantNotSelected.code(), 3001);
        assert_eq!(ErrorCode::StaffNotFound.code(), 8001);
        assert_eq!(ErrorCode::Internal.code(), 9001);
    }

    #[test]
    fn test_try_from_round_trip() {
        let codes = [
            ErrorCode::Success,
            ErrorCode::InvalidCredentials,
            ErrorCode::PageAccessDenied,
            ErrorCode::TenantNotFound,
            ErrorCode::StaffLoginDisabled,
            ErrorCode::Serialization,
        ];
        for code in codes {
            assert_eq!(ErrorCode::try_from(code.code()), Ok(code));
        }
        assert_eq!(ErrorCode::try_from(4242), Err(InvalidErrorCode(4242)));
    }

    #[test]
    fn test_serde_as_u16() {
        let json = serde_json::to_string(&ErrorCode::PermissionDenied).unwrap();
        assert_eq!(json, "2001");
        let code: ErrorCode = serde_json::from_str("1003").unwrap();
        assert_eq!(code, ErrorCode::TokenExpired);
        assert!(serde_json::from_str::<ErrorCode>("65535").is_err());
    }

    #[test]
    fn test_app_error_messages() {
        let err = AppError::new(ErrorCode::PageAccessDenied);
        assert_eq!(err.message(), "Page access denied");
        assert_eq!(err.to_string(), "E2003: Page access denied");

        let err = AppError::with_message(ErrorCode::ValidationFailed, "missing username");
        assert_eq!(err.message(), "missing username");
    }
}
