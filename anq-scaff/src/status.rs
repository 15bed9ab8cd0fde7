//! Response status codes
//!
//! Codes are grouped by thousands: `1xxx` system, `2xxx` parameters,
//! `3xxx` authentication, `4xxx` business. `0` is the only success code.

use serde::{Serialize, Serializer};
use std::fmt;

/// Status carried in the `code` field of every [`Envelope`](crate::Envelope)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    /// Operation succeeded
    Success,

    /// Unclassified system failure
    SystemError,
    /// Database failure
    DatabaseError,
    /// Cache failure
    CacheError,
    /// Network failure
    NetworkError,

    /// Invalid parameters
    ParamsError,
    /// A required parameter is absent
    ParamsMissing,
    /// A parameter has the wrong shape
    ParamsInvalid,

    /// Authentication failed
    AuthError,
    /// Token expired
    TokenExpired,
    /// Token invalid
    TokenInvalid,
    /// Caller lacks permission
    PermissionError,

    /// Business rule failure
    BusinessError,
    /// Referenced record does not exist
    RecordNotExist,
    /// Record already exists
    RecordExist,
    /// Operation could not be completed
    OperationFailed,
}

impl Status {
    /// Numeric code sent on the wire
    #[must_use]
    pub const fn code(self) -> i32 {
        match self {
            Self::Success => 0,
            Self::SystemError => 1000,
            Self::DatabaseError => 1001,
            Self::CacheError => 1002,
            Self::NetworkError => 1003,
            Self::ParamsError => 2000,
            Self::ParamsMissing => 2001,
            Self::ParamsInvalid => 2002,
            Self::AuthError => 3000,
            Self::TokenExpired => 3001,
            Self::TokenInvalid => 3002,
            Self::PermissionError => 3003,
            Self::BusinessError => 4000,
            Self::RecordNotExist => 4001,
            Self::RecordExist => 4002,
            Self::OperationFailed => 4003,
        }
    }

    /// Default human-readable message
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::SystemError => "system error",
            Self::DatabaseError => "database error",
            Self::CacheError => "cache error",
            Self::NetworkError => "network error",
            Self::ParamsError => "invalid parameters",
            Self::ParamsMissing => "missing required parameter",
            Self::ParamsInvalid => "malformed parameter",
            Self::AuthError => "authentication failed",
            Self::TokenExpired => "token expired",
            Self::TokenInvalid => "token invalid",
            Self::PermissionError => "permission denied",
            Self::BusinessError => "business error",
            Self::RecordNotExist => "record does not exist",
            Self::RecordExist => "record already exists",
            Self::OperationFailed => "operation failed",
        }
    }

    /// Whether this is the success status
    #[must_use]
    pub const fn is_success(self) -> bool {
        matches!(self, Self::Success)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.message(), self.code())
    }
}

impl Serialize for Status {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i32(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_is_zero() {
        assert_eq!(Status::Success.code(), 0);
        assert!(Status::Success.is_success());
        assert!(!Status::ParamsError.is_success());
    }

    #[test]
    fn test_code_groups() {
        assert_eq!(Status::SystemError.code(), 1000);
        assert_eq!(Status::ParamsError.code(), 2000);
        assert_eq!(Status::AuthError.code(), 3000);
        assert_eq!(Status::BusinessError.code(), 4000);
        assert_eq!(Status::RecordNotExist.code(), 4001);
        assert_eq!(Status::OperationFailed.code(), 4003);
    }

    #[test]
    fn test_serializes_as_code() {
        let json = serde_json::to_value(Status::RecordNotExist).unwrap();
        assert_eq!(json, serde_json::json!(4001));
    }

    #[test]
    fn test_display() {
        assert_eq!(Status::ParamsError.to_string(), "invalid parameters (2000)");
    }
}
