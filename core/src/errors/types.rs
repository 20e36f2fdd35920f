//! Token and validation error types
//!
//! These errors describe why a token operation failed. The HTTP status a
//! failure maps to depends on the operation and the token strategy and is
//! decided by the presentation layer.

use thiserror::Error;

/// Token-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// Malformed token, bad signature, or unknown opaque token
    #[error("Invalid token")]
    InvalidToken,

    #[error("Token has expired")]
    TokenExpired,

    #[error("Token has been revoked")]
    TokenRevoked,

    #[error("Subject does not match token")]
    SubjectMismatch,

    /// Revocation of an opaque token that is not in the store
    #[error("Token not found")]
    TokenNotFound,

    #[error("Token generation failed")]
    TokenGenerationFailed,
}

/// Input validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing '{field}' field in request")]
    RequiredField { field: String },

    #[error("Invalid format for field '{field}'")]
    InvalidFormat { field: String },

    #[error("Field '{field}' must be a positive integer")]
    NonPositive { field: String },

    #[error("Field '{field}' is out of range")]
    OutOfRange { field: String },
}

impl ValidationError {
    /// Name of the offending request field
    pub fn field(&self) -> &str {
        match self {
            ValidationError::RequiredField { field }
            | ValidationError::InvalidFormat { field }
            | ValidationError::NonPositive { field }
            | ValidationError::OutOfRange { field } => field,
        }
    }
}
