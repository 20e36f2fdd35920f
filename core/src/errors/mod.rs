//! Domain-specific error types and error handling.

mod types;


pub use types::{TokenError, ValidationError};

use thiserror::Error;
use tl_shared::errors::{error_codes, ErrorResponse};

/// Core domain errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Internal error: {message}")]
    Internal { message: String },

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

pub type DomainResult<T> = Result<T, DomainError>;

/// Caller-facing classification of a failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidRequest,
    InvalidToken,
    TokenExpired,
    TokenRevoked,
    SubjectMismatch,
    TokenNotFound,
    InternalError,
}

impl ErrorKind {
    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::InvalidRequest => error_codes::INVALID_REQUEST,
            ErrorKind::InvalidToken => error_codes::INVALID_TOKEN,
            ErrorKind::TokenExpired => error_codes::TOKEN_EXPIRED,
            ErrorKind::TokenRevoked => error_codes::TOKEN_REVOKED,
            ErrorKind::SubjectMismatch => error_codes::SUBJECT_MISMATCH,
            ErrorKind::TokenNotFound => error_codes::TOKEN_NOT_FOUND,
            ErrorKind::InternalError => error_codes::INTERNAL_ERROR,
        }
    }
}

impl DomainError {
    pub fn internal(message: impl Into<String>) -> Self {
        DomainError::Internal {
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            DomainError::Validation(_) => ErrorKind::InvalidRequest,
            DomainError::Internal { .. } => ErrorKind::InternalError,
            DomainError::Token(token_error) => match token_error {
                TokenError::InvalidToken => ErrorKind::InvalidToken,
                TokenError::TokenExpired => ErrorKind::TokenExpired,
                TokenError::TokenRevoked => ErrorKind::TokenRevoked,
                TokenError::SubjectMismatch => ErrorKind::SubjectMismatch,
                TokenError::TokenNotFound => ErrorKind::TokenNotFound,
                TokenError::TokenGenerationFailed => ErrorKind::InternalError,
            },
        }
    }

    /// Message safe to show to callers; internal details are withheld
    pub fn public_message(&self) -> String {
        match self.kind() {
            ErrorKind::InternalError => "Internal server error".to_string(),
            _ => self.to_string(),
        }
    }
}

/// Convert DomainError to ErrorResponse
impl From<&DomainError> for ErrorResponse {
    fn from(err: &DomainError) -> Self {
        let response = ErrorResponse::new(err.kind().code(), err.public_message());
        match err {
            DomainError::Validation(validation) => response.add_detail("field", validation.field()),
            _ => response,
        }
    }
}
