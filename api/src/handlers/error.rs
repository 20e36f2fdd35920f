//! Conversion of domain errors into HTTP responses
//!
//! The same domain error maps to different status codes depending on the
//! endpoint and on the token strategy in use. The opaque service answers an
//! unknown token with 404 where the signed service answers 401 (verify) or
//! 400 (revoke).

use actix_web::{http::StatusCode, HttpResponse};

use tl_core::errors::{DomainError, ErrorKind, TokenError};
use tl_shared::config::TokenStrategy;

use crate::dto::{ErrorResponse, LoginResponse, RevokeTokenResponse, VerifyFailureResponse};

/// Endpoint a failure occurred in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Issue,
    Verify,
    Login,
    Revoke,
}

/// Status code for `error` raised by `operation` under `strategy`
pub fn status_for(operation: Operation, strategy: TokenStrategy, error: &DomainError) -> StatusCode {
    match error.kind() {
        ErrorKind::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorKind::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        ErrorKind::TokenNotFound => StatusCode::NOT_FOUND,
        ErrorKind::InvalidToken => match (operation, strategy) {
            (Operation::Verify, TokenStrategy::Opaque) => StatusCode::NOT_FOUND,
            (Operation::Revoke, _) => StatusCode::BAD_REQUEST,
            _ => StatusCode::UNAUTHORIZED,
        },
        ErrorKind::TokenExpired | ErrorKind::TokenRevoked | ErrorKind::SubjectMismatch => {
            StatusCode::UNAUTHORIZED
        }
    }
}

/// Generic `ErrorResponse` body for `error`
pub fn handle_domain_error(status: StatusCode, error: &DomainError) -> HttpResponse {
    if status.is_server_error() {
        tracing::error!("Domain Error: {:?}", error);
    } else {
        tracing::debug!("Request rejected: {}", error);
    }
    HttpResponse::build(status).json(ErrorResponse::from(error))
}

pub fn issue_error(strategy: TokenStrategy, error: &DomainError) -> HttpResponse {
    handle_domain_error(status_for(Operation::Issue, strategy, error), error)
}

/// Token failures use the `{valid: false, message}` envelope
pub fn verify_error(strategy: TokenStrategy, error: &DomainError) -> HttpResponse {
    let status = status_for(Operation::Verify, strategy, error);
    match error {
        DomainError::Token(TokenError::InvalidToken) if strategy == TokenStrategy::Opaque => {
            HttpResponse::build(status).json(VerifyFailureResponse::new(
                TokenError::TokenNotFound.to_string(),
            ))
        }
        DomainError::Token(token_error) => {
            HttpResponse::build(status).json(VerifyFailureResponse::new(token_error.to_string()))
        }
        _ => handle_domain_error(status, error),
    }
}

/// Every failure except internal ones uses the `{success: false, message}` envelope
pub fn login_error(strategy: TokenStrategy, error: &DomainError) -> HttpResponse {
    let status = status_for(Operation::Login, strategy, error);
    match error {
        DomainError::Internal { .. } | DomainError::Token(TokenError::TokenGenerationFailed) => {
            handle_domain_error(status, error)
        }
        _ => HttpResponse::build(status).json(LoginResponse::failure(error.public_message())),
    }
}

pub fn revoke_error(strategy: TokenStrategy, error: &DomainError) -> HttpResponse {
    let status = status_for(Operation::Revoke, strategy, error);
    match error {
        DomainError::Token(TokenError::TokenNotFound) => {
            HttpResponse::build(status).json(RevokeTokenResponse::failure(error.to_string()))
        }
        _ => handle_domain_error(status, error),
    }
}
