use actix_web::{web, HttpResponse};

use tl_core::errors::DomainResult;
use tl_core::VerifiedToken;

use crate::dto::{VerifyTokenRequest, VerifyTokenResponse};
use crate::handlers::error::verify_error;

use super::AppState;

/// Handler for POST /verify-token
///
/// Verification never changes token state.
///
/// # Request Body
///
/// ```json
/// {
///     "token": "...",
///     "subject": 123
/// }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "valid": true,
///     "subject": 123,
///     "id": "0b6e4a52-...",
///     "exp": 1700003600
/// }
/// ```
///
/// ## Errors
/// - 400 Bad Request: missing `token`, malformed `subject`
/// - 401 Unauthorized: `{"valid": false, "message": ...}` for invalid,
///   expired, revoked or mismatched tokens
/// - 404 Not Found: unknown opaque token
pub async fn verify_token(
    state: web::Data<AppState>,
    request: web::Json<VerifyTokenRequest>,
) -> HttpResponse {
    match verify(&state, &request).await {
        Ok(verified) => HttpResponse::Ok().json(VerifyTokenResponse {
            valid: true,
            subject: verified.subject.to_json(),
            exp: verified.expires_at.timestamp(),
            id: verified.id,
        }),
        Err(error) => verify_error(state.strategy(), &error),
    }
}

async fn verify(state: &AppState, request: &VerifyTokenRequest) -> DomainResult<VerifiedToken> {
    let token = request.token()?;
    let expected = request.expected_subject()?;
    state.manager.verify(token, expected.as_ref()).await
}
