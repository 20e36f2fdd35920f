use actix_web::{web, HttpResponse};

use tl_core::errors::DomainResult;
use tl_core::RevokeOutcome;

use crate::dto::{RevokeTokenRequest, RevokeTokenResponse};
use crate::handlers::error::revoke_error;

use super::AppState;

/// Handler for POST /revoke-token
///
/// # Request Body
///
/// ```json
/// {
///     "token": "..."
/// }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "success": true,
///     "message": "Token revoked successfully",
///     "id": "0b6e4a52-...",
///     "subject": 123
/// }
/// ```
///
/// Revoking a signed token that has already expired is answered with 200 and
/// changes nothing.
///
/// ## Errors
/// - 400 Bad Request: missing `token`, or a signed token that does not verify
/// - 404 Not Found: unknown opaque token
pub async fn revoke_token(
    state: web::Data<AppState>,
    request: web::Json<RevokeTokenRequest>,
) -> HttpResponse {
    match revoke(&state, &request).await {
        Ok(outcome) => {
            let message = match outcome {
                RevokeOutcome::Revoked { .. } => "Token revoked successfully",
                RevokeOutcome::AlreadyExpired { .. } => {
                    "Token already expired (revocation unnecessary)"
                }
            };
            HttpResponse::Ok().json(RevokeTokenResponse {
                success: true,
                message: message.to_string(),
                id: Some(outcome.id().to_string()),
                subject: Some(outcome.subject().to_json()),
            })
        }
        Err(error) => revoke_error(state.strategy(), &error),
    }
}

async fn revoke(state: &AppState, request: &RevokeTokenRequest) -> DomainResult<RevokeOutcome> {
    let token = request.token()?;
    state.manager.revoke(token).await
}
