use actix_web::{web, HttpResponse};

use tl_core::errors::DomainResult;
use tl_core::IssuedToken;

use crate::dto::{GenerateTokenRequest, GenerateTokenResponse};
use crate::handlers::error::issue_error;

use super::AppState;

/// Handler for POST /generate-token
///
/// # Request Body
///
/// ```json
/// {
///     "subject": 123,
///     "expires_in": 3600
/// }
/// ```
///
/// `subject` may be an integer or a string (`user_id` and `id` are accepted
/// as aliases). `expires_in` is optional and defaults to the configured
/// lifetime.
///
/// # Response
///
/// ## Success (201 Created)
/// ```json
/// {
///     "subject": 123,
///     "token": "eyJhbGciOiJIUzI1NiIs...",
///     "expires_in": 3600
/// }
/// ```
///
/// ## Errors
/// - 400 Bad Request: missing or invalid `subject`, non-positive `expires_in`
/// - 500 Internal Server Error: token could not be produced
pub async fn generate_token(
    state: web::Data<AppState>,
    request: web::Json<GenerateTokenRequest>,
) -> HttpResponse {
    match issue(&state, &request).await {
        Ok(issued) => HttpResponse::Created().json(GenerateTokenResponse {
            subject: issued.subject.to_json(),
            token: issued.token,
            expires_in: issued.expires_in,
        }),
        Err(error) => issue_error(state.strategy(), &error),
    }
}

async fn issue(state: &AppState, request: &GenerateTokenRequest) -> DomainResult<IssuedToken> {
    let subject = request.subject()?;
    let expires_in = request.expires_in()?;
    state.manager.issue(subject, expires_in).await
}
