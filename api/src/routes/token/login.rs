use actix_web::{web, HttpMessage, HttpRequest, HttpResponse};
use tracing::info;

use tl_core::errors::{DomainResult, ValidationError};
use tl_shared::config::TokenStrategy;

use crate::dto::{LoginCredentials, LoginForm, LoginRequest, LoginResponse};
use crate::handlers::error::login_error;

use super::AppState;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Handler for POST /login
///
/// Accepts the subject and token either as JSON or as an
/// `application/x-www-form-urlencoded` form. Form subjects that parse as an
/// integer are compared as integers by the signed service; the opaque
/// service compares them as sent.
///
/// # Request Body
///
/// ```text
/// subject=123&token=eyJhbGciOiJIUzI1NiIs...
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "success": true,
///     "message": "Successfully authenticated as 123",
///     "subject": 123
/// }
/// ```
///
/// ## Errors
/// - 400 Bad Request: unreadable body, missing `subject` or `token`
/// - 401 Unauthorized: `{"success": false, "message": ...}`
pub async fn login(req: HttpRequest, state: web::Data<AppState>, body: web::Bytes) -> HttpResponse {
    let strategy = state.strategy();
    match authenticate(&req, &state, &body).await {
        Ok(credentials) => {
            info!(subject = %credentials.subject, "Login successful");
            HttpResponse::Ok().json(LoginResponse::success(&credentials.subject))
        }
        Err(error) => login_error(strategy, &error),
    }
}

async fn authenticate(
    req: &HttpRequest,
    state: &AppState,
    body: &[u8],
) -> DomainResult<LoginCredentials> {
    let credentials = parse_credentials(req.content_type(), body, state.strategy())?;
    state
        .manager
        .verify(&credentials.token, Some(&credentials.subject))
        .await?;
    Ok(credentials)
}

/// Read the credentials from a JSON or form-encoded body
pub fn parse_credentials(
    content_type: &str,
    body: &[u8],
    strategy: TokenStrategy,
) -> Result<LoginCredentials, ValidationError> {
    let unreadable = || ValidationError::InvalidFormat {
        field: "body".to_string(),
    };

    if content_type.eq_ignore_ascii_case(FORM_CONTENT_TYPE) {
        let form: LoginForm = serde_urlencoded::from_bytes(body).map_err(|_| unreadable())?;
        form.credentials(strategy == TokenStrategy::Signed)
    } else {
        let request: LoginRequest = serde_json::from_slice(body).map_err(|_| unreadable())?;
        request.credentials()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tl_core::Subject;

    #[test]
    fn test_parse_form_body() {
        let credentials = parse_credentials(
            FORM_CONTENT_TYPE,
            b"user_id=42&token=abc",
            TokenStrategy::Signed,
        )
        .unwrap();

        assert_eq!(credentials.subject, Subject::Int(42));
        assert_eq!(credentials.token, "abc");
    }

    #[test]
    fn test_parse_json_body() {
        let credentials = parse_credentials(
            "application/json",
            br#"{"id": "alice", "uuid-token": "abc"}"#,
            TokenStrategy::Opaque,
        )
        .unwrap();

        assert_eq!(credentials.subject, Subject::from("alice"));
    }

    #[test]
    fn test_unreadable_body() {
        let error = parse_credentials("application/json", b"{not json", TokenStrategy::Signed)
            .unwrap_err();

        assert_eq!(error.field(), "body");
    }
}
