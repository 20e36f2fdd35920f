use actix_web::{web, HttpResponse};
use serde_json::json;

use super::AppState;

/// Handler for GET /
///
/// Describes the running service and its endpoints.
pub async fn home(state: web::Data<AppState>) -> HttpResponse {
    let strategy = state.strategy();
    HttpResponse::Ok().json(json!({
        "message": strategy.service_name(),
        "strategy": strategy.to_string(),
        "endpoints": {
            "/generate-token": "POST - Generate a new token for a subject",
            "/verify-token": "POST - Verify an existing token",
            "/login": "POST - Login with a subject and token",
            "/revoke-token": "POST - Revoke a token (logout)",
            "/health": "GET - Service health"
        }
    }))
}
