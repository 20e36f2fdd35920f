//! Application factory
//!
//! Builds the actix-web application around a shared `AppState`.

use actix_web::{
    error::{InternalError, JsonPayloadError},
    middleware::Logger,
    web, App, HttpRequest, HttpResponse,
};

use tl_shared::errors::{error_codes, ErrorResponse};

use crate::routes::token::{generate_token, home, login, revoke_token, verify_token, AppState};

/// Create and configure the application with all dependencies
pub fn create_app(
    app_state: web::Data<AppState>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let payload_limit = app_state.max_payload_size;

    let json_config = web::JsonConfig::default()
        .limit(payload_limit)
        .error_handler(json_error_handler);

    App::new()
        // Add application state
        .app_data(app_state)
        .app_data(json_config)
        .app_data(web::PayloadConfig::new(payload_limit))
        .wrap(Logger::default())
        // Health check endpoint
        .route("/health", web::get().to(health_check))
        // Token routes
        .route("/", web::get().to(home))
        .route("/generate-token", web::post().to(generate_token))
        .route("/verify-token", web::post().to(verify_token))
        .route("/login", web::post().to(login))
        .route("/revoke-token", web::post().to(revoke_token))
        // Default 404 handler
        .default_service(web::route().to(not_found))
}

/// Answer unreadable JSON bodies with a 400 `ErrorResponse`
fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    tracing::debug!("Rejected JSON body: {}", err);
    let response = HttpResponse::BadRequest().json(ErrorResponse::new(
        error_codes::INVALID_REQUEST,
        format!("Invalid JSON body: {}", err),
    ));
    InternalError::from_response(err, response).into()
}

/// Health check endpoint handler
async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let strategy = state.strategy();
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": strategy.service_name(),
        "strategy": strategy.to_string(),
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        error_codes::NOT_FOUND,
        "The requested resource was not found",
    ))
}
