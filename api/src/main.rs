use std::sync::Arc;

use actix_web::{web, HttpServer};
use anyhow::Context;
use tracing::{info, warn};

use tl_api::app::create_app;
use tl_api::routes::token::AppState;
use tl_api::telemetry::init_tracing;
use tl_core::services::{
    build_token_manager, TokenCleanupConfig, TokenCleanupService, TokenServiceConfig,
};
use tl_shared::AppConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env().context("failed to load configuration")?;
    init_tracing(&config.logging)?;
    config.validate().context("invalid configuration")?;

    info!(
        environment = %config.environment,
        strategy = %config.token.strategy,
        "Starting {}",
        config.token.strategy.service_name()
    );
    if config.token.is_using_default_secret() {
        warn!("JWT_SECRET is not set, using the development secret");
    }

    let manager = build_token_manager(TokenServiceConfig::from(&config.token))
        .context("failed to build token manager")?;

    let cleanup = Arc::new(TokenCleanupService::new(
        manager.clone(),
        TokenCleanupConfig::from(&config.token),
    ));
    let cleanup_task = cleanup.start_background_task();

    let app_state = web::Data::new(
        AppState::new(manager).with_max_payload_size(config.server.max_payload_size),
    );

    let bind_address = config.server.bind_address();
    info!("Server will bind to: {}", bind_address);

    let mut server = HttpServer::new(move || create_app(app_state.clone()));
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("failed to bind {}", bind_address))?
        .run()
        .await?;

    if let Some(task) = cleanup_task {
        task.abort();
    }
    info!("Server stopped");

    Ok(())
}
