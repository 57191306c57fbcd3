/// Auth Gateway - Main entry point
use std::sync::Arc;

use actix_middleware::RequestLogging;
use actix_web::{App, HttpServer};
use anyhow::Context;
use crypto_core::SecretStrength;
use tracing::{info, warn};

use auth_gateway::{
    config::Config, db::InMemoryCredentialStore, services::AtomicCounter, telemetry, AppState,
};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let config = Config::from_env().context("Failed to load configuration")?;
    telemetry::init_tracing(config.log_format);

    info!(
        "Starting auth-gateway v{} on {}:{}",
        env!("CARGO_PKG_VERSION"),
        config.server_host,
        config.server_port
    );
    info!(env = %config.app_env, ttl_secs = ?config.jwt_ttl_secs, "Configuration loaded");

    match config.secret().strength() {
        SecretStrength::Weak => warn!("JWT_SECRET is weak; use at least 32 random bytes"),
        SecretStrength::Acceptable => info!("JWT_SECRET strength acceptable"),
        SecretStrength::Strong => info!("JWT_SECRET strength strong"),
    }
    if config.jwt_ttl_secs.is_none() {
        warn!("JWT_TTL_SECS not set, issued tokens never expire");
    }

    let users = InMemoryCredentialStore::with_default_users();
    if users.is_empty() {
        warn!("Credential store is empty, every login will be refused");
    } else {
        info!(users = users.len(), "Credential store loaded");
    }

    let state = AppState::new(
        Arc::new(config.codec()),
        Arc::new(users),
        Arc::new(AtomicCounter::new()),
    );

    let bind_addr = config.bind_addr();
    HttpServer::new(move || {
        let state = state.clone();
        App::new()
            .wrap(RequestLogging)
            .configure(move |cfg| state.configure(cfg))
    })
    .bind(&bind_addr)
    .with_context(|| format!("Failed to bind {}:{}", bind_addr.0, bind_addr.1))?
    .run()
    .await
    .context("HTTP server terminated with an error")?;

    Ok(())
}
