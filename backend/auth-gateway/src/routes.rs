/// Route definitions and middleware setup
use std::sync::Arc;

use actix_middleware::JwtAuthMiddleware;
use actix_web::web;
use crypto_core::JwtCodec;

use crate::error::AppError;
use crate::handlers::{count, current_user, health_check, login, some_api};

/// Register every endpoint
///
/// Protected routes are wrapped with the token gate one by one, so a route
/// is open unless it says otherwise here.
pub fn configure_routes(cfg: &mut web::ServiceConfig, codec: Arc<JwtCodec>) {
    let gate = JwtAuthMiddleware::new(codec);

    cfg.app_data(json_config())
        .route("/health", web::get().to(health_check))
        .service(
            web::resource("/auth")
                .route(web::post().to(login))
                .route(web::get().to(current_user).wrap(gate.clone())),
        )
        .route("/some-api", web::get().to(some_api).wrap(gate.clone()))
        .route("/count", web::post().to(count).wrap(gate));
}

/// Unparseable bodies answer with the same `{ok, error}` shape as other failures
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(4096)
        .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into())
}
