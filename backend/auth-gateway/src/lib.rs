// Auth Gateway Library

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod telemetry;

use std::sync::Arc;

use actix_web::web;
use crypto_core::JwtCodec;

pub use error::{AppError, Result};

use db::CredentialStore;
use services::{AuthService, Counter};

/// Shared state handed to every worker
#[derive(Clone)]
pub struct AppState {
    pub codec: Arc<JwtCodec>,
    pub auth: web::Data<AuthService>,
    pub counter: web::Data<dyn Counter>,
}

impl AppState {
    pub fn new(
        codec: Arc<JwtCodec>,
        users: Arc<dyn CredentialStore>,
        counter: Arc<dyn Counter>,
    ) -> Self {
        Self {
            auth: web::Data::new(AuthService::new(users, codec.clone())),
            counter: web::Data::from(counter),
            codec,
        }
    }

    /// Mount state and routes onto an `App`
    pub fn configure(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(self.auth.clone())
            .app_data(self.counter.clone());
        routes::configure_routes(cfg, self.codec.clone());
    }
}
