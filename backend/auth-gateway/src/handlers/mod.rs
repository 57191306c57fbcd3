/// HTTP request handlers (REST API)
pub mod api;
pub mod auth;

// Re-export handlers for easy access
pub use api::{count, some_api, CountResponse, MessageResponse};
pub use auth::{current_user, login};

/// Liveness probe
pub async fn health_check() -> &'static str {
    "OK"
}
