//! # Actix Middleware Library
//!
//! Middleware components shared by the gateway's actix services
//!
//! ## Modules
//! - `jwt_auth`: bearer token gate and the `AuthenticatedUser` extractor
//! - `logging`: per-request tracing events

pub mod jwt_auth;
pub mod logging;

pub use jwt_auth::{authenticate, AuthError, AuthenticatedUser, JwtAuthMiddleware, BEARER_SCHEME};
pub use logging::RequestLogging;
