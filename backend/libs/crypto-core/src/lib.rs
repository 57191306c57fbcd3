//! Token signing primitives for the auth gateway
//!
//! - `jwt`: HS256 token codec (encode claims, verify tokens)
//! - `secret`: signing secret wrapper and strength checks

pub mod jwt;
pub mod secret;

pub use jwt::{Claims, JwtCodec, TokenError};
pub use secret::{Secret, SecretStrength};
