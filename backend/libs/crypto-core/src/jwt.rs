//! Token codec for the auth gateway
//!
//! Encodes identity claims into a compact HS256-signed JWT and verifies tokens
//! back into claims. Both directions are bound to a single process-wide
//! [`Secret`] supplied at construction time.
//!
//! ## Security Design
//!
//! - **HS256 ONLY**: tokens carrying any other `alg` are rejected, so a token
//!   signed with `none` or an asymmetric algorithm can never be accepted
//! - **Signature first**: the signature is checked before the payload is
//!   deserialized, nothing from an unverified payload reaches the caller
//! - **Stateless**: decoding never mutates the codec, verifying the same token
//!   twice yields the same claims
//!
//! ## Usage
//!
//! ```rust
//! use crypto_core::jwt::{Claims, JwtCodec};
//! use crypto_core::secret::Secret;
//!
//! let secret = Secret::from("a-long-random-secret-loaded-from-the-environment");
//! let codec = JwtCodec::new(&secret);
//!
//! let claims = Claims::new("fast", true);
//! let token = codec.encode(&claims).unwrap();
//! assert_eq!(codec.decode(&token).unwrap(), claims);
//! ```

use std::time::Duration;

use chrono::Utc;
use jsonwebtoken::{
    errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::secret::Secret;

// ============================================================================
// Constants
// ============================================================================

/// JWT algorithm - the only one this gateway signs or accepts
const JWT_ALGORITHM: Algorithm = Algorithm::HS256;

// ============================================================================
// Data Structures
// ============================================================================

/// Identity carried by a token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub username: String,
    /// Serialized as `isAdmin`; absent means a regular user
    #[serde(rename = "isAdmin", default)]
    pub is_admin: bool,
}

impl Claims {
    pub fn new(username: impl Into<String>, is_admin: bool) -> Self {
        Self {
            username: username.into(),
            is_admin,
        }
    }
}

/// What actually gets signed: the claims plus registered time claims
#[derive(Debug, Serialize, Deserialize)]
struct TokenPayload {
    #[serde(flatten)]
    claims: Claims,
    /// Issued at (Unix timestamp)
    iat: i64,
    /// Expiration time (Unix timestamp), only present when a TTL is configured
    #[serde(default, skip_serializing_if = "Option::is_none")]
    exp: Option<i64>,
}

/// Why a token was not accepted
///
/// The variants exist for diagnostics. Callers facing a client should collapse
/// them into a single "invalid token" answer.
#[derive(Debug, Error)]
pub enum TokenError {
    /// Token parsed but the signature or algorithm does not match the secret
    #[error("token signature is invalid")]
    InvalidSignature,

    /// Token could not be parsed into header, payload and signature
    #[error("token is malformed: {0}")]
    Malformed(String),

    #[error("token has expired")]
    Expired,

    #[error("failed to encode token: {0}")]
    Encoding(String),
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            // A disallowed `alg` is a signature problem, not a parse problem:
            // the token was well formed but was not produced by our key.
            ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
                TokenError::InvalidSignature
            }
            ErrorKind::ExpiredSignature => TokenError::Expired,
            _ => TokenError::Malformed(err.to_string()),
        }
    }
}

// ============================================================================
// Codec
// ============================================================================

/// HS256 encoder/decoder bound to one secret
///
/// Keys are derived once at construction and never modified, so a single
/// codec can be shared across worker threads behind an `Arc`.
pub struct JwtCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Option<Duration>,
}

impl JwtCodec {
    /// Codec issuing tokens without an `exp` claim
    pub fn new(secret: &Secret) -> Self {
        Self::build(secret, None)
    }

    /// Codec issuing tokens that expire `ttl` after issuance
    ///
    /// Tokens lacking `exp` are rejected by a codec built this way.
    pub fn with_ttl(secret: &Secret, ttl: Duration) -> Self {
        Self::build(secret, Some(ttl))
    }

    fn build(secret: &Secret, ttl: Option<Duration>) -> Self {
        let mut validation = Validation::new(JWT_ALGORITHM);
        validation.leeway = 0;
        // `exp` is still checked whenever present
        validation.validate_exp = true;
        if ttl.is_some() {
            validation.set_required_spec_claims(&["exp"]);
        } else {
            validation.required_spec_claims.clear();
        }

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl,
        }
    }

    pub fn ttl(&self) -> Option<Duration> {
        self.ttl
    }

    /// Sign `claims` into a compact JWT string
    ///
    /// ## Errors
    ///
    /// Only fails if the payload cannot be serialized, which does not happen
    /// for well-formed [`Claims`].
    pub fn encode(&self, claims: &Claims) -> Result<String, TokenError> {
        let iat = Utc::now().timestamp();
        let exp = self
            .ttl
            .map(|ttl| iat.saturating_add(i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX)));

        let payload = TokenPayload {
            claims: claims.clone(),
            iat,
            exp,
        };

        jsonwebtoken::encode(&Header::new(JWT_ALGORITHM), &payload, &self.encoding_key)
            .map_err(|e| TokenError::Encoding(e.to_string()))
    }

    /// Verify `token` and return the claims it was signed with
    ///
    /// The header is parsed and the signature verified against the secret
    /// before the payload is deserialized.
    ///
    /// ## Errors
    ///
    /// - [`TokenError::Malformed`] if the string is not a parseable JWT
    /// - [`TokenError::InvalidSignature`] if the signature or `alg` does not match
    /// - [`TokenError::Expired`] if the token carries a past `exp`
    pub fn decode(&self, token: &str) -> Result<Claims, TokenError> {
        let data =
            jsonwebtoken::decode::<TokenPayload>(token, &self.decoding_key, &self.validation)?;
        Ok(data.claims.claims)
    }
}

impl std::fmt::Debug for JwtCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtCodec")
            .field("algorithm", &JWT_ALGORITHM)
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// One-shot helpers
// ============================================================================

/// Sign `claims` with `secret` without keeping a codec around
pub fn encode(claims: &Claims, secret: &Secret) -> Result<String, TokenError> {
    JwtCodec::new(secret).encode(claims)
}

/// Verify `token` against `secret` without keeping a codec around
pub fn decode(token: &str, secret: &Secret) -> Result<Claims, TokenError> {
    JwtCodec::new(secret).decode(token)
}

// ============================================================================
// Tests
// ============================================================================
