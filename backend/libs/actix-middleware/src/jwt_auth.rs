//! Bearer token gate
//!
//! [`authenticate`] is the whole authorization decision: pull the bearer token
//! out of the `Authorization` header and verify it. [`JwtAuthMiddleware`]
//! composes that decision in front of a route, so the handler only runs with
//! verified claims attached to the request.

use std::future::{ready, Future, Ready};
use std::pin::Pin;
use std::rc::Rc;
use std::sync::Arc;

use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::{header, header::HeaderMap, StatusCode},
    Error, HttpMessage, HttpResponse, ResponseError,
};
use crypto_core::jwt::{Claims, JwtCodec, TokenError};
use serde_json::json;
use thiserror::Error;

/// Auth scheme expected in the `Authorization` header, matched case-insensitively
pub const BEARER_SCHEME: &str = "Bearer";

/// Why a request was turned away by the gate
#[derive(Debug, Error)]
pub enum AuthError {
    /// Header absent, not UTF-8, not `<scheme> <token>` or wrong scheme
    #[error("No authorization token was found")]
    Missing,

    /// Token present but rejected by the codec
    #[error("invalid token")]
    InvalidToken(#[source] TokenError),
}

impl ResponseError for AuthError {
    fn status_code(&self) -> StatusCode {
        StatusCode::UNAUTHORIZED
    }

    fn error_response(&self) -> HttpResponse {
        // Display never includes the codec's reason
        HttpResponse::build(self.status_code()).json(json!({
            "ok": false,
            "error": self.to_string(),
        }))
    }
}

/// Verified claims attached to a request by [`JwtAuthMiddleware`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser(pub Claims);

impl AuthenticatedUser {
    pub fn claims(&self) -> &Claims {
        &self.0
    }

    pub fn into_claims(self) -> Claims {
        self.0
    }
}

/// Extract and verify the bearer token carried by `headers`
pub fn authenticate(headers: &HeaderMap, codec: &JwtCodec) -> Result<Claims, AuthError> {
    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(bearer_token)
        .ok_or(AuthError::Missing)?;

    codec.decode(token).map_err(AuthError::InvalidToken)
}

/// Split `<scheme> <token>` on its single space
fn bearer_token(value: &str) -> Option<&str> {
    let (scheme, token) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case(BEARER_SCHEME) || token.is_empty() || token.contains(' ') {
        return None;
    }
    Some(token)
}

/// JWT Authentication Middleware
///
/// Wrap individual routes with it. Requests that fail [`authenticate`] get a
/// 401 response and never reach the wrapped service.
#[derive(Clone)]
pub struct JwtAuthMiddleware {
    codec: Arc<JwtCodec>,
}

impl JwtAuthMiddleware {
    pub fn new(codec: Arc<JwtCodec>) -> Self {
        Self { codec }
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtAuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = JwtAuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddlewareService {
            service: Rc::new(service),
            codec: self.codec.clone(),
        }))
    }
}

pub struct JwtAuthMiddlewareService<S> {
    service: Rc<S>,
    codec: Arc<JwtCodec>,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let codec = self.codec.clone();

        Box::pin(async move {
            match authenticate(req.headers(), &codec) {
                Ok(claims) => {
                    tracing::debug!(username = %claims.username, "request authenticated");
                    req.extensions_mut().insert(AuthenticatedUser(claims));
                    let res = service.call(req).await?;
                    Ok(res.map_into_left_body())
                }
                Err(err) => {
                    match &err {
                        AuthError::Missing => {
                            tracing::warn!(path = %req.path(), "missing bearer token")
                        }
                        AuthError::InvalidToken(reason) => {
                            tracing::warn!(path = %req.path(), reason = %reason, "JWT validation failed")
                        }
                    }
                    Ok(req.error_response(err).map_into_right_body())
                }
            }
        })
    }
}

/// FromRequest implementation for AuthenticatedUser
impl actix_web::FromRequest for AuthenticatedUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(
        req: &actix_web::HttpRequest,
        _payload: &mut actix_web::dev::Payload,
    ) -> Self::Future {
        match req.extensions().get::<AuthenticatedUser>() {
            Some(user) => ready(Ok(user.clone())),
            None => ready(Err(AuthError::Missing.into())),
        }
    }
}
