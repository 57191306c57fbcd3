//! Request logging middleware
//!
//! Emits one `tracing` event per completed request with method, path, status,
//! latency and, for gated routes, the authenticated username. Tokens and
//! headers are never logged.

use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    Error, HttpMessage,
};
use futures::future::LocalBoxFuture;
use std::future::{ready, Ready};
use std::time::Instant;

use crate::jwt_auth::AuthenticatedUser;

#[derive(Clone, Default)]
pub struct RequestLogging;

impl<S, B> Transform<S, ServiceRequest> for RequestLogging
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = RequestLoggingService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequestLoggingService { service }))
    }
}

pub struct RequestLoggingService<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for RequestLoggingService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let start = Instant::now();
        let method = req.method().clone();
        let path = req.path().to_string();

        let fut = self.service.call(req);

        Box::pin(async move {
            let res = fut.await?;
            let elapsed = start.elapsed();
            let status = res.status();
            // Set by the gate on routes it wraps
            let username = res
                .request()
                .extensions()
                .get::<AuthenticatedUser>()
                .map(|user| user.claims().username.clone());

            if status.is_server_error() {
                tracing::error!(
                    method = %method,
                    path = %path,
                    status = status.as_u16(),
                    duration_ms = elapsed.as_millis() as u64,
                    user = username.as_deref().unwrap_or("-"),
                    "request failed"
                );
            } else {
                tracing::info!(
                    method = %method,
                    path = %path,
                    status = status.as_u16(),
                    duration_ms = elapsed.as_millis() as u64,
                    user = username.as_deref().unwrap_or("-"),
                    "request completed"
                );
            }

            Ok(res)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jwt_auth::JwtAuthMiddleware;
    use actix_web::{test, web, App, HttpResponse};
    use crypto_core::{Claims, JwtCodec, Secret};
    use std::sync::Arc;

    async fn ok() -> HttpResponse {
        HttpResponse::Ok().finish()
    }

    #[actix_web::test]
    async fn test_logging_passes_responses_through() {
        let codec = Arc::new(JwtCodec::new(&Secret::from("logging-secret-0e7b3c9a51f2d864")));
        let token = codec.encode(&Claims::new("fast", true)).unwrap();

        let app = test::init_service(
            App::new()
                .wrap(RequestLogging)
                .route("/open", web::get().to(ok))
                .route(
                    "/closed",
                    web::get()
                        .to(ok)
                        .wrap(JwtAuthMiddleware::new(codec)),
                ),
        )
        .await;

        let open = test::call_service(&app, test::TestRequest::get().uri("/open").to_request()).await;
        assert!(open.status().is_success());

        let closed = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/closed")
                .insert_header(("Authorization", format!("Bearer {token}")))
                .to_request(),
        )
        .await;
        assert!(closed.status().is_success());

        let denied =
            test::call_service(&app, test::TestRequest::get().uri("/closed").to_request()).await;
        assert_eq!(denied.status(), 401);
    }
}
