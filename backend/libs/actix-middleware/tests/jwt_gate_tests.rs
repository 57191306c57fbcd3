//! Security tests for the bearer token gate
//!
//! OWASP A02:2021 - Cryptographic Failures
//! OWASP A07:2021 - Identification and Authentication Failures

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use actix_middleware::{AuthenticatedUser, JwtAuthMiddleware};
use actix_web::{test, web, App, HttpResponse};
use crypto_core::{Claims, JwtCodec, Secret};

const SECRET: &str = "gate-integration-secret-2f8a6d0c9e1b47a3";

/// Counts how many times the protected handler body actually ran
#[derive(Default)]
struct Hits(AtomicUsize);

async fn protected(user: AuthenticatedUser, hits: web::Data<Hits>) -> HttpResponse {
    hits.0.fetch_add(1, Ordering::SeqCst);
    HttpResponse::Ok().json(user.into_claims())
}

fn codec(secret: &str) -> Arc<JwtCodec> {
    Arc::new(JwtCodec::new(&Secret::from(secret)))
}

macro_rules! gated_app {
    ($codec:expr, $hits:expr) => {
        test::init_service(
            App::new().app_data($hits.clone()).route(
                "/test",
                web::get()
                    .to(protected)
                    .wrap(JwtAuthMiddleware::new($codec)),
            ),
        )
        .await
    };
}

async fn assert_rejected(authorization: Option<String>) {
    let hits = web::Data::new(Hits::default());
    let app = gated_app!(codec(SECRET), hits);

    let mut req = test::TestRequest::get().uri("/test");
    if let Some(value) = authorization {
        req = req.insert_header(("Authorization", value));
    }
    let resp = test::call_service(&app, req.to_request()).await;

    assert_eq!(resp.status(), 401);
    assert_eq!(hits.0.load(Ordering::SeqCst), 0, "handler must not run");
}

// =============================================================================
// Accepted requests
// =============================================================================

#[actix_web::test]
async fn test_valid_token_reaches_handler_with_claims() {
    let codec = codec(SECRET);
    let token = codec.encode(&Claims::new("fast", true)).unwrap();
    let hits = web::Data::new(Hits::default());
    let app = gated_app!(codec, hits);

    let req = test::TestRequest::get()
        .uri("/test")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_request();
    let claims: Claims = test::call_and_read_body_json(&app, req).await;

    assert_eq!(claims, Claims::new("fast", true));
    assert_eq!(hits.0.load(Ordering::SeqCst), 1);
}

#[actix_web::test]
async fn test_each_request_is_verified_independently() {
    let codec = codec(SECRET);
    let token = codec.encode(&Claims::new("foo", false)).unwrap();
    let hits = web::Data::new(Hits::default());
    let app = gated_app!(codec, hits);

    for _ in 0..3 {
        let req = test::TestRequest::get()
            .uri("/test")
            .insert_header(("Authorization", format!("Bearer {token}")))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200);
    }

    // A valid token does not open the door for a later anonymous request
    let req = test::TestRequest::get().uri("/test").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);
    assert_eq!(hits.0.load(Ordering::SeqCst), 3);
}

#[actix_web::test]
async fn test_lowercase_scheme_reaches_handler() {
    let codec = codec(SECRET);
    let token = codec.encode(&Claims::new("foo", false)).unwrap();
    let hits = web::Data::new(Hits::default());
    let app = gated_app!(codec, hits);

    let req = test::TestRequest::get()
        .uri("/test")
        .insert_header(("Authorization", format!("bearer {token}")))
        .to_request();
    let claims: Claims = test::call_and_read_body_json(&app, req).await;

    assert_eq!(claims, Claims::new("foo", false));
    assert_eq!(hits.0.load(Ordering::SeqCst), 1);
}

// =============================================================================
// Rejected requests
// =============================================================================

#[actix_web::test]
async fn test_missing_authorization_header_is_rejected() {
    assert_rejected(None).await;
}

#[actix_web::test]
async fn test_basic_scheme_is_rejected() {
    assert_rejected(Some("Basic dXNlcjpwYXNzd29yZA==".to_string())).await;
}

#[actix_web::test]
async fn test_garbage_token_is_rejected() {
    assert_rejected(Some("Bearer invalid_token".to_string())).await;
}

#[actix_web::test]
async fn test_extra_separator_is_rejected() {
    let token = codec(SECRET).encode(&Claims::new("foo", false)).unwrap();
    assert_rejected(Some(format!("Bearer  {token}"))).await;
    assert_rejected(Some(format!("Bearer {token} {token}"))).await;
}

#[actix_web::test]
async fn test_token_from_other_secret_is_rejected() {
    let token = codec("some-other-secret-84c2e6a0f1d93b57")
        .encode(&Claims::new("fast", true))
        .unwrap();
    assert_rejected(Some(format!("Bearer {token}"))).await;
}

#[actix_web::test]
async fn test_none_algorithm_is_rejected() {
    // {"alg":"none","typ":"JWT"}.{"username":"fast","isAdmin":true,"iat":1600000000}.
    let token = "eyJhbGciOiJub25lIiwidHlwIjoiSldUIn0.eyJ1c2VybmFtZSI6ImZhc3QiLCJpc0FkbWluIjp0cnVlLCJpYXQiOjE2MDAwMDAwMDB9.";
    assert_rejected(Some(format!("Bearer {token}"))).await;
}

#[actix_web::test]
async fn test_tampered_signature_is_rejected() {
    let token = codec(SECRET).encode(&Claims::new("foo", false)).unwrap();
    let (unsigned, signature) = token.rsplit_once('.').unwrap();
    let flipped: String = signature
        .chars()
        .map(|c| if c == 'A' { 'B' } else { 'A' })
        .collect();

    assert_rejected(Some(format!("Bearer {unsigned}.{flipped}"))).await;
}
