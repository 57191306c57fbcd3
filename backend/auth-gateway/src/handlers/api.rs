/// Example resources behind the token gate
use actix_middleware::AuthenticatedUser;
use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::services::Counter;

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub ok: bool,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CountResponse {
    pub ok: bool,
    pub count: u64,
}

/// `GET /some-api`
pub async fn some_api(_user: AuthenticatedUser) -> HttpResponse {
    HttpResponse::Ok().json(MessageResponse {
        ok: true,
        message: "Hello JWT!".to_string(),
    })
}

/// `POST /count`: bump the shared counter
pub async fn count(user: AuthenticatedUser, counter: web::Data<dyn Counter>) -> HttpResponse {
    let count = counter.increment();
    tracing::debug!(username = %user.claims().username, count, "counter incremented");

    HttpResponse::Ok().json(CountResponse { ok: true, count })
}
