/// Authentication handlers
use actix_middleware::AuthenticatedUser;
use actix_web::{web, HttpResponse};

use crate::{
    error::AppError,
    models::{LoginRequest, LoginResponse},
    services::AuthService,
};

/// `POST /auth`: exchange credentials for a token
pub async fn login(
    auth: web::Data<AuthService>,
    payload: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    let token = auth.login(&payload.username, &payload.password)?;
    Ok(HttpResponse::Ok().json(LoginResponse { ok: true, token }))
}

/// `GET /auth`: echo the verified claims back to the caller
pub async fn current_user(user: AuthenticatedUser) -> HttpResponse {
    HttpResponse::Ok().json(user.into_claims())
}
