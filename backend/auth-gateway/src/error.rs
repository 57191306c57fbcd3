use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use crypto_core::TokenError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    /// Never says which of username or password was wrong
    #[error("No matched user")]
    CredentialMismatch,

    #[error("{0}")]
    BadRequest(String),

    #[error("Token error: {0}")]
    Token(#[from] TokenError),
}

/// Body of every error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub ok: bool,
    pub error: String,
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::CredentialMismatch | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Token(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let error = match self {
            AppError::Token(e) => {
                tracing::error!(error = %e, "failed to issue token");
                "internal error".to_string()
            }
            other => other.to_string(),
        };

        HttpResponse::build(self.status_code()).json(ErrorResponse { ok: false, error })
    }
}
