use actix_web::error::{BlockingError, JsonPayloadError};
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse};
use thiserror::Error;

use crate::domain::errors::DomainError;

/// Errors surfaced by the `/api` routes as `{"success": false, "message": ..}`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("Not found")]
    NotFound,

    #[error("{0}")]
    Internal(String),
}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::NotFound => AppError::NotFound,
            DomainError::Validation(msg) => AppError::Validation(msg),
            DomainError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

impl From<BlockingError> for AppError {
    fn from(e: BlockingError) -> Self {
        AppError::Internal(e.to_string())
    }
}

/// Body extraction failures on `/api` routes (malformed JSON, a non-object
/// body, wrong content type) answer with the `success: false` envelope.
pub fn api_json_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::Validation(err.to_string()).into()
}

impl actix_web::ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let AppError::Internal(msg) = self {
            log::error!("request failed: {}", msg);
        }
        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "success": false,
            "message": self.to_string()
        }))
    }
}

/// Errors surfaced by the older `/po` routes as `{"error": ..}`. Store
/// failures are reported as bad requests there.
#[derive(Debug, Error)]
pub enum LegacyError {
    #[error("{0}")]
    Store(String),

    #[error("Internal server error")]
    Unexpected(String),
}

impl From<DomainError> for LegacyError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::Validation(msg) | DomainError::Internal(msg) => LegacyError::Store(msg),
            DomainError::NotFound => LegacyError::Store(DomainError::NotFound.to_string()),
        }
    }
}

impl From<BlockingError> for LegacyError {
    fn from(e: BlockingError) -> Self {
        LegacyError::Unexpected(e.to_string())
    }
}

/// Body extraction failures on `/po` answer with `{"error": ..}`.
pub fn legacy_json_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    LegacyError::Store(err.to_string()).into()
}

impl actix_web::ResponseError for LegacyError {
    fn status_code(&self) -> StatusCode {
        match self {
            LegacyError::Store(_) => StatusCode::BAD_REQUEST,
            LegacyError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            LegacyError::Store(msg) => log::error!("purchase order store error: {}", msg),
            LegacyError::Unexpected(msg) => log::error!("unexpected error: {}", msg),
        }
        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "error": self.to_string()
        }))
    }
}
