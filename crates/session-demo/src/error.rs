//! Handler error type and its HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use securetoken::TokenError;
use thiserror::Error;
use tracing::warn;

use crate::protocol::ErrorResponse;

/// Errors returned by request handlers.
///
/// Variants map to HTTP status codes:
/// - [`ServiceError::BadRequest`] → 400
/// - [`ServiceError::Unauthorized`] → 401
/// - [`ServiceError::Internal`] → 500
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The request was malformed, e.g. an empty login form.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// No usable session. The payload is the machine-readable code.
    #[error("unauthorized: {0}")]
    Unauthorized(&'static str),

    /// An unexpected internal error occurred. The message is logged, not sent.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    pub fn http_status(&self) -> StatusCode {
        match self {
            ServiceError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServiceError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ServiceError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ServiceError::BadRequest(_) => "bad_request",
            ServiceError::Unauthorized(code) => *code,
            ServiceError::Internal(_) => "internal_error",
        }
    }
}

impl From<TokenError> for ServiceError {
    fn from(e: TokenError) -> Self {
        if !e.is_rejection() {
            return ServiceError::Internal(e.to_string());
        }
        match e {
            TokenError::Expired => ServiceError::Unauthorized("token_expired"),
            _ => ServiceError::Unauthorized("token_invalid"),
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let message = match &self {
            ServiceError::BadRequest(msg) => msg.clone(),
            ServiceError::Unauthorized(_) => self.to_string(),
            ServiceError::Internal(detail) => {
                warn!(error = %detail, "request failed");
                "internal error".into()
            }
        };
        let body = ErrorResponse::new(self.code(), message);
        (self.http_status(), Json(body)).into_response()
    }
}
