//! Mapping from lifecycle errors to HTTP responses.

use super::dto::ErrorBody;
use crate::error::PaymentError;
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::error;

/// Errors surfaced by the HTTP handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The body was not valid JSON or did not match the expected shape.
    #[error("invalid request body: {0}")]
    InvalidBody(String),

    #[error(transparent)]
    Payment(#[from] PaymentError),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidBody(rejection.body_text())
    }
}

impl ApiError {
    /// - Invalid body or validation failure: 400 Bad Request
    /// - Unknown order: 404 Not Found
    /// - Order owned by another user: 403 Forbidden
    /// - Anything else: 500 Internal Server Error
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidBody(_) | Self::Payment(PaymentError::ValidationError(_)) => {
                StatusCode::BAD_REQUEST
            }
            Self::Payment(PaymentError::OrderNotFound(_)) => StatusCode::NOT_FOUND,
            Self::Payment(PaymentError::Unauthorized(_)) => StatusCode::FORBIDDEN,
            Self::Payment(PaymentError::AlreadyVerified(_)) => StatusCode::CONFLICT,
            Self::Payment(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        // Unauthorized and not-found bodies are fixed strings so they never
        // echo the order id back to a caller who does not own it.
        let message = match &self {
            Self::InvalidBody(detail) => detail.clone(),
            Self::Payment(PaymentError::ValidationError(detail)) => detail.clone(),
            Self::Payment(PaymentError::OrderNotFound(_)) => "Order not found".to_string(),
            Self::Payment(PaymentError::Unauthorized(_)) => "Unauthorized".to_string(),
            Self::Payment(PaymentError::AlreadyVerified(_)) => {
                "Payment already verified".to_string()
            }
            Self::Payment(e) => {
                error!("Request failed: {}", e);
                "Internal server error".to_string()
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
