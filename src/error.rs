use crate::domain::submission::ValidationError;
use crate::services::email::DispatchError;
use axum::{
    Json,
    extract::rejection::BytesRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Failures surfaced by the relay endpoint. Each maps to one JSON error response.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid JSON")]
    InvalidRequest,
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Missing {0}")]
    Config(&'static str),
    #[error("Failed to send email")]
    Dispatch(#[from] DispatchError),
    #[error("Method not allowed")]
    MethodNotAllowed,
    #[error("Payload too large")]
    PayloadTooLarge,
}

impl From<BytesRejection> for AppError {
    fn from(rejection: BytesRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            Self::PayloadTooLarge
        } else {
            tracing::debug!(error = %rejection, "Relay body could not be read");
            Self::InvalidRequest
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        match self {
            Self::InvalidRequest => {
                tracing::debug!("Rejected unparseable body");
                (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
            }
            Self::Validation(e) => {
                tracing::debug!(reason = %e, "Validation failed");
                (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
            }
            Self::Config(var) => {
                tracing::error!(variable = var, "Required configuration is missing");
                (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "error": message }))).into_response()
            }
            Self::Dispatch(e) => {
                tracing::error!(error = %e, "Email provider failed");
                (StatusCode::BAD_GATEWAY, Json(json!({ "error": message, "details": e.details() }))).into_response()
            }
            Self::MethodNotAllowed => {
                (StatusCode::METHOD_NOT_ALLOWED, Json(json!({ "error": message }))).into_response()
            }
            Self::PayloadTooLarge => {
                tracing::debug!("Rejected oversized body");
                (StatusCode::PAYLOAD_TOO_LARGE, Json(json!({ "error": message }))).into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(AppError::InvalidRequest.into_response().status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AppError::Validation(ValidationError::InvalidEmail).into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(AppError::Config("RESEND_API_KEY").into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(AppError::Dispatch(DispatchError::Timeout).into_response().status(), StatusCode::BAD_GATEWAY);
        assert_eq!(AppError::MethodNotAllowed.into_response().status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(AppError::PayloadTooLarge.into_response().status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[test]
    fn test_messages_match_wire_contract() {
        assert_eq!(AppError::Config("RESEND_API_KEY").to_string(), "Missing RESEND_API_KEY");
        assert_eq!(AppError::from(ValidationError::MessageTooShort).to_string(), "Message too short");
        assert_eq!(AppError::from(DispatchError::Timeout).to_string(), "Failed to send email");
    }
}
