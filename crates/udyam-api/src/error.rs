//! # API Error Type
//!
//! One error type for every handler. Each variant carries the user-facing
//! message the portal serves for that failure class and maps to its HTTP
//! status in [`IntoResponse`]. Internal errors are logged with their detail
//! and masked behind a generic message on the wire.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

use udyam_core::FieldError;
use udyam_state::StatusError;

use crate::state::DuplicateIdentity;

/// Error response body.
///
/// `success` is always `false`; `errors` appears only on validation
/// failures and lists one `{field, message}` entry per offending field.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Always `false`.
    pub success: bool,
    /// User-facing message for the failure.
    pub message: String,
    /// Per-field validation messages.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Vec<Object>>)]
    pub errors: Option<Vec<FieldError>>,
}

/// Failures a handler can produce.
#[derive(Error, Debug)]
pub enum AppError {
    /// The requested record or document does not exist.
    #[error("{0}")]
    NotFound(String),

    /// Input failed field validation.
    #[error("Validation errors")]
    Validation(Vec<FieldError>),

    /// The request is well-formed but the record's state or the store's
    /// uniqueness rules forbid it.
    #[error("{0}")]
    Policy(String),

    /// The request itself is malformed (missing multipart parts, bad
    /// document types, oversized files).
    #[error("{0}")]
    BadRequest(String),

    /// Anything unexpected. The detail is logged, never returned.
    #[error("Internal server error")]
    Internal(String),
}

impl AppError {
    /// The portal's message for a missing registration.
    pub fn registration_not_found() -> Self {
        Self::NotFound("Registration not found".to_string())
    }

    fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Validation(_) | Self::Policy(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (message, errors) = match self {
            Self::Internal(detail) => {
                tracing::error!(%detail, "request failed with internal error");
                ("Internal server error".to_string(), None)
            }
            Self::Validation(errors) => ("Validation errors".to_string(), Some(errors)),
            other => (other.to_string(), None),
        };
        let body = ErrorBody {
            success: false,
            message,
            errors,
        };
        (status, Json(body)).into_response()
    }
}

impl From<StatusError> for AppError {
    fn from(err: StatusError) -> Self {
        Self::Policy(err.to_string())
    }
}

impl From<Vec<FieldError>> for AppError {
    fn from(errors: Vec<FieldError>) -> Self {
        Self::Validation(errors)
    }
}

impl From<DuplicateIdentity> for AppError {
    fn from(dup: DuplicateIdentity) -> Self {
        Self::Policy(dup.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn response_parts(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        (status, json)
    }

    #[tokio::test]
    async fn not_found_maps_to_404_with_message() {
        let (status, body) = response_parts(AppError::registration_not_found()).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Registration not found");
        assert!(body.get("errors").is_none());
    }

    #[tokio::test]
    async fn validation_carries_the_field_errors() {
        let errors = vec![
            FieldError::new("entrepreneurName", "Name is required"),
            FieldError::new("panNumber", "PAN must be in format ABCDE1234F (5 letters, 4 digits, 1 letter)"),
        ];
        let (status, body) = response_parts(AppError::Validation(errors)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Validation errors");
        assert_eq!(body["errors"].as_array().unwrap().len(), 2);
        assert_eq!(body["errors"][0]["field"], "entrepreneurName");
        assert_eq!(body["errors"][1]["field"], "panNumber");
    }

    #[tokio::test]
    async fn policy_violations_are_400_with_portal_messages() {
        let err = AppError::from(StatusError::UpdateLocked);
        let (status, body) = response_parts(err).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body["message"],
            "Cannot update registration that has been submitted"
        );
    }

    #[tokio::test]
    async fn internal_detail_is_masked() {
        let err = AppError::Internal("connection refused to 10.0.0.5".to_string());
        let (status, body) = response_parts(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "Internal server error");
        assert!(!body.to_string().contains("10.0.0.5"));
    }

    #[tokio::test]
    async fn duplicate_identity_uses_the_portal_message() {
        let err = AppError::from(DuplicateIdentity::Aadhaar);
        let (status, body) = response_parts(err).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body["message"],
            "Registration with this Aadhaar number already exists"
        );
    }
}
