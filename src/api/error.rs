//! Structured API error responses with error codes.
//!
//! Every failure surfaces as the structured submission result record, never
//! a raw stack trace; diagnostic detail stays in operator-facing logs.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::infra::{SubmitError, UploadRejection};

use super::types::SubmitResponse;

/// Error codes for API responses.
///
/// These codes are stable and can be used by clients for programmatic error
/// handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Validation errors (1xxx)
    /// Request body is malformed
    InvalidRequestBody,
    /// Required field is missing
    MissingRequiredField,

    // Upload errors (2xxx)
    /// Uploaded file is not an image
    UnsupportedMediaType,
    /// Uploaded file exceeds the size limit
    UploadTooLarge,

    // Infrastructure errors (8xxx)
    /// Internal server error
    InternalError,
}

impl ErrorCode {
    /// Get the numeric code for this error
    pub fn numeric_code(&self) -> u32 {
        match self {
            ErrorCode::InvalidRequestBody => 1001,
            ErrorCode::MissingRequiredField => 1002,
            ErrorCode::UnsupportedMediaType => 2001,
            ErrorCode::UploadTooLarge => 2002,
            ErrorCode::InternalError => 8999,
        }
    }

    /// Get the HTTP status code for this error
    pub fn http_status(&self) -> StatusCode {
        match self {
            // Oversized and invalid uploads both surface as 400 per the
            // submission result contract.
            ErrorCode::InvalidRequestBody => StatusCode::BAD_REQUEST,
            ErrorCode::MissingRequiredField => StatusCode::BAD_REQUEST,
            ErrorCode::UnsupportedMediaType => StatusCode::BAD_REQUEST,
            ErrorCode::UploadTooLarge => StatusCode::BAD_REQUEST,
            ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let code_str = match self {
            ErrorCode::InvalidRequestBody => "INVALID_REQUEST_BODY",
            ErrorCode::MissingRequiredField => "MISSING_REQUIRED_FIELD",
            ErrorCode::UnsupportedMediaType => "UNSUPPORTED_MEDIA_TYPE",
            ErrorCode::UploadTooLarge => "UPLOAD_TOO_LARGE",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        };
        write!(f, "{}", code_str)
    }
}

/// A failed submission, rendered as the structured result record.
#[derive(Debug, Clone)]
pub struct ApiError {
    pub code: ErrorCode,
    /// User-facing message.
    pub message: String,
    /// Short diagnostic string carried in the result's `error` field.
    pub detail: Option<String>,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn status(&self) -> StatusCode {
        self.code.http_status()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code_str = self.code.to_string();
        let body = SubmitResponse {
            success: false,
            message: self.message,
            submission_id: None,
            error: self.detail,
        };
        let mut response = (status, Json(body)).into_response();

        if let Ok(code_value) = axum::http::HeaderValue::from_str(&code_str) {
            response.headers_mut().insert(
                axum::http::header::HeaderName::from_static("x-error-code"),
                code_value,
            );
        }

        response
    }
}

impl From<SubmitError> for ApiError {
    fn from(err: SubmitError) -> Self {
        match err {
            SubmitError::Validation(e) => ApiError::new(
                ErrorCode::MissingRequiredField,
                format!("Missing required field: {}.", e.field),
            )
            .with_detail(e.to_string()),
            SubmitError::UploadRejected(rejection) => {
                let code = match rejection {
                    UploadRejection::TooLarge => ErrorCode::UploadTooLarge,
                    UploadRejection::NotAnImage => ErrorCode::UnsupportedMediaType,
                };
                ApiError::new(code, rejection.to_string())
            }
            SubmitError::BackupWrite(_)
            | SubmitError::Dispatch(_)
            | SubmitError::Cleanup(_)
            | SubmitError::Internal(_) => ApiError::new(
                ErrorCode::InternalError,
                "Error processing submission. Please try again.",
            )
            .with_detail(err.to_string()),
        }
    }
}
