//! API error types and handling.

use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use datasweep::SweepError;
use serde::Serialize;

/// API error type.
#[derive(Debug)]
pub enum ApiError {
    /// Bad request from client.
    BadRequest(String),
    /// Upload larger than the configured limit.
    PayloadTooLarge(String),
    /// Server-side failure unrelated to the upload.
    Internal(String),
    /// Error from the pipeline.
    Sweep(SweepError),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

impl ApiError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
            ApiError::PayloadTooLarge(_) => (StatusCode::PAYLOAD_TOO_LARGE, "payload_too_large"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal"),
            ApiError::Sweep(e) => match e {
                SweepError::UnsupportedFormat(_) => (StatusCode::BAD_REQUEST, "unsupported_format"),
                SweepError::ColumnNotFound(_) => (StatusCode::BAD_REQUEST, "column_not_found"),
                SweepError::Csv(_) | SweepError::Spreadsheet(_) | SweepError::EmptyData(_) => {
                    (StatusCode::UNPROCESSABLE_ENTITY, "parse_error")
                }
                SweepError::InvalidTable(_) => (StatusCode::UNPROCESSABLE_ENTITY, "invalid_table"),
                SweepError::Encode(_) => (StatusCode::UNPROCESSABLE_ENTITY, "encode_error"),
                SweepError::Io { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "internal"),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error) = self.status_and_code();
        let message = match self {
            ApiError::BadRequest(msg) | ApiError::PayloadTooLarge(msg) | ApiError::Internal(msg) => {
                msg
            }
            ApiError::Sweep(e) => e.to_string(),
        };

        (
            status,
            Json(ErrorResponse {
                error: error.to_string(),
                message,
            }),
        )
            .into_response()
    }
}

impl From<SweepError> for ApiError {
    fn from(err: SweepError) -> Self {
        ApiError::Sweep(err)
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::PayloadTooLarge(err.body_text())
        } else {
            ApiError::BadRequest(err.body_text())
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            ApiError::PayloadTooLarge(msg) => write!(f, "Payload too large: {}", msg),
            ApiError::Internal(msg) => write!(f, "Internal error: {}", msg),
            ApiError::Sweep(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ApiError {}
