//! HTTP error mapping
//!
//! Every error body has the shape `{"detail": "<message>"}`.

use crate::domain::RegulateError;
use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub detail: String,
}

/// API-level errors with HTTP status mapping
#[derive(Debug, Error)]
pub enum ApiError {
    /// Upload content type is not accepted
    #[error("{0}")]
    UnsupportedMediaType(String),

    /// Malformed request parameters
    #[error("{0}")]
    BadRequest(String),

    /// The multipart body has no `file` part
    #[error("No file provided.")]
    MissingFile,

    /// The multipart body could not be read
    #[error("{0}")]
    Upload(#[from] MultipartError),

    /// Scanning failed after the upload was accepted
    #[error("An error occurred while processing the file: {0}")]
    Processing(String),

    /// Report rendering failed
    #[error("An error occurred while generating the report: {0}")]
    Report(String),
}

impl ApiError {
    /// Status code sent for this error
    pub fn status(&self) -> StatusCode {
        match self {
            Self::UnsupportedMediaType(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::MissingFile => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Upload(e) => e.status(),
            Self::Processing(_) | Self::Report(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<RegulateError> for ApiError {
    fn from(err: RegulateError) -> Self {
        match err {
            RegulateError::UnsupportedMediaType(_) => Self::UnsupportedMediaType(err.to_string()),
            RegulateError::Report(message) => Self::Report(message),
            other => Self::Processing(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = match &self {
            Self::Upload(e) => e.body_text(),
            other => other.to_string(),
        };

        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), detail = %detail, "Request failed");
        } else {
            tracing::warn!(status = status.as_u16(), detail = %detail, "Request rejected");
        }

        (status, Json(ErrorBody { detail })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ExtractionError;

    #[test]
    fn test_unsupported_media_type_is_bad_request() {
        let err = ApiError::from(RegulateError::UnsupportedMediaType("image/png".to_string()));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            err.to_string(),
            "Invalid file type. Received image/png. Please upload a CSV, PDF, or audio file."
        );
    }

    #[test]
    fn test_extraction_failure_is_internal_error() {
        let err = ApiError::from(RegulateError::from(ExtractionError::InvalidPdf(
            "bad xref".to_string(),
        )));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            err.to_string(),
            "An error occurred while processing the file: Failed to read PDF: bad xref"
        );
    }

    #[test]
    fn test_missing_file_is_unprocessable() {
        assert_eq!(ApiError::MissingFile.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
