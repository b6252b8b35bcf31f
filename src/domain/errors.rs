//! Domain error types
//!
//! This module defines the error hierarchy for GraniteRegulate.
//! All errors are domain-specific and don't expose third-party types.

use thiserror::Error;

/// Main GraniteRegulate error type
///
/// This is the primary error type used throughout the application.
/// It wraps specific error types and provides context for error handling.
#[derive(Debug, Error)]
pub enum RegulateError {
    /// The uploaded content type is not CSV, PDF or supported audio
    #[error("Invalid file type. Received {0}. Please upload a CSV, PDF, or audio file.")]
    UnsupportedMediaType(String),

    /// Text extraction failed (malformed input or collaborator failure)
    #[error("{0}")]
    Extraction(#[from] ExtractionError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// External service errors (watsonx.ai, Asana)
    #[error("Service error: {0}")]
    Service(#[from] ServiceError),

    /// Report rendering errors
    #[error("Report error: {0}")]
    Report(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

/// Text extraction errors
///
/// Raised while turning an uploaded document into text. Any of these aborts
/// the whole scan; no partial violations are produced.
#[derive(Debug, Error)]
pub enum ExtractionError {
    /// The CSV could not be parsed into a table
    #[error("Failed to parse CSV: {0}")]
    InvalidCsv(String),

    /// The bytes are not a readable PDF
    #[error("Failed to read PDF: {0}")]
    InvalidPdf(String),

    /// The speech-to-text collaborator failed
    #[error("Transcription failed: {0}")]
    Transcription(String),

    /// A collaborator needed for this media kind is not configured
    #[error("{0} is not configured")]
    NotConfigured(String),

    /// Temporary file handling failed
    #[error("I/O error during extraction: {0}")]
    Io(String),
}

/// External service errors
///
/// Errors that occur when talking to IBM Cloud or Asana.
/// These errors don't expose third-party HTTP client types.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Failed to reach the service
    #[error("Failed to connect to {service}: {message}")]
    ConnectionFailed { service: String, message: String },

    /// Credentials were rejected or a token could not be obtained
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// The service answered with a body we could not understand
    #[error("Invalid response from server: {0}")]
    InvalidResponse(String),

    /// Server error (5xx)
    #[error("Server error: {status} - {message}")]
    ServerError { status: u16, message: String },

    /// Client error (4xx)
    #[error("Client error: {status} - {message}")]
    ClientError { status: u16, message: String },

    /// Timeout
    #[error("Request timeout: {0}")]
    Timeout(String),
}

impl ServiceError {
    /// Builds the matching error for a non-success HTTP status
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            401 | 403 => Self::AuthenticationFailed(format!("{status} - {message}")),
            400..=499 => Self::ClientError { status, message },
            _ => Self::ServerError { status, message },
        }
    }
}

impl From<ServiceError> for ExtractionError {
    fn from(err: ServiceError) -> Self {
        ExtractionError::Transcription(err.to_string())
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for RegulateError {
    fn from(err: std::io::Error) -> Self {
        RegulateError::Io(err.to_string())
    }
}

impl From<std::io::Error> for ExtractionError {
    fn from(err: std::io::Error) -> Self {
        ExtractionError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for RegulateError {
    fn from(err: serde_json::Error) -> Self {
        RegulateError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for RegulateError {
    fn from(err: toml::de::Error) -> Self {
        RegulateError::Configuration(format!("TOML parse error: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_media_type_message_names_type() {
        let err = RegulateError::UnsupportedMediaType("image/png".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid file type. Received image/png. Please upload a CSV, PDF, or audio file."
        );
    }

    #[test]
    fn test_extraction_error_is_transparent() {
        let err: RegulateError = ExtractionError::InvalidPdf("bad header".to_string()).into();
        assert_eq!(err.to_string(), "Failed to read PDF: bad header");
        assert!(matches!(err, RegulateError::Extraction(_)));
    }

    #[test]
    fn test_service_error_from_status() {
        assert!(matches!(
            ServiceError::from_status(401, "nope"),
            ServiceError::AuthenticationFailed(_)
        ));
        assert!(matches!(
            ServiceError::from_status(404, "missing"),
            ServiceError::ClientError { status: 404, .. }
        ));
        assert!(matches!(
            ServiceError::from_status(503, "down"),
            ServiceError::ServerError { status: 503, .. }
        ));
    }

    #[test]
    fn test_service_error_becomes_transcription_failure() {
        let err: ExtractionError = ServiceError::Timeout("30s".to_string()).into();
        assert!(matches!(err, ExtractionError::Transcription(_)));
        assert!(err.to_string().contains("Request timeout: 30s"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let err: RegulateError = io_err.into();
        assert!(matches!(err, RegulateError::Io(_)));
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err: RegulateError = json_err.into();
        assert!(matches!(err, RegulateError::Serialization(_)));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("invalid = toml = syntax").unwrap_err();
        let err: RegulateError = toml_err.into();
        assert!(matches!(err, RegulateError::Configuration(_)));
        assert!(err.to_string().contains("TOML parse error"));
    }
}
