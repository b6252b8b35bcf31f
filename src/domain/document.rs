//! Uploaded document model
//!
//! A [`Document`] is created when an upload (or a local file) is received and
//! is discarded once its text has been extracted.

use crate::domain::{RegulateError, Result};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::path::Path;

/// Content types accepted by the ingestion endpoint
pub const ACCEPTED_CONTENT_TYPES: [&str; 5] = [
    "text/csv",
    "application/pdf",
    "audio/mpeg",
    "audio/wav",
    "audio/mp3",
];

/// Kind of media a document holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    /// Comma-separated table with a header row
    Csv,
    /// Portable Document Format
    Pdf,
    /// WAV or MPEG audio, transcribed before scanning
    Audio,
}

impl MediaKind {
    /// Resolve a declared content type
    ///
    /// The declared value must equal one of the accepted types exactly;
    /// parameters such as `; charset=utf-8` or a different case are rejected.
    ///
    /// # Errors
    ///
    /// Returns [`RegulateError::UnsupportedMediaType`] for anything that is not
    /// one of [`ACCEPTED_CONTENT_TYPES`].
    ///
    /// # Examples
    ///
    /// ```
    /// use granite_regulate::domain::MediaKind;
    ///
    /// assert_eq!(MediaKind::from_content_type("text/csv").unwrap(), MediaKind::Csv);
    /// assert_eq!(MediaKind::from_content_type("audio/mp3").unwrap(), MediaKind::Audio);
    /// assert!(MediaKind::from_content_type("image/png").is_err());
    /// ```
    pub fn from_content_type(content_type: &str) -> Result<Self> {
        match content_type {
            "text/csv" => Ok(Self::Csv),
            "application/pdf" => Ok(Self::Pdf),
            "audio/mpeg" | "audio/wav" | "audio/mp3" => Ok(Self::Audio),
            _ => Err(RegulateError::UnsupportedMediaType(content_type.to_string())),
        }
    }

    /// Guess the content type of a local file from its extension
    ///
    /// Returns `None` for extensions the scanner does not accept.
    pub fn content_type_for_path(path: &Path) -> Option<&'static str> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "csv" => Some("text/csv"),
            "pdf" => Some("application/pdf"),
            "wav" => Some("audio/wav"),
            "mp3" => Some("audio/mp3"),
            "mpeg" | "mpga" => Some("audio/mpeg"),
            _ => None,
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Csv => write!(f, "csv"),
            Self::Pdf => write!(f, "pdf"),
            Self::Audio => write!(f, "audio"),
        }
    }
}

/// An uploaded artifact awaiting extraction
#[derive(Clone)]
pub struct Document {
    filename: String,
    content_type: String,
    media_kind: MediaKind,
    bytes: Vec<u8>,
}

impl Document {
    /// Create a document from an upload
    ///
    /// # Errors
    ///
    /// Fails with [`RegulateError::UnsupportedMediaType`] when the content type
    /// is not accepted.
    pub fn new(
        filename: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Result<Self> {
        let content_type = content_type.into();
        let media_kind = MediaKind::from_content_type(&content_type)?;
        Ok(Self {
            filename: filename.into(),
            content_type,
            media_kind,
            bytes,
        })
    }

    /// Load a document from the local filesystem
    ///
    /// The content type is derived from the file extension, and the file is
    /// only read once the extension is known to be supported.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content_type = MediaKind::content_type_for_path(path).ok_or_else(|| {
            let extension = path
                .extension()
                .and_then(|e| e.to_str())
                .map(|e| format!(".{e} file"))
                .unwrap_or_else(|| "file without extension".to_string());
            RegulateError::UnsupportedMediaType(extension)
        })?;

        let bytes = tokio::fs::read(path).await.map_err(|e| {
            RegulateError::Io(format!("Failed to read {}: {e}", path.display()))
        })?;

        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("document")
            .to_string();

        Self::new(filename, content_type, bytes)
    }

    /// Original file name
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Declared content type
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// Resolved media kind
    pub fn media_kind(&self) -> MediaKind {
        self.media_kind
    }

    /// Raw bytes
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Lower-cased file extension including the leading dot, if any
    pub fn extension(&self) -> Option<String> {
        Path::new(&self.filename)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| format!(".{}", e.to_ascii_lowercase()))
    }

    /// SHA-256 of the content, used to correlate log lines without logging data
    pub fn fingerprint(&self) -> String {
        let digest = Sha256::digest(&self.bytes);
        format!("{digest:x}")
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("filename", &self.filename)
            .field("content_type", &self.content_type)
            .field("media_kind", &self.media_kind)
            .field("len", &self.bytes.len())
            .finish()
    }
}
