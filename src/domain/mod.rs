//! Domain models and types for GraniteRegulate.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Uploads** ([`Document`], [`MediaKind`])
//! - **Extraction output** ([`ExtractedText`], [`Table`], [`Column`])
//! - **Error types** ([`RegulateError`], [`ExtractionError`], [`ServiceError`])
//! - **Result type alias** ([`Result`])
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T, RegulateError>`]:
//!
//! ```rust
//! use granite_regulate::domain::{Document, Result};
//!
//! fn example() -> Result<()> {
//!     // Unsupported uploads are rejected when the document is created
//!     let doc = Document::new("people.csv", "text/csv", b"name\nJane\n".to_vec())?;
//!     assert_eq!(doc.filename(), "people.csv");
//!     Ok(())
//! }
//! ```

pub mod document;
pub mod errors;
pub mod extracted;
pub mod result;

// Re-export commonly used types for convenience
pub use document::{Document, MediaKind, ACCEPTED_CONTENT_TYPES};
pub use errors::{ExtractionError, RegulateError, ServiceError};
pub use extracted::{Column, ExtractedText, Table};
pub use result::Result;
