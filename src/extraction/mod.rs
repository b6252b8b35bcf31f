//! Text extraction for uploaded documents
//!
//! Dispatches on [`MediaKind`]:
//!
//! | Kind  | Output                  | Module      |
//! |-------|-------------------------|-------------|
//! | CSV   | [`ExtractedText::Table`] | [`tabular`] |
//! | PDF   | [`ExtractedText::Flat`]  | [`pdf`]     |
//! | Audio | [`ExtractedText::Flat`]  | [`audio`]   |
//!
//! Any failure aborts the scan; nothing partial is returned.

pub mod audio;
pub mod pdf;
pub mod tabular;

use crate::adapters::speech::Transcriber;
use crate::domain::{Document, ExtractedText, ExtractionError, MediaKind};
use std::fmt;
use std::sync::Arc;

/// Turns documents into text for the detectors
#[derive(Clone, Default)]
pub struct TextExtractor {
    transcriber: Option<Arc<dyn Transcriber>>,
}

impl TextExtractor {
    /// Extractor that transcribes audio with `transcriber`
    pub fn new(transcriber: Arc<dyn Transcriber>) -> Self {
        Self {
            transcriber: Some(transcriber),
        }
    }

    /// Extractor for CSV and PDF only; audio fails with
    /// [`ExtractionError::NotConfigured`]
    pub fn without_transcription() -> Self {
        Self::default()
    }

    /// Whether audio uploads can be handled
    pub fn can_transcribe(&self) -> bool {
        self.transcriber.is_some()
    }

    /// Extract the text of a document
    pub async fn extract(&self, document: &Document) -> Result<ExtractedText, ExtractionError> {
        match document.media_kind() {
            MediaKind::Csv => tabular::parse_table(document.bytes()).map(ExtractedText::Table),
            MediaKind::Pdf => pdf::extract_pdf_text(document.bytes().to_vec())
                .await
                .map(ExtractedText::Flat),
            MediaKind::Audio => {
                let transcriber = self
                    .transcriber
                    .as_deref()
                    .ok_or_else(|| ExtractionError::NotConfigured("Speech to Text".to_string()))?;
                audio::transcribe_document(transcriber, document)
                    .await
                    .map(ExtractedText::Flat)
            }
        }
    }
}

impl fmt::Debug for TextExtractor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextExtractor")
            .field("transcription", &self.can_transcribe())
            .finish()
    }
}
