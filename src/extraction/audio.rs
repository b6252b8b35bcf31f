//! Audio transcription
//!
//! The upload is staged in a named temporary file carrying the original
//! extension, handed to the [`Transcriber`], and removed when the handle is
//! dropped, whether or not transcription succeeded.

use crate::adapters::speech::{SpeechRecognition, Transcriber};
use crate::domain::{Document, ExtractionError};
use std::io::Write;

/// Returned when the service recognized no speech at all
pub const NO_TRANSCRIPTION_RESULT: &str = "No transcription result found.";

/// Content type sent to the speech service
///
/// The file extension wins over the declared type so that `audio/mpeg`
/// uploads named `.wav` are still decoded as WAV.
///
/// ```
/// use granite_regulate::domain::Document;
/// use granite_regulate::extraction::audio::content_type_hint;
///
/// let doc = Document::new("call.MP3", "audio/mpeg", vec![]).unwrap();
/// assert_eq!(content_type_hint(&doc), "audio/mp3");
/// ```
pub fn content_type_hint(document: &Document) -> String {
    match document.extension().as_deref() {
        Some(".wav") => "audio/wav".to_string(),
        Some(".mp3") => "audio/mp3".to_string(),
        Some(".mpeg") | Some(".mpga") => "audio/mpeg".to_string(),
        _ => document.content_type().to_string(),
    }
}

/// Transcript of the first alternative of the first result
pub fn first_transcript(recognition: &SpeechRecognition) -> Result<String, ExtractionError> {
    let Some(result) = recognition.results.first() else {
        return Ok(NO_TRANSCRIPTION_RESULT.to_string());
    };

    result
        .alternatives
        .first()
        .map(|alternative| alternative.transcript.clone())
        .ok_or_else(|| {
            ExtractionError::Transcription("first result has no alternatives".to_string())
        })
}

/// Transcribe an audio document
pub async fn transcribe_document(
    transcriber: &dyn Transcriber,
    document: &Document,
) -> Result<String, ExtractionError> {
    let suffix = document.extension().unwrap_or_default();
    let mut staged = tempfile::Builder::new()
        .prefix("granite-audio-")
        .suffix(&suffix)
        .tempfile()
        .map_err(|e| ExtractionError::Io(format!("Failed to create temporary file: {e}")))?;

    staged
        .write_all(document.bytes())
        .and_then(|_| staged.flush())
        .map_err(|e| ExtractionError::Io(format!("Failed to stage audio: {e}")))?;

    let hint = content_type_hint(document);
    tracing::debug!(
        path = %staged.path().display(),
        content_type = %hint,
        "Staged audio for transcription"
    );

    let recognition = transcriber.transcribe(staged.path(), &hint).await?;
    first_transcript(&recognition)
}
