//! PDF text extraction
//!
//! Text of every page is concatenated in page order. Pages without a text
//! layer contribute nothing, so a scanned PDF extracts to an empty string.

use crate::domain::ExtractionError;

/// Extract the text of an in-memory PDF on the blocking pool
///
/// The parser can panic on malformed input; a panic is reported as
/// [`ExtractionError::InvalidPdf`] instead of taking the worker down.
pub async fn extract_pdf_text(bytes: Vec<u8>) -> Result<String, ExtractionError> {
    tokio::task::spawn_blocking(move || read_pdf_text(&bytes))
        .await
        .map_err(|e| ExtractionError::InvalidPdf(format!("PDF parser aborted: {e}")))?
}

/// Extract the text of an in-memory PDF
pub fn read_pdf_text(bytes: &[u8]) -> Result<String, ExtractionError> {
    let pages = pdf_extract::extract_text_from_mem_by_pages(bytes)
        .map_err(|e| ExtractionError::InvalidPdf(e.to_string()))?;

    tracing::debug!(pages = pages.len(), "Extracted PDF text");
    Ok(pages.concat())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Single-page PDF with one line of Helvetica text
    pub(crate) fn make_test_pdf(text: &str) -> Vec<u8> {
        use lopdf::dictionary;
        use lopdf::{Document, Object, Stream};

        let mut doc = Document::with_version("1.4");

        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
        });

        let content = format!("BT /F1 12 Tf 100 700 Td ({text}) Tj ET");
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.into_bytes()));

        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            "Contents" => content_id,
            "Resources" => dictionary! {
                "Font" => dictionary! { "F1" => font_id },
            },
        });

        let pages_id = doc.add_object(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
        });

        if let Ok(Object::Dictionary(page)) = doc.get_object_mut(page_id) {
            page.set("Parent", pages_id);
        }

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut buf = Vec::new();
        doc.save_to(&mut buf).unwrap();
        buf
    }

    #[tokio::test]
    async fn test_extracts_page_text() {
        let pdf = make_test_pdf("Contact jane@example.com");
        let text = extract_pdf_text(pdf).await.unwrap();
        assert!(text.contains("jane@example.com"));
    }

    #[tokio::test]
    async fn test_garbage_is_invalid_pdf() {
        let result = extract_pdf_text(b"definitely not a pdf".to_vec()).await;
        assert!(matches!(result, Err(ExtractionError::InvalidPdf(_))));
    }

    #[test]
    fn test_empty_bytes_are_invalid() {
        assert!(read_pdf_text(&[]).is_err());
    }
}
