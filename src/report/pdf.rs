//! PDF rendering of a [`ReportLayout`]

use super::layout::{ReportLayout, PAGE_HEIGHT, PAGE_WIDTH, REPORT_TITLE};
use crate::domain::{RegulateError, Result};
use printpdf::{BuiltinFont, Mm, PdfDocument};
use std::io::BufWriter;

fn mm(points: f32) -> Mm {
    Mm(points * 25.4 / 72.0)
}

/// Render a laid-out report to PDF bytes with Helvetica text
pub fn render_pdf(layout: &ReportLayout) -> Result<Vec<u8>> {
    let (doc, first_page, first_layer) =
        PdfDocument::new(REPORT_TITLE, mm(PAGE_WIDTH), mm(PAGE_HEIGHT), "Layer 1");
    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| RegulateError::Report(format!("PDF font error: {e}")))?;

    for (index, page) in layout.pages().iter().enumerate() {
        let (page_index, layer_index) = if index == 0 {
            (first_page, first_layer)
        } else {
            doc.add_page(mm(PAGE_WIDTH), mm(PAGE_HEIGHT), format!("Layer {}", index + 1))
        };
        let layer = doc.get_page(page_index).get_layer(layer_index);

        for line in &page.lines {
            layer.use_text(line.text.as_str(), line.size, mm(line.x), mm(line.y), &font);
        }
    }

    let mut buf = BufWriter::new(Vec::new());
    doc.save(&mut buf)
        .map_err(|e| RegulateError::Report(format!("PDF save error: {e}")))?;
    buf.into_inner()
        .map_err(|e| RegulateError::Report(format!("PDF buffer error: {e}")))
}
