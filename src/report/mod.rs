//! Violation report generation
//!
//! [`generate_report`] lays the violation strings out on letter pages and
//! renders them to a PDF. The order of the input is the order on paper.

pub mod layout;
pub mod pdf;

pub use layout::{ReportLayout, NO_VIOLATIONS, REPORT_TITLE};

use crate::domain::Result;

/// File name offered to downloaders
pub const REPORT_FILENAME: &str = "violation_report.pdf";

/// Render violations into a PDF report
pub fn generate_report(violations: &[String]) -> Result<Vec<u8>> {
    let layout = ReportLayout::build(violations);
    tracing::debug!(
        violations = violations.len(),
        pages = layout.page_count(),
        "Rendering violation report"
    );
    pdf::render_pdf(&layout)
}
