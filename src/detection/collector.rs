//! Violation collection over extracted text
//!
//! Walks the extraction output (rows then columns for tables, once for flat
//! text) and records one violation per unit of text and enabled category that
//! the detectors flag.

use crate::detection::compliance::EnabledRules;
use crate::detection::detector::{RuleDetector, ViolationDetector};
use crate::detection::models::{ScanOutcome, Violation};
use crate::domain::{ExtractedText, Table};

/// Runs the enabled detectors over an extraction
#[derive(Debug, Clone)]
pub struct ViolationCollector {
    detectors: Vec<RuleDetector>,
}

impl ViolationCollector {
    /// Collector for the enabled categories, GDPR evaluated before HIPAA
    pub fn new(rules: EnabledRules) -> Self {
        Self {
            detectors: rules.categories().into_iter().map(RuleDetector::new).collect(),
        }
    }

    /// Scan an extraction
    ///
    /// Blank extractions short-circuit to [`ScanOutcome::NoContent`] whatever
    /// rules are enabled.
    pub fn collect(&self, extracted: &ExtractedText, filename: &str) -> ScanOutcome {
        if extracted.is_blank() {
            tracing::debug!(filename = %filename, "Extraction is blank, skipping detection");
            return ScanOutcome::NoContent;
        }

        let violations = match extracted {
            ExtractedText::Table(table) => self.collect_table(table),
            ExtractedText::Flat(text) => self.collect_flat(text, filename),
        };

        tracing::debug!(
            filename = %filename,
            violations = violations.len(),
            "Violation collection complete"
        );

        ScanOutcome::Violations(violations)
    }

    fn collect_table(&self, table: &Table) -> Vec<Violation> {
        let mut violations = Vec::new();

        for row in 0..table.row_count() {
            for column in table.columns() {
                let cell = &column.cells[row];
                for detector in &self.detectors {
                    if detector.matches(cell) {
                        tracing::trace!(
                            row = row + 1,
                            column = %column.name,
                            category = %detector.category(),
                            indicators = ?detector.indicators(cell),
                            "Cell flagged"
                        );
                        violations.push(Violation::in_cell(
                            detector.category(),
                            row + 1,
                            column.name.clone(),
                        ));
                    }
                }
            }
        }

        violations
    }

    fn collect_flat(&self, text: &str, filename: &str) -> Vec<Violation> {
        self.detectors
            .iter()
            .filter(|detector| detector.matches(text))
            .inspect(|detector| {
                tracing::trace!(
                    filename = %filename,
                    category = %detector.category(),
                    indicators = ?detector.indicators(text),
                    "Document flagged"
                );
            })
            .map(|detector| Violation::in_document(detector.category(), filename))
            .collect()
    }
}

/// Collect violation messages in one call
///
/// ```
/// use granite_regulate::detection::{collect, EnabledRules};
/// use granite_regulate::domain::ExtractedText;
///
/// let messages = collect(
///     &ExtractedText::Flat("Patient email: a@b.com".into()),
///     EnabledRules::all(),
///     "notes.pdf",
/// );
/// assert_eq!(
///     messages,
///     vec![
///         "GDPR Violation found in notes.pdf".to_string(),
///         "PHI Violation found in notes.pdf".to_string(),
///     ]
/// );
/// ```
pub fn collect(extracted: &ExtractedText, rules: EnabledRules, filename: &str) -> Vec<String> {
    ViolationCollector::new(rules)
        .collect(extracted, filename)
        .messages()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::compliance::RuleCategory;
    use crate::detection::models::NO_CONTENT_MESSAGE;
    use crate::domain::Column;

    fn table(columns: &[(&str, &[&str])]) -> ExtractedText {
        let columns = columns
            .iter()
            .map(|(name, cells)| Column {
                name: name.to_string(),
                cells: cells.iter().map(|c| c.to_string()).collect(),
            })
            .collect();
        ExtractedText::Table(Table::from_columns(columns).unwrap())
    }

    #[test]
    fn test_single_cell_email() {
        let extracted = table(&[("contact", &["email: a@b.com"])]);
        let messages = collect(&extracted, EnabledRules::only(RuleCategory::Gdpr), "x.csv");
        assert_eq!(
            messages,
            vec!["GDPR Violation found in row 1, column 'contact'".to_string()]
        );
    }

    #[test]
    fn test_row_major_order_with_gdpr_first() {
        let extracted = table(&[
            ("a", &["patient a@b.com", "clean"]),
            ("b", &["clean", "doctor"]),
        ]);
        let messages = collect(&extracted, EnabledRules::all(), "x.csv");
        assert_eq!(
            messages,
            vec![
                "GDPR Violation found in row 1, column 'a'".to_string(),
                "PHI Violation found in row 1, column 'a'".to_string(),
                "PHI Violation found in row 2, column 'b'".to_string(),
            ]
        );
    }

    #[test]
    fn test_one_violation_per_category_not_per_pattern() {
        let extracted = ExtractedText::Flat("name email ssn 123-45-6789 x@y.com".to_string());
        let outcome = ViolationCollector::new(EnabledRules::only(RuleCategory::Gdpr))
            .collect(&extracted, "doc.pdf");
        assert_eq!(outcome.violations().len(), 1);
    }

    #[test]
    fn test_disabled_category_is_skipped() {
        let extracted = ExtractedText::Flat("Patient record".to_string());
        let messages = collect(&extracted, EnabledRules::only(RuleCategory::Gdpr), "doc.pdf");
        assert!(messages.is_empty());
    }

    #[test]
    fn test_blank_flat_text_yields_sentinel() {
        let extracted = ExtractedText::Flat(" \n ".to_string());
        assert_eq!(
            collect(&extracted, EnabledRules::all(), "doc.pdf"),
            vec![NO_CONTENT_MESSAGE.to_string()]
        );
        assert_eq!(
            collect(&extracted, EnabledRules::none(), "doc.pdf"),
            vec![NO_CONTENT_MESSAGE.to_string()]
        );
    }

    #[test]
    fn test_header_only_table_yields_sentinel() {
        let extracted = table(&[("email", &[])]);
        assert_eq!(
            ViolationCollector::new(EnabledRules::all()).collect(&extracted, "x.csv"),
            ScanOutcome::NoContent
        );
    }

    #[test]
    fn test_missing_cells_are_not_violations() {
        let extracted = table(&[("notes", &["nan", "nan"])]);
        let outcome = ViolationCollector::new(EnabledRules::all()).collect(&extracted, "x.csv");
        assert_eq!(outcome, ScanOutcome::Violations(Vec::new()));
    }
}
