//! Violation data models

use crate::detection::compliance::RuleCategory;
use serde::{Serialize, Serializer};
use std::fmt;

/// Sentinel returned instead of violations when there is nothing to scan
pub const NO_CONTENT_MESSAGE: &str = "No content found to analyze.";

/// Individual keyword or pattern that fired inside a category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "name", rename_all = "lowercase")]
pub enum Indicator {
    /// Keyword found in the lower-cased text
    Keyword(&'static str),
    /// Named regex matched the text
    Pattern(&'static str),
}

impl fmt::Display for Indicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Keyword(k) => write!(f, "keyword:{k}"),
            Self::Pattern(p) => write!(f, "pattern:{p}"),
        }
    }
}

/// Where a violation was found
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViolationLocation {
    /// A table cell; `row` is 1-based
    Cell { row: usize, column: String },
    /// A whole document
    Document { filename: String },
}

/// One rule category matching one unit of text
///
/// Renders as the message reported to users, for example
/// `GDPR Violation found in row 3, column 'email'`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Category that matched
    pub category: RuleCategory,
    /// Cell or document
    pub location: ViolationLocation,
}

impl Violation {
    /// Violation in a table cell (1-based row)
    pub fn in_cell(category: RuleCategory, row: usize, column: impl Into<String>) -> Self {
        Self {
            category,
            location: ViolationLocation::Cell {
                row,
                column: column.into(),
            },
        }
    }

    /// Document-level violation
    pub fn in_document(category: RuleCategory, filename: impl Into<String>) -> Self {
        Self {
            category,
            location: ViolationLocation::Document {
                filename: filename.into(),
            },
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.location {
            ViolationLocation::Cell { row, column } => write!(
                f,
                "{} Violation found in row {row}, column '{column}'",
                self.category.label()
            ),
            ViolationLocation::Document { filename } => {
                write!(f, "{} Violation found in {filename}", self.category.label())
            }
        }
    }
}

impl Serialize for Violation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Result of running the collector over one extraction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanOutcome {
    /// Extraction was blank; detectors were not run
    NoContent,
    /// Violations in detection order (possibly none)
    Violations(Vec<Violation>),
}

impl ScanOutcome {
    /// Messages in order; the no-content sentinel is a single message
    pub fn messages(&self) -> Vec<String> {
        match self {
            Self::NoContent => vec![NO_CONTENT_MESSAGE.to_string()],
            Self::Violations(violations) => violations.iter().map(|v| v.to_string()).collect(),
        }
    }

    /// Violations found (empty for the sentinel)
    pub fn violations(&self) -> &[Violation] {
        match self {
            Self::NoContent => &[],
            Self::Violations(violations) => violations,
        }
    }

    /// True when at least one real violation was found
    pub fn has_violations(&self) -> bool {
        !self.violations().is_empty()
    }

    /// Number of violations per category, in category order
    pub fn count_by_category(&self) -> Vec<(RuleCategory, usize)> {
        RuleCategory::ALL
            .into_iter()
            .map(|category| {
                let count = self
                    .violations()
                    .iter()
                    .filter(|v| v.category == category)
                    .count();
                (category, count)
            })
            .collect()
    }
}
