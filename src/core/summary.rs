//! Scan results

use crate::adapters::asana::TaskReceipt;
use serde::Serialize;
use std::time::Duration;

/// Outcome of scanning one document
///
/// Serializes to the body returned by the analyze endpoint:
/// `{"filename": ..., "violations": [...]}` plus `ai_analysis` when LLM
/// enrichment ran.
#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    /// Name of the scanned file
    pub filename: String,

    /// Violation messages in detection order, or the no-content sentinel
    pub violations: Vec<String>,

    /// Model findings, reported apart from the rule-based violations
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_analysis: Option<Vec<String>>,

    /// Rule-based violations found (zero for the no-content sentinel)
    #[serde(skip)]
    pub violation_count: usize,

    /// Tracking task filed for this scan
    #[serde(skip)]
    pub task: Option<TaskReceipt>,

    /// Wall time of the scan
    #[serde(skip)]
    pub duration: Duration,
}

impl ScanReport {
    /// Whether any rule-based violation was found
    pub fn has_violations(&self) -> bool {
        self.violation_count > 0
    }
}
