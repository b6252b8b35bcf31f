//! Compliance scanner - orchestrates one scan from upload to result
//!
//! A scan is one sequential pass: extract text, run the rule detectors,
//! optionally ask the model for a second opinion, then file a tracking task
//! when violations were found.

use crate::adapters::asana::{task_name, task_notes, AsanaClient, TaskReceipt, TaskTracker};
use crate::adapters::speech::WatsonSpeechClient;
use crate::adapters::watsonx::{split_findings, ViolationAnalyzer, WatsonxClient};
use crate::config::RegulateConfig;
use crate::core::summary::ScanReport;
use crate::detection::{EnabledRules, ViolationCollector};
use crate::domain::{Document, RegulateError, Result};
use crate::extraction::TextExtractor;
use crate::{log_error_with_context, log_scan_complete, log_scan_start};
use std::fmt;
use std::sync::Arc;
use std::time::Instant;

/// Scans documents for compliance violations
pub struct ComplianceScanner {
    extractor: TextExtractor,
    analyzer: Option<Arc<dyn ViolationAnalyzer>>,
    tracker: Option<Arc<dyn TaskTracker>>,
}

impl ComplianceScanner {
    /// Scanner with rule-based detection only
    pub fn new(extractor: TextExtractor) -> Self {
        Self {
            extractor,
            analyzer: None,
            tracker: None,
        }
    }

    /// Enable LLM enrichment
    pub fn with_analyzer(mut self, analyzer: Arc<dyn ViolationAnalyzer>) -> Self {
        self.analyzer = Some(analyzer);
        self
    }

    /// File a task for every scan with violations
    pub fn with_task_tracker(mut self, tracker: Arc<dyn TaskTracker>) -> Self {
        self.tracker = Some(tracker);
        self
    }

    /// Build the scanner and its collaborators from validated configuration
    pub fn from_config(config: &RegulateConfig) -> Result<Self> {
        let extractor = match &config.speech {
            Some(speech) => TextExtractor::new(Arc::new(WatsonSpeechClient::new(speech)?)),
            None => {
                tracing::info!("Speech to Text not configured, audio uploads will be rejected");
                TextExtractor::without_transcription()
            }
        };

        let mut scanner = Self::new(extractor);

        if config.analysis.llm_enrichment {
            let watsonx = config.watsonx.as_ref().ok_or_else(|| {
                RegulateError::Configuration(
                    "analysis.llm_enrichment requires a [watsonx] section".to_string(),
                )
            })?;
            tracing::info!(model_id = %watsonx.model_id, "LLM enrichment enabled");
            scanner = scanner.with_analyzer(Arc::new(WatsonxClient::new(watsonx)?));
        }

        match &config.asana {
            Some(asana) => {
                tracing::info!(project = %asana.project_gid, "Asana task filing enabled");
                scanner = scanner.with_task_tracker(Arc::new(AsanaClient::new(asana)?));
            }
            None => tracing::info!("Asana not configured, task filing skipped"),
        }

        Ok(scanner)
    }

    /// Whether audio uploads can be scanned
    pub fn can_transcribe(&self) -> bool {
        self.extractor.can_transcribe()
    }

    /// Scan a document with the given categories enabled
    ///
    /// Extraction and model failures abort the scan. Task filing failures are
    /// logged and do not.
    pub async fn scan(&self, document: &Document, rules: EnabledRules) -> Result<ScanReport> {
        let start = Instant::now();
        log_scan_start!(
            document.filename(),
            document.media_kind(),
            document.fingerprint()
        );

        let extracted = self.extractor.extract(document).await.map_err(|e| {
            log_error_with_context!(&e, "Text extraction failed");
            RegulateError::from(e)
        })?;

        let outcome = ViolationCollector::new(rules).collect(&extracted, document.filename());
        let violations = outcome.messages();

        let ai_analysis = match &self.analyzer {
            Some(analyzer) if !extracted.is_blank() => {
                let answer = analyzer.analyze(&extracted.to_text()).await.map_err(|e| {
                    log_error_with_context!(&e, "LLM analysis failed");
                    RegulateError::from(e)
                })?;
                Some(split_findings(&answer))
            }
            _ => None,
        };

        let task = if outcome.has_violations() {
            self.file_task(document.filename(), &violations).await
        } else {
            None
        };

        let duration = start.elapsed();
        log_scan_complete!(document.filename(), outcome.violations().len(), duration);

        Ok(ScanReport {
            filename: document.filename().to_string(),
            violations,
            ai_analysis,
            violation_count: outcome.violations().len(),
            task,
            duration,
        })
    }

    async fn file_task(&self, filename: &str, violations: &[String]) -> Option<TaskReceipt> {
        let tracker = self.tracker.as_ref()?;

        match tracker
            .create_task(&task_name(filename), &task_notes(violations))
            .await
        {
            Ok(receipt) => Some(receipt),
            Err(e) => {
                tracing::warn!(error = %e, filename = %filename, "Failed to file tracking task");
                None
            }
        }
    }
}

impl fmt::Debug for ComplianceScanner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComplianceScanner")
            .field("extractor", &self.extractor)
            .field("llm_enrichment", &self.analyzer.is_some())
            .field("task_tracking", &self.tracker.is_some())
            .finish()
    }
}
