//! Integration tests for scan orchestration with fake collaborators

mod common;

use async_trait::async_trait;
use common::{FakeAnalyzer, FakeTracker, FakeTranscriber};
use granite_regulate::adapters::watsonx::ViolationAnalyzer;
use granite_regulate::core::ComplianceScanner;
use granite_regulate::detection::{EnabledRules, NO_CONTENT_MESSAGE};
use granite_regulate::domain::{Document, RegulateError, ServiceError};
use granite_regulate::extraction::TextExtractor;
use std::sync::Arc;

fn csv(body: &str) -> Document {
    Document::new("patients.csv", "text/csv", body.as_bytes().to_vec()).unwrap()
}

struct BrokenAnalyzer;

#[async_trait]
impl ViolationAnalyzer for BrokenAnalyzer {
    async fn analyze(&self, _text: &str) -> Result<String, ServiceError> {
        Err(ServiceError::Timeout("generation took too long".to_string()))
    }
}

#[tokio::test]
async fn test_violations_are_analyzed_and_filed() {
    let analyzer = Arc::new(FakeAnalyzer::answering(
        "1. Email address in contact column\n\n2. Diagnosis in notes\n",
    ));
    let tracker = Arc::new(FakeTracker::default());
    let scanner = ComplianceScanner::new(TextExtractor::default())
        .with_analyzer(analyzer.clone())
        .with_task_tracker(tracker.clone());

    let report = scanner
        .scan(
            &csv("contact,notes\njane@example.com,patient recovering\n"),
            EnabledRules::all(),
        )
        .await
        .unwrap();

    assert_eq!(
        report.violations,
        vec![
            "GDPR Violation found in row 1, column 'contact'",
            "PHI Violation found in row 1, column 'notes'",
        ]
    );
    assert_eq!(report.violation_count, 2);
    assert_eq!(
        report.ai_analysis,
        Some(vec![
            "1. Email address in contact column".to_string(),
            "2. Diagnosis in notes".to_string(),
        ])
    );

    let seen = analyzer.seen.lock().unwrap().clone();
    assert_eq!(seen.len(), 1);
    assert!(seen[0].contains("jane@example.com"));

    let tasks = tracker.tasks.lock().unwrap().clone();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].0, "Compliance Violation Detected in patients.csv");
    assert!(tasks[0].1.ends_with("PHI Violation found in row 1, column 'notes'"));
    assert_eq!(report.task.map(|t| t.gid), Some("1209".to_string()));
}

#[tokio::test]
async fn test_clean_document_files_no_task() {
    let tracker = Arc::new(FakeTracker::default());
    let scanner =
        ComplianceScanner::new(TextExtractor::default()).with_task_tracker(tracker.clone());

    let report = scanner
        .scan(&csv("color,size\nblue,small\nred,large\n"), EnabledRules::all())
        .await
        .unwrap();

    assert!(report.violations.is_empty());
    assert!(!report.has_violations());
    assert!(report.task.is_none());
    assert!(tracker.tasks.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_task_failure_does_not_fail_scan() {
    let tracker = Arc::new(FakeTracker {
        fail: true,
        ..FakeTracker::default()
    });
    let scanner =
        ComplianceScanner::new(TextExtractor::default()).with_task_tracker(tracker.clone());

    let report = scanner
        .scan(&csv("email\na@b.com\n"), EnabledRules::all())
        .await
        .unwrap();

    assert_eq!(report.violation_count, 1);
    assert!(report.task.is_none());
    assert_eq!(tracker.tasks.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_blank_document_skips_model_and_tracker() {
    let analyzer = Arc::new(FakeAnalyzer::answering("should not be asked"));
    let tracker = Arc::new(FakeTracker::default());
    let scanner = ComplianceScanner::new(TextExtractor::default())
        .with_analyzer(analyzer.clone())
        .with_task_tracker(tracker.clone());

    let report = scanner
        .scan(&csv("name,email\n"), EnabledRules::all())
        .await
        .unwrap();

    assert_eq!(report.violations, vec![NO_CONTENT_MESSAGE]);
    assert_eq!(report.violation_count, 0);
    assert!(report.ai_analysis.is_none());
    assert!(analyzer.seen.lock().unwrap().is_empty());
    assert!(tracker.tasks.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_model_failure_aborts_scan() {
    let scanner =
        ComplianceScanner::new(TextExtractor::default()).with_analyzer(Arc::new(BrokenAnalyzer));

    let err = scanner
        .scan(&csv("email\na@b.com\n"), EnabledRules::all())
        .await
        .unwrap_err();
    assert!(matches!(err, RegulateError::Service(ServiceError::Timeout(_))));
}

#[tokio::test]
async fn test_audio_scan_uses_transcript() {
    let transcriber = Arc::new(FakeTranscriber::saying(
        "the doctor changed the treatment plan",
    ));
    let scanner = ComplianceScanner::new(TextExtractor::new(transcriber.clone()));
    assert!(scanner.can_transcribe());

    let doc = Document::new("visit.wav", "audio/wav", vec![0; 128]).unwrap();
    let report = scanner.scan(&doc, EnabledRules::all()).await.unwrap();

    assert_eq!(report.violations, vec!["PHI Violation found in visit.wav"]);
    assert!(transcriber.staged_paths().iter().all(|p| !p.exists()));
}

#[tokio::test]
async fn test_audio_without_transcriber_fails() {
    let scanner = ComplianceScanner::new(TextExtractor::without_transcription());
    let doc = Document::new("visit.wav", "audio/wav", vec![0; 128]).unwrap();

    let err = scanner.scan(&doc, EnabledRules::all()).await.unwrap_err();
    assert!(matches!(err, RegulateError::Extraction(_)));
}

#[tokio::test]
async fn test_rules_restrict_categories() {
    let scanner = ComplianceScanner::new(TextExtractor::default());
    let rules: EnabledRules = "hipaa".parse().unwrap();

    let report = scanner
        .scan(&csv("contact,notes\njane@example.com,patient recovering\n"), rules)
        .await
        .unwrap();

    assert_eq!(
        report.violations,
        vec!["PHI Violation found in row 1, column 'notes'"]
    );
}
