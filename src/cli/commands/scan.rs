//! Scan command implementation
//!
//! Scans one local file the same way the analyze endpoint scans an upload.

use crate::config::load_config_or_default;
use crate::core::{ComplianceScanner, ScanReport};
use crate::detection::EnabledRules;
use crate::domain::{Document, RegulateError};
use crate::report::generate_report;
use clap::Args;
use std::path::PathBuf;

/// Arguments for the scan command
#[derive(Args, Debug)]
pub struct ScanArgs {
    /// File to scan (.csv, .pdf, .wav, .mp3, .mpeg)
    pub file: PathBuf,

    /// Comma-separated rule categories (gdpr, hipaa)
    #[arg(long)]
    pub rules: Option<String>,

    /// Also write a PDF report to this path
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

impl ScanArgs {
    /// Execute the scan command
    ///
    /// Exit code 0 when clean, 1 when violations were found, 3 when the file
    /// could not be read or extracted.
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let config = match load_config_or_default(config_path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("❌ {e}");
                return Ok(2);
            }
        };

        let rules = match self.rules.as_deref() {
            Some(list) => match list.parse::<EnabledRules>() {
                Ok(rules) => rules,
                Err(e) => {
                    eprintln!("❌ {e}");
                    return Ok(2);
                }
            },
            None => config.detection.enabled_rules(),
        };

        let scanner = match ComplianceScanner::from_config(&config) {
            Ok(scanner) => scanner,
            Err(e) => {
                eprintln!("❌ {e}");
                return Ok(2);
            }
        };

        let document = match Document::from_path(&self.file).await {
            Ok(document) => document,
            Err(e) => {
                eprintln!("❌ {e}");
                return Ok(3);
            }
        };

        let report = match scanner.scan(&document, rules).await {
            Ok(report) => report,
            Err(e @ (RegulateError::Extraction(_) | RegulateError::UnsupportedMediaType(_))) => {
                eprintln!("❌ {e}");
                return Ok(3);
            }
            Err(e) => return Err(e.into()),
        };

        if self.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            print_summary(&report);
        }

        if let Some(ref path) = self.report {
            let pdf = generate_report(&report.violations)?;
            tokio::fs::write(path, pdf).await?;
            if !self.json {
                println!("📄 Report written to {}", path.display());
            }
        }

        Ok(if report.has_violations() { 1 } else { 0 })
    }
}

fn print_summary(report: &ScanReport) {
    if report.has_violations() {
        println!(
            "⚠️  {} violation(s) found in {}",
            report.violation_count, report.filename
        );
    } else {
        println!("✅ No violations found in {}", report.filename);
    }

    for violation in &report.violations {
        println!("  - {violation}");
    }

    if let Some(ref findings) = report.ai_analysis {
        println!();
        println!("AI analysis:");
        for finding in findings {
            println!("  {finding}");
        }
    }

    if let Some(ref task) = report.task {
        println!();
        println!("Tracking task: {}", task.gid);
    }

    println!("Duration: {:.2}s", report.duration.as_secs_f64());
}
