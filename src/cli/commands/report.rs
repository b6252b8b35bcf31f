//! Report command implementation

use crate::report::generate_report;
use clap::Args;
use std::path::PathBuf;

/// Arguments for the report command
#[derive(Args, Debug)]
pub struct ReportArgs {
    /// Text file with one violation per line
    pub file: PathBuf,

    /// Where to write the PDF
    #[arg(short, long, default_value = crate::report::REPORT_FILENAME)]
    pub output: PathBuf,
}

impl ReportArgs {
    /// Execute the report command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        let contents = match tokio::fs::read_to_string(&self.file).await {
            Ok(contents) => contents,
            Err(e) => {
                eprintln!("❌ Failed to read {}: {e}", self.file.display());
                return Ok(3);
            }
        };

        let violations = parse_violation_list(&contents);
        tracing::info!(
            violations = violations.len(),
            output = %self.output.display(),
            "Generating violation report"
        );

        let pdf = generate_report(&violations)?;
        tokio::fs::write(&self.output, pdf).await?;

        println!(
            "📄 Report with {} violation(s) written to {}",
            violations.len(),
            self.output.display()
        );
        Ok(0)
    }
}

/// One violation per non-blank line
fn parse_violation_list(contents: &str) -> Vec<String> {
    contents
        .lines()
        .map(str::trim_end)
        .filter(|line| !line.trim().is_empty())
        .map(String::from)
        .collect()
}
