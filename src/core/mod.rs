//! Core scan orchestration.
//!
//! # Modules
//!
//! - [`scanner`] - The [`ComplianceScanner`] that drives one scan
//! - [`summary`] - The [`ScanReport`] returned to callers
//!
//! # Scan Workflow
//!
//! 1. **Extract**: CSV to table, PDF to text, audio to transcript
//! 2. **Detect**: Run the enabled rule detectors per cell or once per text
//! 3. **Enrich** (optional): Ask the model for findings on the same text
//! 4. **Track** (optional): File a task when violations were found
//!
//! # Example
//!
//! ```rust,no_run
//! use granite_regulate::config::load_config;
//! use granite_regulate::core::ComplianceScanner;
//! use granite_regulate::domain::Document;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("granite-regulate.toml")?;
//! let scanner = ComplianceScanner::from_config(&config)?;
//!
//! let document = Document::from_path("patients.csv").await?;
//! let report = scanner
//!     .scan(&document, config.detection.enabled_rules())
//!     .await?;
//!
//! for violation in &report.violations {
//!     println!("{violation}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod scanner;
pub mod summary;

pub use scanner::ComplianceScanner;
pub use summary::ScanReport;
