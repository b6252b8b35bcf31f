// GraniteRegulate - GDPR and HIPAA Compliance Scanner
// Copyright (c) 2025 GraniteRegulate Contributors
// Licensed under the MIT License

//! # GraniteRegulate - GDPR and HIPAA Compliance Scanner
//!
//! GraniteRegulate scans uploaded CSV, PDF and audio files for indicators of
//! personally identifiable information (GDPR) and protected health
//! information (HIPAA) and reports every violation it finds.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Extracting** text: CSV to a typed table, PDF to text, audio to a transcript
//! - **Detecting** PII and PHI with keyword and regex rules per cell or per document
//! - **Reporting** violations as ordered messages and as a paginated PDF
//! - **Forwarding** findings to an LLM for a second opinion and to a task tracker
//!
//! ## Architecture
//!
//! GraniteRegulate follows a layered architecture:
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`server`] - HTTP API (analyze, report, health)
//! - [`core`] - Scan orchestration
//! - [`extraction`] - Text extraction per media kind
//! - [`detection`] - Rule sets, detectors and violation collection
//! - [`report`] - PDF report layout and rendering
//! - [`adapters`] - External integrations (Speech to Text, watsonx.ai, Asana)
//! - [`domain`] - Core domain types and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging and observability
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use granite_regulate::config::load_config_or_default;
//! use granite_regulate::core::ComplianceScanner;
//! use granite_regulate::domain::Document;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config_or_default("granite-regulate.toml")?;
//!     let scanner = ComplianceScanner::from_config(&config)?;
//!
//!     let document = Document::from_path("patients.csv").await?;
//!     let report = scanner
//!         .scan(&document, config.detection.enabled_rules())
//!         .await?;
//!
//!     println!("{} violation(s)", report.violation_count);
//!     Ok(())
//! }
//! ```
//!
//! ## Detection
//!
//! The rule detectors are pure functions over text:
//!
//! ```rust
//! use granite_regulate::detection::{matches_gdpr, matches_phi};
//!
//! assert!(matches_gdpr("Contact: john@example.com"));
//! assert!(!matches_gdpr("The sky is blue."));
//! assert!(matches_phi("Patient has a fever."));
//! ```
//!
//! ## Error Handling
//!
//! GraniteRegulate uses the [`domain::RegulateError`] type for all errors:
//!
//! ```rust,no_run
//! use granite_regulate::domain::RegulateError;
//!
//! fn example() -> Result<(), RegulateError> {
//!     // Errors are automatically converted using the ? operator
//!     let config = granite_regulate::config::load_config("granite-regulate.toml")?;
//!     Ok(())
//! }
//! ```
//!
//! ## Logging
//!
//! Structured logging with the `tracing` crate. Upload content is never
//! logged; scans are identified by filename and a SHA-256 fingerprint.

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod detection;
pub mod domain;
pub mod extraction;
pub mod logging;
pub mod report;
pub mod server;
