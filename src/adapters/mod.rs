//! External system integrations for GraniteRegulate.
//!
//! - [`speech`] - Watson Speech to Text (audio transcription)
//! - [`watsonx`] - watsonx.ai text generation (optional LLM enrichment)
//! - [`asana`] - Asana task filing
//! - [`iam`] - IBM Cloud IAM token exchange shared by the IBM adapters
//!
//! # Design Pattern
//!
//! Each collaborator sits behind an `async_trait` seam ([`speech::Transcriber`],
//! [`watsonx::ViolationAnalyzer`], [`asana::TaskTracker`]) so the scanner can be
//! exercised with in-process fakes. Credentials come from the validated
//! configuration and are injected through the constructors.
//!
//! ```rust,no_run
//! use granite_regulate::adapters::asana::{AsanaClient, TaskTracker};
//! use granite_regulate::config::{secret_string, AsanaConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AsanaConfig::with_credentials(
//!     secret_string("personal-access-token".to_string()),
//!     "1200000000000000".to_string(),
//! );
//! let client = AsanaClient::new(&config)?;
//! client.create_task("Compliance Violation Detected in a.csv", "...").await?;
//! # Ok(())
//! # }
//! ```

pub mod asana;
pub mod http;
pub mod iam;
pub mod speech;
pub mod watsonx;
