//! Configuration management for GraniteRegulate.
//!
//! TOML configuration with:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `GRANITE_<SECTION>_<KEY>` environment overrides
//! - Defaults for every section, so the file itself is optional
//! - Validation once at startup
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - log level and runtime environment
//! - [`ServerConfig`] - bind address, CORS origins, upload cap
//! - [`DetectionConfig`] - rule categories enabled by default
//! - [`AnalysisConfig`] - optional LLM enrichment
//! - [`WatsonxConfig`], [`SpeechConfig`], [`AsanaConfig`] - external collaborators
//! - [`LoggingConfig`] - local file logging
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//! environment = "production"
//!
//! [server]
//! host = "0.0.0.0"
//! port = 8000
//! allowed_origins = ["https://compliance.example.com"]
//!
//! [detection]
//! rules = ["gdpr", "hipaa"]
//!
//! [speech]
//! service_url = "https://api.us-south.speech-to-text.watson.cloud.ibm.com/instances/xyz"
//! api_key = "${IBM_API_KEY}"
//! ```
//!
//! # Validation
//!
//! ```rust,no_run
//! use granite_regulate::config::load_config;
//!
//! match load_config("granite-regulate.toml") {
//!     Ok(_) => println!("Configuration valid"),
//!     Err(e) => eprintln!("Configuration error: {}", e),
//! }
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

pub use loader::{load_config, load_config_or_default, DEFAULT_CONFIG_FILE};
pub use schema::{
    AnalysisConfig, ApplicationConfig, AsanaConfig, DetectionConfig, Environment, LoggingConfig,
    RegulateConfig, ServerConfig, SpeechConfig, WatsonxConfig,
};
pub use secret::{secret_string, SecretString, SecretValue};
