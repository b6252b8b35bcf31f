//! Configuration schema types
//!
//! Every section has defaults, so an empty file (or no file at all) yields a
//! working local setup: the server on `127.0.0.1:8000`, both rule categories
//! enabled and no external collaborators.

use crate::config::SecretString;
use crate::detection::{EnabledRules, RuleCategory};
use serde::{Deserialize, Serialize};

/// Runtime environment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Development environment
    #[default]
    Development,
    /// Staging environment
    Staging,
    /// Production environment
    Production,
}

/// Main GraniteRegulate configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegulateConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Rule categories evaluated by default
    #[serde(default)]
    pub detection: DetectionConfig,

    /// Optional LLM enrichment
    #[serde(default)]
    pub analysis: AnalysisConfig,

    /// watsonx.ai text generation (required when LLM enrichment is enabled)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub watsonx: Option<WatsonxConfig>,

    /// Watson Speech to Text (required for audio uploads)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speech: Option<SpeechConfig>,

    /// Asana task filing (skipped when absent)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asana: Option<AsanaConfig>,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl RegulateConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.server.validate()?;
        self.detection.validate()?;

        if self.analysis.llm_enrichment && self.watsonx.is_none() {
            return Err(
                "analysis.llm_enrichment requires a [watsonx] configuration section".to_string(),
            );
        }

        let environment = &self.application.environment;
        if let Some(ref watsonx) = self.watsonx {
            watsonx.validate(environment)?;
        }
        if let Some(ref speech) = self.speech {
            speech.validate(environment)?;
        }
        if let Some(ref asana) = self.asana {
            asana.validate(environment)?;
        }

        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Runtime environment (development, staging, production)
    #[serde(default)]
    pub environment: Environment,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            environment: Environment::default(),
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address
    #[serde(default = "default_host")]
    pub host: String,

    /// Bind port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Origins allowed by CORS (credentials are allowed for these)
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,

    /// Maximum request body size in MB
    #[serde(default = "default_max_upload_mb")]
    pub max_upload_mb: usize,
}

impl ServerConfig {
    fn validate(&self) -> Result<(), String> {
        if self.host.is_empty() {
            return Err("server.host cannot be empty".to_string());
        }

        for origin in &self.allowed_origins {
            validate_url("server.allowed_origins", origin)?;
        }

        if self.max_upload_mb == 0 || self.max_upload_mb > 1024 {
            return Err(format!(
                "server.max_upload_mb must be between 1 and 1024, got {}",
                self.max_upload_mb
            ));
        }

        Ok(())
    }

    /// Upload cap in bytes
    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_mb * 1024 * 1024
    }

    /// `host:port` bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            allowed_origins: default_allowed_origins(),
            max_upload_mb: default_max_upload_mb(),
        }
    }
}

/// Detection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectionConfig {
    /// Rule categories enabled when a request does not choose its own
    #[serde(default = "default_rules")]
    pub rules: Vec<RuleCategory>,
}

impl DetectionConfig {
    fn validate(&self) -> Result<(), String> {
        if self.rules.is_empty() {
            return Err("detection.rules cannot be empty".to_string());
        }
        Ok(())
    }

    /// Enabled rule set
    pub fn enabled_rules(&self) -> EnabledRules {
        self.rules.iter().copied().collect()
    }
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            rules: default_rules(),
        }
    }
}

/// LLM enrichment configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Send extracted text to watsonx.ai and report its findings separately
    #[serde(default)]
    pub llm_enrichment: bool,
}

/// watsonx.ai text generation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatsonxConfig {
    /// Regional endpoint, e.g. `https://us-south.ml.cloud.ibm.com`
    #[serde(default = "default_watsonx_url")]
    pub url: String,

    /// IBM Cloud API key
    /// Stored securely in memory and automatically zeroized on drop
    pub api_key: SecretString,

    /// watsonx.ai project the generation is billed to
    pub project_id: String,

    /// Foundation model
    #[serde(default = "default_model_id")]
    pub model_id: String,

    /// Generation length limit
    #[serde(default = "default_max_new_tokens")]
    pub max_new_tokens: u32,

    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f64,

    /// Nucleus sampling
    #[serde(default = "default_top_p")]
    pub top_p: f64,

    /// IAM token service
    #[serde(default = "default_iam_url")]
    pub iam_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// TLS certificate verification enabled
    ///
    /// **SECURITY WARNING**: Disabling TLS verification exposes API keys to
    /// man-in-the-middle attacks. Rejected in production.
    #[serde(default = "default_true")]
    pub tls_verify: bool,
}

impl WatsonxConfig {
    fn validate(&self, environment: &Environment) -> Result<(), String> {
        validate_url("watsonx.url", &self.url)?;
        validate_url("watsonx.iam_url", &self.iam_url)?;
        validate_secret("watsonx.api_key", &self.api_key)?;

        if self.project_id.is_empty() {
            return Err("watsonx.project_id cannot be empty".to_string());
        }
        if self.model_id.is_empty() {
            return Err("watsonx.model_id cannot be empty".to_string());
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(format!(
                "watsonx.temperature must be between 0 and 2, got {}",
                self.temperature
            ));
        }
        if !(0.0..=1.0).contains(&self.top_p) || self.top_p == 0.0 {
            return Err(format!(
                "watsonx.top_p must be in (0, 1], got {}",
                self.top_p
            ));
        }

        validate_tls("watsonx", self.tls_verify, environment)
    }

    /// Section with defaults for everything but the credentials
    pub fn with_credentials(api_key: SecretString, project_id: String) -> Self {
        Self {
            url: default_watsonx_url(),
            api_key,
            project_id,
            model_id: default_model_id(),
            max_new_tokens: default_max_new_tokens(),
            temperature: default_temperature(),
            top_p: default_top_p(),
            iam_url: default_iam_url(),
            timeout_seconds: default_timeout_seconds(),
            tls_verify: true,
        }
    }
}

/// Watson Speech to Text configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeechConfig {
    /// Service instance URL
    pub service_url: String,

    /// IBM Cloud API key
    /// Stored securely in memory and automatically zeroized on drop
    pub api_key: SecretString,

    /// IAM token service
    #[serde(default = "default_iam_url")]
    pub iam_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// TLS certificate verification enabled
    ///
    /// **SECURITY WARNING**: Rejected in production when `false`.
    #[serde(default = "default_true")]
    pub tls_verify: bool,
}

impl SpeechConfig {
    fn validate(&self, environment: &Environment) -> Result<(), String> {
        validate_url("speech.service_url", &self.service_url)?;
        validate_url("speech.iam_url", &self.iam_url)?;
        validate_secret("speech.api_key", &self.api_key)?;
        validate_tls("speech", self.tls_verify, environment)
    }

    /// Section with defaults for everything but the credentials
    pub fn with_credentials(service_url: String, api_key: SecretString) -> Self {
        Self {
            service_url,
            api_key,
            iam_url: default_iam_url(),
            timeout_seconds: default_timeout_seconds(),
            tls_verify: true,
        }
    }
}

/// Asana task filing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AsanaConfig {
    /// REST API base URL
    #[serde(default = "default_asana_base_url")]
    pub base_url: String,

    /// Personal access token
    /// Stored securely in memory and automatically zeroized on drop
    pub access_token: SecretString,

    /// Project that receives the tasks
    pub project_gid: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// TLS certificate verification enabled
    #[serde(default = "default_true")]
    pub tls_verify: bool,
}

impl AsanaConfig {
    fn validate(&self, environment: &Environment) -> Result<(), String> {
        validate_url("asana.base_url", &self.base_url)?;
        validate_secret("asana.access_token", &self.access_token)?;

        if self.project_gid.is_empty() {
            return Err("asana.project_gid cannot be empty".to_string());
        }

        validate_tls("asana", self.tls_verify, environment)
    }

    /// Section with defaults for everything but the credentials
    pub fn with_credentials(access_token: SecretString, project_gid: String) -> Self {
        Self {
            base_url: default_asana_base_url(),
            access_token,
            project_gid,
            timeout_seconds: default_timeout_seconds(),
            tls_verify: true,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy (daily, hourly, never)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,

    /// Emit console logs as JSON
    #[serde(default)]
    pub json_console: bool,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.is_empty() {
            return Err("logging.local_path cannot be empty when local_enabled".to_string());
        }

        Ok(())
    }

    /// Console-only logging
    pub fn console_only() -> Self {
        Self {
            local_enabled: false,
            ..Self::default()
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
            json_console: false,
        }
    }
}

fn validate_url(field: &str, value: &str) -> Result<(), String> {
    if value.is_empty() {
        return Err(format!("{field} cannot be empty"));
    }

    let parsed = url::Url::parse(value).map_err(|e| format!("{field} is not a valid URL: {e}"))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(format!("{field} must start with http:// or https://"));
    }
    Ok(())
}

fn validate_secret(field: &str, value: &SecretString) -> Result<(), String> {
    use secrecy::ExposeSecret;

    if value.expose_secret().is_empty() {
        return Err(format!("{field} cannot be empty"));
    }
    Ok(())
}

fn validate_tls(section: &str, tls_verify: bool, environment: &Environment) -> Result<(), String> {
    if *environment == Environment::Production && !tls_verify {
        return Err(format!(
            "TLS certificate verification cannot be disabled in production environments \
            ({section}.tls_verify = false). For development/testing set \
            'environment = \"development\"' under [application]."
        ));
    }
    Ok(())
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_allowed_origins() -> Vec<String> {
    vec!["http://localhost:8080".to_string()]
}

fn default_max_upload_mb() -> usize {
    25
}

fn default_rules() -> Vec<RuleCategory> {
    RuleCategory::ALL.to_vec()
}

fn default_true() -> bool {
    true
}

fn default_timeout_seconds() -> u64 {
    60
}

fn default_watsonx_url() -> String {
    "https://us-south.ml.cloud.ibm.com".to_string()
}

fn default_model_id() -> String {
    "ibm/granite-13b-instruct-v2".to_string()
}

fn default_max_new_tokens() -> u32 {
    512
}

fn default_temperature() -> f64 {
    0.1
}

fn default_top_p() -> f64 {
    1.0
}

fn default_iam_url() -> String {
    "https://iam.cloud.ibm.com".to_string()
}

fn default_asana_base_url() -> String {
    "https://app.asana.com/api/1.0".to_string()
}

fn default_local_path() -> String {
    "logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}
