//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::{AsanaConfig, Environment, RegulateConfig, SpeechConfig, WatsonxConfig};
use super::secret_string;
use crate::domain::errors::RegulateError;
use crate::domain::result::Result;
use lazy_static::lazy_static;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Default configuration file name
pub const DEFAULT_CONFIG_FILE: &str = "granite-regulate.toml";

lazy_static! {
    static ref ENV_PLACEHOLDER: Regex =
        Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").expect("placeholder regex must compile");
}

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into RegulateConfig
/// 4. Applies environment variable overrides (GRANITE_* prefix and the IBM_*/ASANA_* names)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if the file cannot be read, a referenced environment
/// variable is missing, TOML parsing fails or validation fails.
///
/// # Examples
///
/// ```no_run
/// use granite_regulate::config::load_config;
///
/// let config = load_config("granite-regulate.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<RegulateConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(RegulateError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        RegulateError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let config: RegulateConfig = toml::from_str(&contents)
        .map_err(|e| RegulateError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    finish(config)
}

/// Loads the file if it exists, otherwise starts from defaults
///
/// Environment overrides and validation apply either way, so a deployment can
/// be configured through the environment alone.
pub fn load_config_or_default(path: impl AsRef<Path>) -> Result<RegulateConfig> {
    let path = path.as_ref();
    if path.exists() {
        return load_config(path);
    }

    tracing::debug!(
        path = %path.display(),
        "Configuration file not found, using defaults and environment"
    );
    finish(RegulateConfig::default())
}

fn finish(mut config: RegulateConfig) -> Result<RegulateConfig> {
    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        RegulateError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are left untouched. Every missing variable is reported in a
/// single error.
fn substitute_env_vars(input: &str) -> Result<String> {
    let mut result = String::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in ENV_PLACEHOLDER.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{}}}", var_name);
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(RegulateError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

fn env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

/// Applies environment variable overrides
///
/// `GRANITE_<SECTION>_<KEY>` variables override single values. The credential
/// variables `IBM_API_KEY`, `IBM_PROJECT_ID`, `IBM_SPEECH_TO_TEXT_URL`,
/// `ASANA_PAT` and `ASANA_PROJECT_GID` fill in or create the collaborator
/// sections.
fn apply_env_overrides(config: &mut RegulateConfig) -> Result<()> {
    // Application overrides
    if let Some(val) = env("GRANITE_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }
    if let Some(val) = env("GRANITE_APPLICATION_ENVIRONMENT") {
        config.application.environment = match val.to_lowercase().as_str() {
            "development" => Environment::Development,
            "staging" => Environment::Staging,
            "production" => Environment::Production,
            _ => {
                return Err(RegulateError::Configuration(format!(
                    "Invalid GRANITE_APPLICATION_ENVIRONMENT '{val}'. Must be one of: development, staging, production"
                )))
            }
        };
    }

    // Server overrides
    if let Some(val) = env("GRANITE_SERVER_HOST") {
        config.server.host = val;
    }
    if let Some(val) = env("GRANITE_SERVER_PORT") {
        config.server.port = val.parse().map_err(|_| {
            RegulateError::Configuration(format!("Invalid GRANITE_SERVER_PORT '{val}'"))
        })?;
    }
    if let Some(val) = env("GRANITE_SERVER_ALLOWED_ORIGINS") {
        config.server.allowed_origins = val
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect();
    }
    if let Some(val) = env("GRANITE_SERVER_MAX_UPLOAD_MB") {
        if let Ok(mb) = val.parse() {
            config.server.max_upload_mb = mb;
        }
    }

    // Detection and analysis overrides
    if let Some(val) = env("GRANITE_DETECTION_RULES") {
        let rules: crate::detection::EnabledRules = val.parse().map_err(|e| {
            RegulateError::Configuration(format!("Invalid GRANITE_DETECTION_RULES: {e}"))
        })?;
        config.detection.rules = rules.categories();
    }
    if let Some(val) = env("GRANITE_ANALYSIS_LLM_ENRICHMENT") {
        config.analysis.llm_enrichment = val.parse().unwrap_or(false);
    }

    // watsonx.ai
    let ibm_api_key = env("IBM_API_KEY");
    match config.watsonx {
        Some(ref mut watsonx) => {
            if let Some(ref key) = ibm_api_key {
                watsonx.api_key = secret_string(key.clone());
            }
            if let Some(val) = env("IBM_PROJECT_ID") {
                watsonx.project_id = val;
            }
            if let Some(val) = env("GRANITE_WATSONX_URL") {
                watsonx.url = val;
            }
            if let Some(val) = env("GRANITE_WATSONX_MODEL_ID") {
                watsonx.model_id = val;
            }
        }
        None => {
            if let (Some(key), Some(project)) = (&ibm_api_key, env("IBM_PROJECT_ID")) {
                config.watsonx = Some(WatsonxConfig::with_credentials(
                    secret_string(key.clone()),
                    project,
                ));
            }
        }
    }

    // Speech to Text
    match config.speech {
        Some(ref mut speech) => {
            if let Some(ref key) = ibm_api_key {
                speech.api_key = secret_string(key.clone());
            }
            if let Some(val) = env("IBM_SPEECH_TO_TEXT_URL") {
                speech.service_url = val;
            }
            if let Some(val) = env("GRANITE_SPEECH_TLS_VERIFY") {
                speech.tls_verify = val.parse().unwrap_or(true);
            }
        }
        None => {
            if let (Some(key), Some(url)) = (&ibm_api_key, env("IBM_SPEECH_TO_TEXT_URL")) {
                config.speech = Some(SpeechConfig::with_credentials(
                    url,
                    secret_string(key.clone()),
                ));
            }
        }
    }

    // Asana
    match config.asana {
        Some(ref mut asana) => {
            if let Some(val) = env("ASANA_PAT") {
                asana.access_token = secret_string(val);
            }
            if let Some(val) = env("ASANA_PROJECT_GID") {
                asana.project_gid = val;
            }
        }
        None => {
            if let (Some(pat), Some(project)) = (env("ASANA_PAT"), env("ASANA_PROJECT_GID")) {
                config.asana = Some(AsanaConfig::with_credentials(secret_string(pat), project));
            }
        }
    }

    // Logging overrides
    if let Some(val) = env("GRANITE_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Some(val) = env("GRANITE_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Some(val) = env("GRANITE_LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::RuleCategory;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_substitute_env_vars() {
        std::env::set_var("GRANITE_TEST_SUBST_VAR", "test_value");
        let input = "api_key = \"${GRANITE_TEST_SUBST_VAR}\"";
        let result = substitute_env_vars(input).unwrap();
        assert_eq!(result, "api_key = \"test_value\"\n");
        std::env::remove_var("GRANITE_TEST_SUBST_VAR");
    }

    #[test]
    fn test_substitute_env_vars_reports_all_missing() {
        std::env::remove_var("GRANITE_MISSING_ONE");
        std::env::remove_var("GRANITE_MISSING_TWO");
        let input = "a = \"${GRANITE_MISSING_ONE}\"\nb = \"${GRANITE_MISSING_TWO}\"";
        let err = substitute_env_vars(input).unwrap_err().to_string();
        assert!(err.contains("GRANITE_MISSING_ONE"));
        assert!(err.contains("GRANITE_MISSING_TWO"));
    }

    #[test]
    fn test_substitute_skips_comments() {
        std::env::remove_var("GRANITE_COMMENTED_OUT");
        let input = "# api_key = \"${GRANITE_COMMENTED_OUT}\"";
        assert!(substitute_env_vars(input).is_ok());
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config("nonexistent-granite.toml");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_valid() {
        let toml_content = r#"
[application]
log_level = "debug"

[server]
port = 9000
allowed_origins = ["http://localhost:3000"]

[detection]
rules = ["phi"]

[asana]
access_token = "pat"
project_gid = "1200"
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.application.log_level, "debug");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.detection.rules, vec![RuleCategory::Hipaa]);
        assert_eq!(config.asana.unwrap().base_url, "https://app.asana.com/api/1.0");
    }

    #[test]
    fn test_load_config_rejects_invalid_values() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[application]\nlog_level = \"loud\"\n")
            .unwrap();
        temp_file.flush().unwrap();

        let err = load_config(temp_file.path()).unwrap_err();
        assert!(err.to_string().contains("Invalid log_level"));
    }

    #[test]
    fn test_load_config_or_default_without_file() {
        let config = load_config_or_default("definitely-missing-granite.toml").unwrap();
        assert_eq!(config.server.port, 8000);
    }
}
