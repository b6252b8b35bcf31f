//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the GraniteRegulate configuration file.

use crate::config::{load_config, RegulateConfig};
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    ///
    /// Loading already validates, so any failure here is reported as a
    /// configuration error (exit code 2).
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        match load_config(config_path) {
            Ok(config) => {
                println!("✅ Configuration is valid");
                println!();
                for line in summarize(&config) {
                    println!("{line}");
                }
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Configuration validation failed");
                println!("   Error: {e}");
                println!();
                Ok(2)
            }
        }
    }
}

fn enabled(flag: bool) -> &'static str {
    if flag {
        "enabled"
    } else {
        "disabled"
    }
}

/// Human-readable summary without secrets
fn summarize(config: &RegulateConfig) -> Vec<String> {
    let mut lines = vec![
        "Configuration Summary:".to_string(),
        format!("  Log Level: {}", config.application.log_level),
        format!("  Environment: {:?}", config.application.environment),
        format!("  Bind Address: {}", config.server.bind_address()),
        format!("  Allowed Origins: {}", config.server.allowed_origins.join(", ")),
        format!("  Max Upload: {} MB", config.server.max_upload_mb),
        format!("  Default Rules: {}", config.detection.enabled_rules()),
        format!(
            "  LLM Enrichment: {}",
            enabled(config.analysis.llm_enrichment)
        ),
    ];

    match config.watsonx {
        Some(ref watsonx) => lines.push(format!(
            "  watsonx.ai: {} (model {})",
            watsonx.url, watsonx.model_id
        )),
        None => lines.push("  watsonx.ai: not configured".to_string()),
    }

    match config.speech {
        Some(ref speech) => lines.push(format!("  Speech to Text: {}", speech.service_url)),
        None => lines.push("  Speech to Text: not configured (audio uploads rejected)".to_string()),
    }

    match config.asana {
        Some(ref asana) => lines.push(format!("  Asana Project: {}", asana.project_gid)),
        None => lines.push("  Asana: not configured (task filing skipped)".to_string()),
    }

    lines.push(format!(
        "  File Logging: {}",
        if config.logging.local_enabled {
            format!("{} ({})", config.logging.local_path, config.logging.local_rotation)
        } else {
            "disabled".to_string()
        }
    ));

    lines
}
