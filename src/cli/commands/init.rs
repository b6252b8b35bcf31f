//! Init command implementation
//!
//! This module implements the `init` command for generating a commented
//! configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = crate::config::DEFAULT_CONFIG_FILE)]
    pub output: String,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing GraniteRegulate configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2);
        }

        match fs::write(&self.output, config_template()) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your settings", self.output);
                println!("  2. Put credentials in a .env file:");
                println!("     - IBM_API_KEY and IBM_SPEECH_TO_TEXT_URL for audio uploads");
                println!("     - IBM_PROJECT_ID for LLM enrichment");
                println!("     - ASANA_PAT and ASANA_PROJECT_GID for task filing");
                println!("  3. Validate configuration: granite-regulate validate-config");
                println!("  4. Start the API: granite-regulate serve");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {e}");
                Ok(5)
            }
        }
    }
}

/// Commented configuration template
///
/// Collaborator sections are commented out so the template loads without any
/// credentials in the environment.
pub fn config_template() -> &'static str {
    r#"# GraniteRegulate Configuration File
# GDPR / HIPAA compliance scanner
#
# Values can reference environment variables with ${VAR_NAME}.
# GRANITE_<SECTION>_<KEY> environment variables override single values.

[application]
# Log level: trace, debug, info, warn, error
log_level = "info"
# Runtime environment: development, staging, production
environment = "development"

[server]
host = "127.0.0.1"
port = 8000
# Front-end origins allowed to call the API (credentials allowed, no "*")
allowed_origins = ["http://localhost:8080"]
# Maximum upload size in MB
max_upload_mb = 25

[detection]
# Rule categories used when a request does not pass its own: gdpr, hipaa
rules = ["gdpr", "hipaa"]

[analysis]
# Ask watsonx.ai for a second opinion (requires [watsonx])
llm_enrichment = false

# [watsonx]
# url = "https://us-south.ml.cloud.ibm.com"
# api_key = "${IBM_API_KEY}"
# project_id = "${IBM_PROJECT_ID}"
# model_id = "ibm/granite-13b-instruct-v2"
# max_new_tokens = 512
# temperature = 0.1
# top_p = 1.0

# Required for audio uploads
# [speech]
# service_url = "${IBM_SPEECH_TO_TEXT_URL}"
# api_key = "${IBM_API_KEY}"
# timeout_seconds = 60

# Files a task for every scan with violations
# [asana]
# access_token = "${ASANA_PAT}"
# project_gid = "${ASANA_PROJECT_GID}"

[logging]
# JSON file logs in addition to the console
local_enabled = false
local_path = "logs"
# Rotation: daily, hourly, never
local_rotation = "daily"
# Emit console logs as JSON
json_console = false
"#
}
