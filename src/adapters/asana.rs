//! Asana task filing
//!
//! After a scan with violations a task is created in the configured project.
//! Filing is best-effort: callers log failures and carry on.

use super::http::{build_client, check_status, read_json, send_error};
use crate::config::AsanaConfig;
use crate::domain::ServiceError;
use async_trait::async_trait;
use reqwest::Client;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};

const SERVICE: &str = "Asana";

/// Identifier of a created task
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TaskReceipt {
    /// Asana global id
    pub gid: String,
}

/// Task-tracking collaborator
#[async_trait]
pub trait TaskTracker: Send + Sync {
    /// Create a task with a name and plain-text notes
    async fn create_task(&self, name: &str, notes: &str) -> Result<TaskReceipt, ServiceError>;
}

/// Task name for a scanned file
pub fn task_name(filename: &str) -> String {
    format!("Compliance Violation Detected in {filename}")
}

/// Task notes listing the violations
///
/// ```
/// use granite_regulate::adapters::asana::task_notes;
///
/// let notes = task_notes(&["GDPR Violation found in a.pdf".to_string()]);
/// assert_eq!(
///     notes,
///     "The following violations were detected:\n\nGDPR Violation found in a.pdf"
/// );
/// ```
pub fn task_notes(violations: &[String]) -> String {
    format!(
        "The following violations were detected:\n\n{}",
        violations.join("\n")
    )
}

#[derive(Debug, Serialize)]
struct NewTask<'a> {
    name: &'a str,
    notes: &'a str,
    projects: [&'a str; 1],
}

#[derive(Debug, Serialize)]
struct CreateTaskRequest<'a> {
    data: NewTask<'a>,
}

#[derive(Debug, Deserialize)]
struct CreateTaskResponse {
    data: TaskReceipt,
}

/// Asana REST client
pub struct AsanaClient {
    client: Client,
    config: AsanaConfig,
}

impl AsanaClient {
    /// Client for the configured workspace project
    pub fn new(config: &AsanaConfig) -> Result<Self, ServiceError> {
        Ok(Self {
            client: build_client(SERVICE, config.timeout_seconds, config.tls_verify)?,
            config: config.clone(),
        })
    }
}

#[async_trait]
impl TaskTracker for AsanaClient {
    async fn create_task(&self, name: &str, notes: &str) -> Result<TaskReceipt, ServiceError> {
        let url = format!("{}/tasks", self.config.base_url.trim_end_matches('/'));
        let body = CreateTaskRequest {
            data: NewTask {
                name,
                notes,
                projects: [&self.config.project_gid],
            },
        };

        let token: &str = self.config.access_token.expose_secret().as_ref();
        let response = self
            .client
            .post(&url)
            .bearer_auth(token)
            .json(&body)
            .send()
            .await
            .map_err(|e| send_error(SERVICE, e))?;

        let response = check_status(SERVICE, response).await?;
        let created: CreateTaskResponse = read_json(SERVICE, response).await?;

        tracing::info!(gid = %created.data.gid, task = name, "Created Asana task");
        Ok(created.data)
    }
}
