//! watsonx.ai text generation adapter
//!
//! Optional enrichment: the extracted text is embedded in a fixed prompt and
//! the model's free-form answer is split into one finding per line. Findings
//! are reported next to the rule-based violations, never merged into them.

use super::http::{build_client, check_status, read_json, send_error};
use super::iam::IamAuthenticator;
use crate::config::WatsonxConfig;
use crate::domain::ServiceError;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

const SERVICE: &str = "watsonx.ai";
const API_VERSION: &str = "2023-05-29";

/// Returned when the model answers without generated text
pub const NO_ANALYSIS_RESULT: &str = "No analysis result found.";

/// Returned when the model answers with no results at all
pub const NO_VALID_RESPONSE: &str = "Failed to get a valid response from the model.";

/// LLM analysis collaborator
#[async_trait]
pub trait ViolationAnalyzer: Send + Sync {
    /// Raw model answer for the given text
    async fn analyze(&self, text: &str) -> Result<String, ServiceError>;
}

/// Prompt sent to the model
pub fn build_prompt(text: &str) -> String {
    format!(
        "\n    Analyze the following text for potential GDPR and HIPAA violations.\n    \
         Identify any Personally Identifiable Information (PII) like names, emails, phone numbers, addresses,\n    \
         and any Protected Health Information (PHI) like medical conditions, treatments, or patient data.\n    \
         For each potential violation found, describe it clearly. If no violations are found, state that.\n\n    \
         Text to analyze:\n    ---\n    {text}\n    ---\n    Analysis:\n    "
    )
}

/// Split a model answer into trimmed, non-empty lines
///
/// ```
/// use granite_regulate::adapters::watsonx::split_findings;
///
/// assert_eq!(
///     split_findings("\n 1. Email address found \n\n2. Patient name\n"),
///     vec!["1. Email address found", "2. Patient name"]
/// );
/// ```
pub fn split_findings(answer: &str) -> Vec<String> {
    answer
        .split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

#[derive(Debug, Serialize)]
struct GenerationParameters {
    decoding_method: &'static str,
    max_new_tokens: u32,
    temperature: f64,
    top_p: f64,
}

#[derive(Debug, Serialize)]
struct GenerationRequest<'a> {
    input: String,
    model_id: &'a str,
    project_id: &'a str,
    parameters: GenerationParameters,
}

#[derive(Debug, Deserialize)]
struct GenerationResult {
    #[serde(default)]
    generated_text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GenerationResponse {
    #[serde(default)]
    results: Vec<GenerationResult>,
}

impl GenerationResponse {
    fn into_answer(self) -> String {
        match self.results.into_iter().next() {
            Some(result) => result
                .generated_text
                .unwrap_or_else(|| NO_ANALYSIS_RESULT.to_string()),
            None => NO_VALID_RESPONSE.to_string(),
        }
    }
}

/// watsonx.ai REST client
pub struct WatsonxClient {
    client: Client,
    generation_url: String,
    auth: IamAuthenticator,
    config: WatsonxConfig,
}

impl WatsonxClient {
    /// Client for the configured region and project
    pub fn new(config: &WatsonxConfig) -> Result<Self, ServiceError> {
        let client = build_client(SERVICE, config.timeout_seconds, config.tls_verify)?;
        let auth = IamAuthenticator::new(client.clone(), &config.iam_url, config.api_key.clone());

        Ok(Self {
            client,
            generation_url: format!(
                "{}/ml/v1/text/generation",
                config.url.trim_end_matches('/')
            ),
            auth,
            config: config.clone(),
        })
    }
}

#[async_trait]
impl ViolationAnalyzer for WatsonxClient {
    async fn analyze(&self, text: &str) -> Result<String, ServiceError> {
        let token = self.auth.token().await?;

        let request = GenerationRequest {
            input: build_prompt(text),
            model_id: &self.config.model_id,
            project_id: &self.config.project_id,
            parameters: GenerationParameters {
                decoding_method: "greedy",
                max_new_tokens: self.config.max_new_tokens,
                temperature: self.config.temperature,
                top_p: self.config.top_p,
            },
        };

        tracing::debug!(
            model_id = %self.config.model_id,
            chars = text.chars().count(),
            "Requesting LLM analysis"
        );

        let response = self
            .client
            .post(&self.generation_url)
            .query(&[("version", API_VERSION)])
            .bearer_auth(token)
            .json(&request)
            .send()
            .await
            .map_err(|e| send_error(SERVICE, e))?;

        let response = check_status(SERVICE, response).await?;
        let generation: GenerationResponse = read_json(SERVICE, response).await?;
        Ok(generation.into_answer())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::secret_string;
    use mockito::Matcher;
    use serde_json::json;

    fn config(url: &str) -> WatsonxConfig {
        let mut config =
            WatsonxConfig::with_credentials(secret_string("key".to_string()), "proj-1".to_string());
        config.url = url.to_string();
        config.iam_url = url.to_string();
        config
    }

    async fn client_with_answer(
        server: &mut mockito::ServerGuard,
        body: &str,
    ) -> (WatsonxClient, mockito::Mock, mockito::Mock) {
        let iam = server
            .mock("POST", "/identity/token")
            .with_status(200)
            .with_body(r#"{"access_token":"iam-token","expires_in":3600}"#)
            .create_async()
            .await;

        let mock = server
            .mock("POST", "/ml/v1/text/generation")
            .match_query(Matcher::UrlEncoded("version".into(), API_VERSION.into()))
            .match_header("authorization", "Bearer iam-token")
            .match_body(Matcher::PartialJson(json!({
                "model_id": "ibm/granite-13b-instruct-v2",
                "project_id": "proj-1",
                "parameters": { "max_new_tokens": 512 }
            })))
            .with_status(200)
            .with_body(body)
            .create_async()
            .await;

        (WatsonxClient::new(&config(&server.url())).unwrap(), mock, iam)
    }

    #[test]
    fn test_prompt_embeds_text() {
        let prompt = build_prompt("Patient John Doe");
        assert!(prompt.contains("---\n    Patient John Doe\n    ---"));
        assert!(prompt.contains("Analyze the following text for potential GDPR and HIPAA violations."));
        assert!(prompt.trim_end().ends_with("Analysis:"));
    }

    #[test]
    fn test_split_findings_drops_blank_lines() {
        assert!(split_findings("  \n\n ").is_empty());
    }

    #[tokio::test]
    async fn test_analyze_returns_generated_text() {
        let mut server = mockito::Server::new_async().await;
        let (client, mock, _iam) = client_with_answer(
            &mut server,
            r#"{"results":[{"generated_text":"1. Email address\n2. Medical condition"}]}"#,
        )
        .await;

        let answer = client.analyze("text").await.unwrap();
        mock.assert_async().await;
        assert_eq!(answer, "1. Email address\n2. Medical condition");
    }

    #[tokio::test]
    async fn test_missing_generated_text() {
        let mut server = mockito::Server::new_async().await;
        let (client, _mock, _iam) = client_with_answer(&mut server, r#"{"results":[{}]}"#).await;
        assert_eq!(client.analyze("text").await.unwrap(), NO_ANALYSIS_RESULT);
    }

    #[tokio::test]
    async fn test_empty_results() {
        let mut server = mockito::Server::new_async().await;
        let (client, _mock, _iam) = client_with_answer(&mut server, r#"{"results":[]}"#).await;
        assert_eq!(client.analyze("text").await.unwrap(), NO_VALID_RESPONSE);
    }
}
