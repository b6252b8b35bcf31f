//! Watson Speech to Text adapter
//!
//! Audio is posted to `{service_url}/v1/recognize` with the content-type hint
//! as `Content-Type` and an IAM bearer token.

use super::http::{build_client, check_status, read_json, send_error};
use super::iam::IamAuthenticator;
use crate::config::SpeechConfig;
use crate::domain::ServiceError;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::path::Path;

const SERVICE: &str = "Watson Speech to Text";

/// One recognition alternative
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SpeechAlternative {
    /// Recognized text
    pub transcript: String,
    /// Confidence, present on final results only
    #[serde(default)]
    pub confidence: Option<f64>,
}

/// One recognized segment with ordered alternatives
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SpeechResult {
    /// Best alternative first
    #[serde(default)]
    pub alternatives: Vec<SpeechAlternative>,
    /// Whether the segment is final
    #[serde(rename = "final", default)]
    pub is_final: bool,
}

/// Recognition response
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct SpeechRecognition {
    /// Segments in audio order
    #[serde(default)]
    pub results: Vec<SpeechResult>,
}

/// Transcription collaborator
#[async_trait]
pub trait Transcriber: Send + Sync {
    /// Transcribe the audio file at `audio` declared as `content_type`
    async fn transcribe(
        &self,
        audio: &Path,
        content_type: &str,
    ) -> Result<SpeechRecognition, ServiceError>;
}

/// Speech to Text REST client
pub struct WatsonSpeechClient {
    client: Client,
    recognize_url: String,
    auth: IamAuthenticator,
}

impl WatsonSpeechClient {
    /// Client for the configured service instance
    pub fn new(config: &SpeechConfig) -> Result<Self, ServiceError> {
        let client = build_client(SERVICE, config.timeout_seconds, config.tls_verify)?;
        let auth = IamAuthenticator::new(client.clone(), &config.iam_url, config.api_key.clone());

        Ok(Self {
            client,
            recognize_url: format!(
                "{}/v1/recognize",
                config.service_url.trim_end_matches('/')
            ),
            auth,
        })
    }
}

#[async_trait]
impl Transcriber for WatsonSpeechClient {
    async fn transcribe(
        &self,
        audio: &Path,
        content_type: &str,
    ) -> Result<SpeechRecognition, ServiceError> {
        let body = tokio::fs::read(audio)
            .await
            .map_err(|e| ServiceError::InvalidResponse(format!("Failed to read audio: {e}")))?;

        let token = self.auth.token().await?;

        tracing::debug!(
            content_type = content_type,
            bytes = body.len(),
            "Sending audio for transcription"
        );

        let response = self
            .client
            .post(&self.recognize_url)
            .bearer_auth(token)
            .header("Content-Type", content_type)
            .header("Accept", "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| send_error(SERVICE, e))?;

        let response = check_status(SERVICE, response).await?;
        read_json(SERVICE, response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::secret_string;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn config(url: &str) -> SpeechConfig {
        let mut config = SpeechConfig::with_credentials(
            format!("{url}/instances/abc"),
            secret_string("key".to_string()),
        );
        config.iam_url = url.to_string();
        config
    }

    async fn mock_iam(server: &mut mockito::ServerGuard) -> mockito::Mock {
        server
            .mock("POST", "/identity/token")
            .with_status(200)
            .with_body(r#"{"access_token":"iam-token","expires_in":3600}"#)
            .create_async()
            .await
    }

    fn audio_file() -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".wav").tempfile().unwrap();
        file.write_all(b"RIFF....WAVE").unwrap();
        file.flush().unwrap();
        file
    }

    #[tokio::test]
    async fn test_transcribe_posts_audio_with_bearer_token() {
        let mut server = mockito::Server::new_async().await;
        let _iam = mock_iam(&mut server).await;
        let recognize = server
            .mock("POST", "/instances/abc/v1/recognize")
            .match_header("authorization", "Bearer iam-token")
            .match_header("content-type", "audio/wav")
            .match_body("RIFF....WAVE")
            .with_status(200)
            .with_body(
                r#"{"result_index":0,"results":[{"final":true,"alternatives":[{"transcript":"patient is stable ","confidence":0.91}]}]}"#,
            )
            .create_async()
            .await;

        let client = WatsonSpeechClient::new(&config(&server.url())).unwrap();
        let audio = audio_file();
        let recognition = client.transcribe(audio.path(), "audio/wav").await.unwrap();

        recognize.assert_async().await;
        assert_eq!(recognition.results.len(), 1);
        assert!(recognition.results[0].is_final);
        assert_eq!(
            recognition.results[0].alternatives[0].transcript,
            "patient is stable "
        );
    }

    #[tokio::test]
    async fn test_service_error_propagates() {
        let mut server = mockito::Server::new_async().await;
        let _iam = mock_iam(&mut server).await;
        let _recognize = server
            .mock("POST", "/instances/abc/v1/recognize")
            .with_status(400)
            .with_body(r#"{"error":"unable to transcode data stream"}"#)
            .create_async()
            .await;

        let client = WatsonSpeechClient::new(&config(&server.url())).unwrap();
        let audio = audio_file();
        let result = client.transcribe(audio.path(), "audio/mp3").await;
        assert!(matches!(
            result,
            Err(ServiceError::ClientError { status: 400, .. })
        ));
    }
}
