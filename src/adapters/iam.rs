//! IBM Cloud IAM token exchange
//!
//! Both the speech and watsonx.ai adapters authenticate with a bearer token
//! obtained by trading the API key at `{iam_url}/identity/token`. Tokens are
//! cached and refreshed a minute before they expire.

use super::http::{check_status, read_json, send_error};
use crate::config::SecretString;
use crate::domain::ServiceError;
use chrono::{DateTime, Duration, Utc};
use reqwest::Client;
use secrecy::ExposeSecret;
use serde::Deserialize;
use tokio::sync::Mutex;

const SERVICE: &str = "IBM Cloud IAM";
const GRANT_TYPE: &str = "urn:ibm:params:oauth:grant-type:apikey";

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    /// Lifetime in seconds
    #[serde(default)]
    expires_in: Option<i64>,
    /// Absolute expiry as a unix timestamp
    #[serde(default)]
    expiration: Option<i64>,
}

#[derive(Debug, Clone)]
struct CachedToken {
    value: String,
    refresh_after: DateTime<Utc>,
}

/// Exchanges an API key for IAM access tokens
pub struct IamAuthenticator {
    client: Client,
    token_url: String,
    api_key: SecretString,
    cached: Mutex<Option<CachedToken>>,
}

impl IamAuthenticator {
    /// Authenticator against `{iam_url}/identity/token`
    pub fn new(client: Client, iam_url: &str, api_key: SecretString) -> Self {
        Self {
            client,
            token_url: format!("{}/identity/token", iam_url.trim_end_matches('/')),
            api_key,
            cached: Mutex::new(None),
        }
    }

    /// Current access token, fetching a new one when the cache is stale
    pub async fn token(&self) -> Result<String, ServiceError> {
        let mut cached = self.cached.lock().await;

        if let Some(ref token) = *cached {
            if Utc::now() < token.refresh_after {
                return Ok(token.value.clone());
            }
        }

        let fresh = self.request_token().await?;
        let value = fresh.value.clone();
        *cached = Some(fresh);
        Ok(value)
    }

    async fn request_token(&self) -> Result<CachedToken, ServiceError> {
        tracing::debug!(url = %self.token_url, "Requesting IAM access token");

        let api_key: &str = self.api_key.expose_secret().as_ref();
        let response = self
            .client
            .post(&self.token_url)
            .header("Accept", "application/json")
            .form(&[("grant_type", GRANT_TYPE), ("apikey", api_key)])
            .send()
            .await
            .map_err(|e| send_error(SERVICE, e))?;

        let response = check_status(SERVICE, response).await.map_err(|e| match e {
            ServiceError::ClientError { status, message } => {
                ServiceError::AuthenticationFailed(format!("{status} - {message}"))
            }
            other => other,
        })?;

        let token: TokenResponse = read_json(SERVICE, response).await?;
        if token.access_token.is_empty() {
            return Err(ServiceError::AuthenticationFailed(
                "IAM returned an empty access token".to_string(),
            ));
        }

        let now = Utc::now();
        let expires_at = token
            .expiration
            .and_then(|ts| DateTime::from_timestamp(ts, 0))
            .or_else(|| token.expires_in.map(|secs| now + Duration::seconds(secs)))
            .unwrap_or(now + Duration::minutes(5));

        Ok(CachedToken {
            value: token.access_token,
            refresh_after: expires_at - Duration::seconds(60),
        })
    }
}
