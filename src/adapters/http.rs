//! Shared reqwest plumbing for the IBM Cloud and Asana adapters

use crate::domain::ServiceError;
use reqwest::{Client, ClientBuilder, Response};
use std::time::Duration;

/// Build an HTTP client with the configured timeout and TLS policy
///
/// Certificate verification is only relaxed when `tls_verify` is false, which
/// configuration validation rejects in production.
pub fn build_client(
    service: &str,
    timeout_seconds: u64,
    tls_verify: bool,
) -> Result<Client, ServiceError> {
    let mut builder = ClientBuilder::new()
        .timeout(Duration::from_secs(timeout_seconds))
        .connect_timeout(Duration::from_secs(30));

    if !tls_verify {
        tracing::warn!(
            service = service,
            "TLS certificate verification is disabled"
        );
        builder = builder.danger_accept_invalid_certs(true);
    }

    builder.build().map_err(|e| ServiceError::ConnectionFailed {
        service: service.to_string(),
        message: format!("Failed to build HTTP client: {e}"),
    })
}

/// Translate a transport failure
pub fn send_error(service: &str, err: reqwest::Error) -> ServiceError {
    if err.is_timeout() {
        ServiceError::Timeout(format!("{service}: {err}"))
    } else {
        ServiceError::ConnectionFailed {
            service: service.to_string(),
            message: err.to_string(),
        }
    }
}

/// Pass successful responses through; turn anything else into a [`ServiceError`]
/// carrying the response body
pub async fn check_status(service: &str, response: Response) -> Result<Response, ServiceError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    tracing::debug!(
        service = service,
        status = status.as_u16(),
        body = %body,
        "Service returned an error status"
    );
    Err(ServiceError::from_status(
        status.as_u16(),
        format!("{service} request failed: {body}"),
    ))
}

/// Decode a JSON body
pub async fn read_json<T: serde::de::DeserializeOwned>(
    service: &str,
    response: Response,
) -> Result<T, ServiceError> {
    response
        .json::<T>()
        .await
        .map_err(|e| ServiceError::InvalidResponse(format!("{service}: {e}")))
}
