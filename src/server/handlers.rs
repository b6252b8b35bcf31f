//! Request handlers

use super::error::ApiError;
use super::state::AppState;
use crate::core::ScanReport;
use crate::detection::EnabledRules;
use crate::domain::{Document, MediaKind};
use crate::log_error_with_context;
use crate::report::{self, REPORT_FILENAME};
use axum::extract::{Multipart, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::Instrument;
use uuid::Uuid;

/// `GET /`
pub async fn root() -> Json<Value> {
    Json(json!({ "message": "Welcome to the GraniteRegulate Compliance Checker API" }))
}

/// `GET /health`
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "healthy", "service": "granite-regulate" }))
}

struct Upload {
    filename: String,
    content_type: String,
    bytes: Vec<u8>,
}

/// `POST /api/analyze`
///
/// Multipart body with a `file` part and an optional `rules` part. The
/// content type of the file is checked before its bytes are read.
pub async fn analyze(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ScanReport>, ApiError> {
    let mut upload: Option<Upload> = None;
    let mut requested_rules: Option<String> = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some("file") => {
                let filename = field.file_name().unwrap_or("upload").to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                MediaKind::from_content_type(&content_type)?;

                let bytes = field.bytes().await?;
                upload = Some(Upload {
                    filename,
                    content_type,
                    bytes: bytes.to_vec(),
                });
            }
            Some("rules") => requested_rules = Some(field.text().await?),
            _ => {}
        }
    }

    let upload = upload.ok_or(ApiError::MissingFile)?;
    let rules = match requested_rules.as_deref().map(str::trim) {
        Some(list) if !list.is_empty() => list.parse::<EnabledRules>().map_err(ApiError::BadRequest)?,
        _ => state.default_rules,
    };

    let document = Document::new(upload.filename, upload.content_type, upload.bytes)?;
    let span = tracing::info_span!(
        "analyze",
        request_id = %Uuid::new_v4(),
        filename = %document.filename(),
        rules = %rules,
    );

    let report = state
        .scanner
        .scan(&document, rules)
        .instrument(span)
        .await
        .map_err(|e| {
            log_error_with_context!(&e, "Scan failed");
            ApiError::from(e)
        })?;

    Ok(Json(report))
}

/// Body of `POST /api/generate-report`
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ReportRequest {
    /// `{"violations": [...]}`
    Wrapped { violations: Vec<String> },
    /// `[...]`
    Bare(Vec<String>),
}

impl ReportRequest {
    pub fn into_violations(self) -> Vec<String> {
        match self {
            Self::Wrapped { violations } | Self::Bare(violations) => violations,
        }
    }
}

/// `POST /api/generate-report`
pub async fn generate_report(Json(request): Json<ReportRequest>) -> Result<Response, ApiError> {
    let violations = request.into_violations();

    let pdf = tokio::task::spawn_blocking(move || report::generate_report(&violations))
        .await
        .map_err(|e| ApiError::Report(e.to_string()))??;

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename={REPORT_FILENAME}"),
            ),
        ],
        pdf,
    )
        .into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_request_shapes() {
        let wrapped: ReportRequest = serde_json::from_str(r#"{"violations":["a","b"]}"#).unwrap();
        assert_eq!(wrapped.into_violations(), vec!["a", "b"]);

        let bare: ReportRequest = serde_json::from_str(r#"["c"]"#).unwrap();
        assert_eq!(bare.into_violations(), vec!["c"]);
    }

    #[tokio::test]
    async fn test_health_body() {
        let Json(body) = health().await;
        assert_eq!(body["status"], "healthy");
    }
}
