//! HTTP API
//!
//! | Method | Path                   | Purpose                          |
//! |--------|------------------------|----------------------------------|
//! | GET    | `/`                    | Welcome message                  |
//! | GET    | `/health`              | Liveness check                   |
//! | POST   | `/api/analyze`         | Scan an uploaded file            |
//! | POST   | `/api/generate-report` | Render violations as a PDF       |
//!
//! CORS admits the configured origins with credentials. Request bodies are
//! capped at `server.max_upload_mb`.

pub mod error;
pub mod handlers;
pub mod state;

pub use error::ApiError;
pub use state::AppState;

use crate::config::{RegulateConfig, ServerConfig};
use crate::domain::{RegulateError, Result};
use axum::extract::DefaultBodyLimit;
use axum::http::{header, HeaderValue, Method};
use axum::routing::{get, post};
use axum::Router;
use std::future::Future;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Build the application router
pub fn router(state: AppState, server: &ServerConfig) -> Result<Router> {
    let cors = cors_layer(&server.allowed_origins)?;

    Ok(Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .route("/api/analyze", post(handlers::analyze))
        .route("/api/generate-report", post(handlers::generate_report))
        .layer(DefaultBodyLimit::max(server.max_upload_bytes()))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}

fn cors_layer(origins: &[String]) -> Result<CorsLayer> {
    let origins = origins
        .iter()
        .map(|origin| {
            if origin.trim() == "*" {
                return Err(RegulateError::Configuration(
                    "server.allowed_origins cannot contain '*' when credentials are allowed"
                        .to_string(),
                ));
            }
            HeaderValue::from_str(origin.trim()).map_err(|e| {
                RegulateError::Configuration(format!("Invalid CORS origin '{origin}': {e}"))
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(CorsLayer::new()
        .allow_origin(origins)
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT, header::AUTHORIZATION]))
}

/// Serve the API until `shutdown` resolves
pub async fn serve<F>(config: &RegulateConfig, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let state = AppState::from_config(config)?;
    let app = router(state, &config.server)?;

    let address = config.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .map_err(|e| RegulateError::Io(format!("Failed to bind {address}: {e}")))?;

    tracing::info!(
        address = %address,
        origins = ?config.server.allowed_origins,
        max_upload_mb = config.server.max_upload_mb,
        "GraniteRegulate API listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| RegulateError::Io(format!("Server error: {e}")))?;

    tracing::info!("GraniteRegulate API stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wildcard_origin_rejected() {
        assert!(cors_layer(&["*".to_string()]).is_err());
    }

    #[test]
    fn test_origin_list_accepted() {
        assert!(cors_layer(&[
            "http://localhost:8080".to_string(),
            "https://regulate.example.com".to_string()
        ])
        .is_ok());
    }
}
