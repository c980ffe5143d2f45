//! Liveness, readiness and the backend connection page.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, http::StatusCode};
use tracing::instrument;

use crate::filters;
use crate::models::BackendHealth;
use crate::state::AppState;

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
pub async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Returns 503 Service Unavailable if the backend health endpoint fails.
pub async fn readiness(State(state): State<AppState>) -> StatusCode {
    match state.api().health().await {
        Ok(_) => StatusCode::OK,
        Err(error) => {
            tracing::warn!(%error, "Backend not ready");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}

/// Backend connection diagnostics page.
#[derive(Template, WebTemplate)]
#[template(path = "connection_test.html")]
pub struct ConnectionTestTemplate {
    pub status: String,
    pub health: Option<BackendHealth>,
}

/// Query the backend and show what it reports.
#[instrument(skip_all)]
pub async fn connection_test(State(state): State<AppState>) -> ConnectionTestTemplate {
    match state.api().health().await {
        Ok(health) => ConnectionTestTemplate {
            status: "Connected to backend!".to_string(),
            health: Some(health),
        },
        Err(error) => ConnectionTestTemplate {
            status: format!("Connection failed: {error}"),
            health: None,
        },
    }
}
