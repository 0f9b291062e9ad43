//! HTTP handler for the System Health Agent
//!
//! Every health route returns the aggregated tree as JSON:
//! - `200 OK` when the root is UP
//! - `503 Service Unavailable` when the root is DOWN
//! - `500 Internal Server Error` when a probe produced an invalid node
//!
//! The system info routes require `?token=` matching the configured system
//! token: a missing token is `422`, a wrong one `403`.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use system_health_core::Health;
use tower_http::trace::TraceLayer;

use crate::config::Settings;
use crate::info::{system_info, InfoOptions};
use crate::service::HealthService;

/// Application state
pub struct AppState {
    pub service: HealthService,
    pub settings: Settings,
}

impl AppState {
    pub fn new(service: HealthService) -> Self {
        Self {
            service,
            settings: Settings::default(),
        }
    }

    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(HealthService::from_settings(settings)).with_settings(settings.clone())
    }
}

/// Create the router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/healthz", get(health_check))
        .route("/api/v1/system/health", get(health_check))
        .route("/api/v1/healthz", get(health_check))
        .route("/api/v2/system/health", get(health_check))
        .route("/api/v2/healthz", get(health_check))
        .route("/api/v1/system/info", get(info))
        .route("/api/v2/system/info", get(info))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Map the aggregated root status to a response code
pub fn status_code_for(health: &Health) -> StatusCode {
    if health.is_up() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}

/// Health check endpoint
async fn health_check(State(state): State<Arc<AppState>>) -> Response {
    match state.service.health().await {
        Ok(health) => (status_code_for(&health), Json(health)).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "health tree could not be built");
            api_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "InvalidHealth",
                &e.to_string(),
            )
        }
    }
}

/// Query parameters of the system info routes
#[derive(Debug, Deserialize)]
pub struct InfoQuery {
    pub token: Option<String>,
}

/// System info endpoint
async fn info(State(state): State<Arc<AppState>>, Query(query): Query<InfoQuery>) -> Response {
    let token = match query.token {
        Some(token) => token,
        None => {
            return api_error(
                StatusCode::UNPROCESSABLE_ENTITY,
                "ValidationError",
                "Query parameter 'token' is required",
            )
        }
    };

    if !state.settings.is_token_valid(&token) {
        tracing::warn!("system info requested with an invalid token");
        return api_error(StatusCode::FORBIDDEN, "Forbidden", "Invalid token");
    }

    match system_info(&state.settings, InfoOptions::default()) {
        Ok(info) => (StatusCode::OK, Json(info)).into_response(),
        Err(e) => api_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "InfoUnavailable",
            &e.to_string(),
        ),
    }
}

fn api_error(status: StatusCode, error: &str, message: &str) -> Response {
    (
        status,
        Json(ApiError {
            error: error.to_string(),
            message: message.to_string(),
        }),
    )
        .into_response()
}

/// API error
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: String,
    pub message: String,
}
