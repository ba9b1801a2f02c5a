//! Web API module for reTerminal Designer.
//!
//! This module provides a REST API for the dashboard editor frontend and for
//! devices fetching their layout.
//!
//! # Endpoints
//!
//! - `GET /health` - Health check
//! - `GET /api/layout` - Default layout (created on first access)
//! - `POST /api/layout` - Replace the default layout
//! - `GET /api/layouts` - List stored layouts
//! - `POST /api/layouts` - Create a layout (`{ "id", "name"? }`)
//! - `GET /api/layouts/{layout_id}` - Load a layout
//! - `POST /api/layouts/{layout_id}` - Replace a layout
//! - `DELETE /api/layouts/{layout_id}` - Delete a layout
//! - `GET /api/layouts/{layout_id}/export` - ESPHome YAML snippet for a layout
//! - `POST /api/import_snippet` - Decompile a snippet (`{ "yaml", "layout_id"? }`)
//! - `GET /api/hardware/templates` - Hardware profiles

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::config::Config;
use crate::constants::DEFAULT_LAYOUT_ID;
use crate::export;
use crate::models::{Canvas, DeviceConfig, HardwareProfile};
use crate::parser;
use crate::services::{list_hardware_profiles, LayoutStore, LayoutSummary, StoreError};

// ============================================================================
// Application State
// ============================================================================

/// Shared application state for the web API.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    config: Arc<Config>,
    /// Layout storage
    store: LayoutStore,
    /// Canvas used for snippet imports
    canvas: Canvas,
}

impl AppState {
    /// Creates a new application state backed by `layouts_dir`.
    pub fn new(config: Config, layouts_dir: PathBuf) -> anyhow::Result<Self> {
        let canvas = config.canvas()?;
        let store = LayoutStore::open(layouts_dir)?;
        Ok(Self {
            config: Arc::new(config),
            store,
            canvas,
        })
    }

    /// Returns the layout store.
    #[must_use]
    pub const fn store(&self) -> &LayoutStore {
        &self.store
    }
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Current health status (e.g., "healthy").
    pub status: String,
    /// Application version.
    pub version: String,
}

/// Layout list response.
#[derive(Debug, Serialize)]
pub struct LayoutListResponse {
    /// Layout summaries, newest first.
    pub layouts: Vec<LayoutSummary>,
}

/// Body of `POST /api/layouts`.
#[derive(Debug, Deserialize)]
pub struct CreateLayoutRequest {
    /// Requested layout id (sanitized)
    pub id: String,
    /// Display name (defaults to the id)
    #[serde(default)]
    pub name: Option<String>,
}

/// Generic status response.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    /// Status string (e.g., "ok").
    pub status: String,
}

/// Snippet export response.
#[derive(Debug, Serialize)]
pub struct ExportResponse {
    /// Generated ESPHome YAML
    pub yaml: String,
}

/// Body of `POST /api/import_snippet`.
#[derive(Debug, Deserialize)]
pub struct ImportRequest {
    /// YAML snippet
    pub yaml: String,
    /// Store the result under this layout id; omitted means decompile only
    #[serde(default)]
    pub layout_id: Option<String>,
}

/// Successful import response.
#[derive(Debug, Serialize)]
pub struct ImportResponse {
    /// Always "ok".
    pub status: String,
    /// Reconstructed layout
    pub layout: DeviceConfig,
}

/// Hardware template list response.
#[derive(Debug, Serialize)]
pub struct HardwareListResponse {
    /// Profiles sorted by id
    pub templates: Vec<HardwareProfile>,
}

/// API error response.
#[derive(Debug, Serialize)]
pub struct ApiError {
    /// Error code or message.
    pub error: String,
    /// Optional additional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    fn with_details(error: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: Some(details.into()),
        }
    }
}

type ApiFailure = (StatusCode, Json<ApiError>);

/// Maps a store error to its HTTP status and error body.
fn store_failure(err: StoreError) -> ApiFailure {
    let status = match &err {
        StoreError::InvalidId | StoreError::Import(_) => StatusCode::BAD_REQUEST,
        StoreError::NotFound(_) => StatusCode::NOT_FOUND,
        StoreError::AlreadyExists(_) => StatusCode::CONFLICT,
        StoreError::Protected(_) => StatusCode::FORBIDDEN,
        StoreError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let details = match &err {
        StoreError::Io(e) => format!("{e:#}"),
        other => other.to_string(),
    };
    (status, Json(ApiError::with_details(err.code(), details)))
}

fn not_found(layout_id: &str) -> ApiFailure {
    (
        StatusCode::NOT_FOUND,
        Json(ApiError::with_details(
            "not_found",
            format!("layout '{layout_id}' not found"),
        )),
    )
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET /health - Health check endpoint.
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// GET /api/layout - The default layout.
async fn get_default_layout(
    State(state): State<AppState>,
) -> Result<Json<DeviceConfig>, ApiFailure> {
    state
        .store
        .get_or_create_default()
        .map(Json)
        .map_err(store_failure)
}

/// POST /api/layout - Replace the default layout.
async fn save_default_layout(
    State(state): State<AppState>,
    Json(device): Json<DeviceConfig>,
) -> Result<Json<DeviceConfig>, ApiFailure> {
    state
        .store
        .update(DEFAULT_LAYOUT_ID, device)
        .map(Json)
        .map_err(store_failure)
}

/// GET /api/layouts - List stored layouts.
async fn list_layouts(
    State(state): State<AppState>,
) -> Result<Json<LayoutListResponse>, ApiFailure> {
    let layouts = state.store.list().map_err(store_failure)?;
    Ok(Json(LayoutListResponse { layouts }))
}

/// POST /api/layouts - Create an empty layout.
async fn create_layout(
    State(state): State<AppState>,
    Json(request): Json<CreateLayoutRequest>,
) -> Result<(StatusCode, Json<DeviceConfig>), ApiFailure> {
    let name = request.name.as_deref().unwrap_or(&request.id);
    let device = state.store.create(&request.id, name).map_err(store_failure)?;
    Ok((StatusCode::CREATED, Json(device)))
}

/// GET /api/layouts/{layout_id} - Load a layout.
async fn get_layout(
    State(state): State<AppState>,
    Path(layout_id): Path<String>,
) -> Result<Json<DeviceConfig>, ApiFailure> {
    state
        .store
        .get(&layout_id)
        .map_err(store_failure)?
        .map(Json)
        .ok_or_else(|| not_found(&layout_id))
}

/// POST /api/layouts/{layout_id} - Replace a layout.
async fn save_layout(
    State(state): State<AppState>,
    Path(layout_id): Path<String>,
    Json(device): Json<DeviceConfig>,
) -> Result<Json<DeviceConfig>, ApiFailure> {
    state
        .store
        .update(&layout_id, device)
        .map(Json)
        .map_err(store_failure)
}

/// DELETE /api/layouts/{layout_id} - Delete a layout.
async fn delete_layout(
    State(state): State<AppState>,
    Path(layout_id): Path<String>,
) -> Result<Json<StatusResponse>, ApiFailure> {
    state.store.delete(&layout_id).map_err(store_failure)?;
    Ok(Json(StatusResponse {
        status: "ok".to_string(),
    }))
}

/// GET /api/layouts/{layout_id}/export - Generate the YAML snippet.
async fn export_layout(
    State(state): State<AppState>,
    Path(layout_id): Path<String>,
) -> Result<Json<ExportResponse>, ApiFailure> {
    let device = state
        .store
        .get(&layout_id)
        .map_err(store_failure)?
        .ok_or_else(|| not_found(&layout_id))?;

    Ok(Json(ExportResponse {
        yaml: export::generate_snippet(&device),
    }))
}

/// POST /api/import_snippet - Decompile a snippet, optionally storing it.
async fn import_snippet(
    State(state): State<AppState>,
    Json(request): Json<ImportRequest>,
) -> Result<Json<ImportResponse>, ApiFailure> {
    let layout = match request.layout_id.as_deref() {
        Some(id) => state
            .store
            .import_snippet(id, &request.yaml, &state.canvas)
            .map_err(store_failure)?,
        None => parser::yaml_to_layout(&request.yaml, &state.canvas).map_err(|e| {
            warn!(code = e.code(), "snippet import rejected");
            (
                StatusCode::BAD_REQUEST,
                Json(ApiError::with_details(e.code(), e.to_string())),
            )
        })?,
    };

    Ok(Json(ImportResponse {
        status: "ok".to_string(),
        layout,
    }))
}

/// GET /api/hardware/templates - List hardware profiles.
async fn list_hardware_templates(
    State(state): State<AppState>,
) -> Result<Json<HardwareListResponse>, ApiFailure> {
    let dir = state.config.hardware_dir().map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiError::with_details(
                "Failed to resolve hardware directory",
                format!("{e:#}"),
            )),
        )
    })?;

    let templates = list_hardware_profiles(&dir).map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiError::with_details(
                "Failed to list hardware templates",
                format!("{e:#}"),
            )),
        )
    })?;

    Ok(Json(HardwareListResponse { templates }))
}

/// Fallback for unknown routes.
async fn route_not_found() -> ApiFailure {
    (StatusCode::NOT_FOUND, Json(ApiError::new("Route not found")))
}

// ============================================================================
// Router Setup
// ============================================================================

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    // The server runs on the local network next to Home Assistant and the
    // editor is served from a different origin.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health check
        .route("/health", get(health_check))
        // Layout endpoints
        .route("/api/layout", get(get_default_layout).post(save_default_layout))
        .route("/api/layouts", get(list_layouts).post(create_layout))
        .route(
            "/api/layouts/{layout_id}",
            get(get_layout).post(save_layout).delete(delete_layout),
        )
        .route("/api/layouts/{layout_id}/export", get(export_layout))
        // Snippet import
        .route("/api/import_snippet", post(import_snippet))
        // Hardware endpoints
        .route("/api/hardware/templates", get(list_hardware_templates))
        .fallback(route_not_found)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Runs the web server.
///
/// # Arguments
///
/// * `config` - Application configuration
/// * `layouts_dir` - Directory containing layout files
/// * `addr` - Socket address to bind to
///
/// # Errors
///
/// Returns an error if the server fails to start.
pub async fn run_server(
    config: Config,
    layouts_dir: PathBuf,
    addr: SocketAddr,
) -> anyhow::Result<()> {
    let state = AppState::new(config, layouts_dir)?;
    let app = create_router(state);

    info!("Starting reTerminal Designer web server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ImportError;

    #[test]
    fn test_store_failure_statuses() {
        let cases = [
            (StoreError::InvalidId, StatusCode::BAD_REQUEST, "id_required"),
            (StoreError::NotFound("x".into()), StatusCode::NOT_FOUND, "not_found"),
            (StoreError::AlreadyExists("x".into()), StatusCode::CONFLICT, "already_exists"),
            (
                StoreError::Protected("default".into()),
                StatusCode::FORBIDDEN,
                "cannot_delete_default",
            ),
            (
                StoreError::Import(ImportError::NoPagesFound),
                StatusCode::BAD_REQUEST,
                "no_pages_found",
            ),
            (
                StoreError::Io(anyhow::anyhow!("disk full")),
                StatusCode::INTERNAL_SERVER_ERROR,
                "io_error",
            ),
        ];

        for (err, status, code) in cases {
            let (got_status, Json(body)) = store_failure(err);
            assert_eq!(got_status, status);
            assert_eq!(body.error, code);
            assert!(body.details.is_some());
        }
    }
}
