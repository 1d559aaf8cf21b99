//! Web API module for keycodec.
//!
//! This module provides the HTTP interface used by the browser frontend
//! to list layouts, add new ones, and encode or decode text.
//!
//! # Endpoints
//!
//! - `GET /health` - Health check
//! - `GET /layouts` - List layouts (key and name) in insertion order
//! - `GET /layouts/{key}` - Get one layout with its key grids
//! - `POST /encode` - Encode text (form: `text_to_encode`, `layout_name`)
//! - `POST /decode` - Decode text (form: `text_to_decode`, `layout_name`)
//! - `POST /add_layout` - Add a layout (JSON body)
//! - `POST /switch_layout` - Check a layout exists and warm its mapping (form: `layout_name`)

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{
        rejection::{FormRejection, JsonRejection},
        Path, State,
    },
    http::StatusCode,
    routing::{get, post},
    Form, Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::config::Config;
use crate::constants::APP_NAME;
use crate::models::{LayoutSummary, RowGrid};
use crate::services::{CodecError, JsonFileStore, LayoutRegistry, RegistryError};

// ============================================================================
// Application State
// ============================================================================

/// Shared application state for the web API.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    config: Arc<Config>,
    /// Layout registry shared by all requests
    registry: Arc<LayoutRegistry>,
}

impl AppState {
    /// Creates a new application state around an existing registry.
    #[must_use]
    pub fn new(config: Config, registry: LayoutRegistry) -> Self {
        Self {
            config: Arc::new(config),
            registry: Arc::new(registry),
        }
    }

    /// Creates the state with a registry backed by the configured layouts file.
    pub fn from_config(config: Config) -> anyhow::Result<Self> {
        let store = Box::new(JsonFileStore::new(config.layouts_file()?));
        let registry = if config.storage.seed_builtin {
            LayoutRegistry::with_builtin_layouts(store)?
        } else {
            LayoutRegistry::new(store)?
        };
        Ok(Self::new(config, registry))
    }

    /// Returns the layout registry.
    #[must_use]
    pub fn registry(&self) -> &LayoutRegistry {
        &self.registry
    }

    /// Resolves the layout key for a request, falling back to the default.
    fn layout_key<'a>(&'a self, requested: Option<&'a str>) -> &'a str {
        requested
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .unwrap_or(&self.config.general.default_layout)
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
    /// Layout summaries in insertion order.
    pub layouts: Vec<LayoutSummary>,
}

/// Full layout response.
#[derive(Debug, Serialize)]
pub struct LayoutDetailResponse {
    /// Layout key.
    pub key: String,
    /// Display name.
    pub name: String,
    /// When the layout was added.
    pub created: DateTime<Utc>,
    /// SHA-256 fingerprint of the key grids.
    pub fingerprint: String,
    /// Unshifted key grid.
    pub lowercase: RowGrid,
    /// Shifted key grid.
    pub uppercase: RowGrid,
}

/// Encode form fields.
#[derive(Debug, Deserialize)]
pub struct EncodeForm {
    /// Plain text to encode.
    pub text_to_encode: Option<String>,
    /// Layout key (defaults to the configured layout).
    pub layout_name: Option<String>,
}

/// Decode form fields.
#[derive(Debug, Deserialize)]
pub struct DecodeForm {
    /// Encoded text to decode.
    pub text_to_decode: Option<String>,
    /// Layout key (defaults to the configured layout).
    pub layout_name: Option<String>,
}

/// Switch layout form fields.
#[derive(Debug, Deserialize)]
pub struct SwitchLayoutForm {
    /// Layout key.
    pub layout_name: Option<String>,
}

/// Encode response.
#[derive(Debug, Serialize)]
pub struct EncodeResponse {
    /// Space-separated tokens.
    pub encoded_text: String,
}

/// Decode response.
#[derive(Debug, Serialize)]
pub struct DecodeResponse {
    /// Decoded plain text.
    pub decoded_text: String,
}

/// Add layout request body.
///
/// Every field defaults to empty so a missing field is reported by the
/// registry as `missing_field` rather than rejected by the extractor.
#[derive(Debug, Deserialize)]
pub struct AddLayoutRequest {
    /// New layout key.
    #[serde(default)]
    pub layout_key: String,
    /// Display name.
    #[serde(default)]
    pub layout_name: String,
    /// Unshifted key grid (empty string = spacer).
    #[serde(default)]
    pub layout_lowercase: RowGrid,
    /// Shifted key grid, same shape as the lowercase grid.
    #[serde(default)]
    pub layout_uppercase: RowGrid,
}

/// Success message response.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    /// Human-readable message.
    pub message: String,
}

/// API error response.
#[derive(Debug, Serialize)]
pub struct ApiError {
    /// Error message.
    pub error: String,
    /// Machine-readable error kind.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl ApiError {
    fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            kind: None,
        }
    }

    fn with_kind(error: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            kind: Some(kind.into()),
        }
    }
}

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ApiError>)>;

// ============================================================================
// Error Mapping
// ============================================================================

/// HTTP status for a registry failure.
const fn registry_status(error: &RegistryError) -> StatusCode {
    match error {
        RegistryError::NotFound(_) => StatusCode::NOT_FOUND,
        RegistryError::DuplicateKey(_) => StatusCode::CONFLICT,
        RegistryError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        RegistryError::MissingField(_)
        | RegistryError::InvalidKey(_)
        | RegistryError::InvalidLayout(_) => StatusCode::BAD_REQUEST,
    }
}

/// HTTP status for a transcoding request failure.
const fn codec_status(error: &CodecError) -> StatusCode {
    match error {
        CodecError::Registry(e) => registry_status(e),
        CodecError::Transcode(_) => StatusCode::BAD_REQUEST,
    }
}

fn registry_error(error: &RegistryError) -> (StatusCode, Json<ApiError>) {
    (
        registry_status(error),
        Json(ApiError::with_kind(error.to_string(), error.kind())),
    )
}

fn codec_error(error: &CodecError) -> (StatusCode, Json<ApiError>) {
    (
        codec_status(error),
        Json(ApiError::with_kind(error.to_string(), error.kind())),
    )
}

fn bad_request(message: impl Into<String>) -> (StatusCode, Json<ApiError>) {
    (StatusCode::BAD_REQUEST, Json(ApiError::new(message)))
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /health - Health check.
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// GET /layouts - List layouts for the selector.
async fn list_layouts(State(state): State<AppState>) -> Json<LayoutListResponse> {
    Json(LayoutListResponse {
        layouts: state.registry.list(),
    })
}

/// GET /layouts/{key} - Get one layout.
async fn get_layout(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> ApiResult<LayoutDetailResponse> {
    let layout = state.registry.get(&key).map_err(|e| registry_error(&e))?;

    Ok(Json(LayoutDetailResponse {
        key: layout.key.clone(),
        name: layout.name.clone(),
        created: layout.created,
        fingerprint: layout.fingerprint(),
        lowercase: layout.lowercase.clone(),
        uppercase: layout.uppercase.clone(),
    }))
}

/// POST /encode - Encode text with a layout.
async fn encode_text(
    State(state): State<AppState>,
    form: Result<Form<EncodeForm>, FormRejection>,
) -> ApiResult<EncodeResponse> {
    let Form(form) = form.map_err(|e| bad_request(e.body_text()))?;

    let text = form
        .text_to_encode
        .filter(|text| !text.is_empty())
        .ok_or_else(|| bad_request("No text provided for encoding"))?;
    let key = state.layout_key(form.layout_name.as_deref());

    match state.registry.encode(key, &text) {
        Ok(encoded_text) => Ok(Json(EncodeResponse { encoded_text })),
        Err(e) => {
            warn!("Encoding with '{}' failed: {}", key, e);
            Err(codec_error(&e))
        }
    }
}

/// POST /decode - Decode text with a layout.
async fn decode_text(
    State(state): State<AppState>,
    form: Result<Form<DecodeForm>, FormRejection>,
) -> ApiResult<DecodeResponse> {
    let Form(form) = form.map_err(|e| bad_request(e.body_text()))?;

    let text = form
        .text_to_decode
        .filter(|text| !text.trim().is_empty())
        .ok_or_else(|| bad_request("No text provided for decoding"))?;
    let key = state.layout_key(form.layout_name.as_deref());

    match state.registry.decode(key, &text) {
        Ok(decoded_text) => Ok(Json(DecodeResponse { decoded_text })),
        Err(e) => {
            warn!("Decoding with '{}' failed: {}", key, e);
            Err(codec_error(&e))
        }
    }
}

/// POST /add_layout - Add a new layout.
async fn add_layout(
    State(state): State<AppState>,
    body: Result<Json<AddLayoutRequest>, JsonRejection>,
) -> ApiResult<MessageResponse> {
    let Json(request) = body.map_err(|e| bad_request(e.body_text()))?;

    let layout = state
        .registry
        .add(
            &request.layout_key,
            &request.layout_name,
            request.layout_lowercase,
            request.layout_uppercase,
        )
        .map_err(|e| {
            warn!("Rejected layout '{}': {}", request.layout_key, e);
            registry_error(&e)
        })?;

    Ok(Json(MessageResponse {
        message: format!("Layout '{}' added successfully", layout.name),
    }))
}

/// POST /switch_layout - Confirm a layout is usable.
async fn switch_layout(
    State(state): State<AppState>,
    form: Result<Form<SwitchLayoutForm>, FormRejection>,
) -> ApiResult<MessageResponse> {
    let Form(form) = form.map_err(|e| bad_request(e.body_text()))?;

    let key = form
        .layout_name
        .as_deref()
        .map(str::trim)
        .filter(|key| !key.is_empty())
        .ok_or_else(|| registry_error(&RegistryError::MissingField("layout_name")))?;

    let layout = state.registry.get(key).map_err(|e| registry_error(&e))?;
    state.registry.mapping(key).map_err(|e| registry_error(&e))?;

    Ok(Json(MessageResponse {
        message: format!("Switched to layout '{}'", layout.name),
    }))
}

// ============================================================================
// Router Setup
// ============================================================================

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    // NOTE: Permissive CORS; the server is meant to run next to its frontend
    // on a trusted host. Restrict origins before exposing it publicly.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health check
        .route("/health", get(health_check))
        // Layout endpoints
        .route("/layouts", get(list_layouts))
        .route("/layouts/{key}", get(get_layout))
        .route("/add_layout", post(add_layout))
        .route("/switch_layout", post(switch_layout))
        // Transcoding endpoints
        .route("/encode", post(encode_text))
        .route("/decode", post(decode_text))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Runs the web server.
///
/// # Errors
///
/// Returns an error if the registry cannot be loaded or the server fails to start.
pub async fn run_server(config: Config, addr: SocketAddr) -> anyhow::Result<()> {
    let state = AppState::from_config(config)?;
    info!("Loaded {} layouts", state.registry.len());

    let app = create_router(state);

    info!("Starting {} web server on {}", APP_NAME, addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
