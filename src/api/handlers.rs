use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderName},
    response::{Html, IntoResponse},
    Extension, Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::io::ErrorKind;
use std::path::Path as FsPath;

use crate::{
    error::{AppError, AppResult},
    middleware::request_id::RequestId,
    models::{StreamDescriptor, TrackSummary},
    services::gateway,
};

use super::AppState;

const LANDING_PAGE: &str = "index.html";
const SERVICE_WORKER: &str = "service-worker.js";
const MANIFEST: &str = "manifest.json";

const SERVICE_WORKER_ALLOWED: HeaderName = HeaderName::from_static("service-worker-allowed");

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: Option<String>,
}

/// Landing page
pub async fn home(State(state): State<AppState>) -> AppResult<Html<String>> {
    let path = state.config.template_dir.join(LANDING_PAGE);
    let bytes = read_file(&path, LANDING_PAGE).await?;
    Ok(Html(String::from_utf8_lossy(&bytes).into_owned()))
}

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "extractor": state.extractor.name(),
    }))
}

/// Keyword search, `GET /search?q=...`
pub async fn search(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<Vec<TrackSummary>>> {
    let query = params.q.unwrap_or_default();

    tracing::info!(request_id = %request_id, query = %query, "Searching for query");

    let tracks = gateway::search_tracks(state.extractor.clone(), &state.config, &query).await?;
    Ok(Json(tracks))
}

/// Direct media URL lookup, `GET /stream/:video_id`
pub async fn stream(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Path(video_id): Path<String>,
) -> AppResult<Json<StreamDescriptor>> {
    tracing::info!(request_id = %request_id, video_id = %video_id, "Streaming video ID");

    let descriptor =
        gateway::resolve_stream(state.extractor.clone(), &state.config, &video_id).await?;
    Ok(Json(descriptor))
}

/// Service worker script, allowed to control the whole origin
pub async fn service_worker(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let bytes = read_file(&state.config.static_dir.join(SERVICE_WORKER), SERVICE_WORKER).await?;
    Ok((
        [
            (header::CONTENT_TYPE, "application/javascript"),
            (SERVICE_WORKER_ALLOWED, "/"),
        ],
        bytes,
    ))
}

/// Web app manifest
pub async fn manifest(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let bytes = read_file(&state.config.static_dir.join(MANIFEST), MANIFEST).await?;
    Ok(([(header::CONTENT_TYPE, "application/json")], bytes))
}

async fn read_file(path: &FsPath, name: &str) -> AppResult<Vec<u8>> {
    match tokio::fs::read(path).await {
        Ok(bytes) => Ok(bytes),
        Err(e) if e.kind() == ErrorKind::NotFound => Err(AppError::NotFound(name.to_string())),
        Err(e) => {
            tracing::error!(path = %path.display(), error = %e, "Failed to read file");
            Err(AppError::Internal(e.to_string()))
        }
    }
}
