//! API handlers for the server.

use crate::session::{CellChange, ChangeReport, Session};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use life_core::Coord;
use life_world::{GridSnapshot, Pattern};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

#[derive(Clone)]
pub struct AppState {
    pub session: Arc<Session>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/board", get(get_board))
        .route("/api/cells/:row/:col", get(get_cell))
        .route("/api/patterns", get(list_patterns))
        .route("/api/toggle", post(toggle))
        .route("/api/step", post(step))
        .route("/api/reset", post(reset))
        .route("/api/randomize", post(randomize))
        .route("/api/pattern", post(load_pattern))
        .route("/api/playback", get(playback))
        .route("/api/play", post(play))
        .route("/api/pause", post(pause))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(Serialize)]
pub struct HealthResponse {
    status: String,
    version: String,
}

/// Health check endpoint
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Full list of live cells
pub async fn get_board(State(state): State<AppState>) -> Json<GridSnapshot> {
    Json(state.session.snapshot())
}

pub async fn get_cell(
    State(state): State<AppState>,
    Path((row, col)): Path<(i32, i32)>,
) -> Json<CellChange> {
    Json(state.session.state_of(row, col))
}

pub async fn list_patterns() -> Json<Vec<&'static str>> {
    Json(Pattern::preset_names().collect())
}

#[derive(Deserialize)]
pub struct ToggleRequest {
    row: i32,
    col: i32,
}

pub async fn toggle(
    State(state): State<AppState>,
    Json(req): Json<ToggleRequest>,
) -> Json<ChangeReport> {
    Json(state.session.toggle(req.row, req.col))
}

pub async fn step(State(state): State<AppState>) -> Json<ChangeReport> {
    Json(state.session.step())
}

pub async fn reset(State(state): State<AppState>) -> Json<ChangeReport> {
    info!("Board reset requested");
    Json(state.session.reset())
}

#[derive(Deserialize)]
pub struct RandomizeRequest {
    seed: Option<u64>,
    density: Option<f64>,
}

pub async fn randomize(
    State(state): State<AppState>,
    Json(req): Json<RandomizeRequest>,
) -> Result<Json<ChangeReport>, ApiError> {
    let report = state.session.randomize(req.seed, req.density)?;
    Ok(Json(report))
}

#[derive(Deserialize)]
pub struct PatternRequest {
    name: String,
    #[serde(default)]
    row: i32,
    #[serde(default)]
    col: i32,
}

pub async fn load_pattern(
    State(state): State<AppState>,
    Json(req): Json<PatternRequest>,
) -> Result<Json<ChangeReport>, ApiError> {
    let report = state
        .session
        .load_pattern(&req.name, Coord::new(req.row, req.col))?;
    Ok(Json(report))
}

#[derive(Serialize)]
pub struct PlaybackResponse {
    playing: bool,
}

pub async fn playback(State(state): State<AppState>) -> Json<PlaybackResponse> {
    Json(PlaybackResponse {
        playing: state.session.is_playing(),
    })
}

pub async fn play(State(state): State<AppState>) -> Json<PlaybackResponse> {
    Json(PlaybackResponse {
        playing: state.session.set_playing(true),
    })
}

pub async fn pause(State(state): State<AppState>) -> Json<PlaybackResponse> {
    Json(PlaybackResponse {
        playing: state.session.set_playing(false),
    })
}

// Error handling
pub enum ApiError {
    BadRequest(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
        };

        (status, message).into_response()
    }
}

impl From<life_core::Error> for ApiError {
    fn from(err: life_core::Error) -> Self {
        // Handlers only reach validation failures: bad density, unknown preset
        warn!("Rejected request: {}", err);
        ApiError::BadRequest(err.to_string())
    }
}
