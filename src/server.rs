//! axum routes over a [`PlayerEngine`].

use axum::{
    extract::{Json, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde::Deserialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::api::{parse_page, DataResponse, ErrorResponse, HealthResponse};
use crate::core::{Match, PlayerProfile, PlayerStats};
use crate::engine::PlayerEngine;
use crate::error::EngineError;

#[derive(Clone)]
struct AppState {
    engine: Arc<PlayerEngine>,
}

#[derive(Debug, Deserialize)]
struct PageQuery {
    page: Option<String>,
}

/// Build the router: `/health`, `/player/:id`, `/matches/:id?page=`, `/stats/:id`
pub fn router(engine: Arc<PlayerEngine>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/player/:player_id", get(profile_handler))
        .route("/matches/:player_id", get(matches_handler))
        .route("/stats/:player_id", get(stats_handler))
        .layer(CorsLayer::permissive())
        .with_state(AppState { engine })
}

async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: crate::VERSION.to_string(),
        mode: if state.engine.is_mock() { "mock" } else { "live" }.to_string(),
    })
}

async fn profile_handler(
    State(state): State<AppState>,
    Path(player_id): Path<String>,
) -> Result<Json<DataResponse<PlayerProfile>>, AppError> {
    let result = state.engine.profile(&player_id).await?;

    tracing::info!("profile {} (cached: {}, {:.1}ms)", player_id, result.cached, result.latency_ms);

    Ok(Json(DataResponse::new(result.data, result.cached)))
}

async fn matches_handler(
    State(state): State<AppState>,
    Path(player_id): Path<String>,
    Query(query): Query<PageQuery>,
) -> Result<Json<DataResponse<Vec<Match>>>, AppError> {
    let page = parse_page(query.page.as_deref()).map_err(AppError::BadRequest)?;

    let result = state.engine.matches(&player_id, page).await?;

    tracing::info!(
        "matches {} page {} → {} (cached: {}, {:.1}ms)",
        player_id,
        page,
        result.data.len(),
        result.cached,
        result.latency_ms
    );

    Ok(Json(DataResponse::new(result.data, result.cached).with_page(page)))
}

async fn stats_handler(
    State(state): State<AppState>,
    Path(player_id): Path<String>,
) -> Result<Json<DataResponse<PlayerStats>>, AppError> {
    let result = state.engine.stats(&player_id).await?;

    tracing::info!("stats {} (cached: {}, {:.1}ms)", player_id, result.cached, result.latency_ms);

    Ok(Json(DataResponse::new(result.data, result.cached)))
}

// Error handling
enum AppError {
    BadRequest(String),
    Engine(EngineError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(message) => {
                tracing::warn!("Bad request: {}", message);
                (StatusCode::BAD_REQUEST, message)
            }
            AppError::Engine(e) => {
                if e.is_upstream() {
                    tracing::error!("Render service failure (status {:?}): {}", e.upstream_status(), e);
                } else {
                    tracing::error!("Engine error: {}", e);
                }
                (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
            }
        };

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}

impl From<EngineError> for AppError {
    fn from(err: EngineError) -> Self {
        Self::Engine(err)
    }
}
