//! Weight log API routes

use crate::error::ApiError;
use crate::services::TrackerService;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};
use fitjourney_shared::types::{LogWeightRequest, WeightEntryResponse, WeightHistoryResponse};
use uuid::Uuid;

/// Create weight routes
pub fn weight_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(get_weight_history).post(log_weight))
        .route("/:id", delete(delete_weight))
}

/// POST /api/v1/weight - Log a weight entry
///
/// Accepts weight in kg or lbs; without a unit the profile's preferred unit
/// is assumed. Stored in kg, returned in the preferred unit.
async fn log_weight(
    State(state): State<AppState>,
    Json(req): Json<LogWeightRequest>,
) -> Result<(StatusCode, Json<WeightEntryResponse>), ApiError> {
    let entry = TrackerService::log_weight(state.repo(), req, state.local_now()).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

/// GET /api/v1/weight - All entries, oldest first
async fn get_weight_history(
    State(state): State<AppState>,
) -> Result<Json<WeightHistoryResponse>, ApiError> {
    Ok(Json(TrackerService::history(state.repo()).await?))
}

/// DELETE /api/v1/weight/:id
async fn delete_weight(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    TrackerService::delete_entry(state.repo(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}
