//! Dashboard route

use crate::error::ApiError;
use crate::services::TrackerService;
use crate::state::AppState;
use axum::{extract::State, Json};
use fitjourney_shared::types::DashboardResponse;

/// GET /api/v1/dashboard - Calories, progress, streak and latest weight
pub async fn get_dashboard(
    State(state): State<AppState>,
) -> Result<Json<DashboardResponse>, ApiError> {
    let dashboard = TrackerService::dashboard(state.repo(), state.local_now()).await?;
    Ok(Json(dashboard))
}
