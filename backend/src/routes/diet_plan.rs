//! Diet plan API routes

use crate::error::ApiError;
use crate::services::TrackerService;
use crate::state::AppState;
use axum::{extract::State, routing::get, Json, Router};
use fitjourney_shared::diet_plan::DietPlan;
use tracing::debug;

/// Create diet plan routes
pub fn diet_plan_routes() -> Router<AppState> {
    Router::new().route("/", get(get_diet_plan).post(regenerate_diet_plan))
}

/// GET /api/v1/diet-plan - The cached plan, generating one if none fits
///
/// A cached plan belonging to a different profile id is replaced.
async fn get_diet_plan(State(state): State<AppState>) -> Result<Json<DietPlan>, ApiError> {
    let profile = TrackerService::require_profile(state.repo()).await?;

    if let Some(plan) = state.repo().load_diet_plan().await? {
        if plan.user_id == profile.id {
            debug!(plan_id = %plan.id, "Serving cached diet plan");
            return Ok(Json(plan));
        }
    }

    let plan = state.diet_plans.generate(&profile, state.now()).await;
    state.repo().save_diet_plan(&plan).await?;
    Ok(Json(plan))
}

/// POST /api/v1/diet-plan - Generate a fresh plan and replace the cached one
async fn regenerate_diet_plan(State(state): State<AppState>) -> Result<Json<DietPlan>, ApiError> {
    let profile = TrackerService::require_profile(state.repo()).await?;
    let plan = state.diet_plans.generate(&profile, state.now()).await;
    state.repo().save_diet_plan(&plan).await?;
    Ok(Json(plan))
}
