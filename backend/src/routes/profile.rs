//! User profile API routes

use crate::error::ApiError;
use crate::services::TrackerService;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use fitjourney_shared::onboarding::OnboardingAnswers;
use fitjourney_shared::UserProfile;

/// Create profile routes
pub fn profile_routes() -> Router<AppState> {
    Router::new().route("/", get(get_profile).put(save_profile))
}

/// GET /api/v1/profile - Get the stored profile
async fn get_profile(State(state): State<AppState>) -> Result<Json<UserProfile>, ApiError> {
    let profile = TrackerService::require_profile(state.repo()).await?;
    Ok(Json(profile))
}

/// PUT /api/v1/profile - Create or replace the profile from onboarding answers
///
/// Returns 201 when the profile is new, 200 when an existing one was replaced.
async fn save_profile(
    State(state): State<AppState>,
    Json(answers): Json<OnboardingAnswers>,
) -> Result<(StatusCode, Json<UserProfile>), ApiError> {
    let saved = TrackerService::save_profile(state.repo(), answers, state.now()).await?;
    let status = if saved.created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(saved.profile)))
}

/// DELETE /api/v1/data - Remove the profile, the weight log and the cached plan
pub async fn clear_data(State(state): State<AppState>) -> Result<StatusCode, ApiError> {
    TrackerService::clear_all(state.repo()).await?;
    Ok(StatusCode::NO_CONTENT)
}
