//! Onboarding questionnaire routes

use crate::state::AppState;
use axum::{extract::Query, routing::get, Json, Router};
use fitjourney_shared::onboarding::{onboarding_steps, OnboardingStep};
use fitjourney_shared::types::OnboardingStepsQuery;

/// Create onboarding routes
pub fn onboarding_routes() -> Router<AppState> {
    Router::new().route("/steps", get(get_steps))
}

/// GET /api/v1/onboarding/steps - The questionnaire, phrased for a unit system
///
/// Defaults to metric when no unit system is given.
async fn get_steps(Query(query): Query<OnboardingStepsQuery>) -> Json<Vec<OnboardingStep>> {
    Json(onboarding_steps(query.unit_system.unwrap_or_default()))
}
