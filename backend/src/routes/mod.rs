//! Route definitions for the FitJourney API
//!
//! This module organizes all API routes and applies middleware.

use crate::state::AppState;
use axum::{
    http::{header, Method},
    routing::{delete, get},
    Router,
};
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

mod dashboard;
mod diet_plan;
mod health;
mod metrics;
mod onboarding;
mod profile;
mod weight;

pub use diet_plan::diet_plan_routes;
pub use onboarding::onboarding_routes;
pub use profile::profile_routes;
pub use weight::weight_routes;

/// Create the main application router with all middleware
///
/// The request timeout leaves room for a slow diet-plan generation call.
pub fn create_router(state: AppState) -> Router {
    let timeout = Duration::from_secs(state.config().diet_plan.timeout_secs + 30);

    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .route("/health/live", get(health::liveness_check))
        .route("/metrics", get(metrics::render_metrics))
        .nest("/api/v1", api_routes())
        // Apply middleware layers
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(timeout))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
                .allow_headers([header::CONTENT_TYPE]),
        )
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// API v1 routes
fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(|| async { "FitJourney API v1" }))
        .route("/dashboard", get(dashboard::get_dashboard))
        .route("/data", delete(profile::clear_data))
        .nest("/onboarding", onboarding::onboarding_routes())
        .nest("/profile", profile::profile_routes())
        .nest("/weight", weight::weight_routes())
        .nest("/diet-plan", diet_plan::diet_plan_routes())
}
