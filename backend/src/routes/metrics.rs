//! Prometheus exposition

use crate::state::AppState;
use axum::extract::State;

/// GET /metrics - Counters in Prometheus text format
pub async fn render_metrics(State(state): State<AppState>) -> String {
    state.metrics.render()
}
