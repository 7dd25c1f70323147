//! Error types for the FitJourney application

use thiserror::Error;

/// Persistence collaborator errors
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Store backend error: {0}")]
    Backend(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Diet-plan generation errors. Never surfaced to users, the service swaps
/// in the fallback plan.
#[derive(Error, Debug)]
pub enum DietPlanError {
    #[error("Diet plan generation is not configured")]
    NotConfigured,

    #[error("Request failed: {0}")]
    Request(String),

    #[error("API request failed with status {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Response contained no generated text")]
    EmptyResponse,

    #[error("Invalid response format: no JSON object found")]
    MissingJson,

    #[error("Malformed plan: {0}")]
    Malformed(#[from] serde_json::Error),
}
