//! API request and response types

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::metrics::{DashboardMetrics, DisplayWeight};
use crate::models::WeightEntry;
use crate::units::{UnitSystem, WeightUnit};

/// API error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error detail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

/// Query for the onboarding questionnaire
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OnboardingStepsQuery {
    #[serde(default)]
    pub unit_system: Option<UnitSystem>,
}

// ============================================================================
// Weight Log Types
// ============================================================================

/// Weight log entry request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LogWeightRequest {
    /// Weight value in `unit`
    pub weight: f64,
    /// Defaults to the profile's preferred unit
    #[serde(default)]
    pub unit: Option<WeightUnit>,
    /// Defaults to today
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    #[validate(length(max = 500))]
    pub notes: Option<String>,
}

/// A logged entry in the profile's display unit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightEntryResponse {
    pub id: Uuid,
    pub date: NaiveDate,
    /// Weight in the display unit
    pub weight: f64,
    pub unit: WeightUnit,
    /// Weight in kg (always included for consistency)
    pub weight_kg: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl WeightEntryResponse {
    pub fn from_entry(entry: &WeightEntry, unit: WeightUnit) -> Self {
        let display = DisplayWeight::from_kg(entry.weight, unit);
        Self {
            id: entry.id,
            date: entry.date,
            weight: display.value,
            unit: display.unit,
            weight_kg: entry.weight,
            notes: entry.notes.clone(),
            created_at: entry.created_at,
        }
    }
}

/// Weight history, ascending by date
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightHistoryResponse {
    pub entries: Vec<WeightEntryResponse>,
    pub unit: WeightUnit,
    pub count: usize,
}

// ============================================================================
// Dashboard Types
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardResponse {
    /// Calendar date the streak was computed against
    pub today: NaiveDate,
    #[serde(flatten)]
    pub metrics: DashboardMetrics,
}
