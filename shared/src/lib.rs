//! FitJourney Shared Library
//!
//! The pure calculation core (units, energy, progress, streak and the
//! dashboard façade) plus the data model, onboarding and diet-plan models,
//! validation and API types shared by the backend and WASM modules.

pub mod diet_plan;
pub mod errors;
pub mod health_metrics;
pub mod metrics;
pub mod models;
pub mod onboarding;
pub mod progress;
pub mod streak;
pub mod types;
pub mod units;
pub mod validation;

// Re-export commonly used items
pub use errors::*;
pub use health_metrics::*;
pub use metrics::{DashboardMetrics, DisplayWeight};
pub use models::{ActivityLevel, Gender, GoalType, UserProfile, WeightEntry};
pub use progress::{calculate_weekly_progress, WeeklyProgress};
pub use streak::calculate_streak;
pub use types::*;

// Export units module items (canonical source for unit types)
pub use units::*;
