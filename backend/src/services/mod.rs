//! Business logic services
//!
//! Services encapsulate business logic and coordinate between
//! repositories and external systems.

pub mod diet_plan;
pub mod tracker;

pub use diet_plan::{DietPlanGenerator, DietPlanService, GeminiClient};
pub use tracker::TrackerService;
