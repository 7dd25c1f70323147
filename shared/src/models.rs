//! Data models for the FitJourney application

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;

use crate::units::UnitSystem;

/// Gender as collected during onboarding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
        }
    }
}

/// Activity level, mapped to a fixed TDEE multiplier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum ActivityLevel {
    /// Little or no exercise
    Sedentary,
    /// Light exercise 1-3 days/week
    Light,
    /// Moderate exercise 3-5 days/week
    Moderate,
    /// Hard exercise 6-7 days/week
    Active,
}

impl ActivityLevel {
    /// All levels, least to most active
    pub const ALL: [ActivityLevel; 4] = [
        ActivityLevel::Sedentary,
        ActivityLevel::Light,
        ActivityLevel::Moderate,
        ActivityLevel::Active,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "sedentary",
            ActivityLevel::Light => "light",
            ActivityLevel::Moderate => "moderate",
            ActivityLevel::Active => "active",
        }
    }

    /// Get the activity multiplier for TDEE calculation
    pub fn multiplier(&self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::Light => 1.375,
            ActivityLevel::Moderate => 1.55,
            ActivityLevel::Active => 1.725,
        }
    }

    /// Get a human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "Sedentary (little/no exercise)",
            ActivityLevel::Light => "Light (light exercise 1-3 days/week)",
            ActivityLevel::Moderate => "Moderate (moderate exercise 3-5 days/week)",
            ActivityLevel::Active => "Active (hard exercise 6-7 days/week)",
        }
    }
}

/// Weight goal direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalType {
    Lose,
    Maintain,
    Gain,
}

impl GoalType {
    pub fn as_str(&self) -> &'static str {
        match self {
            GoalType::Lose => "lose",
            GoalType::Maintain => "maintain",
            GoalType::Gain => "gain",
        }
    }
}

/// User profile created at the end of onboarding.
///
/// Weights are kilograms and height is centimeters regardless of
/// `unit_system`. `current_weight` is the baseline at creation time; it is
/// not updated when entries are logged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: Uuid,
    pub gender: Gender,
    pub age: u32,
    /// Height in centimeters
    pub height: f64,
    /// Baseline weight in kilograms
    pub current_weight: f64,
    /// Target weight in kilograms
    pub target_weight: f64,
    pub activity_level: ActivityLevel,
    pub goal_type: GoalType,
    pub unit_system: UnitSystem,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diet_preference: Option<String>,
    #[serde(default)]
    pub allergies: BTreeSet<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub daily_meals: Option<u8>,
}

/// A single logged weight measurement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightEntry {
    pub id: Uuid,
    /// Calendar date chosen by the user, may be backdated
    pub date: NaiveDate,
    /// Weight in kilograms
    pub weight: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl WeightEntry {
    /// Create a new entry with a fresh id
    pub fn new(date: NaiveDate, weight_kg: f64, notes: Option<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            weight: weight_kg,
            notes,
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_profile_serde_uses_lowercase_enums() {
        let profile = UserProfile {
            id: Uuid::nil(),
            gender: Gender::Other,
            age: 28,
            height: 165.0,
            current_weight: 70.0,
            target_weight: 65.0,
            activity_level: ActivityLevel::Moderate,
            goal_type: GoalType::Lose,
            unit_system: UnitSystem::Imperial,
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            diet_preference: None,
            allergies: BTreeSet::new(),
            daily_meals: None,
        };

        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["gender"], "other");
        assert_eq!(json["activity_level"], "moderate");
        assert_eq!(json["goal_type"], "lose");
        assert_eq!(json["unit_system"], "imperial");
        assert!(json.get("diet_preference").is_none());

        let back: UserProfile = serde_json::from_value(json).unwrap();
        assert_eq!(back, profile);
    }

    #[test]
    fn test_entry_without_notes_deserializes() {
        let json = r#"{
            "id": "00000000-0000-0000-0000-000000000000",
            "date": "2024-03-01",
            "weight": 80.5,
            "created_at": "2024-03-01T08:00:00Z"
        }"#;
        let entry: WeightEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert!(entry.notes.is_none());
    }

    #[test]
    fn test_activity_levels_ordered() {
        let multipliers: Vec<f64> = ActivityLevel::ALL.iter().map(|l| l.multiplier()).collect();
        assert!(multipliers.windows(2).all(|w| w[0] < w[1]));
    }
}
