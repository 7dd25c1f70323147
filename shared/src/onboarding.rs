//! Onboarding questionnaire
//!
//! The questionnaire is a fixed sequence of typed steps. Answers arrive in the
//! unit system the user picked and are converted to canonical metric when the
//! profile is built.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;
use validator::Validate;

use crate::models::{ActivityLevel, Gender, GoalType, UserProfile};
use crate::units::UnitSystem;

/// A selectable option in a choice step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepOption {
    pub value: String,
    pub label: String,
}

impl StepOption {
    fn new(value: &str, label: &str) -> Self {
        Self {
            value: value.to_string(),
            label: label.to_string(),
        }
    }
}

/// Profile field a step fills in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileField {
    Gender,
    Age,
    UnitSystem,
    Height,
    CurrentWeight,
    TargetWeight,
    ActivityLevel,
    GoalType,
    DietPreference,
    Allergies,
    DailyMeals,
}

/// One questionnaire step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OnboardingStep {
    SingleSelect {
        field: ProfileField,
        title: String,
        options: Vec<StepOption>,
    },
    NumericInput {
        field: ProfileField,
        title: String,
        placeholder: String,
        suffix: String,
    },
    MultiSelect {
        field: ProfileField,
        title: String,
        options: Vec<StepOption>,
    },
}

impl OnboardingStep {
    pub fn field(&self) -> ProfileField {
        match self {
            OnboardingStep::SingleSelect { field, .. }
            | OnboardingStep::NumericInput { field, .. }
            | OnboardingStep::MultiSelect { field, .. } => *field,
        }
    }
}

fn numeric(field: ProfileField, title: &str, placeholder: &str, suffix: &str) -> OnboardingStep {
    OnboardingStep::NumericInput {
        field,
        title: title.to_string(),
        placeholder: placeholder.to_string(),
        suffix: suffix.to_string(),
    }
}

/// The questionnaire, with numeric prompts phrased in `unit_system`
pub fn onboarding_steps(unit_system: UnitSystem) -> Vec<OnboardingStep> {
    let (height_placeholder, height_suffix) = match unit_system {
        UnitSystem::Metric => ("Height in cm", "cm"),
        UnitSystem::Imperial => ("Height in inches", "inches"),
    };
    let weight_suffix = unit_system.weight_unit().abbreviation();

    vec![
        OnboardingStep::SingleSelect {
            field: ProfileField::Gender,
            title: "What's your gender?".to_string(),
            options: vec![
                StepOption::new("male", "Male"),
                StepOption::new("female", "Female"),
                StepOption::new("other", "Other"),
            ],
        },
        numeric(ProfileField::Age, "How old are you?", "Enter your age", "years old"),
        OnboardingStep::SingleSelect {
            field: ProfileField::UnitSystem,
            title: "Choose your unit system".to_string(),
            options: vec![
                StepOption::new("metric", "Metric (kg, cm)"),
                StepOption::new("imperial", "Imperial (lbs, ft/in)"),
            ],
        },
        numeric(ProfileField::Height, "What's your height?", height_placeholder, height_suffix),
        numeric(
            ProfileField::CurrentWeight,
            "Current weight?",
            &format!("Weight in {}", weight_suffix),
            weight_suffix,
        ),
        numeric(
            ProfileField::TargetWeight,
            "Target weight?",
            &format!("Target in {}", weight_suffix),
            weight_suffix,
        ),
        OnboardingStep::SingleSelect {
            field: ProfileField::ActivityLevel,
            title: "Activity level?".to_string(),
            options: ActivityLevel::ALL
                .iter()
                .map(|level| StepOption::new(level.as_str(), level.description()))
                .collect(),
        },
        OnboardingStep::SingleSelect {
            field: ProfileField::GoalType,
            title: "What's your goal?".to_string(),
            options: vec![
                StepOption::new("lose", "Lose Weight"),
                StepOption::new("maintain", "Maintain Weight"),
                StepOption::new("gain", "Gain Muscle/Weight"),
            ],
        },
        OnboardingStep::SingleSelect {
            field: ProfileField::DietPreference,
            title: "Any diet preference?".to_string(),
            options: vec![
                StepOption::new("none", "No preference"),
                StepOption::new("vegetarian", "Vegetarian"),
                StepOption::new("vegan", "Vegan"),
                StepOption::new("pescatarian", "Pescatarian"),
                StepOption::new("keto", "Keto"),
            ],
        },
        OnboardingStep::MultiSelect {
            field: ProfileField::Allergies,
            title: "Any allergies or restrictions?".to_string(),
            options: vec![
                StepOption::new("gluten", "Gluten"),
                StepOption::new("dairy", "Dairy"),
                StepOption::new("nuts", "Nuts"),
                StepOption::new("eggs", "Eggs"),
                StepOption::new("soy", "Soy"),
                StepOption::new("shellfish", "Shellfish"),
            ],
        },
        OnboardingStep::SingleSelect {
            field: ProfileField::DailyMeals,
            title: "How many meals a day?".to_string(),
            options: vec![
                StepOption::new("3", "3 meals"),
                StepOption::new("4", "3 meals + 1 snack"),
                StepOption::new("5", "3 meals + 2 snacks"),
            ],
        },
    ]
}

/// Completed questionnaire answers, in the user's chosen unit system
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct OnboardingAnswers {
    pub gender: Gender,
    #[validate(range(min = 1, max = 150))]
    pub age: u32,
    #[serde(default)]
    pub unit_system: UnitSystem,
    /// Centimeters (metric) or inches (imperial)
    pub height: f64,
    /// Kilograms (metric) or pounds (imperial)
    pub current_weight: f64,
    /// Kilograms (metric) or pounds (imperial)
    pub target_weight: f64,
    pub activity_level: ActivityLevel,
    pub goal_type: GoalType,
    #[serde(default)]
    #[validate(length(max = 100))]
    pub diet_preference: Option<String>,
    #[serde(default)]
    pub allergies: BTreeSet<String>,
    #[serde(default)]
    #[validate(range(min = 1, max = 8))]
    pub daily_meals: Option<u8>,
}

impl OnboardingAnswers {
    /// Build a canonical-metric profile
    pub fn into_profile(self, id: Uuid, created_at: DateTime<Utc>) -> UserProfile {
        let weight_unit = self.unit_system.weight_unit();
        let height_unit = self.unit_system.height_unit();

        let diet_preference = self
            .diet_preference
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty() && p != "none");
        let allergies = self
            .allergies
            .into_iter()
            .map(|a| a.trim().to_string())
            .filter(|a| !a.is_empty())
            .collect();

        UserProfile {
            id,
            gender: self.gender,
            age: self.age,
            height: height_unit.to_cm(self.height),
            current_weight: weight_unit.to_kg(self.current_weight),
            target_weight: weight_unit.to_kg(self.target_weight),
            activity_level: self.activity_level,
            goal_type: self.goal_type,
            unit_system: self.unit_system,
            created_at,
            diet_preference,
            allergies,
            daily_meals: self.daily_meals,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answers(unit_system: UnitSystem, height: f64, current: f64, target: f64) -> OnboardingAnswers {
        OnboardingAnswers {
            gender: Gender::Female,
            age: 29,
            unit_system,
            height,
            current_weight: current,
            target_weight: target,
            activity_level: ActivityLevel::Moderate,
            goal_type: GoalType::Lose,
            diet_preference: Some("vegetarian".to_string()),
            allergies: ["nuts".to_string(), "  ".to_string()].into_iter().collect(),
            daily_meals: Some(4),
        }
    }

    #[test]
    fn test_metric_answers_pass_through() {
        let profile = answers(UnitSystem::Metric, 170.0, 72.0, 65.0).into_profile(Uuid::nil(), Utc::now());
        assert_eq!(profile.height, 170.0);
        assert_eq!(profile.current_weight, 72.0);
        assert_eq!(profile.target_weight, 65.0);
        assert_eq!(profile.allergies.len(), 1);
        assert_eq!(profile.diet_preference.as_deref(), Some("vegetarian"));
    }

    #[test]
    fn test_imperial_answers_convert_to_metric() {
        let profile = answers(UnitSystem::Imperial, 70.0, 220.462, 176.3696).into_profile(Uuid::nil(), Utc::now());
        assert!((profile.height - 177.8).abs() < 1e-9);
        assert!((profile.current_weight - 100.0).abs() < 1e-9);
        assert!((profile.target_weight - 80.0).abs() < 1e-9);
        assert_eq!(profile.unit_system, UnitSystem::Imperial);
    }

    #[test]
    fn test_none_diet_preference_dropped() {
        let mut a = answers(UnitSystem::Metric, 170.0, 72.0, 65.0);
        a.diet_preference = Some("none".to_string());
        assert!(a.into_profile(Uuid::nil(), Utc::now()).diet_preference.is_none());
    }

    #[test]
    fn test_step_order_and_kinds() {
        let steps = onboarding_steps(UnitSystem::Metric);
        let fields: Vec<ProfileField> = steps.iter().map(|s| s.field()).collect();
        assert_eq!(fields[0], ProfileField::Gender);
        assert_eq!(fields[2], ProfileField::UnitSystem);
        assert!(matches!(steps[1], OnboardingStep::NumericInput { .. }));
        assert!(steps
            .iter()
            .any(|s| matches!(s, OnboardingStep::MultiSelect { field: ProfileField::Allergies, .. })));
    }

    #[test]
    fn test_imperial_prompts() {
        let steps = onboarding_steps(UnitSystem::Imperial);
        let height = steps.iter().find(|s| s.field() == ProfileField::Height).unwrap();
        match height {
            OnboardingStep::NumericInput { suffix, .. } => assert_eq!(suffix, "inches"),
            other => panic!("unexpected step {:?}", other),
        }
        let weight = steps.iter().find(|s| s.field() == ProfileField::CurrentWeight).unwrap();
        match weight {
            OnboardingStep::NumericInput { suffix, .. } => assert_eq!(suffix, "lbs"),
            other => panic!("unexpected step {:?}", other),
        }
    }

    #[test]
    fn test_activity_options_use_wire_values() {
        let steps = onboarding_steps(UnitSystem::Metric);
        let activity = steps.iter().find(|s| s.field() == ProfileField::ActivityLevel).unwrap();
        match activity {
            OnboardingStep::SingleSelect { options, .. } => {
                let values: Vec<&str> = options.iter().map(|o| o.value.as_str()).collect();
                assert_eq!(values, vec!["sedentary", "light", "moderate", "active"]);
            }
            other => panic!("unexpected step {:?}", other),
        }
    }

    #[test]
    fn test_validate_rejects_zero_age() {
        let mut a = answers(UnitSystem::Metric, 170.0, 72.0, 65.0);
        a.age = 0;
        assert!(a.validate().is_err());
    }
}
