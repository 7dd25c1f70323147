//! Input validation functions
//!
//! The calculation core accepts any finite input; these checks run at the
//! API boundary before data reaches the store. Request DTOs additionally use
//! the `validator` derive for simple length and range rules.

use chrono::NaiveDate;
use thiserror::Error;

use crate::onboarding::OnboardingAnswers;

pub const MIN_WEIGHT_KG: f64 = 20.0;
pub const MAX_WEIGHT_KG: f64 = 500.0;
pub const MIN_HEIGHT_CM: f64 = 50.0;
pub const MAX_HEIGHT_CM: f64 = 300.0;
pub const MAX_AGE_YEARS: u32 = 150;
pub const MAX_NOTES_LENGTH: usize = 500;
pub const MAX_DAILY_MEALS: u8 = 8;

/// Validate weight value (in kg)
pub fn validate_weight(weight_kg: f64) -> Result<(), String> {
    if weight_kg.is_nan() || weight_kg.is_infinite() {
        return Err("Weight must be a valid number".to_string());
    }
    if weight_kg < MIN_WEIGHT_KG {
        return Err("Weight must be at least 20 kg".to_string());
    }
    if weight_kg > MAX_WEIGHT_KG {
        return Err("Weight must be at most 500 kg".to_string());
    }
    Ok(())
}

/// Validate height value (in cm)
/// Valid range: 50-300 cm (covers infants to tallest recorded humans)
pub fn validate_height_cm(height_cm: f64) -> Result<(), String> {
    if height_cm.is_nan() || height_cm.is_infinite() {
        return Err("Height must be a valid number".to_string());
    }
    if height_cm < MIN_HEIGHT_CM {
        return Err("Height must be at least 50 cm".to_string());
    }
    if height_cm > MAX_HEIGHT_CM {
        return Err("Height must be at most 300 cm".to_string());
    }
    Ok(())
}

/// Validate age in whole years
pub fn validate_age(age: u32) -> Result<(), String> {
    if age < 1 {
        return Err("Age must be at least 1 year".to_string());
    }
    if age > MAX_AGE_YEARS {
        return Err("Age cannot exceed 150 years".to_string());
    }
    Ok(())
}

/// Validate free-text notes on a weight entry
pub fn validate_notes(notes: &str) -> Result<(), String> {
    if notes.chars().count() > MAX_NOTES_LENGTH {
        return Err("Notes cannot exceed 500 characters".to_string());
    }
    Ok(())
}

/// Entries may be backdated but never dated after `today`
pub fn validate_entry_date(date: NaiveDate, today: NaiveDate) -> Result<(), String> {
    if date > today {
        return Err("Date cannot be in the future".to_string());
    }
    Ok(())
}

pub fn validate_daily_meals(meals: u8) -> Result<(), String> {
    if meals < 1 || meals > MAX_DAILY_MEALS {
        return Err("Daily meals must be between 1 and 8".to_string());
    }
    Ok(())
}

/// Check onboarding answers after converting them to canonical units
pub fn validate_answers(answers: &OnboardingAnswers) -> Result<(), ValidationError> {
    let weight_unit = answers.unit_system.weight_unit();
    let height_unit = answers.unit_system.height_unit();

    validate_age(answers.age).map_err(|m| ValidationError::new("age", &m))?;
    validate_height_cm(height_unit.to_cm(answers.height))
        .map_err(|m| ValidationError::new("height", &m))?;
    validate_weight(weight_unit.to_kg(answers.current_weight))
        .map_err(|m| ValidationError::new("current_weight", &m))?;
    validate_weight(weight_unit.to_kg(answers.target_weight))
        .map_err(|m| ValidationError::new("target_weight", &m))?;
    if let Some(meals) = answers.daily_meals {
        validate_daily_meals(meals).map_err(|m| ValidationError::new("daily_meals", &m))?;
    }
    Ok(())
}

// ============================================================================
// User-Friendly Field Labels
// ============================================================================

/// Map technical field names to user-friendly display labels
pub fn get_field_display_label(field_name: &str) -> &str {
    match field_name {
        "weight" | "current_weight" => "Current Weight",
        "target_weight" => "Target Weight",
        "height" => "Height",
        "age" => "Age",
        "notes" => "Notes",
        "date" => "Date",
        "daily_meals" => "Daily Meals",
        "unit" => "Weight Unit",
        "unit_system" => "Unit System",
        _ => field_name,
    }
}

/// Validation error with field context
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{display_label}: {message}")]
pub struct ValidationError {
    pub field: String,
    pub message: String,
    pub display_label: String,
}

impl ValidationError {
    pub fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
            display_label: get_field_display_label(field).to_string(),
        }
    }

    /// Format as user-friendly error message
    pub fn user_message(&self) -> String {
        format!("{}: {}", self.display_label, self.message)
    }
}
