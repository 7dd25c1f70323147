//! Energy expenditure calculations
//!
//! BMR uses the Mifflin-St Jeor equation and TDEE scales it by the profile's
//! activity multiplier. Results are continuous; callers round for display.
//! There is no bounds checking, pathological profiles give pathological
//! numbers.

use crate::models::{Gender, UserProfile};

impl Gender {
    /// Constant term of the Mifflin-St Jeor equation for this gender.
    ///
    /// `Other` uses the female constant. Changing this changes BMR and TDEE
    /// for every profile that selected it.
    pub fn bmr_offset(&self) -> f64 {
        match self {
            Gender::Male => 5.0,
            Gender::Female | Gender::Other => -161.0,
        }
    }
}

/// Calculate Basal Metabolic Rate using Mifflin-St Jeor equation
///
/// Men: BMR = 10 × weight(kg) + 6.25 × height(cm) - 5 × age(y) + 5
/// Women: BMR = 10 × weight(kg) + 6.25 × height(cm) - 5 × age(y) - 161
pub fn calculate_bmr_mifflin(weight_kg: f64, height_cm: f64, age_years: u32, gender: Gender) -> f64 {
    10.0 * weight_kg + 6.25 * height_cm - 5.0 * age_years as f64 + gender.bmr_offset()
}

/// BMR for a profile, using its baseline weight (kcal/day)
pub fn calculate_bmr(profile: &UserProfile) -> f64 {
    calculate_bmr_mifflin(profile.current_weight, profile.height, profile.age, profile.gender)
}

/// Calculate Total Daily Energy Expenditure
///
/// TDEE = BMR × Activity Multiplier
pub fn calculate_tdee(profile: &UserProfile) -> f64 {
    calculate_bmr(profile) * profile.activity_level.multiplier()
}
