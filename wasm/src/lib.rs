//! FitJourney WASM Module
//!
//! Browser bindings over the shared calculation core, so the client shows
//! exactly the numbers the backend computes. Structured values cross the
//! boundary as JSON strings.

use chrono::DateTime;
use fitjourney_shared::onboarding::onboarding_steps;
use fitjourney_shared::{
    calculate_bmr, calculate_tdee, DashboardMetrics, HeightUnit, UnitSystem, UserProfile,
    WeightEntry, WeightUnit,
};
use wasm_bindgen::prelude::*;

/// Convert a weight between unit abbreviations ("kg", "lbs")
#[wasm_bindgen]
pub fn convert_weight(value: f64, from: &str, to: &str) -> Result<f64, JsValue> {
    convert_weight_inner(value, from, to).map_err(|e| JsValue::from_str(&e))
}

/// Convert a height between unit abbreviations ("cm", "ft", "in")
#[wasm_bindgen]
pub fn convert_height(value: f64, from: &str, to: &str) -> Result<f64, JsValue> {
    convert_height_inner(value, from, to).map_err(|e| JsValue::from_str(&e))
}

/// Basal metabolic rate for a profile given as JSON
#[wasm_bindgen]
pub fn calculate_bmr_json(profile_json: &str) -> Result<f64, JsValue> {
    let profile = parse_profile(profile_json).map_err(|e| JsValue::from_str(&e))?;
    Ok(calculate_bmr(&profile))
}

/// Total daily energy expenditure for a profile given as JSON
#[wasm_bindgen]
pub fn calculate_tdee_json(profile_json: &str) -> Result<f64, JsValue> {
    let profile = parse_profile(profile_json).map_err(|e| JsValue::from_str(&e))?;
    Ok(calculate_tdee(&profile))
}

/// Dashboard metrics as JSON. `now` is RFC 3339; its offset decides which
/// calendar day counts as today for the streak.
#[wasm_bindgen]
pub fn dashboard_json(profile_json: &str, entries_json: &str, now: &str) -> Result<String, JsValue> {
    dashboard_inner(profile_json, entries_json, now).map_err(|e| JsValue::from_str(&e))
}

/// Onboarding questionnaire as JSON for "metric" or "imperial"
#[wasm_bindgen]
pub fn onboarding_steps_json(unit_system: &str) -> Result<String, JsValue> {
    onboarding_steps_inner(unit_system).map_err(|e| JsValue::from_str(&e))
}

fn convert_weight_inner(value: f64, from: &str, to: &str) -> Result<f64, String> {
    let from: WeightUnit = from.parse()?;
    let to: WeightUnit = to.parse()?;
    Ok(fitjourney_shared::convert_weight(value, from, to))
}

fn convert_height_inner(value: f64, from: &str, to: &str) -> Result<f64, String> {
    let from: HeightUnit = from.parse()?;
    let to: HeightUnit = to.parse()?;
    Ok(fitjourney_shared::convert_height(value, from, to))
}

fn parse_profile(profile_json: &str) -> Result<UserProfile, String> {
    serde_json::from_str(profile_json).map_err(|e| format!("Invalid profile: {e}"))
}

fn dashboard_inner(profile_json: &str, entries_json: &str, now: &str) -> Result<String, String> {
    let profile = parse_profile(profile_json)?;
    let entries: Vec<WeightEntry> =
        serde_json::from_str(entries_json).map_err(|e| format!("Invalid entries: {e}"))?;
    let now = DateTime::parse_from_rfc3339(now).map_err(|e| format!("Invalid timestamp: {e}"))?;

    let metrics = DashboardMetrics::compute(&profile, &entries, &now);
    serde_json::to_string(&metrics).map_err(|e| e.to_string())
}

fn onboarding_steps_inner(unit_system: &str) -> Result<String, String> {
    let unit_system: UnitSystem = unit_system.parse()?;
    serde_json::to_string(&onboarding_steps(unit_system)).map_err(|e| e.to_string())
}


// Run with: wasm-pack test --node wasm
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn test_convert_weight_binding() {
        let lbs = convert_weight(70.0, "kg", "lbs").unwrap();
        assert!((lbs - 154.3234).abs() < 1e-9);
        assert!(convert_weight(70.0, "kg", "stone").is_err());
    }

    #[wasm_bindgen_test]
    fn test_dashboard_binding() {
        let profile = r#"{"id":"6f1c1c3e-2f4b-4f55-9d1a-0f0f2b6b3f11","gender":"male","age":30,"height":180.0,"current_weight":80.0,"target_weight":70.0,"activity_level":"sedentary","goal_type":"lose","unit_system":"metric","created_at":"2024-06-15T12:00:00Z"}"#;
        let entries = r#"[{"id":"0b7d9a52-7a8e-4c0e-9a51-5f6b3e1f2a10","date":"2024-06-15","weight":75.0,"created_at":"2024-06-15T12:00:00Z"}]"#;

        let out = dashboard_json(profile, entries, "2024-06-15T20:00:00Z").unwrap();
        let metrics: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(metrics["daily_calories"], 2136);
        assert_eq!(metrics["streak"], 1);

        assert!(dashboard_json(profile, "not json", "2024-06-15T20:00:00Z").is_err());
    }
}
