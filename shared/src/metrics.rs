//! Dashboard metrics façade
//!
//! Composes the energy, progress and streak models into the values a
//! dashboard shows. Nothing here computes beyond composition and display
//! unit conversion.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::health_metrics::{calculate_bmr, calculate_tdee};
use crate::models::{UserProfile, WeightEntry};
use crate::progress::{calculate_weekly_progress, latest_by_date, WeeklyProgress};
use crate::streak::calculate_streak;
use crate::units::{convert_weight, WeightUnit};

/// A weight converted to a display unit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DisplayWeight {
    pub value: f64,
    pub unit: WeightUnit,
}

impl DisplayWeight {
    /// Convert a canonical kilogram value for display
    pub fn from_kg(kg: f64, unit: WeightUnit) -> Self {
        Self {
            value: convert_weight(kg, WeightUnit::Kg, unit),
            unit,
        }
    }
}

/// Everything the dashboard needs, derived from one profile and its entries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardMetrics {
    /// Rounded TDEE, kcal/day
    pub daily_calories: i64,
    pub bmr: f64,
    pub tdee: f64,
    pub progress: WeeklyProgress,
    pub streak: u32,
    /// Latest weight by date, or the profile baseline when nothing is logged
    pub latest_weight: DisplayWeight,
    pub target_weight: DisplayWeight,
    pub entry_count: usize,
}

impl DashboardMetrics {
    /// Compute the dashboard for `now`. Streak days follow `now`'s time zone.
    pub fn compute<Tz: TimeZone>(
        profile: &UserProfile,
        entries: &[WeightEntry],
        now: &DateTime<Tz>,
    ) -> Self {
        let unit = profile.unit_system.weight_unit();
        let tdee = calculate_tdee(profile);
        let latest_kg = latest_by_date(entries)
            .map(|e| e.weight)
            .unwrap_or(profile.current_weight);

        Self {
            daily_calories: tdee.round() as i64,
            bmr: calculate_bmr(profile),
            tdee,
            progress: calculate_weekly_progress(profile, entries, now.with_timezone(&Utc)),
            streak: calculate_streak(entries, now),
            latest_weight: DisplayWeight::from_kg(latest_kg, unit),
            target_weight: DisplayWeight::from_kg(profile.target_weight, unit),
            entry_count: entries.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ActivityLevel, Gender, GoalType};
    use crate::units::UnitSystem;
    use chrono::{Duration, NaiveDate};
    use std::collections::BTreeSet;
    use uuid::Uuid;

    fn profile(unit_system: UnitSystem) -> UserProfile {
        UserProfile {
            id: Uuid::new_v4(),
            gender: Gender::Male,
            age: 30,
            height: 180.0,
            current_weight: 80.0,
            target_weight: 70.0,
            activity_level: ActivityLevel::Sedentary,
            goal_type: GoalType::Lose,
            unit_system,
            created_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
            diet_preference: None,
            allergies: BTreeSet::new(),
            daily_meals: None,
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 15, 12, 0, 0).unwrap()
    }

    fn entry(days_ago: i64, weight: f64) -> WeightEntry {
        WeightEntry::new(
            now().date_naive() - Duration::days(days_ago),
            weight,
            None,
            now(),
        )
    }

    #[test]
    fn test_composes_all_models() {
        let entries = vec![entry(1, 76.0), entry(0, 75.0), entry(2, 77.0)];
        let metrics = DashboardMetrics::compute(&profile(UnitSystem::Metric), &entries, &now());

        assert_eq!(metrics.daily_calories, 2136);
        assert!((metrics.bmr - 1780.0).abs() < 1e-9);
        assert!((metrics.progress.progress - 50.0).abs() < 1e-9);
        assert_eq!(metrics.streak, 3);
        assert_eq!(metrics.latest_weight, DisplayWeight { value: 75.0, unit: WeightUnit::Kg });
        assert_eq!(metrics.entry_count, 3);
    }

    #[test]
    fn test_latest_weight_falls_back_to_baseline() {
        let metrics = DashboardMetrics::compute(&profile(UnitSystem::Metric), &[], &now());
        assert_eq!(metrics.latest_weight.value, 80.0);
        assert_eq!(metrics.streak, 0);
        assert_eq!(metrics.progress.progress, 0.0);
    }

    #[test]
    fn test_imperial_display_conversion() {
        let entries = vec![entry(0, 100.0)];
        let metrics = DashboardMetrics::compute(&profile(UnitSystem::Imperial), &entries, &now());

        assert_eq!(metrics.latest_weight.unit, WeightUnit::Lbs);
        assert!((metrics.latest_weight.value - 220.462).abs() < 1e-9);
        assert!((metrics.target_weight.value - 70.0 * 2.20462).abs() < 1e-9);
        // Calories never depend on the display unit
        assert_eq!(metrics.daily_calories, 2136);
    }

    #[test]
    fn test_latest_weight_uses_date_not_insertion() {
        let entries = vec![entry(0, 74.0), entry(5, 79.0)];
        let metrics = DashboardMetrics::compute(&profile(UnitSystem::Metric), &entries, &now());
        assert_eq!(metrics.latest_weight.value, 74.0);
        assert_eq!(
            entries.iter().map(|e| e.date).max(),
            NaiveDate::from_ymd_opt(2024, 5, 15)
        );
    }
}
