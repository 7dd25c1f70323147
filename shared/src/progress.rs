//! Goal progress and on-track assessment

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{GoalType, UserProfile, WeightEntry};

/// Healthy rate of change the on-track check expects, in kg per week
pub const HEALTHY_KG_PER_WEEK: f64 = 0.5;

/// Fraction of the expected change that still counts as on track
pub const ON_TRACK_TOLERANCE: f64 = 0.8;

pub const START_LOGGING_MESSAGE: &str = "Start logging your weight to track progress";

/// Progress toward the profile's target weight
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyProgress {
    /// Percent of the distance to target covered, clamped to [0, 100]
    pub progress: f64,
    pub on_track: bool,
    pub message: String,
}

/// Motivational message for a goal and on-track verdict
pub fn progress_message(goal_type: GoalType, on_track: bool) -> &'static str {
    match (goal_type, on_track) {
        (GoalType::Lose, true) => "Great job! You're on track to reach your goal.",
        (GoalType::Lose, false) => "Keep going! Small steps lead to big changes.",
        (GoalType::Gain, true) => "Excellent progress towards your weight gain goal!",
        (GoalType::Gain, false) => "Stay consistent with your nutrition plan.",
        (GoalType::Maintain, _) => "You're maintaining your weight well!",
    }
}

/// Fractional weeks since the profile was created, never below one
pub fn elapsed_weeks(created_at: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    let week_ms = Duration::weeks(1).num_milliseconds() as f64;
    let elapsed_ms = (now - created_at).num_milliseconds() as f64;
    (elapsed_ms / week_ms).max(1.0)
}

/// Compute progress from the profile baseline to the latest logged weight.
///
/// The latest weight is the last entry after a stable ascending sort by
/// date, so among entries sharing the latest date the one inserted last
/// wins. Callers should not rely on that tie-break.
///
/// The on-track check compares the magnitude of change against
/// `elapsed_weeks * 0.5 kg * 0.8`. It ignores direction: moving away from
/// the target at a healthy rate also counts as on track.
pub fn calculate_weekly_progress(
    profile: &UserProfile,
    entries: &[WeightEntry],
    now: DateTime<Utc>,
) -> WeeklyProgress {
    let Some(latest) = latest_by_date(entries) else {
        return WeeklyProgress {
            progress: 0.0,
            on_track: false,
            message: START_LOGGING_MESSAGE.to_string(),
        };
    };

    let start_weight = profile.current_weight;
    let total_distance = (profile.target_weight - start_weight).abs();
    let distance_covered = (latest.weight - start_weight).abs();

    let progress = if total_distance > 0.0 {
        distance_covered / total_distance * 100.0
    } else {
        0.0
    };

    let expected_change = elapsed_weeks(profile.created_at, now) * HEALTHY_KG_PER_WEEK;
    let on_track = distance_covered >= expected_change * ON_TRACK_TOLERANCE;

    WeeklyProgress {
        progress: progress.clamp(0.0, 100.0),
        on_track,
        message: progress_message(profile.goal_type, on_track).to_string(),
    }
}

/// Last entry of a stable ascending sort by date
pub fn latest_by_date(entries: &[WeightEntry]) -> Option<&WeightEntry> {
    let mut sorted: Vec<&WeightEntry> = entries.iter().collect();
    sorted.sort_by_key(|e| e.date);
    sorted.last().copied()
}
