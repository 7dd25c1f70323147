//! Profile, weight log and dashboard logic
//!
//! Validates input at the boundary, converts to canonical metric units and
//! hands plain data to the shared calculation core.

use chrono::{DateTime, FixedOffset, Utc};
use fitjourney_shared::onboarding::OnboardingAnswers;
use fitjourney_shared::types::{
    DashboardResponse, LogWeightRequest, WeightEntryResponse, WeightHistoryResponse,
};
use fitjourney_shared::validation::{
    validate_answers, validate_entry_date, validate_notes, validate_weight,
};
use fitjourney_shared::{DashboardMetrics, UserProfile, WeightEntry};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::error::ApiError;
use crate::repositories::TrackerRepository;

/// Result of a profile upsert
#[derive(Debug, Clone)]
pub struct SavedProfile {
    pub profile: UserProfile,
    pub created: bool,
}

pub struct TrackerService;

impl TrackerService {
    /// Load the profile or fail with 404
    pub async fn require_profile(repo: &TrackerRepository) -> Result<UserProfile, ApiError> {
        repo.load_profile()
            .await?
            .ok_or_else(ApiError::profile_missing)
    }

    /// Replace the profile wholesale from onboarding answers.
    ///
    /// An existing profile keeps its id and creation time, so progress keeps
    /// measuring from the original baseline instant.
    pub async fn save_profile(
        repo: &TrackerRepository,
        answers: OnboardingAnswers,
        now: DateTime<Utc>,
    ) -> Result<SavedProfile, ApiError> {
        answers.validate()?;
        validate_answers(&answers)?;

        let existing = repo.load_profile().await?;
        let (id, created_at) = existing
            .as_ref()
            .map(|p| (p.id, p.created_at))
            .unwrap_or_else(|| (Uuid::new_v4(), now));

        let profile = answers.into_profile(id, created_at);
        repo.save_profile(&profile).await?;

        let created = existing.is_none();
        info!(profile_id = %profile.id, created, "Profile saved");
        Ok(SavedProfile { profile, created })
    }

    /// Log a weight entry. Unit defaults to the profile's preference and the
    /// date to today in the user's calendar.
    pub async fn log_weight(
        repo: &TrackerRepository,
        req: LogWeightRequest,
        now: DateTime<FixedOffset>,
    ) -> Result<WeightEntryResponse, ApiError> {
        req.validate()?;
        let profile = Self::require_profile(repo).await?;
        let display_unit = profile.unit_system.weight_unit();

        let input_unit = req.unit.unwrap_or(display_unit);
        let weight_kg = input_unit.to_kg(req.weight);
        validate_weight(weight_kg).map_err(|m| ApiError::field("weight", m))?;

        let notes = req
            .notes
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());
        if let Some(notes) = &notes {
            validate_notes(notes).map_err(|m| ApiError::field("notes", m))?;
        }

        let today = now.date_naive();
        let date = req.date.unwrap_or(today);
        validate_entry_date(date, today).map_err(|m| ApiError::field("date", m))?;

        let entry = WeightEntry::new(date, weight_kg, notes, now.with_timezone(&Utc));
        repo.add_entry(entry.clone()).await?;

        metrics::counter!("weight_entries_logged_total").increment(1);
        info!(entry_id = %entry.id, date = %entry.date, "Weight entry logged");

        Ok(WeightEntryResponse::from_entry(&entry, display_unit))
    }

    /// Entries ascending by date in the profile's display unit
    pub async fn history(repo: &TrackerRepository) -> Result<WeightHistoryResponse, ApiError> {
        let profile = Self::require_profile(repo).await?;
        let unit = profile.unit_system.weight_unit();

        let mut entries = repo.load_entries().await?;
        entries.sort_by_key(|e| e.date);

        let entries: Vec<WeightEntryResponse> = entries
            .iter()
            .map(|e| WeightEntryResponse::from_entry(e, unit))
            .collect();

        Ok(WeightHistoryResponse {
            count: entries.len(),
            entries,
            unit,
        })
    }

    pub async fn delete_entry(repo: &TrackerRepository, id: Uuid) -> Result<(), ApiError> {
        if !repo.delete_entry(id).await? {
            return Err(ApiError::NotFound(format!("Weight entry {} not found", id)));
        }
        info!(entry_id = %id, "Weight entry deleted");
        Ok(())
    }

    pub async fn dashboard(
        repo: &TrackerRepository,
        now: DateTime<FixedOffset>,
    ) -> Result<DashboardResponse, ApiError> {
        let profile = Self::require_profile(repo).await?;
        let entries = repo.load_entries().await?;

        Ok(DashboardResponse {
            today: now.date_naive(),
            metrics: DashboardMetrics::compute(&profile, &entries, &now),
        })
    }

    pub async fn clear_all(repo: &TrackerRepository) -> Result<(), ApiError> {
        repo.clear_all().await?;
        info!("All tracker data cleared");
        Ok(())
    }
}
