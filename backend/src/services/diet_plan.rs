//! Diet plan generation
//!
//! A [`DietPlanGenerator`] turns a profile into a plan body. [`GeminiClient`]
//! asks Google's Gemini API for one; [`DietPlanService`] wraps any generator
//! and swaps in the fixed fallback plan whenever generation fails, so callers
//! always receive a plan.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use fitjourney_shared::diet_plan::{build_prompt, extract_json_object, DietPlan, GeneratedPlan};
use fitjourney_shared::{DietPlanError, UserProfile};
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug, Formatter};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, instrument, warn};

use crate::config::DietPlanConfig;

#[async_trait]
pub trait DietPlanGenerator: Send + Sync {
    async fn generate(&self, profile: &UserProfile) -> Result<GeneratedPlan, DietPlanError>;
}

// ============================================================================
// Gemini API Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    #[serde(default)]
    parts: Vec<TextPart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct TextPart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    top_k: u32,
    top_p: f32,
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    candidates: Option<Vec<Candidate>>,
    error: Option<GeminiError>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<GeminiContent>,
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    message: String,
}

// ============================================================================
// Gemini Client
// ============================================================================

pub struct GeminiClient {
    client: Client,
    api_url: String,
    model: String,
    api_key: Option<SecretString>,
    temperature: f32,
}

impl GeminiClient {
    pub fn new(
        api_url: impl Into<String>,
        model: impl Into<String>,
        api_key: Option<SecretString>,
        temperature: f32,
        timeout: Duration,
    ) -> Result<Self, DietPlanError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DietPlanError::Request(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_url: api_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
            api_key,
            temperature,
        })
    }

    pub fn from_config(config: &DietPlanConfig) -> Result<Self, DietPlanError> {
        Self::new(
            &config.api_url,
            &config.model,
            config.secret_key(),
            config.temperature,
            Duration::from_secs(config.timeout_secs),
        )
    }

    fn build_url(&self) -> String {
        format!("{}/models/{}:generateContent", self.api_url, self.model)
    }

    fn build_request(&self, prompt: String) -> GeminiRequest {
        GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![TextPart { text: Some(prompt) }],
            }],
            generation_config: GenerationConfig {
                temperature: self.temperature,
                top_k: 40,
                top_p: 0.95,
                max_output_tokens: 8192,
            },
        }
    }

    /// `candidates[0].content.parts[0].text`
    fn extract_text(response: GeminiResponse) -> Result<String, DietPlanError> {
        response
            .candidates
            .and_then(|c| c.into_iter().next())
            .and_then(|c| c.content)
            .and_then(|c| c.parts.into_iter().next())
            .and_then(|p| p.text)
            .ok_or(DietPlanError::EmptyResponse)
    }

    fn map_api_error(status: u16, response_text: &str) -> DietPlanError {
        let message = serde_json::from_str::<GeminiResponse>(response_text)
            .ok()
            .and_then(|r| r.error)
            .map_or_else(|| response_text.to_owned(), |e| e.message);

        DietPlanError::Api { status, message }
    }
}

#[async_trait]
impl DietPlanGenerator for GeminiClient {
    #[instrument(skip(self, profile), fields(model = %self.model, profile_id = %profile.id))]
    async fn generate(&self, profile: &UserProfile) -> Result<GeneratedPlan, DietPlanError> {
        let api_key = self.api_key.as_ref().ok_or(DietPlanError::NotConfigured)?;
        let request = self.build_request(build_prompt(profile));

        debug!("Sending request to Gemini API");

        let response = self
            .client
            .post(self.build_url())
            .query(&[("key", api_key.expose_secret())])
            .json(&request)
            .send()
            .await
            .map_err(|e| DietPlanError::Request(format!("HTTP request failed: {e}")))?;

        let status = response.status();
        let response_text = response
            .text()
            .await
            .map_err(|e| DietPlanError::Request(format!("Failed to read response: {e}")))?;

        if !status.is_success() {
            error!(status = %status, "Gemini API error");
            return Err(Self::map_api_error(status.as_u16(), &response_text));
        }

        let gemini_response: GeminiResponse = serde_json::from_str(&response_text)?;
        if let Some(error) = gemini_response.error {
            return Err(DietPlanError::Api {
                status: status.as_u16(),
                message: error.message,
            });
        }

        let text = Self::extract_text(gemini_response)?;
        let json = extract_json_object(&text).ok_or(DietPlanError::MissingJson)?;
        let plan: GeneratedPlan = serde_json::from_str(json)?;

        debug!(days = plan.days.len(), "Received diet plan from Gemini");
        Ok(plan)
    }
}

impl Debug for GeminiClient {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiClient")
            .field("api_url", &self.api_url)
            .field("model", &self.model)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Service
// ============================================================================

/// Plan generation that never fails
#[derive(Clone)]
pub struct DietPlanService {
    generator: Option<Arc<dyn DietPlanGenerator>>,
}

impl DietPlanService {
    pub fn new(generator: Arc<dyn DietPlanGenerator>) -> Self {
        Self {
            generator: Some(generator),
        }
    }

    /// A service that always serves the fallback plan
    pub fn disabled() -> Self {
        Self { generator: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.generator.is_some()
    }

    /// Generate a plan for `profile`, falling back on any failure
    pub async fn generate(&self, profile: &UserProfile, now: DateTime<Utc>) -> DietPlan {
        let Some(generator) = &self.generator else {
            debug!("Diet plan generation disabled, serving fallback plan");
            metrics::counter!("diet_plan_fallbacks_total").increment(1);
            return DietPlan::fallback(profile, now);
        };

        match generator.generate(profile).await {
            Ok(generated) => {
                info!(profile_id = %profile.id, days = generated.days.len(), "Diet plan generated");
                metrics::counter!("diet_plan_generated_total").increment(1);
                DietPlan::from_generated(generated, profile, now)
            }
            Err(e) => {
                warn!(profile_id = %profile.id, error = %e, "Diet plan generation failed, serving fallback plan");
                metrics::counter!("diet_plan_fallbacks_total").increment(1);
                DietPlan::fallback(profile, now)
            }
        }
    }
}
