//! Diet plan model
//!
//! Plans are produced by a generative text service which is prompted with the
//! JSON layout below, so the wire format is camelCase. When generation fails
//! the deterministic [`DietPlan::fallback`] is served instead.

use chrono::{DateTime, Utc};
use regex_lite::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use uuid::Uuid;

use crate::models::UserProfile;

/// A single meal with macros in grams
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meal {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub calories: f64,
    #[serde(default)]
    pub protein: f64,
    #[serde(default)]
    pub carbs: f64,
    #[serde(default)]
    pub fats: f64,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub instructions: Vec<String>,
}

impl Meal {
    fn fixed(
        name: &str,
        description: &str,
        calories: f64,
        (protein, carbs, fats): (f64, f64, f64),
        ingredients: &[&str],
        instructions: &[&str],
    ) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            calories,
            protein,
            carbs,
            fats,
            ingredients: ingredients.iter().map(|s| s.to_string()).collect(),
            instructions: instructions.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayPlan {
    pub day: String,
    pub breakfast: Meal,
    pub lunch: Meal,
    pub dinner: Meal,
    #[serde(default)]
    pub snacks: Vec<Meal>,
}

impl DayPlan {
    /// Sum of all meal calories for the day
    pub fn total_calories(&self) -> f64 {
        self.breakfast.calories
            + self.lunch.calories
            + self.dinner.calories
            + self.snacks.iter().map(|s| s.calories).sum::<f64>()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanSummary {
    pub daily_calorie_range: String,
    pub goal_alignment: String,
    #[serde(default)]
    pub restriction_notes: Vec<String>,
}

/// Where a stored plan came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanSource {
    Generated,
    Fallback,
}

/// The part of a plan the generative service returns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedPlan {
    pub days: Vec<DayPlan>,
    pub total_daily_calories: f64,
    #[serde(default)]
    pub hydration_tips: Vec<String>,
    #[serde(default)]
    pub lifestyle_tips: Vec<String>,
    pub summary: PlanSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DietPlan {
    pub id: Uuid,
    pub user_id: Uuid,
    pub days: Vec<DayPlan>,
    pub total_daily_calories: f64,
    pub hydration_tips: Vec<String>,
    pub lifestyle_tips: Vec<String>,
    pub summary: PlanSummary,
    pub created_at: DateTime<Utc>,
    pub source: PlanSource,
}

impl DietPlan {
    /// Attach identity and provenance to a generated body
    pub fn from_generated(generated: GeneratedPlan, profile: &UserProfile, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: profile.id,
            days: generated.days,
            total_daily_calories: generated.total_daily_calories,
            hydration_tips: generated.hydration_tips,
            lifestyle_tips: generated.lifestyle_tips,
            summary: generated.summary,
            created_at: now,
            source: PlanSource::Generated,
        }
    }

    /// Minimal one-day plan served whenever generation fails
    pub fn fallback(profile: &UserProfile, now: DateTime<Utc>) -> Self {
        let day = DayPlan {
            day: "Day 1".to_string(),
            breakfast: Meal::fixed(
                "Oatmeal with Berries",
                "Nutritious start to your day",
                350.0,
                (12.0, 45.0, 8.0),
                &["Rolled oats", "Mixed berries", "Almonds", "Honey"],
                &["Cook oats with water", "Add berries and nuts", "Drizzle with honey"],
            ),
            lunch: Meal::fixed(
                "Grilled Chicken Salad",
                "Protein-rich healthy salad",
                450.0,
                (35.0, 20.0, 15.0),
                &["Chicken breast", "Mixed greens", "Cherry tomatoes", "Olive oil"],
                &["Grill chicken breast", "Mix with greens", "Add tomatoes and dressing"],
            ),
            dinner: Meal::fixed(
                "Baked Salmon with Vegetables",
                "Omega-3 rich dinner",
                500.0,
                (40.0, 25.0, 20.0),
                &["Salmon fillet", "Broccoli", "Sweet potato", "Lemon"],
                &["Bake salmon with lemon", "Steam broccoli", "Roast sweet potato"],
            ),
            snacks: Vec::new(),
        };

        Self {
            id: Uuid::new_v4(),
            user_id: profile.id,
            days: vec![day],
            total_daily_calories: 1800.0,
            hydration_tips: vec![
                "Drink 8-10 glasses of water daily".to_string(),
                "Have green tea before meals".to_string(),
            ],
            lifestyle_tips: vec![
                "Sleep 7-8 hours nightly".to_string(),
                "Exercise 30 minutes daily".to_string(),
            ],
            summary: PlanSummary {
                daily_calorie_range: "1700-1900 calories".to_string(),
                goal_alignment: "This plan supports your weight goals through balanced nutrition"
                    .to_string(),
                restriction_notes: vec!["Plan respects your dietary preferences".to_string()],
            },
            created_at: now,
            source: PlanSource::Fallback,
        }
    }
}

/// Greedy match from the first `{` to the last `}` across lines
pub fn extract_json_object(text: &str) -> Option<&str> {
    static JSON_OBJECT: OnceLock<Option<Regex>> = OnceLock::new();
    let re = JSON_OBJECT
        .get_or_init(|| Regex::new(r"(?s)\{.*\}").ok())
        .as_ref()?;
    re.find(text).map(|m| m.as_str())
}

const PLAN_SCHEMA: &str = r#"{
  "days": [
    {
      "day": "Day 1",
      "breakfast": {
        "name": "Meal Name",
        "description": "Brief description",
        "calories": 400,
        "protein": 20,
        "carbs": 45,
        "fats": 15,
        "ingredients": ["ingredient1", "ingredient2"],
        "instructions": ["step1", "step2"]
      },
      "lunch": { /* same format */ },
      "dinner": { /* same format */ },
      "snacks": [ /* array of snacks if 5-meals selected */ ]
    }
  ],
  "totalDailyCalories": 1800,
  "hydrationTips": ["Drink 8-10 glasses of water", "Green tea before meals"],
  "lifestyleTips": ["Sleep 7-8 hours", "Exercise 30 mins daily"],
  "summary": {
    "dailyCalorieRange": "1700-1900 calories",
    "goalAlignment": "This plan supports weight loss through controlled portions",
    "restrictionNotes": ["All meals are vegetarian", "Gluten-free options included"]
  }
}"#;

/// Prompt asking for a 7-day plan in the [`GeneratedPlan`] layout
pub fn build_prompt(profile: &UserProfile) -> String {
    let diet_preference = profile.diet_preference.as_deref().unwrap_or("not specified");
    let allergies = if profile.allergies.is_empty() {
        "None".to_string()
    } else {
        profile.allergies.iter().cloned().collect::<Vec<_>>().join(", ")
    };
    let daily_meals = profile
        .daily_meals
        .map(|n| n.to_string())
        .unwrap_or_else(|| "not specified".to_string());

    format!(
        "Create a comprehensive 7-day personalized diet plan based on the following user profile:\n\
         \n\
         User Details:\n\
         - Age: {age} years\n\
         - Gender: {gender}\n\
         - Height: {height} cm\n\
         - Current Weight: {current} kg\n\
         - Target Weight: {target} kg\n\
         - Activity Level: {activity}\n\
         - Goal: {goal} weight\n\
         - Diet Preference: {diet_preference}\n\
         - Allergies/Restrictions: {allergies}\n\
         - Daily Meals: {daily_meals}\n\
         \n\
         Please provide a detailed 7-day diet plan in the following JSON format:\n\
         {schema}\n\
         \n\
         Ensure all meals respect the dietary preferences and restrictions. Make the plan realistic and achievable.",
        age = profile.age,
        gender = profile.gender.as_str(),
        height = profile.height,
        current = profile.current_weight,
        target = profile.target_weight,
        activity = profile.activity_level.as_str(),
        goal = profile.goal_type.as_str(),
        schema = PLAN_SCHEMA,
    )
}
