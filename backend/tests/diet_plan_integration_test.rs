//! Integration tests for diet plan generation against a mocked Gemini API

mod common;

use axum::http::StatusCode;
use fitjourney_backend::services::GeminiClient;
use secrecy::SecretString;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const GENERATE_PATH: &str = "/models/gemini-test:generateContent";

fn client(server: &MockServer) -> Arc<GeminiClient> {
    Arc::new(
        GeminiClient::new(
            server.uri(),
            "gemini-test",
            Some(SecretString::new("test-key".to_string())),
            0.7,
            Duration::from_secs(5),
        )
        .unwrap(),
    )
}

fn meal(name: &str, calories: f64) -> Value {
    json!({
        "name": name,
        "description": "Test meal",
        "calories": calories,
        "protein": 20.0,
        "carbs": 30.0,
        "fats": 10.0,
        "ingredients": ["Ingredient"],
        "instructions": ["Cook it"]
    })
}

fn plan_body() -> Value {
    json!({
        "days": [{
            "day": "Day 1",
            "breakfast": meal("Eggs", 400.0),
            "lunch": meal("Rice bowl", 600.0),
            "dinner": meal("Fish", 700.0),
            "snacks": [meal("Apple", 100.0)]
        }],
        "totalDailyCalories": 1800,
        "hydrationTips": ["Drink water"],
        "lifestyleTips": ["Walk daily"],
        "summary": {
            "dailyCalorieRange": "1700-1900",
            "goalAlignment": "Moderate deficit",
            "restrictionNotes": []
        }
    })
}

/// Gemini envelope around model text
fn candidates(text: &str) -> Value {
    json!({
        "candidates": [{
            "content": { "parts": [{ "text": text }] }
        }]
    })
}

async fn mount(server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .and(query_param("key", "test-key"))
        .respond_with(response)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_diet_plan_requires_profile() {
    let app = common::TestApp::new();

    let (status, _) = app.get("/api/v1/diet-plan").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_generated_plan_is_extracted_from_prose() {
    let server = MockServer::start().await;
    let text = format!("Here is your plan:\n```json\n{}\n```\nEnjoy!", plan_body());
    mount(&server, ResponseTemplate::new(200).set_body_json(candidates(&text))).await;

    let app = common::TestApp::with_generator(client(&server));
    let profile = app.onboard().await;

    let (status, plan) = app.get_json("/api/v1/diet-plan").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(plan["source"], "generated");
    assert_eq!(plan["userId"], profile["id"]);
    assert_eq!(plan["totalDailyCalories"], 1800.0);
    assert_eq!(plan["days"][0]["snacks"][0]["name"], "Apple");
    assert_eq!(plan["createdAt"], "2024-06-15T12:00:00Z");
}

#[tokio::test]
async fn test_api_error_serves_fallback() {
    let server = MockServer::start().await;
    mount(
        &server,
        ResponseTemplate::new(500).set_body_json(json!({ "error": { "message": "boom" } })),
    )
    .await;

    let app = common::TestApp::with_generator(client(&server));
    app.onboard().await;

    let (status, plan) = app.get_json("/api/v1/diet-plan").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(plan["source"], "fallback");
    assert_eq!(plan["totalDailyCalories"], 1800.0);
    assert_eq!(plan["days"][0]["breakfast"]["name"], "Oatmeal with Berries");
}

#[tokio::test]
async fn test_text_without_json_serves_fallback() {
    let server = MockServer::start().await;
    mount(
        &server,
        ResponseTemplate::new(200).set_body_json(candidates("Sorry, I cannot help with that.")),
    )
    .await;

    let app = common::TestApp::with_generator(client(&server));
    app.onboard().await;

    let (_, plan) = app.get_json("/api/v1/diet-plan").await;

    assert_eq!(plan["source"], "fallback");
}

#[tokio::test]
async fn test_disabled_generation_serves_fallback() {
    let app = common::TestApp::new();
    app.onboard().await;

    let (status, plan) = app.get_json("/api/v1/diet-plan").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(plan["source"], "fallback");
}

#[tokio::test]
async fn test_plan_is_cached_until_regenerated() {
    let server = MockServer::start().await;
    mount(
        &server,
        ResponseTemplate::new(200).set_body_json(candidates(&plan_body().to_string())),
    )
    .await;

    let app = common::TestApp::with_generator(client(&server));
    app.onboard().await;

    let (_, first) = app.get_json("/api/v1/diet-plan").await;
    let (_, second) = app.get_json("/api/v1/diet-plan").await;
    assert_eq!(first["id"], second["id"]);

    let (status, body) = app.post("/api/v1/diet-plan", "{}").await;
    assert_eq!(status, StatusCode::OK);
    let regenerated: Value = serde_json::from_str(&body).unwrap();
    assert_ne!(regenerated["id"], first["id"]);

    let (_, cached) = app.get_json("/api/v1/diet-plan").await;
    assert_eq!(cached["id"], regenerated["id"]);

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
}

#[tokio::test]
async fn test_clear_data_drops_cached_plan() {
    let app = common::TestApp::new();
    app.onboard().await;
    let (_, first) = app.get_json("/api/v1/diet-plan").await;

    // Clearing data and onboarding again produces a new profile id
    let (status, _) = app.delete("/api/v1/data").await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let profile = app.onboard().await;

    let (_, plan) = app.get_json("/api/v1/diet-plan").await;
    assert_ne!(plan["id"], first["id"]);
    assert_eq!(plan["userId"], profile["id"]);
}
