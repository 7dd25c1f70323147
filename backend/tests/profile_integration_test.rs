//! Integration tests for onboarding and profile endpoints

mod common;

use axum::http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_get_profile_before_onboarding_is_not_found() {
    let app = common::TestApp::new();

    let (status, body) = app.get_json("/api/v1/profile").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_onboarding_steps_metric_by_default() {
    let app = common::TestApp::new();

    let (status, body) = app.get_json("/api/v1/onboarding/steps").await;

    assert_eq!(status, StatusCode::OK);
    let steps = body.as_array().unwrap();
    assert_eq!(steps.len(), 11);
    assert_eq!(steps[0]["type"], "single_select");
    assert_eq!(steps[0]["field"], "gender");
    assert_eq!(steps[3]["field"], "height");
    assert_eq!(steps[3]["suffix"], "cm");
}

#[tokio::test]
async fn test_onboarding_steps_imperial() {
    let app = common::TestApp::new();

    let (status, body) = app
        .get_json("/api/v1/onboarding/steps?unit_system=imperial")
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[3]["suffix"], "inches");
    assert_eq!(body[4]["suffix"], "lbs");
}

#[tokio::test]
async fn test_create_then_get_profile() {
    let app = common::TestApp::new();

    let created = app.onboard().await;
    assert_eq!(created["current_weight"], 80.0);
    assert_eq!(created["created_at"], "2024-06-15T12:00:00Z");

    let (status, fetched) = app.get_json("/api/v1/profile").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_edit_replaces_profile_but_keeps_identity() {
    let app = common::TestApp::new();
    let created = app.onboard().await;

    let mut answers = common::reference_answers();
    answers["target_weight"] = json!(74.0);
    answers["goal_type"] = json!("maintain");

    let (status, body) = app.put("/api/v1/profile", &answers.to_string()).await;
    assert_eq!(status, StatusCode::OK);

    let edited: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(edited["id"], created["id"]);
    assert_eq!(edited["created_at"], created["created_at"]);
    assert_eq!(edited["target_weight"], 74.0);
    assert_eq!(edited["goal_type"], "maintain");
}

#[tokio::test]
async fn test_imperial_answers_are_stored_in_metric() {
    let app = common::TestApp::new();
    let answers = json!({
        "gender": "female",
        "age": 27,
        "unit_system": "imperial",
        "height": 65.0,
        "current_weight": 154.3234,
        "target_weight": 143.3003,
        "activity_level": "light",
        "goal_type": "lose",
        "allergies": ["nuts"]
    });

    let (status, body) = app.put("/api/v1/profile", &answers.to_string()).await;
    assert_eq!(status, StatusCode::CREATED);

    let profile: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert!((profile["height"].as_f64().unwrap() - 165.1).abs() < 1e-9);
    assert!((profile["current_weight"].as_f64().unwrap() - 70.0).abs() < 1e-6);
    assert!((profile["target_weight"].as_f64().unwrap() - 65.0).abs() < 1e-6);
    assert_eq!(profile["unit_system"], "imperial");
}

#[tokio::test]
async fn test_invalid_profile_is_rejected() {
    let app = common::TestApp::new();
    let mut answers = common::reference_answers();
    answers["height"] = json!(20.0);

    let (status, body) = app.put("/api/v1/profile", &answers.to_string()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let body: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(body["error"]["field"], "height");

    let (status, _) = app.get("/api/v1/profile").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_zero_age_is_rejected() {
    let app = common::TestApp::new();
    let mut answers = common::reference_answers();
    answers["age"] = json!(0);

    let (status, _) = app.put("/api/v1/profile", &answers.to_string()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_clear_data_removes_everything() {
    let app = common::TestApp::new();
    app.onboard().await;
    app.log_kg(79.0, "2024-06-15").await;

    let (status, _) = app.delete("/api/v1/data").await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = app.get("/api/v1/profile").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(app.state.repo().load_entries().await.unwrap().is_empty());
}
