//! Common test utilities for integration tests
//!
//! Every test app runs against a fresh in-memory store and a clock pinned to
//! [`test_now`], so dates in assertions are deterministic.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use chrono::{DateTime, TimeZone, Utc};
use fitjourney_backend::{
    clock::FixedClock,
    config::AppConfig,
    repositories::MemoryStore,
    routes,
    services::{DietPlanGenerator, DietPlanService},
    state::AppState,
};
use metrics_exporter_prometheus::PrometheusBuilder;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

/// 2024-06-15 12:00 UTC
pub fn test_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
}

/// Test application wrapper
pub struct TestApp {
    pub app: Router,
    pub state: AppState,
}

impl TestApp {
    /// App with diet-plan generation disabled
    pub fn new() -> Self {
        Self::build(AppConfig::default(), test_now(), DietPlanService::disabled())
    }

    /// App whose clock reads `now`
    pub fn at(now: DateTime<Utc>) -> Self {
        Self::build(AppConfig::default(), now, DietPlanService::disabled())
    }

    /// App generating plans through `generator`
    pub fn with_generator(generator: Arc<dyn DietPlanGenerator>) -> Self {
        Self::build(AppConfig::default(), test_now(), DietPlanService::new(generator))
    }

    pub fn build(config: AppConfig, now: DateTime<Utc>, diet_plans: DietPlanService) -> Self {
        let state = AppState::new(
            Arc::new(MemoryStore::new()),
            config,
            Arc::new(FixedClock(now)),
            diet_plans,
            PrometheusBuilder::new().build_recorder().handle(),
        );
        let app = routes::create_router(state.clone());

        Self { app, state }
    }

    async fn send(&self, method: &str, path: &str, body: Option<&str>) -> (StatusCode, String) {
        let builder = Request::builder().method(method).uri(path);
        let request = match body {
            Some(body) => builder
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body_str = String::from_utf8(body.to_vec()).unwrap();

        (status, body_str)
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> (StatusCode, String) {
        self.send("GET", path, None).await
    }

    /// Make a POST request with JSON body
    pub async fn post(&self, path: &str, body: &str) -> (StatusCode, String) {
        self.send("POST", path, Some(body)).await
    }

    /// Make a PUT request with JSON body
    pub async fn put(&self, path: &str, body: &str) -> (StatusCode, String) {
        self.send("PUT", path, Some(body)).await
    }

    pub async fn delete(&self, path: &str) -> (StatusCode, String) {
        self.send("DELETE", path, None).await
    }

    /// GET and parse the body as JSON
    pub async fn get_json(&self, path: &str) -> (StatusCode, Value) {
        let (status, body) = self.get(path).await;
        (status, serde_json::from_str(&body).unwrap_or(Value::Null))
    }

    /// Complete onboarding with the reference profile
    pub async fn onboard(&self) -> Value {
        let (status, body) = self
            .put("/api/v1/profile", &reference_answers().to_string())
            .await;
        assert_eq!(status, StatusCode::CREATED, "{}", body);
        serde_json::from_str(&body).unwrap()
    }

    /// Log a weight in kg on a date
    pub async fn log_kg(&self, weight: f64, date: &str) -> Value {
        let body = json!({ "weight": weight, "unit": "kg", "date": date });
        let (status, body) = self.post("/api/v1/weight", &body.to_string()).await;
        assert_eq!(status, StatusCode::CREATED, "{}", body);
        serde_json::from_str(&body).unwrap()
    }
}

/// 30-year-old sedentary male, 180 cm, 80 kg, aiming for 70 kg
pub fn reference_answers() -> Value {
    json!({
        "gender": "male",
        "age": 30,
        "unit_system": "metric",
        "height": 180.0,
        "current_weight": 80.0,
        "target_weight": 70.0,
        "activity_level": "sedentary",
        "goal_type": "lose"
    })
}
