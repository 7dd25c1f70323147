//! Application state management
//!
//! This module provides the shared application state that is passed
//! to all request handlers via Axum's state extraction.
//!
//! Every field is an `Arc` or internally reference counted, so cloning the
//! state per request is cheap.

use crate::clock::{local_now, Clock};
use crate::config::AppConfig;
use crate::repositories::{KeyValueStore, TrackerRepository};
use crate::services::DietPlanService;
use chrono::{DateTime, FixedOffset, Utc};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Profile, weight log and diet plan persistence
    pub repo: TrackerRepository,
    /// Application configuration
    pub config: Arc<AppConfig>,
    pub clock: Arc<dyn Clock>,
    pub diet_plans: DietPlanService,
    /// Renders the Prometheus exposition for `/metrics`
    pub metrics: PrometheusHandle,
}

impl AppState {
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        config: AppConfig,
        clock: Arc<dyn Clock>,
        diet_plans: DietPlanService,
        metrics: PrometheusHandle,
    ) -> Self {
        let repo = TrackerRepository::new(store, config.store.namespace.clone());

        Self {
            repo,
            config: Arc::new(config),
            clock,
            diet_plans,
            metrics,
        }
    }

    /// Get a reference to the tracker repository
    #[inline]
    pub fn repo(&self) -> &TrackerRepository {
        &self.repo
    }

    /// Get a reference to the configuration
    #[inline]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Current instant
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Current instant in the user's calendar offset
    pub fn local_now(&self) -> DateTime<FixedOffset> {
        local_now(&self.clock, self.config.tracking.offset())
    }
}
