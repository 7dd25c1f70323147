//! FitJourney Backend
//!
//! A single-user weight tracking and diet planning API.
//!
//! ## Architecture
//!
//! The backend follows a layered architecture:
//! - Routes: HTTP request handling and routing
//! - Services: Validation, unit handling and diet-plan generation
//! - Repositories: JSON documents in a key-value store (Redis or memory)
//! - Shared crate: the pure calculation core

use anyhow::{Context, Result};
use fitjourney_backend::{
    clock::SystemClock,
    config::{self, StoreBackend},
    repositories::{KeyValueStore, MemoryStore, RedisStore},
    routes,
    services::{DietPlanService, GeminiClient},
    state::AppState,
};
use metrics_exporter_prometheus::PrometheusBuilder;
use redis::aio::ConnectionManager;
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    init_tracing();

    // Load configuration
    let config = config::AppConfig::load()?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        env = if config::AppConfig::is_production() { "production" } else { "development" },
        "Starting FitJourney Backend"
    );

    // Validate production configuration
    if config::AppConfig::is_production() {
        validate_production_config(&config)?;
    }

    let metrics = PrometheusBuilder::new()
        .install_recorder()
        .context("Failed to install Prometheus recorder")?;

    let store = create_store(&config).await;
    let diet_plans = create_diet_plan_service(&config)?;

    // Create application state
    let state = AppState::new(
        store,
        config.clone(),
        Arc::new(SystemClock),
        diet_plans,
        metrics,
    );

    // Build application
    let app = routes::create_router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    info!(address = %addr, "Server listening");

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    // Serve with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Pick the configured store, falling back to memory when Redis is unavailable
async fn create_store(config: &config::AppConfig) -> Arc<dyn KeyValueStore> {
    match config.store.backend {
        StoreBackend::Memory => {
            info!("Using in-memory store");
            Arc::new(MemoryStore::new())
        }
        StoreBackend::Redis => match connect_redis(&config.store.redis_url).await {
            Some(conn) => Arc::new(RedisStore::new(conn)),
            None => {
                warn!("Falling back to in-memory store, data will not survive a restart");
                Arc::new(MemoryStore::new())
            }
        },
    }
}

/// Connect to Redis with graceful fallback
///
/// Returns None if Redis is unavailable
async fn connect_redis(url: &str) -> Option<ConnectionManager> {
    info!("Connecting to Redis...");

    match redis::Client::open(url) {
        Ok(client) => match ConnectionManager::new(client).await {
            Ok(conn) => {
                info!("Redis connection established");
                Some(conn)
            }
            Err(e) => {
                warn!("Failed to connect to Redis: {}", e);
                None
            }
        },
        Err(e) => {
            warn!("Invalid Redis URL: {}", e);
            None
        }
    }
}

fn create_diet_plan_service(config: &config::AppConfig) -> Result<DietPlanService> {
    if !config.diet_plan.enabled {
        info!("Diet plan generation disabled, the fallback plan will be served");
        return Ok(DietPlanService::disabled());
    }

    if config.diet_plan.secret_key().is_none() {
        warn!("No diet plan API key configured (FJ__DIET_PLAN__API_KEY), the fallback plan will be served");
    }

    let client = GeminiClient::from_config(&config.diet_plan)?;
    info!(model = %config.diet_plan.model, "Diet plan generation enabled");
    Ok(DietPlanService::new(Arc::new(client)))
}

/// Initialize tracing/logging
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if config::AppConfig::is_production() {
            "fitjourney_backend=info,tower_http=info".into()
        } else {
            "fitjourney_backend=debug,tower_http=debug".into()
        }
    });

    let subscriber = tracing_subscriber::registry().with(env_filter);

    if config::AppConfig::is_production() {
        // JSON logging for production (better for log aggregation)
        subscriber
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        // Pretty logging for development
        subscriber
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}

/// Validate configuration for production deployment
fn validate_production_config(config: &config::AppConfig) -> Result<()> {
    let mut errors = Vec::new();

    if config.diet_plan.enabled && config.diet_plan.secret_key().is_none() {
        warn!("Diet plan generation is enabled without an API key in production");
    }

    if config.store.backend == StoreBackend::Memory {
        warn!("In-memory store in production - data is lost on restart");
    }

    if config.diet_plan.timeout_secs == 0 {
        errors.push("diet_plan.timeout_secs must be greater than zero");
    }

    if !errors.is_empty() {
        for err in &errors {
            error!("Configuration error: {}", err);
        }
        anyhow::bail!("Invalid production configuration");
    }

    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown");
        }
        _ = terminate => {
            info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
