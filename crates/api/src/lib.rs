//! Listing Price API Server
//!
//! HTTP surface over the price predictor: single and batch prediction,
//! health and Prometheus metrics.

use anyhow::Context;
use axum::{
    routing::{get, post},
    Router,
};
use inference_engine::{ArtifactBundle, PricePredictor};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::Arc;
use thiserror::Error;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::subscriber::SetGlobalDefaultError;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

pub mod config;
pub mod error;
pub mod routes;

pub use config::ApiConfig;
pub use error::{ApiError, ErrorBody};

/// Application state shared across handlers, read-only after startup
pub struct AppState {
    /// Price predictor built from the artifact bundle
    pub predictor: PricePredictor,
    /// Active configuration
    pub config: ApiConfig,
    /// Version string
    pub version: String,
    /// Start time
    pub start_time: std::time::Instant,
    /// Prometheus handle when a recorder is installed
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Create new application state
    pub fn new(
        predictor: PricePredictor,
        config: ApiConfig,
        metrics: Option<PrometheusHandle>,
    ) -> Self {
        Self {
            predictor,
            config,
            version: env!("CARGO_PKG_VERSION").to_string(),
            start_time: std::time::Instant::now(),
            metrics,
        }
    }
}

/// Create the application router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/predict_item", post(routes::predictions::predict_item))
        .route("/predict_items", post(routes::predictions::predict_items))
        .route("/api/v1/health", get(routes::health::health))
        .route("/metrics", get(routes::health::metrics))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Logging bootstrap failures
#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Invalid log level {0:?}, expected trace, debug, info, warn or error")]
    InvalidLevel(String),
    #[error(transparent)]
    Subscriber(#[from] SetGlobalDefaultError),
}

/// Parse a configured log level
pub fn parse_level(level: &str) -> Result<Level, LoggingError> {
    level
        .trim()
        .parse::<Level>()
        .map_err(|_| LoggingError::InvalidLevel(level.to_string()))
}

/// Initialize logging
pub fn init_logging(level: &str, json: bool) -> Result<(), LoggingError> {
    let level = parse_level(level)?;

    if json {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(level)
            .with_target(true)
            .json()
            .finish();
        tracing::subscriber::set_global_default(subscriber)?;
    } else {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(level)
            .with_target(true)
            .finish();
        tracing::subscriber::set_global_default(subscriber)?;
    }
    Ok(())
}

/// Load the bundle, build the predictor and serve until shutdown
pub async fn run_server(config: ApiConfig) -> anyhow::Result<()> {
    let bundle = ArtifactBundle::load(&config.bundle_path)
        .with_context(|| format!("loading artifact bundle {}", config.bundle_path.display()))?;
    let predictor = PricePredictor::from_bundle(bundle, &config.predictor_config())
        .context("building price predictor")?;

    let metrics = PrometheusBuilder::new()
        .install_recorder()
        .context("installing Prometheus recorder")?;

    let addr = config.bind_addr.clone();
    let state = Arc::new(AppState::new(predictor, config, Some(metrics)));
    let app = create_router(state);

    info!("Starting API server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {}", addr))?;
    axum::serve(listener, app).await?;

    Ok(())
}
