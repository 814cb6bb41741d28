//! Listing Price Inference
//!
//! Loads the training artifact bundle (estimator, scaler, encoder, reference
//! medians) and serves price predictions on top of the feature engine.

mod bundle;
mod engine;
mod estimator;
mod scaler;

pub use bundle::{ArtifactBundle, BundleFormat};
pub use engine::{PredictorConfig, PricePredictor};
pub use estimator::{Estimator, LinearModelParams, LinearRegressor};
pub use scaler::{Scaler, ScalerParams, StandardScaler};

use feature_engine::{ConfigError, FeatureError};
use thiserror::Error;

/// Errors during bundle loading and inference
#[derive(Debug, Error)]
pub enum InferenceError {
    /// Record rejected by the feature pipeline
    #[error(transparent)]
    Features(#[from] FeatureError),
    /// Reference data or encoder tables are unusable
    #[error("Invalid artifact data: {0}")]
    Config(#[from] ConfigError),
    #[error("Bundle load failed: {0}")]
    BundleLoad(String),
    #[error("Bundle decode failed: {0}")]
    BundleDecode(String),
    #[error("Fitted encoding requested but the bundle has no one_hot_encoder")]
    MissingEncoder,
    #[error("Invalid input shape for {component}: expected {expected}, got {actual}")]
    InvalidInputShape {
        component: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("Invalid {component} parameters: {reason}")]
    InvalidParameters {
        component: &'static str,
        reason: String,
    },
}
