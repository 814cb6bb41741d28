//! Numeric Block Scaling

use crate::InferenceError;
use ndarray::{Array1, ArrayView1};
use serde::{Deserialize, Serialize};

/// Fitted transform applied to the numeric block before prediction
pub trait Scaler: Send + Sync {
    /// Transform one numeric block; output has the same width
    fn transform(&self, block: ArrayView1<'_, f64>) -> Result<Array1<f64>, InferenceError>;

    /// Expected block width
    fn width(&self) -> usize;
}

/// Serialized standard scaler parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalerParams {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

/// Z-score scaler: `(x - mean) / scale`
#[derive(Debug, Clone)]
pub struct StandardScaler {
    mean: Array1<f64>,
    scale: Array1<f64>,
}

impl StandardScaler {
    /// Build from fitted parameters; zero scales are treated as 1
    pub fn new(params: ScalerParams) -> Result<Self, InferenceError> {
        if params.mean.len() != params.scale.len() {
            return Err(InferenceError::InvalidParameters {
                component: "scaler",
                reason: format!(
                    "{} means but {} scales",
                    params.mean.len(),
                    params.scale.len()
                ),
            });
        }
        if params.mean.iter().chain(&params.scale).any(|v| !v.is_finite()) {
            return Err(InferenceError::InvalidParameters {
                component: "scaler",
                reason: "non-finite parameter".to_string(),
            });
        }

        let scale = params
            .scale
            .iter()
            .map(|&s| if s == 0.0 { 1.0 } else { s })
            .collect();
        Ok(Self {
            mean: Array1::from(params.mean),
            scale,
        })
    }
}

impl Scaler for StandardScaler {
    fn transform(&self, block: ArrayView1<'_, f64>) -> Result<Array1<f64>, InferenceError> {
        if block.len() != self.mean.len() {
            return Err(InferenceError::InvalidInputShape {
                component: "scaler",
                expected: self.mean.len(),
                actual: block.len(),
            });
        }
        Ok((&block - &self.mean) / &self.scale)
    }

    fn width(&self) -> usize {
        self.mean.len()
    }
}
