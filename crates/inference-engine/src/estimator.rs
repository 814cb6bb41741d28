//! Price Estimator

use crate::InferenceError;
use ndarray::{Array1, ArrayView1};
use serde::{Deserialize, Serialize};

/// Point-estimate regression model
pub trait Estimator: Send + Sync {
    /// Predict from one scaled, concatenated feature row
    fn predict(&self, sample: ArrayView1<'_, f64>) -> Result<f64, InferenceError>;

    /// Expected row width
    fn n_features(&self) -> usize;
}

/// Serialized linear model parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearModelParams {
    pub coefficients: Vec<f64>,
    pub intercept: f64,
}

/// Linear regression: `intercept + coefficients · x`
#[derive(Debug, Clone)]
pub struct LinearRegressor {
    coefficients: Array1<f64>,
    intercept: f64,
}

impl LinearRegressor {
    /// Build from fitted parameters
    pub fn new(params: LinearModelParams) -> Result<Self, InferenceError> {
        if params.coefficients.is_empty() {
            return Err(InferenceError::InvalidParameters {
                component: "estimator",
                reason: "no coefficients".to_string(),
            });
        }
        if !params.intercept.is_finite() || params.coefficients.iter().any(|c| !c.is_finite()) {
            return Err(InferenceError::InvalidParameters {
                component: "estimator",
                reason: "non-finite parameter".to_string(),
            });
        }
        Ok(Self {
            coefficients: Array1::from(params.coefficients),
            intercept: params.intercept,
        })
    }
}

impl Estimator for LinearRegressor {
    fn predict(&self, sample: ArrayView1<'_, f64>) -> Result<f64, InferenceError> {
        if sample.len() != self.coefficients.len() {
            return Err(InferenceError::InvalidInputShape {
                component: "estimator",
                expected: self.coefficients.len(),
                actual: sample.len(),
            });
        }
        Ok(self.intercept + self.coefficients.dot(&sample))
    }

    fn n_features(&self) -> usize {
        self.coefficients.len()
    }
}
